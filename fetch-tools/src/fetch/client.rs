//! One-shot GET that classifies every outcome into a [`FetchResult`].

use fetch_tools_types::{FetchResult, ToolFailure};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const LOG_EXCERPT_CHARS: usize = 200;
const SUCCESS_EXCERPT_CHARS: usize = 100;

/// A single outbound request. Query values are kept out of log lines since
/// they may carry credentials.
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    pub url: &'a str,
    pub query: &'a [(&'a str, &'a str)],
    pub timeout: Duration,
}

impl<'a> FetchRequest<'a> {
    pub fn get(url: &'a str, timeout: Duration) -> Self {
        Self {
            url,
            query: &[],
            timeout,
        }
    }

    pub fn with_query(mut self, query: &'a [(&'a str, &'a str)]) -> Self {
        self.query = query;
        self
    }
}

/// First `max_chars` characters of `text`, marked when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Human-readable form of a timeout for error messages.
fn describe_timeout(timeout: Duration) -> String {
    if timeout.subsec_nanos() == 0 {
        let secs = timeout.as_secs();
        format!("{} second{}", secs, if secs == 1 { "" } else { "s" })
    } else {
        format!("{} ms", timeout.as_millis())
    }
}

/// Perform the request and fold the outcome into a [`FetchResult`].
///
/// Never panics and never returns an error: every failure becomes an envelope.
pub async fn fetch_json_object(client: &Client, request: FetchRequest<'_>) -> FetchResult {
    let result = try_fetch(client, &request).await;
    match &result {
        Ok(body) => log::info!(
            "Fetch from {} succeeded. Content: {}",
            request.url,
            excerpt(body, SUCCESS_EXCERPT_CHARS)
        ),
        Err(failure) => log::warn!("Fetch from {} failed: {}", request.url, failure),
    }
    result.into()
}

async fn try_fetch(client: &Client, request: &FetchRequest<'_>) -> Result<String, ToolFailure> {
    let mut builder = client.get(request.url).timeout(request.timeout);
    if !request.query.is_empty() {
        builder = builder.query(request.query);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| transport_failure(e, request))?;

    let status = response.status();
    log::debug!("{} responded with status {}", request.url, status);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_failure(e, request))?;

    if !status.is_success() {
        return Err(http_failure(status.as_u16(), &bytes, request.url));
    }

    validate_object_body(&bytes, request.url)
}

/// Map a reqwest error, checking timeout before connection failure.
fn transport_failure(error: reqwest::Error, request: &FetchRequest<'_>) -> ToolFailure {
    // The error's URL includes the query string, which may carry credentials.
    let error = error.without_url();
    if error.is_timeout() {
        return ToolFailure::api_timeout(format!(
            "API request timed out after {}.",
            describe_timeout(request.timeout)
        ));
    }
    if error.is_connect() {
        log::debug!("Connection to {} failed: {}", request.url, error);
        return ToolFailure::api_connection(
            "Failed to connect to the API. Check network or API server.",
        );
    }
    ToolFailure::internal(format!(
        "An unexpected internal error occurred in the tool: {}",
        error
    ))
}

/// Build the `APIHttpError` envelope, pulling the upstream error text in when
/// the body is a JSON object with a `message` or `error` string.
fn http_failure(status_code: u16, body: &[u8], url: &str) -> ToolFailure {
    let text = String::from_utf8_lossy(body);
    log::warn!(
        "HTTP {} from {}. Response: {}",
        status_code,
        url,
        if text.is_empty() {
            "[empty response body]".to_string()
        } else {
            excerpt(&text, LOG_EXCERPT_CHARS)
        }
    );

    let mut message = format!("API request failed with HTTP status {}.", status_code);
    if let Some(upstream) = upstream_error_message(body) {
        message.push_str(" Upstream message: ");
        message.push_str(&excerpt(&upstream, LOG_EXCERPT_CHARS));
    }
    ToolFailure::api_http(status_code, message)
}

fn upstream_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accept the body only if it is UTF-8 JSON with an object at the top level.
fn validate_object_body(body: &[u8], url: &str) -> Result<String, ToolFailure> {
    let decode_failure = || {
        ToolFailure::json_decode(
            "Failed to parse API response as JSON. The response was not valid JSON.",
        )
    };

    let text = match String::from_utf8(body.to_vec()) {
        Ok(text) => text,
        Err(_) => {
            log::warn!("Response from {} is not UTF-8 ({} bytes)", url, body.len());
            return Err(decode_failure());
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(_)) => Ok(text),
        Ok(_) => {
            log::warn!(
                "Response from {} is not a JSON object. Raw text: {}",
                url,
                excerpt(&text, SUCCESS_EXCERPT_CHARS)
            );
            Err(ToolFailure::invalid_response_format(
                "API response was not a JSON object as expected.",
            ))
        }
        Err(e) => {
            log::warn!(
                "Response from {} is not valid JSON ({}). Raw text: {}",
                url,
                e,
                excerpt(&text, LOG_EXCERPT_CHARS)
            );
            Err(decode_failure())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockUpstream, refused_base_url};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    const OBJECT_BODY: &str = "{\n  \"userId\": 1,\n  \"id\": 1,  \"title\": \"delectus aut autem\",\n  \"completed\": false\n}";

    async fn fetch(base_url: &str, path: &str, timeout: Duration) -> FetchResult {
        let url = format!("{}{}", base_url, path);
        fetch_json_object(&Client::new(), FetchRequest::get(&url, timeout)).await
    }

    fn kind(result: &FetchResult) -> &str {
        result.failure().map(ToolFailure::kind).unwrap_or("Success")
    }

    fn mock_router() -> Router {
        Router::new()
            .route("/object", get(|| async { OBJECT_BODY }))
            .route("/array", get(|| async { "[1, 2, 3]" }))
            .route("/scalar", get(|| async { "42" }))
            .route("/html", get(|| async { "<html>not json</html>" }))
            .route("/empty", get(|| async { "" }))
            .route("/binary", get(|| async { vec![0xffu8, 0xfe, 0x7b] }))
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, "{}") }),
            )
            .route(
                "/city",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        r#"{"cod":"404","message":"city not found"}"#,
                    )
                }),
            )
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    OBJECT_BODY
                }),
            )
    }

    #[tokio::test]
    async fn test_object_body_returned_verbatim() {
        let mock = MockUpstream::spawn(mock_router()).await;
        let result = fetch(&mock.base_url, "/object", Duration::from_secs(5)).await;

        assert_eq!(result, FetchResult::Success(OBJECT_BODY.to_string()));
    }

    #[tokio::test]
    async fn test_non_object_json_is_invalid_format() {
        let mock = MockUpstream::spawn(mock_router()).await;

        for path in ["/array", "/scalar"] {
            let result = fetch(&mock.base_url, path, Duration::from_secs(5)).await;
            assert_eq!(kind(&result), "InvalidResponseFormat", "path {}", path);
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let mock = MockUpstream::spawn(mock_router()).await;

        for path in ["/html", "/empty", "/binary"] {
            let result = fetch(&mock.base_url, path, Duration::from_secs(5)).await;
            assert_eq!(kind(&result), "JSONDecodeError", "path {}", path);
        }
    }

    #[tokio::test]
    async fn test_not_found_carries_status_code() {
        let mock = MockUpstream::spawn(mock_router()).await;
        let result = fetch(&mock.base_url, "/missing", Duration::from_secs(5)).await;
        let failure = result.failure().unwrap();

        assert_eq!(failure.kind(), "APIHttpError");
        assert_eq!(failure.status_code(), Some(404));
        assert_eq!(failure.message(), "API request failed with HTTP status 404.");
    }

    #[tokio::test]
    async fn test_http_error_includes_upstream_message() {
        let mock = MockUpstream::spawn(mock_router()).await;

        let city = fetch(&mock.base_url, "/city", Duration::from_secs(5)).await;
        assert!(city.failure().unwrap().message().contains("city not found"));

        let broken = fetch(&mock.base_url, "/broken", Duration::from_secs(5)).await;
        let failure = broken.failure().unwrap();
        assert_eq!(failure.status_code(), Some(500));
        assert!(!failure.message().contains("exploded"));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let mock = MockUpstream::spawn(mock_router()).await;
        let result = fetch(&mock.base_url, "/slow", Duration::from_millis(200)).await;

        assert_eq!(kind(&result), "APITimeoutError");
        assert!(result.failure().unwrap().message().contains("200 ms"));
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let base_url = refused_base_url().await;
        let result = fetch(&base_url, "/object", Duration::from_secs(5)).await;

        assert_eq!(kind(&result), "APIConnectionError");
    }

    #[tokio::test]
    async fn test_malformed_url_is_internal_error() {
        let result = fetch("http://[::1", "/object", Duration::from_secs(5)).await;

        assert_eq!(kind(&result), "InternalToolError");
    }

    #[tokio::test]
    async fn test_every_outcome_is_a_json_object() {
        let mock = MockUpstream::spawn(mock_router()).await;

        for path in ["/object", "/array", "/html", "/missing", "/city", "/broken"] {
            let json = fetch(&mock.base_url, path, Duration::from_secs(5))
                .await
                .into_json();
            let value: Value = serde_json::from_str(&json).unwrap();
            assert!(value.is_object(), "path {} produced {}", path, json);
        }
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("æøå-abc", 3), "æøå...");
        assert_eq!(excerpt("short", 100), "short");
    }

    #[test]
    fn test_describe_timeout() {
        assert_eq!(describe_timeout(Duration::from_secs(10)), "10 seconds");
        assert_eq!(describe_timeout(Duration::from_secs(1)), "1 second");
        assert_eq!(describe_timeout(Duration::from_millis(250)), "250 ms");
    }
}
