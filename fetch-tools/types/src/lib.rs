//! Shared types for the fetch tools and their RPC clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::AsRefStr;

// =====================================================
// Error Envelope
// =====================================================

/// Failure half of a tool call.
///
/// Serializes as `{"error": <kind>, "message": <text>}`, with `status_code`
/// added for HTTP failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(tag = "error")]
pub enum ToolFailure {
    /// Parameters rejected before any network call
    #[serde(rename = "InvalidInput")]
    #[strum(serialize = "InvalidInput")]
    InvalidInput { message: String },

    #[serde(rename = "APITimeoutError")]
    #[strum(serialize = "APITimeoutError")]
    ApiTimeout { message: String },

    #[serde(rename = "APIConnectionError")]
    #[strum(serialize = "APIConnectionError")]
    ApiConnection { message: String },

    /// Upstream answered with a non-2xx status
    #[serde(rename = "APIHttpError")]
    #[strum(serialize = "APIHttpError")]
    ApiHttp { message: String, status_code: u16 },

    /// 2xx body that is not JSON
    #[serde(rename = "JSONDecodeError")]
    #[strum(serialize = "JSONDecodeError")]
    JsonDecode { message: String },

    /// 2xx body that is JSON, but not an object
    #[serde(rename = "InvalidResponseFormat")]
    #[strum(serialize = "InvalidResponseFormat")]
    InvalidResponseFormat { message: String },

    #[serde(rename = "InternalToolError")]
    #[strum(serialize = "InternalToolError")]
    InternalTool { message: String },
}

impl ToolFailure {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn api_timeout(message: impl Into<String>) -> Self {
        Self::ApiTimeout {
            message: message.into(),
        }
    }

    pub fn api_connection(message: impl Into<String>) -> Self {
        Self::ApiConnection {
            message: message.into(),
        }
    }

    pub fn api_http(status_code: u16, message: impl Into<String>) -> Self {
        Self::ApiHttp {
            message: message.into(),
            status_code,
        }
    }

    pub fn json_decode(message: impl Into<String>) -> Self {
        Self::JsonDecode {
            message: message.into(),
        }
    }

    pub fn invalid_response_format(message: impl Into<String>) -> Self {
        Self::InvalidResponseFormat {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalTool {
            message: message.into(),
        }
    }

    /// The wire name of this failure, e.g. `"APIHttpError"`
    pub fn kind(&self) -> &str {
        self.as_ref()
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message }
            | Self::ApiTimeout { message }
            | Self::ApiConnection { message }
            | Self::ApiHttp { message, .. }
            | Self::JsonDecode { message }
            | Self::InvalidResponseFormat { message }
            | Self::InternalTool { message } => message,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiHttp { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Encode as the JSON envelope handed back to the caller.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"error":"InternalToolError","message":"Failed to encode error envelope."}"#
                .to_string()
        })
    }
}

impl std::fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code() {
            Some(code) => write!(f, "{} ({}): {}", self.kind(), code, self.message()),
            None => write!(f, "{}: {}", self.kind(), self.message()),
        }
    }
}

// =====================================================
// Fetch Result
// =====================================================

/// Outcome of one fetch helper call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Upstream body, exactly as received
    Success(String),
    Failure(ToolFailure),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn failure(&self) -> Option<&ToolFailure> {
        match self {
            FetchResult::Success(_) => None,
            FetchResult::Failure(failure) => Some(failure),
        }
    }

    /// The single JSON string returned across the tool boundary.
    pub fn into_json(self) -> String {
        match self {
            FetchResult::Success(body) => body,
            FetchResult::Failure(failure) => failure.to_json(),
        }
    }

    /// Classify a string previously produced by [`FetchResult::into_json`].
    ///
    /// An object whose `error` field names a known failure kind is read back
    /// as a failure; any other object is a success payload.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        let tagged = value.get("error").map(Value::is_string).unwrap_or(false);
        if tagged {
            if let Ok(failure) = serde_json::from_value::<ToolFailure>(value) {
                return Ok(FetchResult::Failure(failure));
            }
        }
        Ok(FetchResult::Success(text.to_string()))
    }
}

impl From<Result<String, ToolFailure>> for FetchResult {
    fn from(result: Result<String, ToolFailure>) -> Self {
        match result {
            Ok(body) => FetchResult::Success(body),
            Err(failure) => FetchResult::Failure(failure),
        }
    }
}

// =====================================================
// RPC Types
// =====================================================

/// A function call as emitted by an LLM: a tool name plus its arguments.
///
/// `arguments` may be a JSON object or a JSON-encoded string of one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Arguments as a JSON value, decoding the string form if needed.
    pub fn arguments_value(&self) -> Result<Value, ToolFailure> {
        match &self.arguments {
            Value::Null => Ok(Value::Object(Default::default())),
            Value::String(raw) if raw.trim().is_empty() => Ok(Value::Object(Default::default())),
            Value::String(raw) => serde_json::from_str(raw).map_err(|e| {
                ToolFailure::invalid_input(format!(
                    "Arguments for '{}' are not valid JSON: {}",
                    self.name, e
                ))
            }),
            other => Ok(other.clone()),
        }
    }
}

/// Tool description in the shape LLM function-calling APIs expect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_failure_envelope() {
        let failure = ToolFailure::api_http(404, "API request failed with HTTP status 404.");
        let value: Value = serde_json::from_str(&failure.to_json()).unwrap();

        assert_eq!(value["error"], "APIHttpError");
        assert_eq!(value["status_code"], 404);
        assert_eq!(value["message"], "API request failed with HTTP status 404.");
    }

    #[test]
    fn test_envelope_omits_status_code_for_other_kinds() {
        let value: Value =
            serde_json::from_str(&ToolFailure::invalid_input("bad id").to_json()).unwrap();

        assert_eq!(value, json!({"error": "InvalidInput", "message": "bad id"}));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ToolFailure::api_timeout("t").kind(), "APITimeoutError");
        assert_eq!(ToolFailure::api_connection("c").kind(), "APIConnectionError");
        assert_eq!(ToolFailure::json_decode("j").kind(), "JSONDecodeError");
        assert_eq!(
            ToolFailure::invalid_response_format("f").kind(),
            "InvalidResponseFormat"
        );
        assert_eq!(ToolFailure::internal("i").kind(), "InternalToolError");
    }

    #[test]
    fn test_success_passes_body_through() {
        let body = "{ \"id\" : 1 }";
        assert_eq!(FetchResult::Success(body.to_string()).into_json(), body);
    }

    #[test]
    fn test_from_json_reads_failures_back() {
        let text = ToolFailure::api_http(500, "boom").to_json();
        let result = FetchResult::from_json(&text).unwrap();
        assert_eq!(result.failure().and_then(ToolFailure::status_code), Some(500));

        let ok = FetchResult::from_json(r#"{"id":1,"title":"x","completed":false}"#).unwrap();
        assert!(ok.is_success());
    }

    #[test]
    fn test_from_json_unknown_error_kind_is_payload() {
        let text = r#"{"error":"quota","detail":"upstream field"}"#;
        assert!(FetchResult::from_json(text).unwrap().is_success());
    }

    #[test]
    fn test_tool_call_string_arguments() {
        let call = ToolCall::new("get_todo_data", json!("{\"todo_id\": 3}"));
        assert_eq!(call.arguments_value().unwrap(), json!({"todo_id": 3}));

        let empty = ToolCall::new("get_todo_data", Value::Null);
        assert_eq!(empty.arguments_value().unwrap(), json!({}));

        let broken = ToolCall::new("get_todo_data", json!("{todo_id"));
        assert_eq!(broken.arguments_value().unwrap_err().kind(), "InvalidInput");
    }
}
