use actix_web::{web, HttpResponse, Responder};
use fetch_tools_types::{FunctionSpec, ToolCall, ToolFailure};
use serde_json::Value;

use crate::tools::ToolResult;
use crate::AppState;

/// Header naming the failure kind when a tool call did not succeed
pub const TOOL_ERROR_HEADER: &str = "X-Tool-Error";

/// Tool output is sent as-is; success and failure are both 200.
fn tool_response(result: ToolResult) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    response.content_type("application/json");
    if let Some(kind) = result.error_kind() {
        response.insert_header((TOOL_ERROR_HEADER, kind.to_string()));
    }
    response.body(result.content)
}

/// List tool definitions as function specs
async fn list_tools(data: web::Data<AppState>) -> impl Responder {
    let specs: Vec<FunctionSpec> = data
        .registry
        .definitions()
        .iter()
        .map(|d| d.to_function_spec())
        .collect();
    HttpResponse::Ok().json(specs)
}

/// Invoke a tool by name with the request body as its arguments
async fn invoke_tool(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    let name = path.into_inner();

    let params = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(params) => params,
            Err(e) => {
                log::warn!("Invalid JSON body for tool '{}': {}", name, e);
                return tool_response(ToolResult::failure(ToolFailure::invalid_input(format!(
                    "Request body is not valid JSON: {}",
                    e
                ))));
            }
        }
    };

    tool_response(data.registry.execute(&name, params, &data.context).await)
}

/// Invoke a tool from an LLM-style function call.
///
/// The body is decoded here rather than through `web::Json` so that a
/// malformed call still answers with an envelope.
async fn call_tool(data: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let call = match serde_json::from_slice::<ToolCall>(&body) {
        Ok(call) => call,
        Err(e) => {
            log::warn!("Invalid tool call body: {}", e);
            return tool_response(ToolResult::failure(ToolFailure::invalid_input(format!(
                "Request body is not a valid tool call: {}",
                e
            ))));
        }
    };

    tool_response(data.registry.execute_call(&call, &data.context).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tools")
            .route("", web::get().to(list_tools))
            .route("/call", web::post().to(call_tool))
            .route("/{name}", web::post().to(invoke_tool)),
    );
}
