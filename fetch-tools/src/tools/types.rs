use fetch_tools_types::{FetchResult, FunctionSpec, ToolFailure};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use strum::{AsRefStr, EnumString};

/// JSON-schema description of a single tool parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertySchema {
    pub fn new(schema_type: &str, description: &str) -> Self {
        Self {
            schema_type: schema_type.to_string(),
            description: description.to_string(),
            default: None,
            items: None,
            enum_values: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: HashMap<String, PropertySchema>,
    pub required: Vec<String>,
}

/// Coarse category a tool belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolGroup {
    /// Reads from a remote HTTP API
    Web,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
    pub group: ToolGroup,
}

impl ToolDefinition {
    /// Render as an LLM function-calling entry (`name`, `description`, `parameters`).
    pub fn to_function_spec(&self) -> FunctionSpec {
        FunctionSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: serde_json::to_value(&self.input_schema)
                .unwrap_or_else(|_| json!({"type": "object", "properties": {}})),
        }
    }
}

/// Result of a tool call.
///
/// `content` is always a JSON object string: the upstream payload on success,
/// the error envelope otherwise.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub success: bool,
    pub content: String,
    pub error: Option<ToolFailure>,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        ToolResult {
            success: true,
            content: content.into(),
            error: None,
        }
    }

    pub fn failure(failure: ToolFailure) -> Self {
        ToolResult {
            success: false,
            content: failure.to_json(),
            error: Some(failure),
        }
    }

    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_ref().map(ToolFailure::kind)
    }
}

impl From<FetchResult> for ToolResult {
    fn from(result: FetchResult) -> Self {
        match result {
            FetchResult::Success(body) => ToolResult::success(body),
            FetchResult::Failure(failure) => ToolResult::failure(failure),
        }
    }
}

/// Shared resources handed to every tool call
#[derive(Clone)]
pub struct ToolContext {
    pub http_client: reqwest::Client,
}

impl ToolContext {
    pub fn new() -> Self {
        ToolContext {
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new()
    }
}
