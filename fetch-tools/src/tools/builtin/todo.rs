use crate::fetch::{self, validate, FetchRequest, FetchResult};
use crate::models::TodoApiConfig;
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

pub const TOOL_NAME: &str = "get_todo_data";
const ID_FIELD: &str = "todo_id";

/// Fetch one todo item from JSONPlaceholder.
///
/// Returns the raw JSON object on success, or an error envelope.
pub async fn get_todo_data(client: &reqwest::Client, config: &TodoApiConfig, todo_id: u64) -> String {
    fetch_todo(client, config, todo_id).await.into_json()
}

pub async fn fetch_todo(client: &reqwest::Client, config: &TodoApiConfig, todo_id: u64) -> FetchResult {
    log::info!("Executing tool {} (id: {})", TOOL_NAME, todo_id);

    if todo_id == 0 {
        let failure = validate::invalid_positive_integer(ID_FIELD);
        log::warn!("{} rejected input: {}", TOOL_NAME, failure);
        return FetchResult::Failure(failure);
    }

    let url = format!("{}/todos/{}", config.base_url, todo_id);
    fetch::fetch_json_object(client, FetchRequest::get(&url, config.timeout())).await
}

/// Todo lookup tool
pub struct TodoTool {
    definition: ToolDefinition,
    config: TodoApiConfig,
}

impl TodoTool {
    pub fn new(config: TodoApiConfig) -> Self {
        let mut properties = HashMap::new();
        properties.insert(
            ID_FIELD.to_string(),
            PropertySchema::new(
                "integer",
                "The ID of the todo item to fetch (e.g., 1, 2, 3).",
            ),
        );

        TodoTool {
            definition: ToolDefinition {
                name: TOOL_NAME.to_string(),
                description: "Fetches data for a specific todo item by its ID from JSONPlaceholder. Returns raw JSON string.".to_string(),
                input_schema: ToolInputSchema {
                    schema_type: "object".to_string(),
                    properties,
                    required: vec![ID_FIELD.to_string()],
                },
                group: ToolGroup::Web,
            },
            config,
        }
    }
}

impl Default for TodoTool {
    fn default() -> Self {
        Self::new(TodoApiConfig::default())
    }
}

#[async_trait]
impl Tool for TodoTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let todo_id = match validate::positive_integer(&params, ID_FIELD) {
            Ok(id) => id,
            Err(failure) => {
                log::warn!("{} rejected params {}: {}", TOOL_NAME, params, failure);
                return ToolResult::failure(failure);
            }
        };

        fetch_todo(&context.http_client, &self.config, todo_id).await.into()
    }
}
