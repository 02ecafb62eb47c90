use crate::tools::types::{ToolContext, ToolDefinition, ToolResult};
use async_trait::async_trait;
use fetch_tools_types::{ToolCall, ToolFailure};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A callable exposed to the agent framework
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Run the tool. Must not panic; every failure is reported in the result.
    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult;

    fn name(&self) -> String {
        self.definition().name
    }
}

/// Tools keyed by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name();
        if self.tools.insert(name.clone(), tool).is_some() {
            log::warn!("Tool '{}' registered twice, keeping the latest", name);
        } else {
            log::debug!("Registered tool '{}'", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Definitions of all registered tools, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Execute a tool by name. Unknown names yield an `InvalidInput` envelope.
    pub async fn execute(&self, name: &str, params: Value, context: &ToolContext) -> ToolResult {
        match self.tools.get(name) {
            Some(tool) => tool.execute(params, context).await,
            None => {
                log::warn!("Call to unknown tool '{}'", name);
                ToolResult::failure(ToolFailure::invalid_input(format!(
                    "Unknown tool '{}'. Available tools: {}",
                    name,
                    self.names().join(", ")
                )))
            }
        }
    }

    /// Execute an LLM function call, decoding string-encoded arguments first.
    pub async fn execute_call(&self, call: &ToolCall, context: &ToolContext) -> ToolResult {
        match call.arguments_value() {
            Ok(params) => self.execute(&call.name, params, context).await,
            Err(failure) => {
                log::warn!("Rejected call to '{}': {}", call.name, failure);
                ToolResult::failure(failure)
            }
        }
    }
}
