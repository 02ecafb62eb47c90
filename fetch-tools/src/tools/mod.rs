pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::{Tool, ToolRegistry};
pub use types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};

use crate::config::{env_vars, Config};
use crate::models::ToolConfig;
use std::sync::Arc;

/// Build the registry of built-in tools.
///
/// The weather tool needs a credential and is skipped when none is configured.
pub fn create_default_registry(tool_config: &ToolConfig, config: &Config) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(builtin::TodoTool::new(tool_config.todo.clone())));

    match &config.openweather_api_key {
        Some(key) => registry.register(Arc::new(builtin::WeatherTool::new(
            tool_config.weather.clone(),
            key.clone(),
        ))),
        None => log::warn!(
            "{} not set, {} will not be available",
            env_vars::OPENWEATHER_API_KEY,
            builtin::weather::TOOL_NAME
        ),
    }

    registry
}
