pub mod tool_config;

pub use tool_config::{TodoApiConfig, ToolConfig, Units, WeatherApiConfig};
