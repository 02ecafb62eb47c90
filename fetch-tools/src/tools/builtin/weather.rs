use crate::fetch::{self, validate, FetchRequest, FetchResult};
use crate::models::WeatherApiConfig;
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

pub const TOOL_NAME: &str = "get_current_weather";
const CITY_FIELD: &str = "city";

/// Fetch current weather for `city` from OpenWeatherMap.
///
/// The API key travels as the `appid` query parameter.
pub async fn get_current_weather(
    client: &reqwest::Client,
    config: &WeatherApiConfig,
    api_key: &str,
    city: &str,
) -> String {
    fetch_weather(client, config, api_key, city).await.into_json()
}

pub async fn fetch_weather(
    client: &reqwest::Client,
    config: &WeatherApiConfig,
    api_key: &str,
    city: &str,
) -> FetchResult {
    let city = city.trim();
    log::info!("Executing tool {} (city: {:?})", TOOL_NAME, city);

    if city.is_empty() {
        let failure = validate::invalid_non_empty_string(CITY_FIELD);
        log::warn!("{} rejected input: {}", TOOL_NAME, failure);
        return FetchResult::Failure(failure);
    }

    let url = format!("{}/weather", config.base_url);
    let query = [
        ("q", city),
        ("appid", api_key),
        ("units", config.units.as_ref()),
    ];
    fetch::fetch_json_object(
        client,
        FetchRequest::get(&url, config.timeout()).with_query(&query),
    )
    .await
}

/// Current-weather lookup tool
pub struct WeatherTool {
    definition: ToolDefinition,
    config: WeatherApiConfig,
    api_key: String,
}

impl WeatherTool {
    pub fn new(config: WeatherApiConfig, api_key: impl Into<String>) -> Self {
        let mut properties = HashMap::new();
        properties.insert(
            CITY_FIELD.to_string(),
            PropertySchema::new(
                "string",
                "Name of the city to look up, optionally with a country code (e.g. 'Copenhagen' or 'Paris,FR').",
            ),
        );

        WeatherTool {
            definition: ToolDefinition {
                name: TOOL_NAME.to_string(),
                description: format!(
                    "Fetches the current weather for a city from OpenWeatherMap ({} units). Returns raw JSON string.",
                    config.units.as_ref()
                ),
                input_schema: ToolInputSchema {
                    schema_type: "object".to_string(),
                    properties,
                    required: vec![CITY_FIELD.to_string()],
                },
                group: ToolGroup::Web,
            },
            config,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let city = match validate::non_empty_string(&params, CITY_FIELD) {
            Ok(city) => city,
            Err(failure) => {
                log::warn!("{} rejected params {}: {}", TOOL_NAME, params, failure);
                return ToolResult::failure(failure);
            }
        };

        fetch_weather(&context.http_client, &self.config, &self.api_key, &city)
            .await
            .into()
    }
}
