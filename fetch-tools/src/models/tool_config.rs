//! Tool configuration model backed by a RON file.
//!
//! Holds the upstream endpoints and request timeouts for each fetch tool.
//! Loaded from `config/tool_config.ron`; environment overrides are applied on
//! top by [`ToolConfig::with_env_overrides`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strum::{AsRefStr, EnumString};
use url::Url;

use crate::config::{defaults, Config};

/// Unit system requested from the weather API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Units {
    /// Kelvin
    Standard,
    /// Celsius
    #[default]
    Metric,
    /// Fahrenheit
    Imperial,
}

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub todo: TodoApiConfig,
    #[serde(default)]
    pub weather: WeatherApiConfig,
}

/// JSONPlaceholder todo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoApiConfig {
    #[serde(default = "default_todo_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// OpenWeatherMap current-weather endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub units: Units,
}

fn default_todo_base_url() -> String { defaults::TODO_API_BASE_URL.to_string() }
fn default_weather_base_url() -> String { defaults::WEATHER_API_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { defaults::REQUEST_TIMEOUT_SECS }

impl Default for TodoApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_todo_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_secs: default_timeout_secs(),
            units: Units::default(),
        }
    }
}

impl TodoApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl WeatherApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Trim a trailing slash and fall back to `default` if `raw` is not an http(s) URL.
fn sanitize_base_url(raw: &str, default: &str, label: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => trimmed.to_string(),
        Ok(url) => {
            log::warn!(
                "{} base URL has unsupported scheme '{}' — using {}",
                label,
                url.scheme(),
                default
            );
            default.to_string()
        }
        Err(e) => {
            log::warn!("{} base URL {:?} is invalid ({}) — using {}", label, raw, e, default);
            default.to_string()
        }
    }
}

impl ToolConfig {
    /// Load from `path`, falling back to `Default` on any error.
    pub fn load(path: &Path) -> Self {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => match ron::from_str::<ToolConfig>(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse {:?}: {} — using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::debug!("Could not read {:?} ({}), using defaults", path, e);
                Self::default()
            }
        };
        config.sanitized()
    }

    /// Apply base URL overrides from the environment config.
    pub fn with_env_overrides(mut self, config: &Config) -> Self {
        if let Some(url) = &config.todo_base_url {
            self.todo.base_url = url.clone();
        }
        if let Some(url) = &config.weather_base_url {
            self.weather.base_url = url.clone();
        }
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        self.todo.base_url =
            sanitize_base_url(&self.todo.base_url, defaults::TODO_API_BASE_URL, "Todo API");
        self.weather.base_url = sanitize_base_url(
            &self.weather.base_url,
            defaults::WEATHER_API_BASE_URL,
            "Weather API",
        );
        if self.todo.timeout_secs == 0 {
            log::warn!("Todo API timeout of 0s is not allowed, using default");
            self.todo.timeout_secs = defaults::REQUEST_TIMEOUT_SECS;
        }
        if self.weather.timeout_secs == 0 {
            log::warn!("Weather API timeout of 0s is not allowed, using default");
            self.weather.timeout_secs = defaults::REQUEST_TIMEOUT_SECS;
        }
        self
    }

    /// Serialize to pretty RON and write to `path`.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config dir: {}", e))?;
        }
        let pretty = ron::ser::PrettyConfig::default();
        let content = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| format!("Failed to serialize tool config: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write {:?}: {}", path, e))?;
        Ok(())
    }
}
