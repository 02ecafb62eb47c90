use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    /// Path to the RON tool configuration file
    pub const TOOL_CONFIG_PATH: &str = "TOOL_CONFIG_PATH";
    /// Credential for the weather tool. Without it the tool is not registered.
    pub const OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";
    /// Override for the todo API base URL (takes precedence over the RON file)
    pub const TODO_API_BASE_URL: &str = "TODO_API_BASE_URL";
    /// Override for the weather API base URL (takes precedence over the RON file)
    pub const WEATHER_API_BASE_URL: &str = "WEATHER_API_BASE_URL";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 9110;
    pub const CONFIG_DIR: &str = "config";
    pub const TOOL_CONFIG_FILE: &str = "tool_config.ron";
    pub const TODO_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
    pub const WEATHER_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
}

/// Returns the absolute path to the fetch-tools crate directory.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the default tool_config.ron path
pub fn default_tool_config_path() -> PathBuf {
    backend_dir()
        .join(defaults::CONFIG_DIR)
        .join(defaults::TOOL_CONFIG_FILE)
}

/// Read an env var, treating empty values as unset
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub tool_config_path: PathBuf,
    pub openweather_api_key: Option<String>,
    pub todo_base_url: Option<String>,
    pub weather_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: defaults::PORT,
            tool_config_path: default_tool_config_path(),
            openweather_api_key: None,
            todo_base_url: None,
            weather_base_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let port = match non_empty_var(env_vars::PORT) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!(
                    "{} is not a valid port ({:?}), using {}",
                    env_vars::PORT,
                    raw,
                    defaults::PORT
                );
                defaults::PORT
            }),
            None => defaults::PORT,
        };

        Self {
            port,
            tool_config_path: non_empty_var(env_vars::TOOL_CONFIG_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_tool_config_path),
            openweather_api_key: non_empty_var(env_vars::OPENWEATHER_API_KEY),
            todo_base_url: non_empty_var(env_vars::TODO_API_BASE_URL),
            weather_base_url: non_empty_var(env_vars::WEATHER_API_BASE_URL),
        }
    }
}
