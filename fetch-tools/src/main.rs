use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use fetch_tools::config::Config;
use fetch_tools::controllers;
use fetch_tools::models::ToolConfig;
use fetch_tools::tools::{self, ToolContext};
use fetch_tools::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("fetch-tools v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    log::info!("Loading tool config from {:?}", config.tool_config_path);
    let tool_config = ToolConfig::load(&config.tool_config_path).with_env_overrides(&config);
    log::info!("Todo API: {}", tool_config.todo.base_url);
    log::info!(
        "Weather API: {} (units: {})",
        tool_config.weather.base_url,
        tool_config.weather.units.as_ref()
    );

    let registry = Arc::new(tools::create_default_registry(&tool_config, &config));
    log::info!("Registered {} tools: {:?}", registry.len(), registry.names());

    let state = web::Data::new(AppState {
        registry,
        context: ToolContext::new(),
    });

    let port = config.port;
    log::info!("Listening on http://0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(controllers::health::config_routes)
            .configure(controllers::tools::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
