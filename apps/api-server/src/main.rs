//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;

/// Seconds in-flight requests get to finish after SIGINT/SIGTERM.
const SHUTDOWN_TIMEOUT_SECS: u64 = 5;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let log_level = telemetry::init_telemetry(&config.telemetry())?;

    // Build application state
    let state = AppState::new(&config, log_level).await?;

    tracing::info!(
        env = %config.env,
        "Starting Blog API Server on {}:{}",
        config.host,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    tracing::info!("Server exited gracefully");
    Ok(())
}
