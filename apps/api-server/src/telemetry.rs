//! Telemetry initialization - tracing subscriber with a reloadable level.

use tracing_subscriber::{
    EnvFilter, Registry, filter::LevelFilter, layer::SubscriberExt, reload,
    util::SubscriberInitExt,
};

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Service name attached to the startup event.
    pub service_name: String,
    /// Initial level, as configured (`LOG_LEVEL`).
    pub level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LogLevelError {
    #[error("invalid log level {0:?}")]
    Invalid(String),

    #[error("logger not initialised")]
    Unavailable,
}

/// Parse a level name. Empty input means `debug`.
pub fn parse_level(level: &str) -> Result<LevelFilter, LogLevelError> {
    match level.trim().to_lowercase().as_str() {
        "" | "debug" => Ok(LevelFilter::DEBUG),
        "trace" => Ok(LevelFilter::TRACE),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        _ => Err(LogLevelError::Invalid(level.to_string())),
    }
}

/// Lowercase name of a level, as reported by the admin API.
pub fn level_name(level: LevelFilter) -> String {
    level.to_string().to_lowercase()
}

/// Runtime handle on the global level filter.
///
/// Cloning is cheap; every clone controls the same filter.
#[derive(Clone)]
pub struct LogLevelController {
    handle: reload::Handle<LevelFilter, Registry>,
}

impl LogLevelController {
    /// Create a controller together with the layer it controls. The layer
    /// must sit directly on a [`Registry`] and stay alive for the controller
    /// to have any effect.
    pub fn new(initial: LevelFilter) -> (Self, reload::Layer<LevelFilter, Registry>) {
        let (layer, handle) = reload::Layer::new(initial);
        (Self { handle }, layer)
    }

    pub fn current(&self) -> Result<LevelFilter, LogLevelError> {
        self.handle
            .clone_current()
            .ok_or(LogLevelError::Unavailable)
    }

    /// Replace the active level and return it.
    pub fn set(&self, level: &str) -> Result<LevelFilter, LogLevelError> {
        let parsed = parse_level(level)?;
        self.handle
            .modify(|filter| *filter = parsed)
            .map_err(|_| LogLevelError::Unavailable)?;
        Ok(parsed)
    }
}

/// Initialize the global subscriber and return the level controller.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<LogLevelController, LogLevelError> {
    let initial = parse_level(&config.level)?;
    let (controller, level_layer) = LogLevelController::new(initial);

    // Per-target directives still apply under the global level.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trace,sqlx=warn,sea_orm_migration=info"));

    let registry = tracing_subscriber::registry()
        .with(level_layer)
        .with(env_filter);

    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        level = %level_name(initial),
        "Telemetry initialized"
    );

    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" INFO ").unwrap(), LevelFilter::INFO);
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
        assert!(matches!(
            parse_level("verbose"),
            Err(LogLevelError::Invalid(level)) if level == "verbose"
        ));
    }

    #[test]
    fn test_level_name_is_lowercase() {
        assert_eq!(level_name(LevelFilter::WARN), "warn");
        assert_eq!(level_name(LevelFilter::OFF), "off");
    }

    #[test]
    fn test_controller_updates_level() {
        let (controller, layer) = LogLevelController::new(LevelFilter::INFO);
        let _subscriber = tracing_subscriber::registry().with(layer);

        assert_eq!(controller.current().unwrap(), LevelFilter::INFO);
        assert_eq!(controller.set("error").unwrap(), LevelFilter::ERROR);
        assert_eq!(controller.clone().current().unwrap(), LevelFilter::ERROR);

        assert!(controller.set("loud").is_err());
        assert_eq!(controller.current().unwrap(), LevelFilter::ERROR);
    }

    #[test]
    fn test_controller_without_layer_is_unavailable() {
        let (controller, layer) = LogLevelController::new(LevelFilter::INFO);
        drop(layer);

        assert!(matches!(controller.current(), Err(LogLevelError::Unavailable)));
        assert!(matches!(controller.set("info"), Err(LogLevelError::Unavailable)));
    }
}
