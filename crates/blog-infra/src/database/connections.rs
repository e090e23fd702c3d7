use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Errors raised while interpreting the database configuration.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("database driver is required")]
    MissingDriver,

    #[error("unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Storage backend selected by the `DB_DRIVER` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Sqlite,
    Postgres,
    Memory,
}

impl Driver {
    /// Normalize a configured driver name.
    pub fn parse(name: &str) -> Result<Self, DatabaseError> {
        match name.trim().to_lowercase().as_str() {
            "" => Err(DatabaseError::MissingDriver),
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            "postgres" | "postgresql" | "pgx" => Ok(Driver::Postgres),
            "memory" | "inmemory" | "in-memory" => Ok(Driver::Memory),
            _ => Err(DatabaseError::UnsupportedDriver(name.trim().to_string())),
        }
    }

    pub fn is_sql(self) -> bool {
        !matches!(self, Driver::Memory)
    }
}

/// Configuration for the post database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Driver name as configured (`sqlite`, `postgres`, `memory`, ...).
    pub driver: String,
    /// Connection URL, e.g. `sqlite://tmp/app.db?mode=rwc`.
    pub dsn: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn driver(&self) -> Result<Driver, DatabaseError> {
        Driver::parse(&self.driver)
    }
}

/// Open a connection pool and verify it with a ping.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DatabaseError> {
    let driver = config.driver()?;
    if !driver.is_sql() {
        return Err(DatabaseError::UnsupportedDriver(config.driver.clone()));
    }

    tracing::info!(driver = ?driver, "Initializing database connection...");

    let opts = ConnectOptions::new(&config.dsn)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let db = Database::connect(opts).await?;
    db.ping().await?;

    tracing::info!(
        "Database connected (pool: {}..{})",
        config.min_connections,
        config.max_connections
    );

    Ok(db)
}
