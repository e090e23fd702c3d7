//! Migration CLI tool.
//!
//! ```bash
//! migration up
//! migration down --steps 1
//! migration steps --steps -2
//! migration version
//! ```
//!
//! The database is taken from `DB_DRIVER` / `DB_DSN`, as for the server.

use std::env;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use blog_infra::database::{self, DatabaseConfig, migrate};

#[derive(Debug, Parser)]
#[command(name = "migration")]
#[command(about = "Apply or revert the blog schema migrations", long_about = None)]
struct Cli {
    /// Seconds to wait for the database connection
    #[arg(long, global = true, default_value_t = 5)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Revert all migrations, or only the last N
    Down {
        #[arg(long, default_value_t = 0)]
        steps: u32,
    },
    /// Move N migrations up (positive) or down (negative)
    Steps {
        #[arg(long, allow_negative_numbers = true)]
        steps: i32,
    },
    /// Print the current version and dirty flag
    Version,
}

fn database_config(timeout: Duration) -> DatabaseConfig {
    let get_or = |key: &str, default: &str| {
        env::var(key)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    DatabaseConfig {
        driver: get_or("DB_DRIVER", "sqlite"),
        dsn: get_or("DB_DSN", "sqlite://tmp/app.db?mode=rwc"),
        max_connections: 1,
        min_connections: 1,
        connect_timeout: timeout,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout);
    let config = database_config(timeout);

    let db = tokio::time::timeout(timeout, database::connect(&config))
        .await
        .context("timed out connecting to database")?
        .context("failed to connect database")?;

    match cli.command {
        Command::Up => {
            migrate::migrate_up(&db).await.context("migrate up failed")?;
            println!("migrations applied");
        }
        Command::Down { steps } => {
            if steps > 0 {
                let steps = i32::try_from(steps).context("--steps is too large")?;
                migrate::migrate_steps(&db, -steps)
                    .await
                    .context("migrate steps failed")?;
            } else {
                migrate::migrate_down(&db)
                    .await
                    .context("migrate down failed")?;
            }
            println!("migrations rolled back");
        }
        Command::Steps { steps } => {
            if steps == 0 {
                bail!("steps command requires --steps to be non-zero");
            }

            let before = migrate::schema_version(&db)
                .await
                .context("failed to fetch current version")?;
            if before.dirty {
                bail!("cannot run steps: database is in dirty state");
            }

            migrate::migrate_steps(&db, steps)
                .await
                .context("migrate steps failed")?;

            let after = migrate::schema_version(&db)
                .await
                .context("failed to fetch updated version")?;
            if after.dirty {
                bail!("migration ended in dirty state");
            }

            if before.version == after.version {
                println!("no migrations applied");
            } else {
                println!(
                    "migrated from version {} to {}",
                    before.version, after.version
                );
            }
        }
        Command::Version => {
            let version = migrate::schema_version(&db)
                .await
                .context("fetching migration version failed")?;
            println!("version={} dirty={}", version.version, version.dirty);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("migration").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse(&["up"]).command, Command::Up);
        assert_eq!(parse(&["version"]).command, Command::Version);
        assert_eq!(parse(&["down"]).command, Command::Down { steps: 0 });
        assert_eq!(parse(&["down", "--steps", "2"]).command, Command::Down { steps: 2 });
    }

    #[test]
    fn test_steps_accepts_negative_numbers() {
        assert_eq!(
            parse(&["steps", "--steps", "-1"]).command,
            Command::Steps { steps: -1 }
        );
        assert_eq!(
            parse(&["steps", "--steps", "3"]).command,
            Command::Steps { steps: 3 }
        );
        assert!(Cli::try_parse_from(["migration", "steps"]).is_err());
    }

    #[test]
    fn test_timeout_defaults_to_five_seconds() {
        assert_eq!(parse(&["up"]).timeout, 5);
        assert_eq!(parse(&["--timeout", "30", "version"]).timeout, 30);
        assert_eq!(parse(&["version", "--timeout", "1"]).timeout, 1);
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["migration", "redo"]).is_err());
    }
}
