//! Schema migrator built on `sea-orm-migration`.

use sea_orm::{DbConn, DbErr};
use sea_orm_migration::{MigrationStatus, MigrationTrait, MigratorTrait};

use super::migrations;

/// Applies the embedded migrations in order.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        migrations::all()
    }
}

/// Current schema version and dirty flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaVersion {
    /// Number of migrations applied without a gap, oldest first.
    pub version: u32,
    /// An applied migration sits after a pending one. Automatic migration
    /// must stop until this is resolved by hand.
    pub dirty: bool,
}

impl SchemaVersion {
    /// Derive the version from the applied flag of each known migration,
    /// oldest first.
    pub fn from_applied<I>(applied: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut version = 0;
        let mut gap = false;
        let mut dirty = false;

        for is_applied in applied {
            match (is_applied, gap) {
                (true, false) => version += 1,
                (true, true) => dirty = true,
                (false, _) => gap = true,
            }
        }

        Self { version, dirty }
    }
}

/// Apply all pending migrations.
pub async fn migrate_up(db: &DbConn) -> Result<(), DbErr> {
    tracing::info!("Applying pending migrations");
    Migrator::up(db, None).await
}

/// Revert all applied migrations.
pub async fn migrate_down(db: &DbConn) -> Result<(), DbErr> {
    tracing::info!("Reverting all migrations");
    Migrator::down(db, None).await
}

/// Move the schema by `steps`: positive applies, negative reverts, zero is a no-op.
///
/// Asking for more steps than are available stops at the first/last migration.
pub async fn migrate_steps(db: &DbConn, steps: i32) -> Result<(), DbErr> {
    tracing::info!(steps, "Migrating by steps");
    match steps {
        0 => Ok(()),
        n if n > 0 => Migrator::up(db, Some(n.unsigned_abs())).await,
        n => Migrator::down(db, Some(n.unsigned_abs())).await,
    }
}

/// Report the current schema version and dirty flag.
pub async fn schema_version(db: &DbConn) -> Result<SchemaVersion, DbErr> {
    let migrations = Migrator::get_migration_with_status(db).await?;
    Ok(SchemaVersion::from_applied(
        migrations
            .iter()
            .map(|m| matches!(m.status(), MigrationStatus::Applied)),
    ))
}
