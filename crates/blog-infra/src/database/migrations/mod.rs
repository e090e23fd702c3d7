//! Embedded schema migrations, oldest first.
//!
//! Each migration runs the SQL file matching the connection's backend from
//! `migrations/<dialect>/NNNNNN_<name>.{up,down}.sql`.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

mod m000001_create_posts;

pub(crate) fn all() -> Vec<Box<dyn MigrationTrait>> {
    vec![Box::new(m000001_create_posts::Migration)]
}

/// Run the SQL script for the connection's backend.
pub(crate) async fn run_script(
    manager: &SchemaManager<'_>,
    sqlite: &str,
    postgres: &str,
) -> Result<(), DbErr> {
    let sql = match manager.get_database_backend() {
        DbBackend::Sqlite => sqlite,
        DbBackend::Postgres => postgres,
        other => {
            return Err(DbErr::Migration(format!(
                "unsupported migration backend: {other:?}"
            )));
        }
    };

    manager.get_connection().execute_unprepared(sql).await?;
    Ok(())
}
