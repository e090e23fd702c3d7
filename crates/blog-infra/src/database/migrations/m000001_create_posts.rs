use sea_orm_migration::prelude::*;

use super::run_script;

const SQLITE_UP: &str = include_str!("../../../migrations/sqlite/000001_create_posts.up.sql");
const SQLITE_DOWN: &str = include_str!("../../../migrations/sqlite/000001_create_posts.down.sql");
const POSTGRES_UP: &str = include_str!("../../../migrations/postgres/000001_create_posts.up.sql");
const POSTGRES_DOWN: &str =
    include_str!("../../../migrations/postgres/000001_create_posts.down.sql");

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        run_script(manager, SQLITE_UP, POSTGRES_UP).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        run_script(manager, SQLITE_DOWN, POSTGRES_DOWN).await
    }
}
