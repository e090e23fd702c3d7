//! Post storage: in-memory map or SQL database, plus schema migrations.

mod connections;
mod dialect;
mod memory;
mod sql_repo;

pub mod entity;
pub mod migrate;
mod migrations;

pub use connections::{DatabaseConfig, DatabaseError, Driver, connect};
pub use dialect::Dialect;
pub use memory::InMemoryPostRepository;
pub use migrate::{Migrator, SchemaVersion};
pub use sql_repo::SqlPostRepository;
