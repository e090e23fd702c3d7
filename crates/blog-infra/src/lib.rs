//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! an in-memory post store and a SQL post store, plus connection setup and
//! the embedded schema migrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All SQL backends enabled
//! - `minimal` - No SQL driver compiled in, in-memory only
//! - `postgres` - PostgreSQL via SeaORM/sqlx
//! - `sqlite` - SQLite via SeaORM/sqlx

pub mod database;

// Re-exports
pub use database::{
    DatabaseConfig, DatabaseError, Dialect, Driver, InMemoryPostRepository, SqlPostRepository,
};
