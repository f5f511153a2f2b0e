//! # jsonstore-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port trait defined in `jsonstore-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Make sure the `json_data` table exists
//! - Map between domain types and database rows, including the JSON text
//!   encoding of record payloads
//!
//! ## Dependency rule
//! Depends on `jsonstore-app` (for port traits) and `jsonstore-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod record_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use record_repo::SqliteRecordRepository;
