//! # jsonstore-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RecordRepository` — single-statement CRUD over the record table
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RecordService` — create, get, list, update, delete
//! - Turn store-level outcomes (affected rows, missing rows) into domain errors
//!
//! ## Dependency rule
//! Depends on `jsonstore-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
