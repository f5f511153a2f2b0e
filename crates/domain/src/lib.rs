//! # jsonstore-domain
//!
//! Pure domain model for the jsonstore record service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Records** (a name plus an arbitrary JSON payload)
//! - Define the **payload codec** between in-memory JSON values and their
//!   stored text form
//! - Enforce create/update validation rules
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod payload;

pub mod record;
