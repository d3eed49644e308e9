//! Note search.
//!
//! # Responsibility
//! - Filter the in-memory collection by a free-text query.
//! - Keep matching rules in one place for controller and FFI callers.

pub mod filter;
