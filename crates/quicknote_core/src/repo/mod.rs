//! Repository layer over the key-value store.
//!
//! # Responsibility
//! - Expose whole-collection `load_all` / `save_all` contracts.
//! - Isolate JSON encoding and store keys from the controller.
//!
//! # Invariants
//! - Reads reject malformed persisted data instead of masking it.
//! - Writes always replace the full collection under one key.

pub mod note_repo;
