//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by controller and editors.
//! - Define the persisted JSON shape of one note.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard removal from the collection.

pub mod note;
