//! Core use-case services.
//!
//! # Responsibility
//! - Own the canonical note collection and orchestrate repository writes.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_list;
