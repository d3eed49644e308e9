//! Flutter-facing bindings for the QuickNote core.

pub mod api;
