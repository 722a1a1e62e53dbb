//! Command implementations for `waypost-discover`.

/// Controller discovery: scan, then write the generated registry.
pub mod discover;
