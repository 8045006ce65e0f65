//! Tracing/logging setup shared by embedding hosts.
//!
//! The domain crates only emit `tracing` events; wiring a subscriber is the
//! host's concern and this crate provides the default one.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
