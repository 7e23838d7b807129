//! Day-keyed journal and garden store.

/// Authoritative per-day store over a key-value medium.
pub mod store;
