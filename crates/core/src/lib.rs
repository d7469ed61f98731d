//! Shared domain primitives for the anime catalog.
//!
//! Holds the identifier type, the domain error taxonomy, and small
//! utilities used by both the storage layer and the HTTP layer.

pub mod error;
pub mod hashing;
pub mod types;
