//! Error types for shortq-core

use thiserror::Error;

/// Top-level error type for shortq-core
#[derive(Error, Debug)]
pub enum ShortqError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown department: {0}")]
    UnknownDepartment(String),
}

/// Errors from the backing pattern/rule/cache stores
///
/// The engines never propagate these to callers of `interpret`/`validate`;
/// they degrade to defaults and log. The `try_*` cache methods expose them
/// so embedders can tell a store outage from a plain miss.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}
