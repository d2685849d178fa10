//! Cache errors.

use std::sync::Arc;

use thiserror::Error;

/// Errors returned by the cache registry and cache-aside lookups.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// A cache name was requested with key/value types other than the ones
    /// it was registered with.
    #[error("cache '{name}' is registered as {found}, requested as {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The wrapped computation failed. Nothing was stored.
    #[error("cache '{name}' computation failed: {error}")]
    Compute {
        name: String,
        error: Arc<anyhow::Error>,
    },
}

impl CacheError {
    /// The original computation error, if this is a compute failure.
    #[allow(dead_code)]
    pub fn compute_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Compute { error, .. } => Some(error),
            Self::TypeMismatch { .. } => None,
        }
    }
}
