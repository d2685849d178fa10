//! Cache module - Named caches over Moka.
//!
//! ## Architecture
//!
//! - `CacheRegistry` - Registry of named caches, created lazily by name
//! - `TypedCache` - A single named cache with a cache-aside `fetch`
//!
//! Caches hold values until they are cleared. There is no capacity bound and
//! no per-entry expiry; clearing is driven by [`crate::invalidation`].
//!
//! ## Usage
//!
//! ```rust
//! let registry = CacheRegistry::new();
//!
//! // Computes on the first call, served from the cache afterwards
//! let users = registry
//!     .fetch("users", (), async { anyhow::Ok(Arc::new(load_users().await?)) })
//!     .await?;
//!
//! // Everything is recomputed on the next lookup
//! registry.clear_all();
//! ```

mod error;
mod registry;
mod typed;

pub use error::CacheError;
pub use registry::CacheRegistry;
pub use typed::TypedCache;
