//! User service - cache-aside access to both user lists.

use std::sync::Arc;

use crate::cache::{CacheError, CacheRegistry};
use crate::database::{UserDetails, UserDetailsRepository};

use super::{StaticUserSource, User};

/// Cache holding the static user list.
pub const USERS_CACHE: &str = "users";

/// Cache holding the stored user details.
pub const USER_DETAILS_CACHE: &str = "user_details";

/// Serves both user lists through the cache registry.
///
/// Each list lives under its own cache name with the single key `()`. Lists
/// are shared as `Arc` snapshots, so a cache hit never copies the records.
#[derive(Clone)]
pub struct UserService {
    cache: CacheRegistry,
    source: Arc<StaticUserSource>,
    details: Arc<dyn UserDetailsRepository>,
}

impl UserService {
    pub fn new(
        cache: CacheRegistry,
        source: Arc<StaticUserSource>,
        details: Arc<dyn UserDetailsRepository>,
    ) -> Self {
        Self {
            cache,
            source,
            details,
        }
    }

    /// The static user list. Slow on a miss, never fails to compute.
    pub async fn find_all(&self) -> Result<Arc<Vec<User>>, CacheError> {
        let source = Arc::clone(&self.source);
        self.cache
            .fetch(USERS_CACHE, (), async move {
                anyhow::Ok(Arc::new(source.list().await))
            })
            .await
    }

    /// All stored user details. Storage errors are returned and not cached.
    pub async fn user_details(&self) -> Result<Arc<Vec<UserDetails>>, CacheError> {
        let details = Arc::clone(&self.details);
        self.cache
            .fetch(USER_DETAILS_CACHE, (), async move {
                let rows = details.find_all().await?;
                anyhow::Ok(Arc::new(rows))
            })
            .await
    }
}
