//! Static in-memory user list with simulated latency.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::debug;

use super::User;

/// Default simulated latency of [`StaticUserSource::list`].
pub const DEFAULT_LATENCY: Duration = Duration::from_secs(3);

/// A fixed list of four users that is slow to read.
///
/// Every call to [`list`](Self::list) waits out the configured latency before
/// answering, which makes cache hits and misses easy to tell apart.
#[derive(Debug)]
pub struct StaticUserSource {
    users: Vec<User>,
    latency: Duration,
    loads: AtomicU64,
}

impl StaticUserSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            users: vec![
                User::new("user_1", 20),
                User::new("user_2", 76),
                User::new("user_3", 54),
                User::new("user_4", 30),
            ],
            latency,
            loads: AtomicU64::new(0),
        }
    }

    /// Read the list. Never fails.
    pub async fn list(&self) -> Vec<User> {
        let load = self.loads.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Loading static users (load #{}, latency {:?})", load, self.latency);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.users.clone()
    }

    /// Number of times [`list`](Self::list) has been called.
    #[allow(dead_code)]
    pub fn loads(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }
}

impl Default for StaticUserSource {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}
