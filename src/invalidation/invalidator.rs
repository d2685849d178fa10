//! On-demand and scheduled cache invalidation.

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{ClearSchedule, Clock};
use crate::cache::CacheRegistry;

/// Something whose cached contents can be wiped in one go.
pub trait Evict: Send + Sync + 'static {
    /// Clear everything. Returns the number of caches cleared.
    fn evict_all(&self) -> anyhow::Result<usize>;
}

impl Evict for CacheRegistry {
    fn evict_all(&self) -> anyhow::Result<usize> {
        Ok(self.clear_all())
    }
}

/// Clears all caches on request and, optionally, on a cron schedule.
#[derive(Clone)]
pub struct CacheInvalidator {
    target: Arc<dyn Evict>,
}

impl CacheInvalidator {
    pub fn new(target: Arc<dyn Evict>) -> Self {
        Self { target }
    }

    /// Clear all caches now.
    pub fn evict_all_caches(&self) -> anyhow::Result<usize> {
        let cleared = self.target.evict_all()?;
        info!("Cleared {} caches on demand", cleared);
        Ok(cleared)
    }

    /// Spawn the periodic clear task.
    ///
    /// The task sleeps until the next occurrence of `schedule`, clears, and
    /// repeats. Firings never overlap: the next occurrence is computed only
    /// after the current clear returns, and occurrences missed while clearing
    /// are skipped rather than queued. A failed clear is logged and the task
    /// waits for the next occurrence.
    ///
    /// The task stops when [`SchedulerHandle::shutdown`] is called or the
    /// handle is dropped.
    pub fn spawn_scheduled(
        &self,
        schedule: ClearSchedule,
        clock: Arc<dyn Clock>,
    ) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let target = Arc::clone(&self.target);

        let task = tokio::spawn(async move {
            info!("Scheduled cache clearing started ({})", schedule.expression());

            loop {
                let now = clock.now();
                let Some(next) = schedule.next_after(&now) else {
                    warn!("Cache clear schedule has no further occurrences");
                    break;
                };
                let delay = (next - now).to_std().unwrap_or_default();
                debug!("Next scheduled cache clear at {}", next);

                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    () = tokio::time::sleep(delay) => {}
                }

                match target.evict_all() {
                    Ok(cleared) => debug!("Cleared {} caches as per schedule", cleared),
                    Err(e) => warn!("Scheduled cache clear failed, retrying next tick: {:#}", e),
                }
            }

            info!("Scheduled cache clearing stopped");
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to the periodic clear task.
pub struct SchedulerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the task and wait for it to exit. A clear already in progress
    /// completes first.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            warn!("Cache clearing task ended abnormally: {}", e);
        }
    }

    #[allow(dead_code)]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
