//! Expiration Sweeper
//!
//! Background task that periodically reclaims expired cache entries.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::TtlCache;

// == Sweeper Handle ==
/// Owner of a running sweeper.
///
/// `stop` ends the loop and waits for it. Dropping the handle also ends the
/// loop, without waiting.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signals the sweeper to stop and waits until its loop has exited.
    pub async fn stop(self) {
        // The receiver is gone only if the task already ended
        let _ = self.shutdown_tx.send(true);

        if let Err(err) = self.task.await {
            warn!(error = %err, "Expiration sweeper ended abnormally");
        }
    }
}

/// Spawns the sweeper for `cache`, ticking every `cleanup_interval`.
///
/// A zero interval disables sweeping: no task is spawned and `None` is
/// returned. Expired entries then stay stored but are still misses on read.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_sweeper(cache: TtlCache, cleanup_interval: Duration) -> Option<SweeperHandle> {
    if cleanup_interval.is_zero() {
        info!("Expiration sweeper disabled (cleanup interval is zero)");
        return None;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(run_sweeper(cache, cleanup_interval, shutdown_rx));

    Some(SweeperHandle { shutdown_tx, task })
}

async fn run_sweeper(
    cache: TtlCache,
    cleanup_interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!(?cleanup_interval, "Expiration sweeper started");

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                // Err means the handle was dropped
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }

            _ = tokio::time::sleep(cleanup_interval) => {
                let removed = cache.sweep_expired(Utc::now()).await;
                if removed > 0 {
                    info!(removed, "Expiration sweep reclaimed entries");
                } else {
                    debug!("Expiration sweep found nothing to reclaim");
                }
            }
        }
    }

    info!("Expiration sweeper stopped");
}
