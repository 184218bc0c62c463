//! Periodic removal of expired sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::session::SessionAuthority;

pub struct SessionSweeper {
    authority: Arc<SessionAuthority>,
    interval: Duration,
}

/// Owns the running sweep task. Dropping the handle also stops the task.
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SessionSweeper {
    pub fn new(authority: Arc<SessionAuthority>, interval: Duration) -> Self {
        Self { authority, interval }
    }

    /// Starts the sweep loop on the current Tokio runtime.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown, signal) = watch::channel(false);
        let task = tokio::spawn(self.run(signal));
        SweeperHandle { shutdown, task }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_ms = self.interval.as_millis() as u64, "session sweeper started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.authority.sweep();
                    if removed > 0 {
                        info!(removed, remaining = self.authority.len(), "expired sessions swept");
                    } else {
                        debug!(remaining = self.authority.len(), "session sweep found nothing to remove");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("session sweeper stopped");
    }
}

impl SweeperHandle {
    /// Signals the loop to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("session sweeper task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
