//! Single-process admission store backed by an in-memory key→expiry map.
//!
//! Correctness rests on one critical section per `try_acquire`: the
//! observe-and-claim step runs atomically under a single process-wide lock.
//! The background sweep only bounds memory; an expired-but-unswept entry is
//! already treated as available by the next `try_acquire`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::gate::AdmissionGate;

/// In-memory admission store for single-instance deployments.
pub struct LocalAdmissionStore {
    /// key -> expiry in millis since epoch. One lock for all keys.
    entries: Arc<Mutex<HashMap<String, u64>>>,
    clock: Arc<dyn Clock>,
    window: Duration,
}

impl LocalAdmissionStore {
    pub fn new(window: Duration, clock: Arc<dyn Clock>) -> Self {
        warn!(
            window_secs = window.as_secs(),
            "using in-memory admission store; not suitable for multi-instance deployments"
        );
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
            window,
        }
    }

    /// Drop entries whose window has elapsed. Housekeeping only.
    pub async fn sweep(&self) {
        let now = self.clock.now_millis();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, &mut expires_at| expires_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "swept expired admission records");
        }
    }

    /// Run `sweep` on a fixed interval until the returned task is aborted.
    ///
    /// The cadence is independent of the window length and the sweep never
    /// runs inside a `try_acquire` critical section.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                store.sweep().await;
            }
        })
    }

    #[cfg(test)]
    async fn live_entries(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl AdmissionGate for LocalAdmissionStore {
    async fn try_acquire(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(&expires_at) if expires_at > now => {
                debug!(key, "admission blocked: live record exists");
                false
            }
            _ => {
                let expires_at = now.saturating_add(self.window.as_millis() as u64);
                entries.insert(key.to_string(), expires_at);
                debug!(key, expires_at, "admission allowed");
                true
            }
        }
    }

    fn window_seconds(&self) -> u64 {
        self.window.as_secs()
    }
}
