//! Multi-instance admission store backed by a shared atomic key-value store.
//!
//! All synchronization is delegated to the backend's single
//! set-if-absent-with-TTL primitive (`SET key value NX EX window` on Redis).
//! No client-side read-then-write sequence exists, so there is no race to
//! reintroduce. On any backend error, including timeouts, the store fails
//! open: availability of the protected endpoint outranks strict enforcement,
//! and a backend outage must not itself deny legitimate callers. Every
//! fail-open decision is logged so operators can spot a sustained outage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use thiserror::Error;
use tracing::{debug, warn};

use crate::gate::AdmissionGate;

/// Redis key namespace for view admissions.
const KEY_PREFIX: &str = "rate:view:";

/// Error from one backend round trip. Never escapes the store.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend call timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

/// One atomic conditional-set round trip against a shared store.
///
/// `Ok(true)` means this call created the key; `Ok(false)` means the key
/// already existed. Anything else is a backend failure.
#[async_trait]
pub trait AdmissionBackend: Send + Sync {
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> Result<bool, BackendError>;
}

/// Redis implementation of the conditional-set primitive.
pub struct RedisBackend {
    manager: ConnectionManager,
    call_timeout: Duration,
}

impl RedisBackend {
    /// Connect to Redis and build the shared connection manager.
    pub async fn connect(url: &str, call_timeout: Duration) -> Result<Self, BackendError> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self {
            manager,
            call_timeout,
        })
    }
}

#[async_trait]
impl AdmissionBackend for RedisBackend {
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> Result<bool, BackendError> {
        let mut conn = self.manager.clone();
        let full_key = format!("{KEY_PREFIX}{key}");

        // SET .. NX EX replies OK when the key was created, nil otherwise.
        let mut cmd = redis::cmd("SET");
        cmd.arg(&full_key)
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs());
        let call = cmd.query_async::<Option<String>>(&mut conn);

        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(reply) => Ok(reply?.is_some()),
            Err(_) => Err(BackendError::Timeout(self.call_timeout)),
        }
    }
}

/// Admission gate that shares state across instances through a backend.
pub struct DistributedAdmissionStore {
    backend: Arc<dyn AdmissionBackend>,
    window: Duration,
}

impl DistributedAdmissionStore {
    pub fn new(backend: Arc<dyn AdmissionBackend>, window: Duration) -> Self {
        Self { backend, window }
    }
}

#[async_trait]
impl AdmissionGate for DistributedAdmissionStore {
    async fn try_acquire(&self, key: &str) -> bool {
        match self.backend.set_if_absent(key, self.window).await {
            Ok(allowed) => {
                debug!(key, allowed, "distributed admission decision");
                allowed
            }
            Err(err) => {
                warn!(key, error = %err, "admission backend unavailable; failing open");
                true
            }
        }
    }

    fn window_seconds(&self) -> u64 {
        self.window.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend stub returning a scripted reply for every call.
    struct ScriptedBackend {
        reply: fn() -> Result<bool, BackendError>,
        calls: AtomicUsize,
        last_ttl: std::sync::Mutex<Option<Duration>>,
    }

    impl ScriptedBackend {
        fn new(reply: fn() -> Result<bool, BackendError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_ttl: std::sync::Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl AdmissionBackend for ScriptedBackend {
        async fn set_if_absent(&self, _key: &str, ttl: Duration) -> Result<bool, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_ttl.lock().unwrap() = Some(ttl);
            (self.reply)()
        }
    }

    #[tokio::test]
    async fn backend_decision_is_returned_directly() {
        let allow = ScriptedBackend::new(|| Ok(true));
        let store = DistributedAdmissionStore::new(allow.clone(), Duration::from_secs(60));
        assert!(store.try_acquire("CAM_001").await);

        let block = ScriptedBackend::new(|| Ok(false));
        let store = DistributedAdmissionStore::new(block.clone(), Duration::from_secs(60));
        assert!(!store.try_acquire("CAM_001").await);
    }

    #[tokio::test]
    async fn exactly_one_backend_call_per_acquire() {
        let backend = ScriptedBackend::new(|| Ok(false));
        let store = DistributedAdmissionStore::new(backend.clone(), Duration::from_secs(60));
        store.try_acquire("CAM_001").await;
        store.try_acquire("CAM_001").await;
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ttl_matches_configured_window() {
        let backend = ScriptedBackend::new(|| Ok(true));
        let store = DistributedAdmissionStore::new(backend.clone(), Duration::from_secs(45));
        store.try_acquire("CAM_001").await;
        assert_eq!(
            *backend.last_ttl.lock().unwrap(),
            Some(Duration::from_secs(45))
        );
        assert_eq!(store.window_seconds(), 45);
    }

    #[tokio::test]
    async fn fails_open_when_backend_errors() {
        let failing = ScriptedBackend::new(|| Err(BackendError::Timeout(Duration::from_millis(500))));
        let store = DistributedAdmissionStore::new(failing.clone(), Duration::from_secs(60));

        // Every call is allowed while the backend is down.
        for _ in 0..5 {
            assert!(store.try_acquire("CAM_001").await);
        }
        assert_eq!(failing.calls.load(Ordering::SeqCst), 5);
    }
}
