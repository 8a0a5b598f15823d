use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CamError;
use crate::types::Camera;

/// Read access to the camera inventory.
///
/// The gateway only needs existence and the `redirect_enabled` flag; it never
/// writes through this trait. Implementations must be side-effect free on
/// `find`.
#[async_trait]
pub trait CameraDirectory: Send + Sync {
    /// Look up a camera by its public id. `Ok(None)` means the id is unknown.
    async fn find(&self, public_id: &str) -> Result<Option<Camera>, CamError>;
}

/// In-memory camera directory, seeded at startup.
///
/// Camera persistence lives outside this service; this directory is the
/// in-process view of it.
#[derive(Default)]
pub struct InMemoryCameraDirectory {
    cameras: Arc<RwLock<HashMap<String, Camera>>>,
}

impl InMemoryCameraDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a camera.
    pub async fn upsert(&self, camera: Camera) {
        self.cameras
            .write()
            .await
            .insert(camera.public_id.clone(), camera);
    }

    /// Flip the redirect flag for an existing camera. No-op for unknown ids.
    pub async fn set_redirect_enabled(&self, public_id: &str, enabled: bool) {
        if let Some(camera) = self.cameras.write().await.get_mut(public_id) {
            camera.redirect_enabled = enabled;
        }
    }

    pub async fn len(&self) -> usize {
        self.cameras.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cameras.read().await.is_empty()
    }
}

#[async_trait]
impl CameraDirectory for InMemoryCameraDirectory {
    async fn find(&self, public_id: &str) -> Result<Option<Camera>, CamError> {
        Ok(self.cameras.read().await.get(public_id).cloned())
    }
}
