//! Demo seed data for development deployments.

use camgate_core::{Camera, InMemoryCameraDirectory};
use tracing::info;

/// Populate the directory with demo cameras. Idempotent.
///
/// `CAM_002` is seeded with the redirect disabled so the forbidden path can
/// be exercised out of the box.
pub async fn seed_demo_cameras(directory: &InMemoryCameraDirectory) {
    let mut cam_001 = Camera::new("CAM_001");
    cam_001.model = Some("DK-2000".to_string());
    cam_001.test_device = true;
    directory.upsert(cam_001).await;

    let mut cam_002 = Camera::new("CAM_002");
    cam_002.model = Some("DK-2000".to_string());
    cam_002.redirect_enabled = false;
    cam_002.test_device = true;
    directory.upsert(cam_002).await;

    for n in 3..=5 {
        let mut camera = Camera::new(format!("CAM_{n:03}"));
        camera.test_device = true;
        directory.upsert(camera).await;
    }

    info!(count = directory.len().await, "seeded demo cameras");
}
