use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use camgate_admission::{LocalAdmissionStore, ManualClock};
use camgate_core::{Camera, InMemoryAuditSink, InMemoryCameraDirectory, ViewOutcome};
use camgate_gateway::{router, GatewayState};

struct TestHarness {
    app: axum::Router,
    audit: Arc<InMemoryAuditSink>,
    clock: Arc<ManualClock>,
}

async fn harness() -> TestHarness {
    let directory = Arc::new(InMemoryCameraDirectory::new());
    directory.upsert(Camera::new("CAM_001")).await;
    let mut disabled = Camera::new("CAM_002");
    disabled.redirect_enabled = false;
    directory.upsert(disabled).await;

    let clock = Arc::new(ManualClock::new(0));
    let gate = Arc::new(LocalAdmissionStore::new(
        Duration::from_secs(60),
        clock.clone(),
    ));
    let audit = Arc::new(InMemoryAuditSink::new());

    let state = GatewayState {
        directory,
        gate,
        audit: audit.clone(),
    };
    TestHarness {
        app: router(state),
        audit,
        clock,
    }
}

async fn get_view(app: &axum::Router, camera_id: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(format!("/view?camera_id={camera_id}"))
        .header("x-forwarded-for", "203.0.113.9")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn first_view_succeeds_second_is_rate_limited() {
    let harness = harness().await;

    let (status, body) = get_view(&harness.app, "CAM_001").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("CAM_001"));

    let (status, body) = get_view(&harness.app, "CAM_001").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body.contains("60"));

    let events = harness.audit.events().await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].outcome, ViewOutcome::Allowed);
    assert_eq!(events[1].outcome, ViewOutcome::RateLimited);
    assert_eq!(events[0].remote_addr, "203.0.113.9");
}

#[tokio::test]
async fn view_allowed_again_after_window_elapses() {
    let harness = harness().await;

    let (status, _) = get_view(&harness.app, "CAM_001").await;
    assert_eq!(status, StatusCode::OK);

    harness.clock.advance(Duration::from_secs(61));

    let (status, _) = get_view(&harness.app, "CAM_001").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn disabled_camera_is_forbidden_and_audited_distinctly() {
    let harness = harness().await;

    let (status, body) = get_view(&harness.app, "CAM_002").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("disabled"));

    let events = harness.audit.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, ViewOutcome::Disabled);
    assert_eq!(events[0].camera_id, "CAM_002");
}

#[tokio::test]
async fn unknown_camera_is_not_found() {
    let harness = harness().await;

    let (status, body) = get_view(&harness.app, "NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("not found"));
}

/// Directory wrapper that counts lookups.
struct CountingDirectory {
    inner: InMemoryCameraDirectory,
    lookups: std::sync::atomic::AtomicUsize,
}

#[async_trait::async_trait]
impl camgate_core::CameraDirectory for CountingDirectory {
    async fn find(
        &self,
        public_id: &str,
    ) -> Result<Option<Camera>, camgate_core::CamError> {
        self.lookups
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.inner.find(public_id).await
    }
}

#[tokio::test]
async fn malformed_camera_id_is_rejected_without_lookup_or_audit() {
    let directory = Arc::new(CountingDirectory {
        inner: InMemoryCameraDirectory::new(),
        lookups: std::sync::atomic::AtomicUsize::new(0),
    });
    let clock = Arc::new(ManualClock::new(0));
    let gate = Arc::new(LocalAdmissionStore::new(
        Duration::from_secs(60),
        clock.clone(),
    ));
    let audit = Arc::new(InMemoryAuditSink::new());
    let app = router(GatewayState {
        directory: directory.clone(),
        gate,
        audit: audit.clone(),
    });

    let (status, _) = get_view(&app, "in..valid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed ids are a client error, not a gate decision: nothing was
    // looked up and nothing was audited.
    assert_eq!(
        directory.lookups.load(std::sync::atomic::Ordering::SeqCst),
        0
    );
    assert_eq!(audit.len().await, 0);
}

#[tokio::test]
async fn health_endpoint_reports_window() {
    let harness = harness().await;

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = harness.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["status"], "ok");
    assert_eq!(report["window_seconds"], 60);
}
