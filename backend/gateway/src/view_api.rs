//! View orchestrator: the decision pipeline behind `GET /view`.
//!
//! Per request: validate the camera id syntax, look the camera up, check the
//! administrative flag, then ask the admission gate. Every gate outcome emits
//! exactly one audit event; malformed ids are rejected before any lookup and
//! are never audited. Audit emission never blocks or fails the request.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use tracing::{error, info};

use camgate_admission::AdmissionGate;
use camgate_core::{validate_camera_id, AuditEvent, CameraDirectory, ViewOutcome};

use crate::html;
use crate::server::GatewayState;

/// Query parameters for the view endpoint.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub camera_id: String,
}

/// Run steps 2-4 of the pipeline: lookup, enabled check, admission.
///
/// Assumes the id has already passed syntax validation. A directory failure
/// maps to `InternalError`, the only outcome that is not admission
/// information.
pub async fn decide(
    directory: &dyn CameraDirectory,
    gate: &dyn AdmissionGate,
    camera_id: &str,
) -> ViewOutcome {
    match directory.find(camera_id).await {
        Err(err) => {
            error!(camera_id, error = %err, "camera lookup failed");
            ViewOutcome::InternalError
        }
        Ok(None) => ViewOutcome::NotFound,
        Ok(Some(camera)) if !camera.redirect_enabled => ViewOutcome::Disabled,
        Ok(Some(_)) => {
            if gate.try_acquire(camera_id).await {
                ViewOutcome::Allowed
            } else {
                ViewOutcome::RateLimited
            }
        }
    }
}

/// Handler for `GET /view?camera_id=...`
pub async fn view_camera(
    State(state): State<GatewayState>,
    Query(query): Query<ViewQuery>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Response {
    let camera_id = query.camera_id;
    let remote_addr = client_origin(&headers, connect_info.as_ref());

    // Malformed ids never reach the directory or the gate, and leave no
    // audit record: a client error, not a gate decision.
    if let Err(err) = validate_camera_id(&camera_id) {
        info!(remote_addr = %remote_addr, error = %err, "rejected malformed camera id");
        return html::error(StatusCode::BAD_REQUEST, "Invalid camera ID");
    }

    let outcome = decide(state.directory.as_ref(), state.gate.as_ref(), &camera_id).await;

    info!(
        camera_id = %camera_id,
        remote_addr = %remote_addr,
        outcome = %outcome,
        "camera view decision"
    );
    state
        .audit
        .record(AuditEvent::new(&camera_id, outcome, &remote_addr))
        .await;

    match outcome {
        ViewOutcome::Allowed => html::success(&camera_id),
        ViewOutcome::NotFound => html::error(StatusCode::NOT_FOUND, "Camera not found"),
        ViewOutcome::Disabled => {
            html::error(StatusCode::FORBIDDEN, "Camera stream is currently disabled")
        }
        ViewOutcome::RateLimited => html::rate_limited(state.gate.window_seconds()),
        ViewOutcome::Invalid => html::error(StatusCode::BAD_REQUEST, "Invalid camera ID"),
        ViewOutcome::InternalError => {
            html::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Caller network origin: first `X-Forwarded-For` entry, else peer address.
fn client_origin(headers: &HeaderMap, connect_info: Option<&ConnectInfo<SocketAddr>>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| connect_info.map(|ConnectInfo(addr)| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
