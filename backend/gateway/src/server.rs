//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use camgate_admission::AdmissionGate;
use camgate_core::{AuditSink, CameraDirectory};

use crate::{health_api, view_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub directory: Arc<dyn CameraDirectory>,
    pub gate: Arc<dyn AdmissionGate>,
    pub audit: Arc<dyn AuditSink>,
}

/// Build the gateway router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/view", get(view_api::view_camera))
        .route("/api/health", get(health_api::get_health))
        .with_state(state)
}

/// Starts the Axum HTTP server for the gateway.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
