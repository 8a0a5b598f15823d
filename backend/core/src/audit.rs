//! Audit emission for view-request outcomes.
//!
//! Auditing is fire-and-forget: a sink must never surface an error to the
//! caller, and the orchestrator never blocks a request on it. Storage of the
//! trail is a collaborator concern; the gateway only emits events.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::types::ViewOutcome;

/// One audited view decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub camera_id: String,
    pub outcome: ViewOutcome,
    /// Network origin of the caller, as seen by the gateway.
    pub remote_addr: String,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(camera_id: impl Into<String>, outcome: ViewOutcome, remote_addr: impl Into<String>) -> Self {
        Self {
            camera_id: camera_id.into(),
            outcome,
            remote_addr: remote_addr.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Destination for audit events.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record one event. Implementations swallow their own failures.
    async fn record(&self, event: AuditEvent);
}

/// Sink that writes events to the structured log stream.
#[derive(Debug, Default, Clone)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, event: AuditEvent) {
        info!(
            camera_id = %event.camera_id,
            outcome = %event.outcome,
            remote_addr = %event.remote_addr,
            "audit: camera view"
        );
    }
}

/// Sink that captures events in memory, for tests and local inspection.
#[derive(Default)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn record(&self, event: AuditEvent) {
        self.events.lock().await.push(event);
    }
}
