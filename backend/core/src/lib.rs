//! CamGate Core
//!
//! Domain types, collaborator traits, and the audit sink shared by the
//! admission gate and the gateway.

pub mod audit;
pub mod error;
pub mod traits;
pub mod types;
pub mod validate;

pub use audit::{AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink};
pub use error::CamError;
pub use traits::{CameraDirectory, InMemoryCameraDirectory};
pub use types::{Camera, ViewOutcome};
pub use validate::validate_camera_id;
