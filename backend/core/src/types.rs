use std::fmt;

use serde::{Deserialize, Serialize};

/// A camera known to the directory, identified by its public id.
///
/// The admission gate never mutates a camera; it only consumes the
/// `redirect_enabled` flag when deciding whether a view request may proceed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Public identifier, `[A-Za-z0-9_-]{3,128}`.
    pub public_id: String,
    /// Device model, if known.
    pub model: Option<String>,
    /// Whether the camera-redirect endpoint is administratively enabled.
    pub redirect_enabled: bool,
    /// Marks seeded/demo devices.
    #[serde(default)]
    pub test_device: bool,
}

impl Camera {
    pub fn new(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            model: None,
            redirect_enabled: true,
            test_device: false,
        }
    }
}

/// Terminal outcome of one view request, as decided by the orchestrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewOutcome {
    /// First successful admission for this camera in the current window.
    Allowed,
    /// No camera with the requested id exists.
    NotFound,
    /// Camera exists but the redirect is administratively disabled.
    /// Distinct from `RateLimited`: this is an admin block, not load shedding.
    Disabled,
    /// A live admission record already exists for this camera.
    RateLimited,
    /// Malformed camera id; rejected before any lookup.
    Invalid,
    /// Unexpected collaborator failure. Not admission information.
    InternalError,
}

impl fmt::Display for ViewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewOutcome::Allowed => "allowed",
            ViewOutcome::NotFound => "not_found",
            ViewOutcome::Disabled => "disabled",
            ViewOutcome::RateLimited => "rate_limited",
            ViewOutcome::Invalid => "invalid",
            ViewOutcome::InternalError => "internal_error",
        };
        write!(f, "{label}")
    }
}
