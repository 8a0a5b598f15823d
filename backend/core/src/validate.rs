//! Camera id syntax validation.
//!
//! Malformed ids are rejected before any directory lookup or gate call, so
//! junk keys never populate the admission table or the audit trail.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CamError;

/// Pattern matching valid camera public ids.
static CAMERA_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,128}$").unwrap());

/// Validate a camera id: 3-128 characters of `[A-Za-z0-9_-]`.
pub fn validate_camera_id(camera_id: &str) -> Result<(), CamError> {
    if CAMERA_ID_PATTERN.is_match(camera_id) {
        Ok(())
    } else {
        Err(CamError::Validation(format!(
            "camera id must match [A-Za-z0-9_-]{{3,128}}, got {} chars",
            camera_id.len()
        )))
    }
}
