//! Config validation with user-facing error messages.

use camgate_core::CamError;

use crate::schema::{AdmissionBackendKind, Config};

/// Validate a resolved config before any component is built from it.
pub fn validate(config: &Config) -> Result<(), CamError> {
    if config.window_seconds == 0 {
        return Err(CamError::Config(
            "CAMGATE_WINDOW_SECS must be a positive integer".to_string(),
        ));
    }
    if config.sweep_interval_seconds == 0 {
        return Err(CamError::Config(
            "CAMGATE_SWEEP_INTERVAL_SECS must be a positive integer".to_string(),
        ));
    }
    if config.backend_timeout_ms == 0 {
        return Err(CamError::Config(
            "CAMGATE_BACKEND_TIMEOUT_MS must be a positive integer".to_string(),
        ));
    }
    if config.admission_backend == AdmissionBackendKind::Redis
        && config.redis_url.as_deref().map_or(true, str::is_empty)
    {
        return Err(CamError::Config(
            "CAMGATE_REDIS_URL is required when CAMGATE_ADMISSION_BACKEND=redis".to_string(),
        ));
    }
    if config.bind.parse::<std::net::SocketAddr>().is_err() {
        return Err(CamError::Config(format!(
            "CAMGATE_BIND is not a valid socket address: {}",
            config.bind
        )));
    }
    Ok(())
}
