use serde::{Deserialize, Serialize};

/// Which admission store to bind at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionBackendKind {
    /// In-process map; single-instance deployments only.
    #[default]
    Local,
    /// Shared Redis store; required once the gateway scales horizontally.
    Redis,
}

/// CamGate runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server bind address, `host:port`.
    pub bind: String,
    /// Admission window length in seconds. Also the record TTL.
    pub window_seconds: u64,
    /// Local-store sweep cadence in seconds, independent of the window.
    pub sweep_interval_seconds: u64,
    /// Admission store selection, bound once per process.
    pub admission_backend: AdmissionBackendKind,
    /// Redis connection URL; required when the backend is `Redis`.
    pub redis_url: Option<String>,
    /// Upper bound on one backend round trip, in milliseconds.
    pub backend_timeout_ms: u64,
    /// Directory for rolling log files.
    pub log_dir: String,
    /// Default log level when RUST_LOG is unset.
    pub log_level: String,
    /// Seed demo cameras into the in-memory directory at startup.
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            window_seconds: 60,
            sweep_interval_seconds: 60,
            admission_backend: AdmissionBackendKind::Local,
            redis_url: None,
            backend_timeout_ms: 500,
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
            seed_demo: false,
        }
    }
}
