//! Environment variable resolution with per-variable defaults.

use std::collections::HashMap;

use crate::schema::{AdmissionBackendKind, Config};

impl Config {
    /// Load configuration from `CAMGATE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(&std::env::vars().collect())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_lookup(env: &HashMap<String, String>) -> Self {
        let defaults = Config::default();
        Self {
            bind: string_var(env, "CAMGATE_BIND", &defaults.bind),
            window_seconds: parsed_var(env, "CAMGATE_WINDOW_SECS", defaults.window_seconds),
            sweep_interval_seconds: parsed_var(
                env,
                "CAMGATE_SWEEP_INTERVAL_SECS",
                defaults.sweep_interval_seconds,
            ),
            admission_backend: backend_var(env, "CAMGATE_ADMISSION_BACKEND"),
            redis_url: env.get("CAMGATE_REDIS_URL").cloned(),
            backend_timeout_ms: parsed_var(
                env,
                "CAMGATE_BACKEND_TIMEOUT_MS",
                defaults.backend_timeout_ms,
            ),
            log_dir: string_var(env, "CAMGATE_LOG_DIR", &defaults.log_dir),
            log_level: string_var(env, "CAMGATE_LOG_LEVEL", &defaults.log_level),
            seed_demo: flag_var(env, "CAMGATE_SEED_DEMO"),
        }
    }
}

fn string_var(env: &HashMap<String, String>, key: &str, default: &str) -> String {
    env.get(key)
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn parsed_var(env: &HashMap<String, String>, key: &str, default: u64) -> u64 {
    env.get(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn flag_var(env: &HashMap<String, String>, key: &str) -> bool {
    matches!(
        env.get(key).map(|value| value.trim().to_ascii_lowercase()),
        Some(ref value) if value == "1" || value == "true" || value == "yes"
    )
}

fn backend_var(env: &HashMap<String, String>, key: &str) -> AdmissionBackendKind {
    match env.get(key).map(|value| value.trim().to_ascii_lowercase()) {
        Some(ref value) if value == "redis" => AdmissionBackendKind::Redis,
        _ => AdmissionBackendKind::Local,
    }
}
