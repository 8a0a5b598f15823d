//! CamGate CLI: serves the camera-redirect admission gateway.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use camgate_admission::{
    AdmissionGate, DistributedAdmissionStore, LocalAdmissionStore, RedisBackend, SystemClock,
};
use camgate_config::{validate, AdmissionBackendKind, Config};
use camgate_core::{InMemoryCameraDirectory, TracingAuditSink};
use camgate_gateway::seed::seed_demo_cameras;
use camgate_gateway::{start_server, GatewayState};

#[derive(Parser)]
#[command(name = "camgate")]
#[command(about = "CamGate — camera-redirect admission gateway")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve {
        /// Bind address, overriding CAMGATE_BIND
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Resolve and validate the configuration, then print it
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { bind } => serve(bind).await,
        Commands::CheckConfig => check_config(),
    }
}

async fn serve(bind_override: Option<String>) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(bind) = bind_override {
        config.bind = bind;
    }
    validate(&config)?;

    camgate_logging::init_logger(&config.log_dir, &config.log_level);
    info!(
        backend = ?config.admission_backend,
        window_secs = config.window_seconds,
        "starting camgate"
    );

    let directory = Arc::new(InMemoryCameraDirectory::new());
    if config.seed_demo {
        seed_demo_cameras(&directory).await;
    }

    let gate = build_gate(&config).await?;

    let state = GatewayState {
        directory,
        gate,
        audit: Arc::new(TracingAuditSink),
    };

    let addr = config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.bind))?;
    start_server(addr, state).await
}

/// Select the admission store once for the process lifetime.
async fn build_gate(config: &Config) -> Result<Arc<dyn AdmissionGate>> {
    let window = Duration::from_secs(config.window_seconds);
    match config.admission_backend {
        AdmissionBackendKind::Local => {
            let store = Arc::new(LocalAdmissionStore::new(window, Arc::new(SystemClock)));
            // Sweeper task lives as long as the process.
            store.spawn_sweeper(Duration::from_secs(config.sweep_interval_seconds));
            Ok(store)
        }
        AdmissionBackendKind::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("redis backend selected but no CAMGATE_REDIS_URL set")?;
            let backend = RedisBackend::connect(
                url,
                Duration::from_millis(config.backend_timeout_ms),
            )
            .await
            .with_context(|| format!("failed to connect admission backend at {url}"))?;
            Ok(Arc::new(DistributedAdmissionStore::new(
                Arc::new(backend),
                window,
            )))
        }
    }
}

fn check_config() -> Result<()> {
    let config = Config::from_env();
    validate(&config)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
