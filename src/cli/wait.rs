//! Wait command implementation

use crate::cli::output::{format_summary_json, format_summary_text, RunSummary};
use crate::cli::WaitArgs;
use crate::config::{GateConfig, LogFormat};
use crate::health::{GateError, HealthGate, RunResult};
use std::path::Path;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Config file picked up from the working directory when `-c` is absent
pub const DEFAULT_CONFIG_PATH: &str = "healthgate.toml";

/// Load configuration with CLI overrides
///
/// An explicit `--config` path must exist; the default file is optional.
pub fn load_config_with_overrides(
    args: &WaitArgs,
) -> Result<GateConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GateConfig::load(Some(path))?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                GateConfig::load(Some(default_path))?
            } else {
                GateConfig::default()
            }
        }
    };

    config = config.with_env_overrides();

    if let Some(ref endpoint) = args.endpoint {
        config.health_check.endpoint = Some(endpoint.clone());
    }
    if let Some(retries) = args.retries {
        config.health_check.retries = retries;
    }
    if let Some(interval) = args.interval {
        config.health_check.interval_seconds = interval;
    }
    if let Some(timeout) = args.timeout {
        config.health_check.timeout_seconds = Some(timeout);
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }

    Ok(config)
}

/// Initialize tracing based on configuration
///
/// Logs go to stderr so stdout stays free for the run summary.
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Cancel the run on SIGINT or SIGTERM
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, abandoning health check");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, abandoning health check");
        }
    }

    cancel_token.cancel();
}

/// Main wait command handler
pub async fn run_wait(args: WaitArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;

    // 2. Validate before anything touches the network
    let check = config.validate()?;

    // 3. Initialize tracing
    init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");

    // 4. Run the gate, abandoning it on shutdown signals
    let cancel_token = CancellationToken::new();
    let signal_handle = tokio::spawn(shutdown_signal(cancel_token.clone()));

    let gate = HealthGate::new(check.clone()).with_cancellation(cancel_token);
    let start = Instant::now();
    let result = gate.poll().await;
    signal_handle.abort();

    let result = result?;
    let summary = RunSummary::new(&check, &result, start.elapsed());
    if args.json {
        println!("{}", format_summary_json(&summary)?);
    } else {
        println!("{}", format_summary_text(&summary));
    }

    match result {
        RunResult::Healthy { .. } => Ok(()),
        RunResult::Exhausted { total_wait } => Err(GateError::Exhausted { total_wait }.into()),
    }
}
