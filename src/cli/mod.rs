//! CLI module for healthgate
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `wait` - Block until an endpoint is healthy or the retry budget runs out
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Wait up to 30 attempts, 2 seconds apart
//! healthgate wait http://localhost:8080/health -r 30 -i 2
//!
//! # Use a config file
//! healthgate wait -c healthgate.toml
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod wait;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::LogFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// healthgate - block until a service is ready
#[derive(Parser, Debug)]
#[command(
    name = "healthgate",
    version,
    about = "Block until an HTTP endpoint reports healthy"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll an endpoint until it is healthy
    Wait(WaitArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Endpoint to probe (e.g., http://localhost:8080/health)
    pub endpoint: Option<String>,

    /// Path to configuration file [default: healthgate.toml, if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Total probe attempts [default: 20]
    #[arg(short, long)]
    pub retries: Option<u32>,

    /// Seconds to wait before each probe [default: 1]
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Per-request timeout in seconds [default: interval]
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Print a JSON summary of the run
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "healthgate.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
