//! Command-line interface for the `cachebreak` binary.
//!
//! The binary wraps the library for deploy pipelines and shell use:
//!
//! ```bash
//! # Write a starter cachebreak.toml
//! cachebreak init
//!
//! # Compute and print the deployment's token
//! cachebreak token
//! cachebreak token --format json
//!
//! # Validate configuration and fail fast before serving traffic
//! cachebreak check
//!
//! # Append the token to URIs (arguments or stdin lines)
//! cachebreak stamp /css/app.css /js/app.js
//! cat uris.txt | cachebreak stamp
//! ```
//!
//! # Global Options
//!
//! All subcommands accept:
//! - `--verbose` / `--quiet` for log verbosity
//! - `--config <PATH>` to bypass configuration discovery
//!
//! Logs go to stderr so command output stays pipeable.

mod check;
mod init;
mod stamp;
mod token;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

use crate::constants::CONFIG_ENV_VAR;

/// Runtime configuration distilled from the global CLI flags.
///
/// Holds the settings that would otherwise live only in environment
/// variables, so tests and programmatic callers can control CLI behavior
/// without touching global state until [`CliConfig::apply_to_env`] runs.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the tracing subscriber.
    ///
    /// `Some("debug")` under `--verbose`, `Some("info")` by default, `None`
    /// under `--quiet` (errors only). An ambient `RUST_LOG` wins over the
    /// default and verbose levels.
    pub log_level: Option<String>,

    /// Explicit configuration file path from `--config`.
    ///
    /// When set, `CACHEBREAK_CONFIG` is exported so that anything spawned by
    /// a command sees the same configuration.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this configuration to the process environment.
    ///
    /// Call once at the start of execution, before any threads spawn.
    pub fn apply_to_env(&self) {
        if let Some(ref path) = self.config_path {
            unsafe {
                std::env::set_var(CONFIG_ENV_VAR, path);
            }
        }
    }
}

/// Top-level parser for the `cachebreak` binary.
///
/// Global flags are inherited by every subcommand; the subcommands
/// themselves are defined in the [`Commands`] enum.
#[derive(Parser)]
#[command(
    name = "cachebreak",
    about = "Stable cache-break tokens for static asset URIs",
    version,
    author,
    long_about = "cachebreak computes one opaque token per deployment and appends it to \
                  asset URIs as a query string, so far-future browser caches are broken \
                  exactly when a new deployment goes out."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file (cachebreak.toml).
    ///
    /// Bypasses discovery: no `CACHEBREAK_CONFIG` lookup and no upward
    /// search from the working directory.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write a starter `cachebreak.toml`.
    ///
    /// See [`init::InitCommand`] for options and behavior.
    Init(init::InitCommand),

    /// Compute and print the deployment's cache-break token.
    ///
    /// See [`token::TokenCommand`] for options and behavior.
    Token(token::TokenCommand),

    /// Validate configuration and compute the token, reporting each step.
    ///
    /// Intended as a deploy-time gate: a deployment whose token cannot be
    /// computed should fail here, not after it starts serving stale URIs.
    ///
    /// See [`check::CheckCommand`] for details.
    Check(check::CheckCommand),

    /// Append the token to URIs from arguments or stdin lines.
    ///
    /// See [`stamp::StampCommand`] for options and behavior.
    Stamp(stamp::StampCommand),
}

impl Cli {
    /// Execute the CLI with configuration derived from the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed global flags.
    ///
    /// `--verbose` maps to debug-level logging, `--quiet` to errors only,
    /// and the default to info-level.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an injected configuration.
    ///
    /// Applies the configuration to the environment, installs the logging
    /// subscriber, and dispatches to the subcommand.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply_to_env();
        init_logging(&config);

        match self.command {
            Commands::Init(cmd) => cmd.execute().await,
            Commands::Token(cmd) => cmd.execute_with_config_path(self.config).await,
            Commands::Check(cmd) => cmd.execute_with_config_path(self.config).await,
            Commands::Stamp(cmd) => cmd.execute_with_config_path(self.config).await,
        }
    }
}

static INIT_LOGGING: Once = Once::new();

/// Install the tracing subscriber once for the process.
///
/// Writes to stderr so stamped URIs and JSON output on stdout stay clean
/// for piping. `--quiet` pins the filter to errors regardless of
/// `RUST_LOG`.
fn init_logging(config: &CliConfig) {
    INIT_LOGGING.call_once(|| {
        let filter = match &config.log_level {
            Some(level) => {
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
            }
            None => EnvFilter::new("error"),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
