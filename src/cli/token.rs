//! Compute and print the deployment's cache-break token.
//!
//! ```bash
//! cachebreak token
//! cachebreak token --format json
//! ```
//!
//! Text output is the bare token, one line, suitable for shell capture:
//!
//! ```bash
//! TOKEN=$(cachebreak token --quiet)
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::service::CacheBreakService;

/// Output format for the computed token.
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Bare token on a single line.
    Text,

    /// JSON object with the token and the strategy that produced it.
    Json,
}

/// Command to compute and print the token.
#[derive(Args)]
pub struct TokenCommand {
    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl TokenCommand {
    /// Load configuration, compute the token, and print it.
    ///
    /// # Errors
    ///
    /// Fails if configuration cannot be found or loaded, or if the strategy
    /// cannot produce a token.
    pub async fn execute_with_config_path(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = Config::load(config_path).await?;
        let service = CacheBreakService::new(config.token);
        let token = service.get()?;

        match self.format {
            OutputFormat::Text => println!("{token}"),
            OutputFormat::Json => {
                let payload = serde_json::json!({
                    "token": token,
                    "strategy": service.strategy().name(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            }
        }

        Ok(())
    }
}
