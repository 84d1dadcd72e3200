//! Validate configuration and compute the token before traffic arrives.
//!
//! `check` is the deploy-time gate: it walks the same path the running
//! service will (discover configuration, parse it, compute the token) and
//! reports each step. A deployment that cannot produce a token fails here
//! with a non-zero exit instead of serving unstamped URIs later.
//!
//! ```bash
//! cachebreak check && start-server
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, find_config_with_optional};
use crate::service::CacheBreakService;
use crate::token::TokenStrategy;

/// Command to validate configuration and prime the token.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Run the pre-flight checks, printing one line per step.
    ///
    /// # Errors
    ///
    /// Fails on the first step that cannot complete: configuration not
    /// found, invalid TOML, or a strategy that cannot produce a token.
    pub async fn execute_with_config_path(self, config_path: Option<PathBuf>) -> Result<()> {
        let path = find_config_with_optional(config_path)?;
        println!("{} Found configuration at {}", "✓".green(), path.display());

        let config = Config::load_from(&path).await?;
        println!("{} Configuration is valid (strategy: {})", "✓".green(), config.token.name());

        if let TokenStrategy::ContentHash { asset_dir, exclude } = &config.token {
            println!("  Asset tree: {}", asset_dir.display());
            if !exclude.is_empty() {
                println!("  Excluding: {}", exclude.join(", "));
            }
        }

        let service = CacheBreakService::new(config.token);
        let token = service.prime()?;
        println!("{} Token computed: {}", "✓".green(), token.as_str().bright_white());

        println!("\n{}", "Ready to deploy".green());
        Ok(())
    }
}
