//! Initialize a project with a starter `cachebreak.toml`.
//!
//! The generated file selects the `content-hash` strategy over `public/`,
//! which is the right default for most deployments: the token changes
//! exactly when asset content changes.
//!
//! ```bash
//! cachebreak init
//! cachebreak init --path ./my-site
//! cachebreak init --force
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::Config;
use crate::constants::CONFIG_FILE_NAME;

/// Command to write a starter configuration file.
#[derive(Args)]
pub struct InitCommand {
    /// Path to create the configuration in (defaults to current directory)
    ///
    /// The directory is created if it does not exist.
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Force overwrite if a configuration already exists
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    /// Write `cachebreak.toml` into the target directory.
    ///
    /// # Errors
    ///
    /// Fails if a configuration already exists and `--force` was not given,
    /// or if the file cannot be written.
    pub async fn execute(self) -> Result<()> {
        let target_dir = self.path.unwrap_or_else(|| PathBuf::from("."));
        let config_path = target_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() && !self.force {
            return Err(anyhow!(
                "Configuration already exists at {}. Use --force to overwrite",
                config_path.display()
            ));
        }

        Config::default().save_to(&config_path).await?;

        println!("{} Initialized {} at {}", "✓".green(), CONFIG_FILE_NAME, config_path.display());

        println!("\n{}", "Next steps:".cyan());
        println!(
            "  Point {} at your built asset tree, or switch to another strategy:",
            "asset_dir".bright_white()
        );
        println!("    strategy = \"release\"    # with value = \"...\" or env = \"VAR\"");
        println!("    strategy = \"timestamp\"  # deployment start time");
        println!("\n  Then run {} to verify the setup", "cachebreak check".bright_white());

        Ok(())
    }
}
