//! cachebreak CLI entry point
//!
//! This is the main executable for the cachebreak token tool. It parses
//! arguments, dispatches to the subcommand, and renders failures through the
//! user-friendly error path.
//!
//! The CLI supports commands for operating a deployment's cache-break token:
//! - `init` - Write a starter cachebreak.toml
//! - `token` - Compute and print the token
//! - `check` - Validate configuration and compute the token as a deploy gate
//! - `stamp` - Append the token to URIs from arguments or stdin

use anyhow::Result;
use cachebreak::cli;
use cachebreak::core::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Enable ANSI colors on Windows terminals
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
