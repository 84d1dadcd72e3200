//! Append the cache-break token to URIs.
//!
//! Stamps URIs that were resolved elsewhere, for build scripts and
//! templating systems outside the library:
//!
//! ```bash
//! cachebreak stamp /css/app.css /js/app.js
//! grep -o 'href="[^"]*"' index.html | cachebreak stamp
//! ```
//!
//! One stamped URI per output line, in input order. When no URIs are given
//! as arguments, lines are read from stdin; blank lines are skipped and
//! surrounding whitespace is trimmed.

use anyhow::{Result, anyhow};
use clap::Args;
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::service::CacheBreakService;
use crate::uri::append_token;

/// Command to append the token to URIs from arguments or stdin.
#[derive(Args)]
pub struct StampCommand {
    /// URIs to stamp; reads stdin lines when omitted
    uris: Vec<String>,
}

impl StampCommand {
    /// Compute the token once and stamp every input URI with it.
    ///
    /// # Errors
    ///
    /// Fails if configuration cannot be loaded, the token cannot be
    /// computed, or stdin cannot be read. Invoking without arguments on an
    /// interactive terminal is an error rather than a silent hang.
    pub async fn execute_with_config_path(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = Config::load(config_path).await?;
        let service = CacheBreakService::new(config.token);
        let token = service.get()?;

        if self.uris.is_empty() {
            if std::io::stdin().is_terminal() {
                return Err(anyhow!(
                    "No URIs given. Pass URIs as arguments or pipe them on stdin"
                ));
            }

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let uri = line.trim();
                if uri.is_empty() {
                    continue;
                }
                println!("{}", append_token(uri, token));
            }
        } else {
            for uri in &self.uris {
                println!("{}", append_token(uri, token));
            }
        }

        Ok(())
    }
}
