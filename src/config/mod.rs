//! Project configuration (`cachebreak.toml`).
//!
//! A deployment describes its token strategy in a small TOML file at the
//! project root:
//!
//! ```toml
//! [token]
//! strategy = "content-hash"
//! asset_dir = "public"
//! exclude = ["*.map", ".DS_Store"]
//! ```
//!
//! The other strategies follow the same shape: `strategy = "release"` with
//! `value` or `env`, `strategy = "timestamp"`, and `strategy = "fixed"` with
//! `value`. See [`TokenStrategy`](crate::token::TokenStrategy) for the full
//! schema.
//!
//! # Discovery
//!
//! Commands locate the file in this order:
//!
//! 1. An explicit path (`--config` on the CLI)
//! 2. The `CACHEBREAK_CONFIG` environment variable
//! 3. Upward search for `cachebreak.toml` from the working directory
//!
//! The upward search lets commands run from any subdirectory of a project,
//! the same way build tools find their manifests.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cachebreak::config::{Config, find_config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let path = find_config()?;
//! let config = Config::load_from(&path).await?;
//! println!("strategy: {}", config.token.name());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::core::CacheBreakError;
use crate::token::TokenStrategy;

/// Root of `cachebreak.toml`.
///
/// Currently holds only the `[token]` table. Defaults to the `content-hash`
/// strategy over `public/` when the table is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Token strategy for this deployment.
    #[serde(default)]
    pub token: TokenStrategy,
}

impl Config {
    /// Load configuration using the standard discovery order.
    ///
    /// Equivalent to [`find_config_with_optional`] followed by
    /// [`Config::load_from`].
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration file can be found, or if the
    /// file cannot be read or parsed.
    pub async fn load(explicit_path: Option<PathBuf>) -> Result<Self> {
        let path = find_config_with_optional(explicit_path)?;
        Self::load_from(&path).await
    }

    /// Load configuration from a specific file.
    ///
    /// Expands `~` in `asset_dir` after parsing, then anchors a relative
    /// `asset_dir` to the configuration file's directory, so commands behave
    /// the same from any subdirectory of the project.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or
    /// [`CacheBreakError::ConfigParseError`] if it is not valid TOML for the
    /// expected schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| CacheBreakError::ConfigParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
            .with_context(|| format!("Invalid TOML syntax in {}", path.display()))?;

        config.expand_paths();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                config.anchor_paths(parent);
            }
        }

        debug!(path = %path.display(), strategy = config.token.name(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to a specific file as pretty-printed TOML,
    /// creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created, the file cannot be
    /// written, or serialization fails.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Expand `~` in filesystem paths carried by the strategy.
    fn expand_paths(&mut self) {
        if let TokenStrategy::ContentHash { asset_dir, .. } = &mut self.token {
            let expanded = shellexpand::tilde(&asset_dir.to_string_lossy()).into_owned();
            *asset_dir = PathBuf::from(expanded);
        }
    }

    /// Resolve a relative `asset_dir` against the configuration file's
    /// directory.
    fn anchor_paths(&mut self, base: &Path) {
        if let TokenStrategy::ContentHash { asset_dir, .. } = &mut self.token {
            if asset_dir.is_relative() {
                *asset_dir = base.join(&*asset_dir);
            }
        }
    }
}

/// Find `cachebreak.toml` via the environment override or upward search.
///
/// Checks the `CACHEBREAK_CONFIG` environment variable first; a set but
/// missing path is an error rather than falling through, so a typo'd
/// deployment variable does not silently pick up a different project's file.
/// Otherwise searches from the current working directory up to the
/// filesystem root.
///
/// # Errors
///
/// Returns [`CacheBreakError::ConfigNotFound`] if no file is found.
pub fn find_config() -> Result<PathBuf> {
    if let Some(value) = std::env::var(CONFIG_ENV_VAR).ok().filter(|v| !v.trim().is_empty()) {
        let path = PathBuf::from(value);
        if path.exists() {
            return Ok(path);
        }
        return Err(CacheBreakError::ConfigNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let current = std::env::current_dir().context("Cannot determine current working directory")?;
    find_config_from(current)
}

/// Find the configuration file, honoring an explicit path when given.
///
/// An explicit path that does not exist is an error; `None` falls back to
/// [`find_config`].
///
/// # Errors
///
/// Returns [`CacheBreakError::ConfigNotFound`] if the explicit path is
/// missing or discovery fails.
pub fn find_config_with_optional(explicit_path: Option<PathBuf>) -> Result<PathBuf> {
    match explicit_path {
        Some(path) => {
            if path.exists() {
                Ok(path)
            } else {
                Err(CacheBreakError::ConfigNotFound {
                    path: path.display().to_string(),
                }
                .into())
            }
        }
        None => find_config(),
    }
}

/// Search upward from `current` for `cachebreak.toml`.
///
/// # Errors
///
/// Returns [`CacheBreakError::ConfigNotFound`] after reaching the
/// filesystem root without a match.
pub fn find_config_from(mut current: PathBuf) -> Result<PathBuf> {
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Ok(candidate);
        }

        if !current.pop() {
            return Err(CacheBreakError::ConfigNotFound {
                path: CONFIG_FILE_NAME.to_string(),
            }
            .into());
        }
    }
}
