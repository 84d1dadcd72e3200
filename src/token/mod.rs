//! Cache-break token model and computation strategies.
//!
//! A cache-break token is a short opaque identifier representing the current
//! deployable state of a site's static assets. Stamping it onto asset URIs
//! (`style.css?{token}`) makes browser and proxy caches treat every deployment
//! as a fresh set of URLs, so far-future `Expires` headers become safe.
//!
//! Two requirements drive the design:
//!
//! 1. **Stability within a deployment.** Every URI stamped during a process
//!    lifetime carries the same token, otherwise caches churn on every request.
//! 2. **Change across deployments.** A new deployment must produce a new token,
//!    otherwise stale assets are served from cache forever.
//!
//! # Strategies
//!
//! The token source is configurable through [`TokenStrategy`]:
//!
//! - [`TokenStrategy::ContentHash`] fingerprints the deployed asset tree with
//!   SHA-256. It needs no deploy-pipeline cooperation and never changes the
//!   token when the assets didn't change. This is the default that
//!   `cachebreak init` writes.
//! - [`TokenStrategy::Release`] reads a deployment identifier (build number,
//!   commit hash) from configuration or an environment variable.
//! - [`TokenStrategy::Timestamp`] uses the UTC time of first computation.
//!   Simple, but every restart busts caches whether assets changed or not.
//! - [`TokenStrategy::Fixed`] pins an explicit literal, mainly for
//!   reproducible test environments.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cachebreak::token::TokenStrategy;
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let strategy = TokenStrategy::ContentHash {
//!     asset_dir: PathBuf::from("public"),
//!     exclude: vec!["*.map".to_string()],
//! };
//!
//! let token = strategy.compute()?;
//! println!("cache-break token: {token}");
//! # Ok(())
//! # }
//! ```

pub mod hash;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::constants::DEFAULT_RELEASE_ENV_VAR;
use crate::core::CacheBreakError;

/// An opaque cache-break token, validated for safe splicing into a URL query.
///
/// Tokens are appended to URIs verbatim, without percent-encoding, so
/// construction rejects anything outside the RFC 3986 unreserved set
/// (letters, digits, `-`, `.`, `_`, `~`) and the empty string.
///
/// The inner value is deliberately opaque: callers compare and print tokens
/// but never parse them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CacheBreakToken(String);

impl CacheBreakToken {
    /// Validate and wrap a token value.
    ///
    /// # Errors
    ///
    /// Returns [`CacheBreakError::InvalidToken`] when the value is empty or
    /// contains a character outside the unreserved URI set.
    pub fn new(value: impl Into<String>) -> Result<Self, CacheBreakError> {
        let value = value.into();

        if value.is_empty() {
            return Err(CacheBreakError::InvalidToken {
                token: value,
                reason: "token is empty".to_string(),
            });
        }

        if let Some(offending) = value.chars().find(|c| !is_unreserved(*c)) {
            return Err(CacheBreakError::InvalidToken {
                reason: format!("character {offending:?} is not an unreserved URI character"),
                token: value,
            });
        }

        Ok(Self(value))
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheBreakToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheBreakToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// RFC 3986 unreserved characters: ALPHA / DIGIT / "-" / "." / "_" / "~".
const fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// How the cache-break token is produced.
///
/// Deserialized from the `[token]` table of `cachebreak.toml`, where the
/// `strategy` key selects the variant:
///
/// ```toml
/// [token]
/// strategy = "content-hash"
/// asset_dir = "public"
/// exclude = ["*.map", ".DS_Store"]
/// ```
///
/// ```toml
/// [token]
/// strategy = "release"
/// env = "BUILD_NUMBER"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum TokenStrategy {
    /// SHA-256 fingerprint of the deployed asset tree.
    ContentHash {
        /// Directory holding the deployed static assets.
        asset_dir: PathBuf,
        /// Glob patterns for files left out of the fingerprint.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        exclude: Vec<String>,
    },
    /// Externally supplied deployment identifier.
    Release {
        /// Inline identifier, typically templated in by the deploy pipeline.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        /// Environment variable to read when no inline value is given.
        /// Defaults to `CACHEBREAK_RELEASE`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        env: Option<String>,
    },
    /// UTC seconds at first computation. Stable for the process lifetime,
    /// fresh after every restart.
    Timestamp,
    /// Explicit literal token.
    Fixed {
        /// The literal token value.
        value: String,
    },
}

impl TokenStrategy {
    /// Compute the token according to this strategy.
    ///
    /// This performs the actual work (tree walk, env lookup, clock read) on
    /// every call. Memoization is the job of
    /// [`CacheBreakService`](crate::service::CacheBreakService), which calls
    /// this at most once per process.
    ///
    /// # Errors
    ///
    /// - [`CacheBreakError::AssetDirNotFound`] / [`CacheBreakError::AssetDirEmpty`]
    ///   when the content-hash tree is missing or has nothing to hash
    /// - [`CacheBreakError::ReleaseIdentifierMissing`] when the release
    ///   strategy finds neither an inline value nor a non-empty variable
    /// - [`CacheBreakError::InvalidToken`] when a supplied value fails
    ///   charset validation
    pub fn compute(&self) -> anyhow::Result<CacheBreakToken> {
        match self {
            Self::ContentHash {
                asset_dir,
                exclude,
            } => {
                debug!("Computing content-hash token from {}", asset_dir.display());
                let digest = hash::hash_tree(asset_dir, exclude)?;
                Ok(CacheBreakToken::new(digest)?)
            }
            Self::Release {
                value,
                env,
            } => {
                if let Some(value) = value {
                    debug!("Using inline release identifier as token");
                    return Ok(CacheBreakToken::new(value.clone())?);
                }

                let var = env.as_deref().unwrap_or(DEFAULT_RELEASE_ENV_VAR);
                debug!("Reading release identifier from ${var}");
                match std::env::var(var) {
                    Ok(raw) if !raw.trim().is_empty() => {
                        Ok(CacheBreakToken::new(raw.trim().to_string())?)
                    }
                    _ => Err(CacheBreakError::ReleaseIdentifierMissing {
                        env_var: var.to_string(),
                    }
                    .into()),
                }
            }
            Self::Timestamp => {
                let now = Utc::now().timestamp();
                debug!("Using timestamp token {now}");
                Ok(CacheBreakToken::new(now.to_string())?)
            }
            Self::Fixed {
                value,
            } => Ok(CacheBreakToken::new(value.clone())?),
        }
    }

    /// Short human-readable name for logs and `cachebreak check` output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ContentHash {
                ..
            } => "content-hash",
            Self::Release {
                ..
            } => "release",
            Self::Timestamp => "timestamp",
            Self::Fixed {
                ..
            } => "fixed",
        }
    }
}

impl Default for TokenStrategy {
    /// Content hashing over the conventional `public` directory.
    fn default() -> Self {
        Self::ContentHash {
            asset_dir: PathBuf::from(crate::constants::DEFAULT_ASSET_DIR),
            exclude: Vec::new(),
        }
    }
}
