//! The Token Provider: lazy, memoized cache-break token computation.
//!
//! [`CacheBreakService`] is the process-wide source of truth for the current
//! cache-break token. The token is computed at most once per process and then
//! served from memory, which is what makes stamped URIs stable for the whole
//! deployment:
//!
//! - Request handlers call [`get`](CacheBreakService::get), which computes on
//!   first use and returns the memoized token ever after.
//! - Deploy and startup code calls [`prime`](CacheBreakService::prime) so a
//!   broken token configuration aborts the rollout instead of shipping
//!   unstamped or half-stamped pages.
//!
//! The service is `Sync` and intended to live in an `Arc` shared across
//! request handlers and template engines.
//!
//! # Environment override
//!
//! Setting `CACHEBREAK_TOKEN` bypasses the configured strategy entirely. The
//! override value goes through the same charset validation as any computed
//! token, so a bad override still fails fast.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cachebreak::service::CacheBreakService;
//! use cachebreak::token::TokenStrategy;
//!
//! # fn example() -> anyhow::Result<()> {
//! let service = CacheBreakService::new(TokenStrategy::default());
//!
//! // At startup: fail fast if the token cannot be produced.
//! service.prime()?;
//!
//! // In request handlers: always the same token, no recomputation.
//! let token = service.get()?;
//! println!("?{token}");
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::constants::TOKEN_ENV_VAR;
use crate::token::{CacheBreakToken, TokenStrategy};

/// Process-wide provider of the current cache-break token.
///
/// See the [module documentation](self) for the memoization contract.
#[derive(Debug)]
pub struct CacheBreakService {
    strategy: TokenStrategy,
    token: OnceLock<CacheBreakToken>,
}

impl CacheBreakService {
    /// Create a service for the given strategy. No computation happens here.
    #[must_use]
    pub const fn new(strategy: TokenStrategy) -> Self {
        Self {
            strategy,
            token: OnceLock::new(),
        }
    }

    /// Return the cache-break token, computing it on first call.
    ///
    /// Subsequent calls return the memoized value without touching the
    /// filesystem, environment, or clock again. Concurrent first calls may
    /// each run the computation, but only one result is stored and every
    /// caller observes that single winner.
    ///
    /// A failed computation is not memoized; the next call retries. Use
    /// [`prime`](Self::prime) at startup to surface failures before traffic
    /// arrives.
    ///
    /// # Errors
    ///
    /// Propagates the strategy's computation error, or
    /// [`CacheBreakError::InvalidToken`](crate::core::CacheBreakError::InvalidToken)
    /// when an environment override fails validation.
    pub fn get(&self) -> Result<&CacheBreakToken> {
        if let Some(token) = self.token.get() {
            return Ok(token);
        }

        let computed = self.compute()?;

        // Racing first callers all land on whichever value was stored first.
        Ok(self.token.get_or_init(|| computed))
    }

    /// Eagerly compute the token, for fail-fast startup checks.
    ///
    /// Identical to [`get`](Self::get) except that the chosen token and
    /// strategy are logged at info level, marking the point in the process
    /// lifetime where the token became fixed.
    pub fn prime(&self) -> Result<&CacheBreakToken> {
        let token = self.get()?;
        info!(strategy = self.strategy.name(), %token, "Cache-break token primed");
        Ok(token)
    }

    /// The token if it has already been computed, without computing it.
    #[must_use]
    pub fn cached(&self) -> Option<&CacheBreakToken> {
        self.token.get()
    }

    /// The strategy this service was configured with.
    #[must_use]
    pub const fn strategy(&self) -> &TokenStrategy {
        &self.strategy
    }

    fn compute(&self) -> Result<CacheBreakToken> {
        if let Ok(raw) = std::env::var(TOKEN_ENV_VAR) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                warn!("${TOKEN_ENV_VAR} is set but blank, using the configured strategy");
            } else {
                debug!("Using ${TOKEN_ENV_VAR} override for the cache-break token");
                return Ok(CacheBreakToken::new(trimmed.to_string())?);
            }
        }

        self.strategy.compute()
    }
}
