//! URI decoration: stamping resolved URIs with the cache-break token.
//!
//! The decorator is the thin layer between the host framework's resolver and
//! rendered markup. It resolves a [`ResourceRequest`] through the injected
//! [`ResourceResolver`] and appends the process-wide token as `?{token}`.
//!
//! # Stamping semantics
//!
//! [`append_token`] produces exactly `{uri}?{token}`, byte for byte. There is
//! no query-string merging and no escaping: asset URIs come out of the
//! resolver without queries, and the whole point of the stamp is that the
//! origin server ignores it while caches key on it. A resolver that emits a
//! query of its own still gets the bare `?{token}` appended; keeping the
//! output equal to `resolve(...) + "?" + token` is the invariant downstream
//! cache layers rely on.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cachebreak::resolver::ResourceRequest;
//! use cachebreak::service::CacheBreakService;
//! use cachebreak::token::TokenStrategy;
//! use cachebreak::uri::UriDecorator;
//! use std::sync::Arc;
//!
//! # fn example(resolver: Arc<dyn cachebreak::resolver::ResourceResolver>) -> anyhow::Result<()> {
//! let service = Arc::new(CacheBreakService::new(TokenStrategy::default()));
//! let decorator = UriDecorator::new(resolver, service);
//!
//! let request = ResourceRequest::for_path("css/app.css", Some("Acme.Site".to_string()));
//! let stamped = decorator.resource_uri(&request)?;
//! // e.g. "http://example.com/_Resources/Static/Acme.Site/css/app.css?1f0e5c9a2b7d4e68"
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::sync::Arc;

use crate::core::CacheBreakError;
use crate::resolver::{ResourceRequest, ResourceResolver};
use crate::service::CacheBreakService;
use crate::token::CacheBreakToken;

/// Append the cache-break token to a resolved URI.
///
/// Returns exactly `{uri}?{token}` with no further processing.
#[must_use]
pub fn append_token(uri: &str, token: &CacheBreakToken) -> String {
    format!("{uri}?{token}")
}

/// Resolves resource requests and stamps the results.
///
/// Owns shared handles to the host resolver and the token service, so one
/// decorator can be cloned cheaply into template engines and request
/// handlers.
#[derive(Clone)]
pub struct UriDecorator {
    resolver: Arc<dyn ResourceResolver>,
    service: Arc<CacheBreakService>,
}

impl UriDecorator {
    /// Create a decorator over a host resolver and a token service.
    #[must_use]
    pub fn new(resolver: Arc<dyn ResourceResolver>, service: Arc<CacheBreakService>) -> Self {
        Self {
            resolver,
            service,
        }
    }

    /// Resolve a request and return the stamped URI.
    ///
    /// The request must name a target: a request with neither `path` nor
    /// `resource` is rejected here, before the resolver is consulted. Every
    /// other failure mode belongs to the resolver and its error is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`CacheBreakError::MissingResourceArguments`] when the request names
    ///   no target
    /// - the resolver's own error, untouched
    /// - the token service's error when the token cannot be computed
    pub fn resource_uri(&self, request: &ResourceRequest) -> Result<String> {
        if !request.has_target() {
            return Err(CacheBreakError::MissingResourceArguments.into());
        }

        let uri = self.resolver.resolve(request)?;
        let token = self.service.get()?;
        Ok(append_token(&uri, token))
    }

    /// Stamp an already-resolved URI without consulting the resolver.
    ///
    /// Used by the template filter form, where the template author has the
    /// URI in hand and only wants the token appended.
    pub fn stamp(&self, uri: &str) -> Result<String> {
        let token = self.service.get()?;
        Ok(append_token(uri, token))
    }
}
