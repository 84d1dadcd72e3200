//! cachebreak - stable cache-break tokens for static asset URIs
//!
//! Far-future `Expires` headers make browsers cache assets until the URI
//! changes. cachebreak computes **one opaque token per deployment** and
//! appends it to asset URIs as a query string, so every cached copy is
//! invalidated exactly when a new deployment goes out and never in between:
//!
//! ```text
//! http://example.com/_Resources/Static/Pkg/css/app.css?a3f8c2d910b4e571
//! ```
//!
//! # Architecture Overview
//!
//! The crate is a pipeline of small pieces:
//!
//! - A [`token::TokenStrategy`] describes how the token is derived
//!   (asset-tree content hash, release identifier, deployment timestamp, or
//!   a fixed value)
//! - The [`service::CacheBreakService`] computes the token once per process
//!   and memoizes it, so every URI in a deployment carries the same value
//! - The [`uri::UriDecorator`] pairs the service with a host-provided
//!   [`resolver::ResourceResolver`] and appends `?{token}` to resolved URIs
//! - [`templating`] exposes the decorator to Tera templates; [`cli`] wraps
//!   the same pipeline for deploy scripts
//!
//! ## Key Features
//!
//! - **Stable per deployment**: concurrent first callers all observe a
//!   single token; repeated calls never recompute
//! - **Content-addressed by default**: the `content-hash` strategy walks
//!   the asset tree, so unchanged deployments keep their browser caches
//! - **Fail fast**: a strategy that cannot produce a token errors at prime
//!   time with a typed error, never by silently omitting the parameter
//! - **Opaque tokens**: RFC 3986 unreserved characters only, safe to
//!   append to any URI without encoding
//!
//! # Core Modules
//!
//! - [`token`] - Token newtype, strategies, and the asset-tree digest
//! - [`service`] - Per-process memoized token computation
//! - [`resolver`] - The host-framework resolution seam
//! - [`uri`] - Query-string stamping and the decorator
//! - [`templating`] - Tera function and filter
//! - [`config`] - `cachebreak.toml` loading and discovery
//! - [`cli`] - The `cachebreak` binary's commands
//! - [`core`] - Error types and user-facing error formatting
//!
//! # Configuration Format (cachebreak.toml)
//!
//! ```toml
//! [token]
//! strategy = "content-hash"
//! asset_dir = "public"
//! exclude = ["*.map", ".DS_Store"]
//! ```
//!
//! Alternative strategies:
//!
//! ```toml
//! [token]
//! strategy = "release"
//! env = "BUILD_NUMBER"   # or: value = "2026-08-26-1"
//! ```
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use cachebreak::resolver::{ResourceRequest, ResourceResolver};
//! use cachebreak::service::CacheBreakService;
//! use cachebreak::token::TokenStrategy;
//! use cachebreak::uri::UriDecorator;
//! use std::sync::Arc;
//!
//! struct CdnResolver;
//!
//! impl ResourceResolver for CdnResolver {
//!     fn resolve(&self, request: &ResourceRequest) -> anyhow::Result<String> {
//!         let path = request.path.as_deref().unwrap_or_default();
//!         Ok(format!("https://cdn.example.com/{path}"))
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let service = Arc::new(CacheBreakService::new(TokenStrategy::ContentHash {
//!     asset_dir: "public".into(),
//!     exclude: vec![],
//! }));
//! let decorator = UriDecorator::new(Arc::new(CdnResolver), service);
//!
//! let uri = decorator.resource_uri(&ResourceRequest::for_path("css/app.css", None))?;
//! // https://cdn.example.com/css/app.css?<token>
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! cachebreak init            # write a starter cachebreak.toml
//! cachebreak token           # print the deployment's token
//! cachebreak check           # deploy-time fail-fast gate
//! cachebreak stamp /a.css    # append the token to URIs
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod resolver;
pub mod service;
pub mod templating;
pub mod token;
pub mod uri;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
