//! Unit test suite exercising the public library API.
//!
//! These tests treat the crate the way an embedding application would:
//! through `cachebreak::` paths only, with the `test-utils` fixtures.
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! Test organization:
//! - **token_strategies**: Strategy computation and token validation
//! - **service**: Memoization, priming, and the environment override
//! - **stamping**: Decorator, resolver seam, and template integration
//! - **config**: Configuration parsing and discovery

mod config;
mod service;
mod stamping;
