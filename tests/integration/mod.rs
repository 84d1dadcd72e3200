//! Integration test suite for the `cachebreak` binary.
//!
//! End-to-end tests that spawn the real binary with `assert_cmd` and
//! assert on exit codes, stdout, and stderr.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! Test organization:
//! - **init**: Starter configuration generation
//! - **token**: Token computation and output formats
//! - **check**: The deploy-time fail-fast gate
//! - **stamp**: URI stamping from arguments and stdin

// Shared test project fixture
mod common;

mod init;
mod stamp;
mod token;
