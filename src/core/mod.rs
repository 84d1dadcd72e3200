//! Core types for cachebreak
//!
//! This module provides the foundation used throughout the codebase: the
//! strongly-typed error enum, the user-facing error context wrapper, and the
//! conversion helpers that turn arbitrary failures into actionable CLI output.
//!
//! # Error Management
//!
//! Cachebreak separates errors for code from errors for people:
//! - **Strongly-typed errors** ([`CacheBreakError`]) for precise handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with suggestions for CLI users
//! - **Automatic conversion** from common standard library errors
//!
//! # Examples
//!
//! ```rust
//! use cachebreak::core::{CacheBreakError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(CacheBreakError::MissingResourceArguments.into())
//! }
//!
//! fn handle_operation() {
//!     match example_operation() {
//!         Ok(result) => println!("Success: {}", result),
//!         Err(e) => {
//!             let friendly = user_friendly_error(e);
//!             friendly.display(); // Shows colored error with suggestions
//!         }
//!     }
//! }
//! ```

pub mod error;

pub use error::{CacheBreakError, ErrorContext, user_friendly_error};
