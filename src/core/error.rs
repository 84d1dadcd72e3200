//! Error handling for cachebreak
//!
//! This module provides the error types and user-friendly error reporting for
//! the cachebreak token service. The error system is designed around two core
//! principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`CacheBreakError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! Cachebreak errors fall into a few categories:
//! - **Token computation**: [`CacheBreakError::AssetDirNotFound`],
//!   [`CacheBreakError::AssetDirEmpty`], [`CacheBreakError::ReleaseIdentifierMissing`]
//! - **Token validation**: [`CacheBreakError::InvalidToken`]
//! - **Configuration**: [`CacheBreakError::ConfigNotFound`],
//!   [`CacheBreakError::ConfigParseError`]
//! - **Resolution**: [`CacheBreakError::MissingResourceArguments`]
//!
//! # Error Conversion and Context
//!
//! Common standard library errors are automatically converted:
//! - [`std::io::Error`] → [`CacheBreakError::IoError`]
//! - [`toml::de::Error`] → [`CacheBreakError::TomlError`]
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly format
//! with contextual suggestions.
//!
//! # Examples
//!
//! ## Basic Error Handling
//!
//! ```rust,no_run
//! use cachebreak::core::{CacheBreakError, user_friendly_error};
//!
//! fn compute_token() -> Result<(), CacheBreakError> {
//!     // Simulate a missing asset directory
//!     Err(CacheBreakError::AssetDirNotFound {
//!         path: "public".to_string(),
//!     })
//! }
//!
//! match compute_token() {
//!     Ok(()) => println!("Success!"),
//!     Err(e) => {
//!         let ctx = user_friendly_error(anyhow::Error::from(e));
//!         ctx.display(); // Shows colored error with suggestions
//!     }
//! }
//! ```
//!
//! ## Creating Error Context Manually
//!
//! ```rust,no_run
//! use cachebreak::core::{CacheBreakError, ErrorContext};
//!
//! let error = CacheBreakError::ConfigNotFound {
//!     path: "cachebreak.toml".to_string(),
//! };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Run 'cachebreak init' to create a starter configuration")
//!     .with_details("Configuration is searched in the current and parent directories");
//!
//! // Display with colors in terminal
//! context.display();
//!
//! // Or get as string for logging
//! let message = format!("{}", context);
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for cachebreak operations
///
/// Each variant represents a specific failure mode and carries the details a
/// user needs to fix it. Error messages are written for end users, not just
/// developers, and most variants have tailored suggestions attached by
/// [`user_friendly_error`].
///
/// # Examples
///
/// ## Pattern Matching on Errors
///
/// ```rust,no_run
/// use cachebreak::core::CacheBreakError;
///
/// fn handle_error(error: CacheBreakError) {
///     match error {
///         CacheBreakError::AssetDirNotFound { path } => {
///             eprintln!("Asset directory missing: {path}");
///         }
///         CacheBreakError::ConfigNotFound { .. } => {
///             eprintln!("Run 'cachebreak init' to create a configuration");
///         }
///         _ => {
///             eprintln!("Unexpected error: {}", error);
///         }
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum CacheBreakError {
    /// Asset directory configured for the content-hash strategy does not exist
    ///
    /// The content-hash strategy walks the asset directory to compute the token.
    /// If the directory is missing the deployment is broken, so the error is
    /// surfaced at startup rather than papered over with a fallback token.
    ///
    /// # Fields
    /// - `path`: The directory that was expected to contain deployed assets
    #[error("Asset directory not found: {path}")]
    AssetDirNotFound {
        /// The directory that was expected to contain deployed assets
        path: String,
    },

    /// Asset directory exists but contains no files to hash
    ///
    /// An empty tree would hash to a constant, producing the same token for
    /// every deployment and silently defeating cache breaking. Treated as a
    /// configuration error instead.
    #[error("Asset directory contains no files: {path}")]
    AssetDirEmpty {
        /// The directory that was walked without finding any files
        path: String,
    },

    /// Release strategy could not determine a release identifier
    ///
    /// The release strategy reads an identifier from the configuration or from
    /// an environment variable. When neither yields a value the token cannot
    /// be computed.
    ///
    /// # Fields
    /// - `env_var`: The environment variable that was consulted and found unset
    #[error("Release identifier not set: environment variable {env_var} is empty or missing")]
    ReleaseIdentifierMissing {
        /// The environment variable that was consulted and found unset
        env_var: String,
    },

    /// Token value contains characters that are not URL-safe
    ///
    /// Tokens are appended to URIs verbatim, so they are restricted to the
    /// unreserved URI character set (letters, digits, `-`, `.`, `_`, `~`).
    ///
    /// # Fields
    /// - `token`: The rejected token value
    /// - `reason`: Why the value was rejected
    #[error("Invalid cache-break token '{token}': {reason}")]
    InvalidToken {
        /// The rejected token value
        token: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Configuration file not found
    ///
    /// Raised when an explicitly requested configuration file does not exist,
    /// either via `--config`, the `CACHEBREAK_CONFIG` environment variable, or
    /// a direct path argument.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the configuration file that was not found
        path: String,
    },

    /// Configuration parsing error
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the configuration file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Resource request names neither a path nor a persistent resource
    ///
    /// Stamping a URI requires something to resolve. A request must carry a
    /// static path (with its package) or a persistent resource descriptor.
    #[error("Resource request must specify either a path or a resource")]
    MissingResourceArguments,

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for CacheBreakError {
    fn clone(&self) -> Self {
        match self {
            Self::AssetDirNotFound {
                path,
            } => Self::AssetDirNotFound {
                path: path.clone(),
            },
            Self::AssetDirEmpty {
                path,
            } => Self::AssetDirEmpty {
                path: path.clone(),
            },
            Self::ReleaseIdentifierMissing {
                env_var,
            } => Self::ReleaseIdentifierMissing {
                env_var: env_var.clone(),
            },
            Self::InvalidToken {
                token,
                reason,
            } => Self::InvalidToken {
                token: token.clone(),
                reason: reason.clone(),
            },
            Self::ConfigNotFound {
                path,
            } => Self::ConfigNotFound {
                path: path.clone(),
            },
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::MissingResourceArguments => Self::MissingResourceArguments,
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::TomlSerError(e) => Self::Other {
                message: format!("TOML serialization error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`CacheBreakError`] and adds optional user-friendly
/// messages, suggestions for resolution, and additional details. This is the
/// primary way cachebreak presents errors to CLI users.
///
/// # Display Format
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use cachebreak::core::{CacheBreakError, ErrorContext};
///
/// let context = ErrorContext::new(CacheBreakError::AssetDirNotFound {
///     path: "public".to_string(),
/// })
/// .with_suggestion("Check the asset_dir setting in cachebreak.toml")
/// .with_details("The content-hash strategy needs the deployed asset tree on disk");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying cachebreak error
    pub error: CacheBreakError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`CacheBreakError`]
    ///
    /// This creates a basic error context with no additional suggestions or
    /// details. Use the builder methods [`with_suggestion`] and [`with_details`]
    /// to add user-friendly information.
    ///
    /// [`with_suggestion`]: ErrorContext::with_suggestion
    /// [`with_details`]: ErrorContext::with_details
    #[must_use]
    pub const fn new(error: CacheBreakError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions should be actionable steps that users can take to resolve
    /// the error. They are displayed in green in the terminal to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details provide context about why the error occurred or what it means.
    /// They are displayed in yellow in the terminal, less prominent than the
    /// main error or suggestion.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// This method prints the error, details, and suggestion to stderr using
    /// color coding:
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }

    /// Create an [`ErrorContext`] with only a suggestion (no specific error)
    ///
    /// Useful for generic errors where a suggestion helps but no specific
    /// [`CacheBreakError`] variant applies.
    pub fn suggestion(suggestion: impl Into<String>) -> Self {
        Self {
            error: CacheBreakError::Other {
                message: String::new(),
            },
            suggestion: Some(suggestion.into()),
            details: None,
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// This function is the main entry point for converting arbitrary errors into
/// user-friendly error messages for CLI display. It recognizes common error
/// types and provides appropriate context and suggestions.
///
/// # Error Recognition
///
/// The function recognizes and provides specific handling for:
/// - [`CacheBreakError`] variants with tailored suggestions
/// - [`std::io::Error`] with filesystem-specific guidance
/// - [`toml::de::Error`] with TOML syntax help
/// - Template rendering errors with Tera syntax help
/// - Generic errors with the full cause chain attached
///
/// # Examples
///
/// ```rust,no_run
/// use cachebreak::core::{CacheBreakError, user_friendly_error};
///
/// let error = CacheBreakError::AssetDirNotFound {
///     path: "public".to_string(),
/// };
/// let context = user_friendly_error(anyhow::Error::from(error));
///
/// context.display(); // Shows asset directory suggestions
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Check for specific error types and provide helpful suggestions
    if let Some(cb_error) = error.downcast_ref::<CacheBreakError>() {
        return create_error_context(cb_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CacheBreakError::IoError(std::io::Error::new(
                    io_error.kind(),
                    io_error.to_string(),
                )))
                .with_suggestion("Check file ownership or run with elevated permissions")
                .with_details(
                    "cachebreak could not read or write a file it needs, usually the configuration or the asset tree",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CacheBreakError::IoError(std::io::Error::new(
                    io_error.kind(),
                    io_error.to_string(),
                )))
                .with_suggestion("Check that the path exists and is spelled correctly")
                .with_details(
                    "A file or directory cachebreak needs is missing from the expected location",
                );
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(CacheBreakError::ConfigParseError {
            file: "cachebreak.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion(
            "Check the TOML syntax in your cachebreak.toml file. Verify quotes, brackets, and indentation",
        )
        .with_details(
            "TOML parsing errors are usually caused by syntax issues like missing quotes or mismatched brackets",
        );
    }

    // Check for template rendering errors by examining the error message
    let error_msg = error.to_string().to_lowercase();
    let is_template_error = error_msg.contains("template")
        || error_msg.contains("filter")
        || error_msg.contains("tera");

    if is_template_error {
        return ErrorContext::new(CacheBreakError::Other {
            message: message_with_chain(&error),
        })
        .with_suggestion(
            "Check template syntax: the resource_uri function takes path/package or resource \
             arguments, and the cache_break filter applies to a string URI",
        )
        .with_details(
            "Raised when Tera cannot render the template. Typical causes:\n\
             - A variable that is not defined in the render context\n\
             - Unclosed {{ or {% delimiters\n\
             - Wrong argument types passed to resource_uri or cache_break",
        );
    }

    // Generic errors keep the full cause chain
    ErrorContext::new(CacheBreakError::Other {
        message: message_with_chain(&error),
    })
}

/// Flatten an error and its cause chain into one printable message.
fn message_with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    // The root is already in to_string(), so the chain starts one level down
    let causes: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !causes.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in causes.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Create appropriate [`ErrorContext`] with suggestions for specific errors
///
/// This internal function maps each [`CacheBreakError`] variant to an
/// [`ErrorContext`] with tailored suggestions and details. It's used by
/// [`user_friendly_error`] to provide consistent, helpful error messages.
fn create_error_context(error: CacheBreakError) -> ErrorContext {
    match &error {
        CacheBreakError::AssetDirNotFound { path } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check the asset_dir setting in cachebreak.toml, or create the directory: {path}"
            ))
            .with_details(
                "The content-hash strategy walks the deployed asset tree to compute the token, so the directory must exist at startup",
            ),

        CacheBreakError::AssetDirEmpty { path } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Deploy your static assets into {path} before starting, or point asset_dir at the directory that receives them"
            ))
            .with_details(
                "An empty tree would produce the same token for every deployment, defeating cache breaking",
            ),

        CacheBreakError::ReleaseIdentifierMissing { env_var } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Set the {env_var} environment variable in your deploy pipeline, or add 'value' to the [token] section of cachebreak.toml"
            ))
            .with_details(
                "The release strategy needs a per-deployment identifier such as a build number or commit hash",
            ),

        CacheBreakError::InvalidToken { .. } => ErrorContext::new(error.clone())
            .with_suggestion(
                "Use only letters, digits, and the characters '-', '.', '_', '~' in token values",
            )
            .with_details(
                "Tokens are appended to URIs without encoding, so they are restricted to unreserved URI characters",
            ),

        CacheBreakError::ConfigNotFound { path } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Run 'cachebreak init' to create a starter configuration, or check the path: {path}"
            ))
            .with_details(
                "Configuration is searched in the current directory and its ancestors, or taken from --config / CACHEBREAK_CONFIG",
            ),

        CacheBreakError::ConfigParseError { file, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check the TOML syntax in {file}. Look for missing quotes, unmatched brackets, or a misspelled strategy name"
            ))
            .with_details("Use a TOML validator or compare against the output of 'cachebreak init'"),

        CacheBreakError::MissingResourceArguments => ErrorContext::new(error.clone())
            .with_suggestion(
                "Pass a static path (with its package) or a persistent resource descriptor",
            )
            .with_details(
                "A request that names neither cannot be resolved to a URI, so there is nothing to stamp",
            ),

        _ => ErrorContext::new(error.clone()),
    }
}
