//! Global constants used throughout the cachebreak codebase.
//!
//! File names, environment variable names, and token-format parameters are
//! defined centrally so the CLI, the config loader, and the token strategies
//! stay in agreement.

/// Name of the project configuration file searched for in the working
/// directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = "cachebreak.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "CACHEBREAK_CONFIG";

/// Environment variable that short-circuits token computation entirely.
///
/// When set, its value becomes the cache-break token after the usual charset
/// validation. Deploy pipelines use this to pin the token without editing the
/// configuration file.
pub const TOKEN_ENV_VAR: &str = "CACHEBREAK_TOKEN";

/// Number of hexadecimal characters kept from a SHA-256 tree digest.
///
/// 64 bits of digest is comfortably collision-free for telling deployments
/// apart while keeping stamped URLs short.
pub const TOKEN_HEX_LEN: usize = 16;

/// Asset directory written into the starter configuration by `cachebreak init`.
pub const DEFAULT_ASSET_DIR: &str = "public";

/// Default environment variable consulted by the `release` strategy when the
/// configuration names neither an inline value nor a variable.
pub const DEFAULT_RELEASE_ENV_VAR: &str = "CACHEBREAK_RELEASE";
