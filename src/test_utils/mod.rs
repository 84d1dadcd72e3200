//! Shared test fixtures.
//!
//! Available to inline `#[cfg(test)]` modules and, through the
//! `test-utils` feature, to the `tests/` targets. Nothing here ships in a
//! default build.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::resolver::{ResourceRequest, ResourceResolver};

/// Resolver that mimics a host framework's static-resource URL scheme.
///
/// Static paths resolve to `{base}/_Resources/Static/{package}/{path}`;
/// persistent-resource descriptors (`sha1` + `filename`) resolve to
/// `{base}/_Resources/Persistent/{sha1}/{filename}`. The package defaults
/// to `Application` when a request does not name one.
pub struct FixtureResolver {
    base: String,
}

impl FixtureResolver {
    /// Create a resolver rooted at a base URL such as `http://example.com`.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl ResourceResolver for FixtureResolver {
    fn resolve(&self, request: &ResourceRequest) -> Result<String> {
        if let Some(resource) = &request.resource {
            let sha1 = resource
                .get("sha1")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow!("resource descriptor missing 'sha1'"))?;
            let filename = resource
                .get("filename")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow!("resource descriptor missing 'filename'"))?;
            return Ok(format!("{}/_Resources/Persistent/{sha1}/{filename}", self.base));
        }

        let path = request
            .path
            .as_deref()
            .ok_or_else(|| anyhow!("request carries neither a path nor a resource"))?;
        let package = request.package.as_deref().unwrap_or("Application");
        Ok(format!("{}/_Resources/Static/{package}/{path}", self.base))
    }
}

/// Asset tree rooted in a temporary directory.
///
/// Builder for content-hash tests: lay out files, mutate them between
/// computations, and hand [`AssetTree::root`] to the strategy. The tree is
/// deleted on drop.
pub struct AssetTree {
    temp: TempDir,
}

impl AssetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("failed to create temp asset tree"),
        }
    }

    /// Write a file, creating parent directories. Builder form.
    #[must_use]
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        self.write(relative, contents);
        self
    }

    /// Write or overwrite a file under the tree.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create asset subdirectory");
        }
        std::fs::write(path, contents).expect("failed to write asset file");
    }

    /// Remove a file under the tree.
    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.temp.path().join(relative)).expect("failed to remove asset file");
    }

    /// Root directory of the tree.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Root directory as an owned path, for strategy construction.
    pub fn root_path_buf(&self) -> PathBuf {
        self.temp.path().to_path_buf()
    }
}

impl Default for AssetTree {
    fn default() -> Self {
        Self::new()
    }
}

static INIT: Once = Once::new();

/// Initialize logging for tests with an optional level override.
///
/// Uses the test writer so output is captured per test. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_test_logging(level: Option<Level>) {
    INIT.call_once(|| {
        let filter = level.map_or_else(
            || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            |l| EnvFilter::new(l.to_string()),
        );

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
