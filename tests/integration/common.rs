//! Shared fixture for driving the `cachebreak` binary.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A project directory for one test: a temp dir the binary runs in, with
/// helpers for laying out `cachebreak.toml` and an asset tree.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `cachebreak.toml` at the project root.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.temp.path().join("cachebreak.toml"), content).unwrap();
    }

    /// Write an asset under `public/`, creating parent directories.
    pub fn write_asset(&self, relative: &str, contents: &str) {
        let path = self.temp.path().join("public").join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    /// A `cachebreak` command rooted in the project.
    ///
    /// Ambient cachebreak environment variables are cleared so a developer's
    /// shell cannot leak into test runs; tests set them explicitly.
    pub fn cachebreak(&self) -> Command {
        let mut cmd = Command::cargo_bin("cachebreak").unwrap();
        cmd.current_dir(self.temp.path())
            .env_remove("CACHEBREAK_CONFIG")
            .env_remove("CACHEBREAK_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// A project preconfigured with a fixed token, for tests that only care
/// about stamping behavior.
pub fn project_with_fixed_token(token: &str) -> TestProject {
    let project = TestProject::new();
    project.write_config(&format!("[token]\nstrategy = \"fixed\"\nvalue = \"{token}\"\n"));
    project
}

/// A project with a content-hash configuration over `public/` and one
/// starter asset.
pub fn project_with_assets() -> TestProject {
    let project = TestProject::new();
    project.write_config("[token]\nstrategy = \"content-hash\"\nasset_dir = \"public\"\n");
    project.write_asset("css/app.css", "body { margin: 0 }");
    project.write_asset("js/app.js", "console.log('hi')");
    project
}
