//! Integration tests for `cachebreak token`.

use predicates::prelude::*;

use crate::common::{TestProject, project_with_assets, project_with_fixed_token};

#[test]
fn test_token_prints_fixed_value() {
    let project = project_with_fixed_token("v42");

    project
        .cachebreak()
        .args(["--quiet", "token"])
        .assert()
        .success()
        .stdout(predicate::str::diff("v42\n"));
}

#[test]
fn test_token_json_format() {
    let project = project_with_fixed_token("v42");

    project
        .cachebreak()
        .args(["--quiet", "token", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"token\": \"v42\""))
        .stdout(predicate::str::contains("\"strategy\": \"fixed\""));
}

#[test]
fn test_token_is_stable_across_runs() {
    let project = project_with_assets();

    let first = project.cachebreak().args(["--quiet", "token"]).assert().success();
    let second = project.cachebreak().args(["--quiet", "token"]).assert().success();

    assert_eq!(first.get_output().stdout, second.get_output().stdout);
    assert!(!first.get_output().stdout.is_empty());
}

#[test]
fn test_token_changes_with_asset_content() {
    let project = project_with_assets();

    let before = project.cachebreak().args(["--quiet", "token"]).assert().success();
    project.write_asset("css/app.css", "body { margin: 1px }");
    let after = project.cachebreak().args(["--quiet", "token"]).assert().success();

    assert_ne!(before.get_output().stdout, after.get_output().stdout);
}

#[test]
fn test_token_ignores_excluded_assets() {
    let project = TestProject::new();
    project.write_config(
        "[token]\nstrategy = \"content-hash\"\nasset_dir = \"public\"\nexclude = [\"*.map\"]\n",
    );
    project.write_asset("js/app.js", "x()");

    let before = project.cachebreak().args(["--quiet", "token"]).assert().success();
    project.write_asset("js/app.js.map", "{}");
    let after = project.cachebreak().args(["--quiet", "token"]).assert().success();

    assert_eq!(before.get_output().stdout, after.get_output().stdout);
}

#[test]
fn test_token_env_override() {
    let project = project_with_fixed_token("from-config");

    project
        .cachebreak()
        .env("CACHEBREAK_TOKEN", "from-env-7")
        .args(["--quiet", "token"])
        .assert()
        .success()
        .stdout(predicate::str::diff("from-env-7\n"));
}

#[test]
fn test_token_invalid_env_override_fails() {
    let project = project_with_fixed_token("from-config");

    project
        .cachebreak()
        .env("CACHEBREAK_TOKEN", "not a token")
        .args(["--quiet", "token"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid cache-break token"));
}

#[test]
fn test_token_release_from_environment_variable() {
    let project = TestProject::new();
    project.write_config("[token]\nstrategy = \"release\"\nenv = \"BUILD_NUMBER\"\n");

    project
        .cachebreak()
        .env("BUILD_NUMBER", "build-991")
        .args(["--quiet", "token"])
        .assert()
        .success()
        .stdout(predicate::str::diff("build-991\n"));
}

#[test]
fn test_token_release_missing_variable_fails() {
    let project = TestProject::new();
    project.write_config("[token]\nstrategy = \"release\"\nenv = \"BUILD_NUMBER\"\n");

    project
        .cachebreak()
        .env_remove("BUILD_NUMBER")
        .args(["--quiet", "token"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BUILD_NUMBER"));
}

#[test]
fn test_token_without_config_fails() {
    let project = TestProject::new();

    project
        .cachebreak()
        .args(["--quiet", "token"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_token_with_explicit_config_flag() {
    let project = project_with_fixed_token("v42");
    let outside = TestProject::new();

    outside
        .cachebreak()
        .arg("--quiet")
        .arg("--config")
        .arg(project.path().join("cachebreak.toml"))
        .arg("token")
        .assert()
        .success()
        .stdout(predicate::str::diff("v42\n"));
}
