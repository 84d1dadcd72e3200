//! Integration tests for `cachebreak stamp`.

use predicates::prelude::*;

use crate::common::{TestProject, project_with_assets, project_with_fixed_token};

#[test]
fn test_stamp_arguments_exact_output() {
    let project = project_with_fixed_token("abc123");

    project
        .cachebreak()
        .args(["--quiet", "stamp", "/css/app.css", "/js/app.js"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/css/app.css?abc123\n/js/app.js?abc123\n"));
}

#[test]
fn test_stamp_reads_uris_from_stdin() {
    let project = project_with_fixed_token("abc123");

    project
        .cachebreak()
        .args(["--quiet", "stamp"])
        .write_stdin("one.css\n\n  two.css  \n")
        .assert()
        .success()
        .stdout(predicate::str::diff("one.css?abc123\ntwo.css?abc123\n"));
}

#[test]
fn test_stamp_preserves_existing_query() {
    let project = project_with_fixed_token("abc123");

    project
        .cachebreak()
        .args(["--quiet", "stamp", "/a.css?v=1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/a.css?v=1?abc123\n"));
}

#[test]
fn test_stamp_with_empty_stdin_prints_nothing() {
    let project = project_with_fixed_token("abc123");

    project
        .cachebreak()
        .args(["--quiet", "stamp"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::diff(""));
}

#[test]
fn test_stamp_uses_the_same_token_as_the_token_command() {
    let project = project_with_assets();

    let output = project
        .cachebreak()
        .args(["--quiet", "token"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let token = String::from_utf8(output).unwrap().trim().to_string();

    project
        .cachebreak()
        .args(["--quiet", "stamp", "/css/app.css"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("/css/app.css?{token}\n")));
}

#[test]
fn test_stamp_fails_without_config() {
    let project = TestProject::new();

    project
        .cachebreak()
        .args(["--quiet", "stamp", "/css/app.css"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
