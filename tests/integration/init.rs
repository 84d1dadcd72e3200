//! Integration tests for `cachebreak init`.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_init_writes_starter_config() {
    let project = TestProject::new();

    project
        .cachebreak()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized cachebreak.toml"))
        .stdout(predicate::str::contains("Next steps"));

    let content = std::fs::read_to_string(project.path().join("cachebreak.toml")).unwrap();
    assert!(content.contains("[token]"));
    assert!(content.contains("content-hash"));
    assert!(content.contains("public"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let project = TestProject::new();
    project.write_config("# precious manual configuration\n");

    project
        .cachebreak()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let content = std::fs::read_to_string(project.path().join("cachebreak.toml")).unwrap();
    assert!(content.contains("precious"));
}

#[test]
fn test_init_force_overwrites() {
    let project = TestProject::new();
    project.write_config("# old\n");

    project.cachebreak().args(["init", "--force"]).assert().success();

    let content = std::fs::read_to_string(project.path().join("cachebreak.toml")).unwrap();
    assert!(content.contains("[token]"));
    assert!(!content.contains("# old"));
}

#[test]
fn test_init_into_target_path() {
    let project = TestProject::new();

    project
        .cachebreak()
        .args(["init", "--path", "site"])
        .assert()
        .success();

    assert!(project.path().join("site").join("cachebreak.toml").exists());
}

#[test]
fn test_init_then_check_passes() {
    let project = TestProject::new();
    project.write_asset("css/app.css", "body{}");

    project.cachebreak().arg("init").assert().success();
    project
        .cachebreak()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready to deploy"));
}
