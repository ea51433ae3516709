mod support;

use predicates::str::contains;
use serde_json::Value;

use support::{create_project, TestRoot};

#[test]
fn project_new_assigns_identity() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    let id = create_project(&root, "Alpha", "alice");
    assert!(id.starts_with("prj-"));
    Ok(())
}

#[test]
fn project_list_filters_by_owner() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    create_project(&root, "Alpha", "alice");
    create_project(&root, "Beta", "alice");
    create_project(&root, "Gamma", "bob");

    let output = root
        .cmd()
        .args(["project", "list", "--user", "alice", "--json"])
        .output()?;
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["data"]["total"], 2);

    let output = root
        .cmd()
        .args(["project", "list", "--user", "carol", "--json"])
        .output()?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["data"]["total"], 0);
    assert!(value["data"]["projects"].as_array().expect("array").is_empty());
    Ok(())
}

#[test]
fn project_owner_defaults_to_actor() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    root.cmd()
        .args(["project", "new", "Mine"])
        .env("TM_ACTOR", "dana")
        .assert()
        .success()
        .stdout(contains("dana"));

    let output = root
        .cmd()
        .args(["project", "list", "--user", "dana", "--json"])
        .output()?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["data"]["total"], 1);
    Ok(())
}

#[test]
fn project_new_rejects_empty_name() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    root.cmd()
        .args(["project", "new", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("project name cannot be empty"));
    Ok(())
}
