mod support;

use predicates::str::contains;
use serde_json::Value;

use support::{create_project, create_task, TestRoot};

#[test]
fn comment_persists_record_and_history_entry() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    let project = create_project(&root, "Alpha", "alice");
    let task = create_task(&root, &project, "Review the patch", &[]);

    root.cmd()
        .args(["task", "comment", &task, "lgtm"])
        .env("TM_ACTOR", "bob")
        .assert()
        .success()
        .stdout(contains("Comment added"));

    let output = root.cmd().args(["task", "show", &task, "--json"]).output()?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    let comments = value["data"]["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["comment"], "lgtm");
    assert_eq!(comments[0]["created_by"], "bob");

    let history = value["data"]["history"].as_array().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0]["changes"],
        r#"{"Comment":{"Action":"Added Comment","Comment":"Comment added: lgtm"}}"#
    );
    Ok(())
}

#[test]
fn repeated_comments_accumulate() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    let project = create_project(&root, "Alpha", "alice");
    let task = create_task(&root, &project, "Review the patch", &[]);

    for text in ["first", "second"] {
        root.cmd()
            .args(["task", "comment", &task, text])
            .assert()
            .success();
    }

    let output = root.cmd().args(["task", "show", &task, "--json"]).output()?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["data"]["comments"].as_array().expect("comments").len(), 2);
    assert_eq!(value["data"]["history"].as_array().expect("history").len(), 2);
    Ok(())
}

#[test]
fn empty_comment_is_rejected_before_any_write() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    let project = create_project(&root, "Alpha", "alice");
    let task = create_task(&root, &project, "Review the patch", &[]);

    root.cmd()
        .args(["task", "comment", &task, "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("comment cannot be empty"));

    let output = root.cmd().args(["task", "show", &task, "--json"]).output()?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert!(value["data"].get("comments").is_none());
    assert!(value["data"].get("history").is_none());
    Ok(())
}

#[test]
fn comment_on_missing_task_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    root.cmd()
        .args(["task", "comment", "tsk-missing", "hello"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found"));
    Ok(())
}
