mod support;

use predicates::str::contains;

use support::{tm_cmd, TestRoot};

#[test]
fn help_lists_subcommands() -> Result<(), Box<dyn std::error::Error>> {
    tm_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("project"))
        .stdout(contains("task"))
        .stdout(contains("report"));
    Ok(())
}

#[test]
fn init_creates_data_dir_and_config() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::init()?;
    assert!(root.path().join(".tm").is_dir());
    assert!(root.path().join(".tm.toml").is_file());

    // A second init is a no-op
    root.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("nothing to do"));
    Ok(())
}

#[test]
fn unknown_subcommand_fails() -> Result<(), Box<dyn std::error::Error>> {
    tm_cmd().arg("frobnicate").assert().failure();
    Ok(())
}
