use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    pub fn init() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let root = Self { dir };
        root.cmd().arg("init").assert().success();
        Ok(root)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = tm_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}

pub fn tm_cmd() -> Command {
    Command::cargo_bin("tm").expect("tm binary")
}

/// Create a project via the CLI and return its id
pub fn create_project(root: &TestRoot, name: &str, user: &str) -> String {
    let output = root
        .cmd()
        .args(["project", "new", name, "--user", user, "--json"])
        .output()
        .expect("project new");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    value["data"]["id"].as_str().expect("id").to_string()
}

/// Create a task via the CLI and return its id
pub fn create_task(root: &TestRoot, project_id: &str, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["task", "new", title, "--project", project_id, "--json"];
    args.extend_from_slice(extra);
    let output = root.cmd().args(&args).output().expect("task new");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    value["data"]["id"].as_str().expect("id").to_string()
}
