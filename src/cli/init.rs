//! tm init command implementation
//!
//! Creates the data directory and a default config file.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;

#[derive(serde::Serialize)]
struct InitReport {
    root: PathBuf,
    created: InitCreated,
}

#[derive(serde::Serialize)]
struct InitCreated {
    config: bool,
    data_dir: bool,
}

pub fn run(root: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let storage = Storage::at(root)?;

    let created_data_dir = storage.init()?;
    let created_config = ensure_config(&storage.config_file())?;

    let report = InitReport {
        root: storage.root().to_path_buf(),
        created: InitCreated {
            config: created_config,
            data_dir: created_data_dir,
        },
    };

    let mut created_items = Vec::new();
    if created_config {
        created_items.push(".tm.toml");
    }
    if created_data_dir {
        created_items.push(".tm/");
    }

    let header = if created_items.is_empty() {
        "tm init: nothing to do".to_string()
    } else {
        "tm init: initialized".to_string()
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("root", storage.root().display().to_string());
    human.push_summary(
        "created",
        if created_items.is_empty() {
            "none".to_string()
        } else {
            created_items.join(", ")
        },
    );
    human.push_next_step("tm project new <name>");
    human.push_next_step("tm task new <title> --project <project-id>");

    emit_success(OutputOptions { json, quiet }, "init", &report, Some(&human))?;

    Ok(())
}

fn ensure_config(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        if !config_path.is_file() {
            return Err(Error::OperationFailed(format!(
                ".tm.toml exists but is not a file: {}",
                config_path.display()
            )));
        }
        return Ok(false);
    }

    let config = Config::default();
    config.save(config_path)?;
    Ok(true)
}
