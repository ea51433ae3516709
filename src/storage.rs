//! Storage layer for tm
//!
//! All durable state lives under a single `.tm/` data directory at the
//! chosen root:
//!
//! ```text
//! .tm.toml          # Configuration (optional)
//! .tm/
//!   projects.json   # Project records, rewritten atomically
//!   tasks.json      # Task records, rewritten atomically
//!   comments.jsonl  # Comment records, append-only
//!   history.jsonl   # Audit history, append-only, never rewritten
//! ```
//!
//! Mutable collections are pretty-JSON snapshot files replaced with the
//! temp-plus-rename pattern; append-only collections are JSONL. Writers
//! hold a companion `.lock` file for the whole read-modify-write.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use ulid::Ulid;

use crate::error::Result;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};

/// Name of the data directory
pub const DATA_DIR: &str = ".tm";

/// Name of the config file at the root
pub const CONFIG_FILE: &str = ".tm.toml";

const PROJECTS_FILE: &str = "projects.json";
const TASKS_FILE: &str = "tasks.json";
const COMMENTS_FILE: &str = "comments.jsonl";
const HISTORY_FILE: &str = "history.jsonl";

const ID_SUFFIX_LEN: usize = 8;

/// Storage manager for tm state
#[derive(Debug, Clone)]
pub struct Storage {
    /// Root directory holding `.tm/` and `.tm.toml`
    root: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create a storage manager for the given root, defaulting to the
    /// current directory
    pub fn at(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        Ok(Self::new(root))
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    /// Path to the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the `.tm/` data directory
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// Path to the config file
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Path to the project records file
    pub fn projects_file(&self) -> PathBuf {
        self.data_dir().join(PROJECTS_FILE)
    }

    /// Path to the task records file
    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir().join(TASKS_FILE)
    }

    /// Path to the comments file (JSONL format)
    pub fn comments_file(&self) -> PathBuf {
        self.data_dir().join(COMMENTS_FILE)
    }

    /// Path to the audit history file (JSONL format)
    pub fn history_file(&self) -> PathBuf {
        self.data_dir().join(HISTORY_FILE)
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Initialize the data directory; returns whether it was created
    pub fn init(&self) -> Result<bool> {
        let dir = self.data_dir();
        if dir.exists() {
            return Ok(false);
        }
        fs::create_dir_all(&dir)?;
        Ok(true)
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.data_dir().exists()
    }

    // =========================================================================
    // File I/O helpers (atomic writes for safety)
    // =========================================================================

    /// Acquire the writer lock guarding the given store file
    ///
    /// The lock lives in a companion `.lock` file so the store file itself
    /// can be atomically replaced while the lock is held.
    pub fn lock_for(&self, path: &Path) -> Result<FileLock> {
        let lock_path = path.with_extension("lock");
        FileLock::acquire(lock_path, DEFAULT_LOCK_TIMEOUT_MS)
    }

    /// Write JSON data atomically (write to temp, then rename)
    ///
    /// This ensures that concurrent readers never see partial writes.
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        lock::write_atomic_str(path, &json)
    }

    /// Read JSON data from a file
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Append a record to a JSONL file (comments, history)
    pub fn append_jsonl<T: Serialize>(&self, path: &Path, record: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(record)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        writeln!(file, "{}", json)?;
        file.sync_all()?;

        Ok(())
    }

    /// Read all records from a JSONL file
    pub fn read_jsonl<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: T = serde_json::from_str(&line)?;
            records.push(record);
        }

        Ok(records)
    }
}

/// Generate a fresh record identity: a type prefix plus the tail of a
/// lowercase ULID, retried until it misses the existing set
pub(crate) fn unique_id(prefix: &str, existing: &HashSet<String>) -> String {
    loop {
        let raw = Ulid::new().to_string().to_ascii_lowercase();
        let candidate = format!("{prefix}-{}", &raw[raw.len() - ID_SUFFIX_LEN..]);
        if !existing.contains(&candidate) {
            return candidate;
        }
    }
}
