//! Task comments (append-only).
//!
//! Comments live in `.tm/comments.jsonl` and are immutable once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::Result;
use crate::storage::Storage;

/// A free-text note attached to a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskComment {
    pub id: String,
    pub task_id: String,
    pub comment: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Record store for comments
#[derive(Debug, Clone)]
pub struct CommentStore {
    storage: Storage,
}

impl CommentStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Append a comment, timestamped at the moment of write
    pub fn add(&self, task_id: &str, comment: &str, created_by: &str) -> Result<TaskComment> {
        let record = TaskComment {
            id: format!("cmt-{}", Ulid::new().to_string().to_ascii_lowercase()),
            task_id: task_id.to_string(),
            comment: comment.to_string(),
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        };
        let path = self.storage.comments_file();
        let _lock = self.storage.lock_for(&path)?;
        self.storage.append_jsonl(&path, &record)?;
        Ok(record)
    }

    /// All comments on the given task, in write order
    pub fn list_by_task(&self, task_id: &str) -> Result<Vec<TaskComment>> {
        let records: Vec<TaskComment> = self.storage.read_jsonl(&self.storage.comments_file())?;
        Ok(records
            .into_iter()
            .filter(|record| record.task_id == task_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_store() -> (tempfile::TempDir, CommentStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(dir.path().to_path_buf());
        storage.init().expect("init");
        (dir, CommentStore::new(storage))
    }

    #[test]
    fn add_and_list_by_task() {
        let (_dir, store) = setup_store();
        store.add("tsk-1", "first", "alice").expect("add");
        store.add("tsk-2", "other task", "bob").expect("add");
        store.add("tsk-1", "second", "alice").expect("add");

        let comments = store.list_by_task("tsk-1").expect("list");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].comment, "first");
        assert_eq!(comments[1].comment, "second");
        assert!(comments.iter().all(|comment| comment.created_by == "alice"));
    }

    #[test]
    fn list_by_task_empty_when_none() {
        let (_dir, store) = setup_store();
        assert!(store.list_by_task("tsk-1").expect("list").is_empty());
    }
}
