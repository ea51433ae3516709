//! Field-level audit history for tasks.
//!
//! Every successful task edit and every comment addition appends exactly one
//! entry to `.tm/history.jsonl`. Entries are never rewritten or deleted; the
//! change-set rides inside the entry as an opaque serialized blob so old
//! rows stay byte-stable as the schema evolves.
//!
//! An edit serializes as `{"Title":{"Before":"A","After":"B"}}`, one key per
//! changed field. A comment event serializes as
//! `{"Comment":{"Action":"Added Comment","Comment":"Comment added: <text>"}}`.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::Result;
use crate::storage::Storage;
use crate::task::{TaskItem, TaskPatch};

/// The task fields whose edits are recorded in history
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackedField {
    Title,
    Description,
    DueDate,
    Status,
}

/// One before/after pair for a tracked field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldChange {
    pub before: Option<String>,
    pub after: Option<String>,
}

/// The set of field edits one update produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet(pub BTreeMap<TrackedField, FieldChange>);

impl ChangeSet {
    /// Diff a stored task against a patch.
    ///
    /// A field participates only when the patch supplies a value for it; an
    /// absent patch field means "keep the stored value" and never produces
    /// a change entry.
    pub fn between(existing: &TaskItem, patch: &TaskPatch) -> ChangeSet {
        let mut changes = BTreeMap::new();

        if let Some(title) = &patch.title {
            if *title != existing.title {
                changes.insert(
                    TrackedField::Title,
                    FieldChange {
                        before: Some(existing.title.clone()),
                        after: Some(title.clone()),
                    },
                );
            }
        }
        if let Some(description) = &patch.description {
            if existing.description.as_ref() != Some(description) {
                changes.insert(
                    TrackedField::Description,
                    FieldChange {
                        before: existing.description.clone(),
                        after: Some(description.clone()),
                    },
                );
            }
        }
        if let Some(due_date) = patch.due_date {
            if existing.due_date != Some(due_date) {
                changes.insert(
                    TrackedField::DueDate,
                    FieldChange {
                        before: existing.due_date.map(|date| date.to_string()),
                        after: Some(due_date.to_string()),
                    },
                );
            }
        }
        if let Some(status) = patch.status {
            if existing.status != Some(status) {
                changes.insert(
                    TrackedField::Status,
                    FieldChange {
                        before: existing.status.map(|status| status.as_str().to_string()),
                        after: Some(status.as_str().to_string()),
                    },
                );
            }
        }

        ChangeSet(changes)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize for storage inside a history entry
    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The action record written to history when a comment is added
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommentAction {
    pub action: String,
    pub comment: String,
}

/// Wrapper giving comment events the same keyed-object shape as edits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentChange {
    #[serde(rename = "Comment")]
    pub comment: CommentAction,
}

impl CommentChange {
    pub fn added(text: &str) -> Self {
        Self {
            comment: CommentAction {
                action: "Added Comment".to_string(),
                comment: format!("Comment added: {text}"),
            },
        }
    }

    /// Serialize for storage inside a history entry
    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One immutable audit record describing a task mutation or comment event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub task_id: String,
    /// Opaque serialized change-set; see the module docs for its shapes
    pub changes: String,
    pub changed_at: DateTime<Utc>,
}

/// Record store for the audit history (append-only)
#[derive(Debug, Clone)]
pub struct HistoryStore {
    storage: Storage,
}

impl HistoryStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Append one entry, timestamped at the moment of write
    pub fn append(&self, task_id: &str, changes: String) -> Result<HistoryEntry> {
        let record = HistoryEntry {
            id: format!("hst-{}", Ulid::new().to_string().to_ascii_lowercase()),
            task_id: task_id.to_string(),
            changes,
            changed_at: Utc::now(),
        };
        let path = self.storage.history_file();
        let _lock = self.storage.lock_for(&path)?;
        self.storage.append_jsonl(&path, &record)?;
        Ok(record)
    }

    /// All entries for the given task, in write order
    pub fn list_by_task(&self, task_id: &str) -> Result<Vec<HistoryEntry>> {
        let records: Vec<HistoryEntry> = self.storage.read_jsonl(&self.storage.history_file())?;
        Ok(records
            .into_iter()
            .filter(|record| record.task_id == task_id)
            .collect())
    }

    /// Ids of tasks with at least one entry at or after the cutoff
    pub fn tasks_changed_since(&self, cutoff: DateTime<Utc>) -> Result<HashSet<String>> {
        let records: Vec<HistoryEntry> = self.storage.read_jsonl(&self.storage.history_file())?;
        Ok(records
            .into_iter()
            .filter(|record| record.changed_at >= cutoff)
            .map(|record| record.task_id)
            .collect())
    }
}
