//! Task entities and the task record store.
//!
//! Tasks are the unit of work inside a project. The record store keeps them
//! in `.tm/tasks.json`; every write holds the store lock for the whole
//! read-modify-write so the per-project capacity check stays a hard
//! guarantee across processes.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::{unique_id, Storage};

const TASKS_SCHEMA_VERSION: &str = "tm.tasks.v1";
const TASK_ID_PREFIX: &str = "tsk";

/// Maximum number of tasks a single project may hold
pub const MAX_TASKS_PER_PROJECT: usize = 20;

/// Workflow state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(Error::InvalidArgument(format!(
                "unknown status '{other}' (expected pending, in-progress, or completed)"
            ))),
        }
    }
}

/// Priority of a task; fixed at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low, medium, or high)"
            ))),
        }
    }
}

/// A single unit of work owned by a project and a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    pub priority: Priority,
    pub project_id: String,
    pub user_id: String,
}

/// A fully-formed task awaiting its identity
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub priority: Priority,
    pub project_id: String,
    pub user_id: String,
}

/// A partial update to a task
///
/// `None` means "keep the stored value"; a field only participates in the
/// change diff when the patch supplies a value for it. Priority is carried
/// for verification but may never differ from the stored value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskCollection {
    schema_version: String,
    tasks: Vec<TaskItem>,
}

impl TaskCollection {
    fn empty() -> Self {
        Self {
            schema_version: TASKS_SCHEMA_VERSION.to_string(),
            tasks: Vec::new(),
        }
    }
}

/// Record store for tasks
#[derive(Debug, Clone)]
pub struct TaskStore {
    storage: Storage,
}

impl TaskStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn load(&self) -> Result<TaskCollection> {
        let path = self.storage.tasks_file();
        if !path.exists() {
            return Ok(TaskCollection::empty());
        }
        self.storage.read_json(&path)
    }

    fn save(&self, collection: &TaskCollection) -> Result<()> {
        self.storage.write_json(&self.storage.tasks_file(), collection)
    }

    /// Insert a new task, assigning its identity
    ///
    /// The per-project capacity check and the insert happen under one store
    /// lock, so the limit holds even against concurrent writers.
    pub fn add(&self, task: NewTask, max_per_project: usize) -> Result<TaskItem> {
        let _lock = self.storage.lock_for(&self.storage.tasks_file())?;
        let mut collection = self.load()?;

        let in_project = collection
            .tasks
            .iter()
            .filter(|existing| existing.project_id == task.project_id)
            .count();
        if in_project >= max_per_project {
            return Err(Error::TaskLimitReached {
                project_id: task.project_id,
            });
        }

        let existing_ids: HashSet<String> = collection
            .tasks
            .iter()
            .map(|existing| existing.id.clone())
            .collect();
        let record = TaskItem {
            id: unique_id(TASK_ID_PREFIX, &existing_ids),
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            status: task.status,
            priority: task.priority,
            project_id: task.project_id,
            user_id: task.user_id,
        };
        collection.tasks.push(record.clone());
        self.save(&collection)?;
        Ok(record)
    }

    /// Look up a task by identity
    pub fn get(&self, task_id: &str) -> Result<Option<TaskItem>> {
        let collection = self.load()?;
        Ok(collection
            .tasks
            .into_iter()
            .find(|task| task.id == task_id))
    }

    /// All tasks owned by the given project
    pub fn list_by_project(&self, project_id: &str) -> Result<Vec<TaskItem>> {
        let collection = self.load()?;
        Ok(collection
            .tasks
            .into_iter()
            .filter(|task| task.project_id == project_id)
            .collect())
    }

    /// All tasks in the Completed state
    pub fn completed(&self) -> Result<Vec<TaskItem>> {
        let collection = self.load()?;
        Ok(collection
            .tasks
            .into_iter()
            .filter(|task| task.status == Some(TaskStatus::Completed))
            .collect())
    }

    /// Replace the stored task carrying the same identity
    pub fn update(&self, task: &TaskItem) -> Result<()> {
        let _lock = self.storage.lock_for(&self.storage.tasks_file())?;
        let mut collection = self.load()?;
        let slot = collection
            .tasks
            .iter_mut()
            .find(|existing| existing.id == task.id)
            .ok_or_else(|| Error::TaskNotFound(task.id.clone()))?;
        *slot = task.clone();
        self.save(&collection)
    }

    /// Remove the task with the given identity
    pub fn delete(&self, task_id: &str) -> Result<()> {
        let _lock = self.storage.lock_for(&self.storage.tasks_file())?;
        let mut collection = self.load()?;
        let before = collection.tasks.len();
        collection.tasks.retain(|task| task.id != task_id);
        if collection.tasks.len() == before {
            return Err(Error::TaskNotFound(task_id.to_string()));
        }
        self.save(&collection)
    }
}
