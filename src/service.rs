//! Task and project services.
//!
//! The business rules live here, over injected record stores: the
//! per-project capacity limit on creation, the immutable-priority rule,
//! diff-based history recording on update, and the paired comment/history
//! writes. The comment write and its history write are not one atomic
//! unit: a storage failure between them leaves the comment persisted with
//! no audit entry.

use chrono::Utc;
use serde::Serialize;

use crate::comment::{CommentStore, TaskComment};
use crate::error::{Error, Result};
use crate::history::{ChangeSet, CommentChange, HistoryEntry, HistoryStore};
use crate::project::{Project, ProjectStore};
use crate::report::{self, PerformanceReport};
use crate::task::{NewTask, TaskItem, TaskPatch, TaskStore, MAX_TASKS_PER_PROJECT};

/// One task with its comments and audit history
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetails {
    pub task: TaskItem,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<TaskComment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

/// Task lifecycle operations over the task, comment, and history stores
#[derive(Debug, Clone)]
pub struct TaskService {
    tasks: TaskStore,
    comments: CommentStore,
    history: HistoryStore,
}

impl TaskService {
    pub fn new(tasks: TaskStore, comments: CommentStore, history: HistoryStore) -> Self {
        Self {
            tasks,
            comments,
            history,
        }
    }

    /// Persist a new task, subject to the per-project capacity limit.
    /// History begins at the first update; creation records none.
    pub fn create_task(&self, task: NewTask) -> Result<TaskItem> {
        self.tasks.add(task, MAX_TASKS_PER_PROJECT)
    }

    /// All tasks owned by the given project; empty when none exist
    pub fn tasks_by_project(&self, project_id: &str) -> Result<Vec<TaskItem>> {
        self.tasks.list_by_project(project_id)
    }

    /// Apply a partial update to a task.
    ///
    /// The priority check runs before any field comparison or write. Absent
    /// patch fields keep their stored values and never enter the diff. A
    /// non-empty diff appends exactly one history entry; an empty diff
    /// appends none.
    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<TaskItem> {
        let existing = self
            .tasks
            .get(task_id)?
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;

        if let Some(priority) = patch.priority {
            if priority != existing.priority {
                return Err(Error::PriorityImmutable {
                    task_id: existing.id,
                });
            }
        }

        let changes = ChangeSet::between(&existing, patch);

        let mut updated = existing;
        if let Some(title) = &patch.title {
            updated.title = title.clone();
        }
        if let Some(description) = &patch.description {
            updated.description = Some(description.clone());
        }
        if let Some(due_date) = patch.due_date {
            updated.due_date = Some(due_date);
        }
        if let Some(status) = patch.status {
            updated.status = Some(status);
        }
        self.tasks.update(&updated)?;

        if !changes.is_empty() {
            self.history.append(&updated.id, changes.to_blob()?)?;
        }

        Ok(updated)
    }

    /// Remove a task from the store
    pub fn delete_task(&self, task_id: &str) -> Result<()> {
        self.tasks
            .get(task_id)?
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        self.tasks.delete(task_id)
    }

    /// Attach a comment to a task: the comment record first, then one
    /// history entry describing the addition
    pub fn add_comment(&self, task_id: &str, comment: &str, created_by: &str) -> Result<()> {
        self.tasks
            .get(task_id)?
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;

        self.comments.add(task_id, comment, created_by)?;
        self.history
            .append(task_id, CommentChange::added(comment).to_blob()?)?;
        Ok(())
    }

    /// One task with its comments and history
    pub fn task_details(&self, task_id: &str) -> Result<TaskDetails> {
        let task = self
            .tasks
            .get(task_id)?
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        let comments = self.comments.list_by_task(task_id)?;
        let history = self.history.list_by_task(task_id)?;
        Ok(TaskDetails {
            task,
            comments,
            history,
        })
    }

    /// Per-user completion counts over the trailing window, as of now
    pub fn performance_report(&self) -> Result<Vec<PerformanceReport>> {
        report::performance_report(&self.tasks, &self.history, Utc::now())
    }
}

/// Project operations over the project store
#[derive(Debug, Clone)]
pub struct ProjectService {
    projects: ProjectStore,
}

impl ProjectService {
    pub fn new(projects: ProjectStore) -> Self {
        Self { projects }
    }

    /// Persist a new project, assigning its identity
    pub fn create_project(&self, name: &str, user_id: &str) -> Result<Project> {
        self.projects.add(name, user_id)
    }

    /// All projects owned by the given user; empty when none exist
    pub fn projects_by_user(&self, user_id: &str) -> Result<Vec<Project>> {
        self.projects.list_by_user(user_id)
    }
}
