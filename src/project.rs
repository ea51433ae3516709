//! Project entities for tm.
//!
//! Projects are grouping entities owned by a user; tasks reference their
//! project by id. Records live in `.tm/projects.json`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::{unique_id, Storage};
use crate::task::{TaskItem, TaskStatus};

const PROJECTS_SCHEMA_VERSION: &str = "tm.projects.v1";
const PROJECT_ID_PREFIX: &str = "prj";

/// A named container for tasks, owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub user_id: String,
}

impl Project {
    /// A project may be removed only once every owned task is completed.
    /// Not wired to a removal path; exposed for callers that gate deletion.
    pub fn deletable(&self, tasks: &[TaskItem]) -> bool {
        tasks
            .iter()
            .filter(|task| task.project_id == self.id)
            .all(|task| task.status == Some(TaskStatus::Completed))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProjectCollection {
    schema_version: String,
    projects: Vec<Project>,
}

impl ProjectCollection {
    fn empty() -> Self {
        Self {
            schema_version: PROJECTS_SCHEMA_VERSION.to_string(),
            projects: Vec::new(),
        }
    }
}

/// Record store for projects
#[derive(Debug, Clone)]
pub struct ProjectStore {
    storage: Storage,
}

impl ProjectStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn load(&self) -> Result<ProjectCollection> {
        let path = self.storage.projects_file();
        if !path.exists() {
            return Ok(ProjectCollection::empty());
        }
        self.storage.read_json(&path)
    }

    fn save(&self, collection: &ProjectCollection) -> Result<()> {
        self.storage
            .write_json(&self.storage.projects_file(), collection)
    }

    /// Insert a new project, assigning its identity
    pub fn add(&self, name: &str, user_id: &str) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "project name cannot be empty".to_string(),
            ));
        }

        let _lock = self.storage.lock_for(&self.storage.projects_file())?;
        let mut collection = self.load()?;
        let existing_ids: HashSet<String> = collection
            .projects
            .iter()
            .map(|project| project.id.clone())
            .collect();
        let record = Project {
            id: unique_id(PROJECT_ID_PREFIX, &existing_ids),
            name: name.to_string(),
            user_id: user_id.to_string(),
        };
        collection.projects.push(record.clone());
        self.save(&collection)?;
        Ok(record)
    }

    /// All projects owned by the given user; empty when none exist
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<Project>> {
        let collection = self.load()?;
        Ok(collection
            .projects
            .into_iter()
            .filter(|project| project.user_id == user_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    fn setup_store() -> (tempfile::TempDir, ProjectStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(dir.path().to_path_buf());
        storage.init().expect("init");
        (dir, ProjectStore::new(storage))
    }

    fn task_with_status(project_id: &str, status: Option<TaskStatus>) -> TaskItem {
        TaskItem {
            id: "tsk-1".to_string(),
            title: "Task".to_string(),
            description: None,
            due_date: None,
            status,
            priority: Priority::Low,
            project_id: project_id.to_string(),
            user_id: "alice".to_string(),
        }
    }

    #[test]
    fn add_assigns_identity() {
        let (_dir, store) = setup_store();
        let project = store.add("Alpha", "alice").expect("add");
        assert!(project.id.starts_with("prj-"));
        assert_eq!(project.name, "Alpha");
    }

    #[test]
    fn add_rejects_empty_name() {
        let (_dir, store) = setup_store();
        assert!(store.add("   ", "alice").is_err());
    }

    #[test]
    fn list_by_user_filters_owner() {
        let (_dir, store) = setup_store();
        store.add("Alpha", "alice").expect("add");
        store.add("Beta", "bob").expect("add");
        let mine = store.list_by_user("alice").expect("list");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Alpha");
        assert!(store.list_by_user("carol").expect("list").is_empty());
    }

    #[test]
    fn deletable_requires_every_task_completed() {
        let project = Project {
            id: "prj-1".to_string(),
            name: "Alpha".to_string(),
            user_id: "alice".to_string(),
        };
        assert!(project.deletable(&[]));
        assert!(project.deletable(&[task_with_status("prj-1", Some(TaskStatus::Completed))]));
        assert!(!project.deletable(&[
            task_with_status("prj-1", Some(TaskStatus::Completed)),
            task_with_status("prj-1", Some(TaskStatus::Pending)),
        ]));
        assert!(!project.deletable(&[task_with_status("prj-1", None)]));
        // Tasks from other projects do not count against it
        assert!(project.deletable(&[task_with_status("prj-2", Some(TaskStatus::InProgress))]));
    }
}
