//! tm task command implementations.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::cli::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{NewTask, Priority, TaskItem, TaskPatch, TaskStatus};

pub struct NewOptions {
    pub title: String,
    pub project: String,
    pub description: Option<String>,
    pub due: Option<String>,
    pub status: Option<String>,
    pub priority: String,
    pub user: Option<String>,
    pub actor: Option<String>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub project: String,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub id: String,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct CommentOptions {
    pub id: String,
    pub text: String,
    pub actor: Option<String>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TaskCreatedOutput {
    id: String,
    title: String,
    project_id: String,
    priority: Priority,
}

#[derive(serde::Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<TaskItem>,
}

#[derive(serde::Serialize)]
struct TaskDeleteOutput {
    id: String,
}

#[derive(serde::Serialize)]
struct TaskCommentOutput {
    id: String,
    comment: String,
}

fn parse_due(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                Error::InvalidArgument(format!("invalid due date '{value}' (expected YYYY-MM-DD)"))
            }),
    }
}

fn parse_status(raw: Option<&str>) -> Result<Option<TaskStatus>> {
    raw.map(|value| value.parse::<TaskStatus>()).transpose()
}

fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>> {
    raw.map(|value| value.parse::<Priority>()).transpose()
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let ctx = Context::load(options.root, options.actor)?;
    let title = options.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }
    let project_id = options.project.trim();
    if project_id.is_empty() {
        return Err(Error::InvalidArgument(
            "project id cannot be empty".to_string(),
        ));
    }

    let status = parse_status(options.status.as_deref())?.or(Some(TaskStatus::Pending));
    let priority: Priority = options.priority.parse()?;
    let user_id = options.user.unwrap_or_else(|| ctx.actor.clone());

    let task = ctx.task_service().create_task(NewTask {
        title: title.to_string(),
        description: options.description,
        due_date: parse_due(options.due.as_deref())?,
        status,
        priority,
        project_id: project_id.to_string(),
        user_id,
    })?;

    let output = TaskCreatedOutput {
        id: task.id.clone(),
        title: task.title.clone(),
        project_id: task.project_id.clone(),
        priority: task.priority,
    };

    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", task.id);
    human.push_summary("Title", task.title);
    human.push_summary("Project", task.project_id);
    human.push_summary("Priority", task.priority.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task new",
        &output,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = Context::load(options.root, None)?;
    let tasks = ctx.task_service().tasks_by_project(options.project.trim())?;

    let output = TaskListOutput {
        total: tasks.len(),
        tasks: tasks.clone(),
    };

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Project", options.project.trim().to_string());
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        let status = task
            .status
            .map(|status| status.to_string())
            .unwrap_or_else(|| "-".to_string());
        human.push_detail(format!(
            "{}  [{}] {} ({})",
            task.id, status, task.title, task.priority
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task list",
        &output,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = Context::load(options.root, None)?;
    let details = ctx.task_service().task_details(options.id.trim())?;

    let mut human = HumanOutput::new("Task");
    human.push_summary("ID", details.task.id.clone());
    human.push_summary("Title", details.task.title.clone());
    if let Some(description) = &details.task.description {
        human.push_summary("Description", description.clone());
    }
    if let Some(due_date) = details.task.due_date {
        human.push_summary("Due", due_date.to_string());
    }
    if let Some(status) = details.task.status {
        human.push_summary("Status", status.to_string());
    }
    human.push_summary("Priority", details.task.priority.to_string());
    human.push_summary("Project", details.task.project_id.clone());
    human.push_summary("Owner", details.task.user_id.clone());
    for comment in &details.comments {
        human.push_detail(format!(
            "{} {}: {}",
            comment.created_at.format("%Y-%m-%d %H:%M"),
            comment.created_by,
            comment.comment
        ));
    }
    for entry in &details.history {
        human.push_detail(format!(
            "{} {}",
            entry.changed_at.format("%Y-%m-%d %H:%M"),
            entry.changes
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task show",
        &details,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let ctx = Context::load(options.root, None)?;

    let patch = TaskPatch {
        title: options.title,
        description: options.description,
        due_date: parse_due(options.due.as_deref())?,
        status: parse_status(options.status.as_deref())?,
        priority: parse_priority(options.priority.as_deref())?,
    };
    let task = ctx.task_service().update_task(options.id.trim(), &patch)?;

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    if let Some(status) = task.status {
        human.push_summary("Status", status.to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task edit",
        &task,
        Some(&human),
    )
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let ctx = Context::load(options.root, None)?;
    let id = options.id.trim().to_string();
    ctx.task_service().delete_task(&id)?;

    let output = TaskDeleteOutput { id: id.clone() };

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", id);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task rm",
        &output,
        Some(&human),
    )
}

pub fn run_comment(options: CommentOptions) -> Result<()> {
    let ctx = Context::load(options.root, options.actor)?;
    let text = options.text.trim();
    if text.is_empty() {
        return Err(Error::InvalidArgument(
            "comment cannot be empty".to_string(),
        ));
    }

    let id = options.id.trim().to_string();
    ctx.task_service().add_comment(&id, text, &ctx.actor)?;

    let output = TaskCommentOutput {
        id: id.clone(),
        comment: text.to_string(),
    };

    let mut human = HumanOutput::new("Comment added");
    human.push_summary("ID", id);
    human.push_summary("Author", ctx.actor.clone());
    human.push_summary("Comment", text.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task comment",
        &output,
        Some(&human),
    )
}
