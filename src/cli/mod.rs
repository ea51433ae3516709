//! Command-line interface for tm
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::comment::CommentStore;
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::project::ProjectStore;
use crate::service::{ProjectService, TaskService};
use crate::storage::Storage;
use crate::task::TaskStore;

mod init;
mod project;
mod report;
mod task;

/// tm - Task Management
///
/// Track projects and tasks with a per-field audit history and a
/// per-user completion report.
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the data root (defaults to current directory)
    #[arg(long, global = true, env = "TM_ROOT")]
    pub root: Option<PathBuf>,

    /// Actor identity for ownership and comments
    #[arg(long, global = true, env = "TM_ACTOR")]
    pub actor: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data directory and config
    Init,

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Per-user completion report over the trailing 30 days
    Report,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project
    New {
        /// Project name
        name: String,

        /// Owning user (defaults to the actor identity)
        #[arg(long)]
        user: Option<String>,
    },

    /// List projects owned by a user
    List {
        /// Owning user (defaults to the actor identity)
        #[arg(long)]
        user: Option<String>,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a new task in a project
    New {
        /// Task title
        title: String,

        /// Owning project id
        #[arg(long)]
        project: String,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Status: pending, in-progress, or completed
        #[arg(long)]
        status: Option<String>,

        /// Priority: low, medium, or high (fixed after creation)
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Owning user (defaults to the actor identity)
        #[arg(long)]
        user: Option<String>,
    },

    /// List tasks in a project
    List {
        /// Owning project id
        #[arg(long)]
        project: String,
    },

    /// Show one task with its comments and history
    Show {
        /// Task id
        id: String,
    },

    /// Edit task fields; omitted fields keep their stored values
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// New status: pending, in-progress, or completed
        #[arg(long)]
        status: Option<String>,

        /// Priority; must match the stored value (it cannot change)
        #[arg(long)]
        priority: Option<String>,
    },

    /// Remove a task
    Rm {
        /// Task id
        id: String,
    },

    /// Add a comment to a task
    Comment {
        /// Task id
        id: String,

        /// Comment text
        text: String,
    },
}

/// Resolved execution context shared by the subcommands
pub(crate) struct Context {
    pub storage: Storage,
    pub actor: String,
}

impl Context {
    pub fn load(root: Option<PathBuf>, actor: Option<String>) -> Result<Self> {
        let storage = Storage::at(root)?;
        let config = Config::load(&storage.config_file())?;
        let actor = config.resolve_actor(actor.as_deref());
        Ok(Self { storage, actor })
    }

    pub fn task_service(&self) -> TaskService {
        TaskService::new(
            TaskStore::new(self.storage.clone()),
            CommentStore::new(self.storage.clone()),
            HistoryStore::new(self.storage.clone()),
        )
    }

    pub fn project_service(&self) -> ProjectService {
        ProjectService::new(ProjectStore::new(self.storage.clone()))
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let json = self.json;
        let quiet = self.quiet;
        match self.command {
            Commands::Init => init::run(self.root, json, quiet),

            Commands::Project(command) => match command {
                ProjectCommands::New { name, user } => project::run_new(project::NewOptions {
                    name,
                    user,
                    actor: self.actor,
                    root: self.root,
                    json,
                    quiet,
                }),
                ProjectCommands::List { user } => project::run_list(project::ListOptions {
                    user,
                    actor: self.actor,
                    root: self.root,
                    json,
                    quiet,
                }),
            },

            Commands::Task(command) => match command {
                TaskCommands::New {
                    title,
                    project,
                    description,
                    due,
                    status,
                    priority,
                    user,
                } => task::run_new(task::NewOptions {
                    title,
                    project,
                    description,
                    due,
                    status,
                    priority,
                    user,
                    actor: self.actor,
                    root: self.root,
                    json,
                    quiet,
                }),
                TaskCommands::List { project } => task::run_list(task::ListOptions {
                    project,
                    root: self.root,
                    json,
                    quiet,
                }),
                TaskCommands::Show { id } => task::run_show(task::ShowOptions {
                    id,
                    root: self.root,
                    json,
                    quiet,
                }),
                TaskCommands::Edit {
                    id,
                    title,
                    description,
                    due,
                    status,
                    priority,
                } => task::run_edit(task::EditOptions {
                    id,
                    title,
                    description,
                    due,
                    status,
                    priority,
                    root: self.root,
                    json,
                    quiet,
                }),
                TaskCommands::Rm { id } => task::run_delete(task::DeleteOptions {
                    id,
                    root: self.root,
                    json,
                    quiet,
                }),
                TaskCommands::Comment { id, text } => task::run_comment(task::CommentOptions {
                    id,
                    text,
                    actor: self.actor,
                    root: self.root,
                    json,
                    quiet,
                }),
            },

            Commands::Report => report::run(report::ReportOptions {
                root: self.root,
                json,
                quiet,
            }),
        }
    }
}
