//! tm project command implementations.

use std::path::PathBuf;

use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::Project;

pub struct NewOptions {
    pub name: String,
    pub user: Option<String>,
    pub actor: Option<String>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub user: Option<String>,
    pub actor: Option<String>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct ProjectCreatedOutput {
    id: String,
    name: String,
    user_id: String,
}

#[derive(serde::Serialize)]
struct ProjectListOutput {
    total: usize,
    projects: Vec<Project>,
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let ctx = Context::load(options.root, options.actor)?;
    let user_id = options.user.unwrap_or_else(|| ctx.actor.clone());

    let project = ctx.project_service().create_project(&options.name, &user_id)?;

    let output = ProjectCreatedOutput {
        id: project.id.clone(),
        name: project.name.clone(),
        user_id: project.user_id.clone(),
    };

    let mut human = HumanOutput::new("Project created");
    human.push_summary("ID", project.id);
    human.push_summary("Name", project.name);
    human.push_summary("Owner", project.user_id);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project new",
        &output,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = Context::load(options.root, options.actor)?;
    let user_id = options.user.unwrap_or_else(|| ctx.actor.clone());

    let projects = ctx.project_service().projects_by_user(&user_id)?;

    let output = ProjectListOutput {
        total: projects.len(),
        projects: projects.clone(),
    };

    let mut human = HumanOutput::new("Projects");
    human.push_summary("Owner", user_id);
    human.push_summary("Total", projects.len().to_string());
    for project in &projects {
        human.push_detail(format!("{}  {}", project.id, project.name));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project list",
        &output,
        Some(&human),
    )
}
