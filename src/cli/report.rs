//! tm report command implementation.

use std::path::PathBuf;

use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::report::{PerformanceReport, LOOKBACK_DAYS};

pub struct ReportOptions {
    pub root: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct ReportOutput {
    window_days: i64,
    total_users: usize,
    reports: Vec<PerformanceReport>,
}

pub fn run(options: ReportOptions) -> Result<()> {
    let ctx = Context::load(options.root, None)?;
    let reports = ctx.task_service().performance_report()?;

    let output = ReportOutput {
        window_days: LOOKBACK_DAYS,
        total_users: reports.len(),
        reports: reports.clone(),
    };

    let mut human = HumanOutput::new("Completion report");
    human.push_summary("Window", format!("last {LOOKBACK_DAYS} days"));
    human.push_summary("Users", reports.len().to_string());
    for report in &reports {
        human.push_detail(format!(
            "{}: {} completed",
            report.user_id, report.tasks_completed
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "report",
        &output,
        Some(&human),
    )
}
