//! Error types for tm
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task or project)
//! - 3: Blocked by rule (task capacity limit, priority change attempt)
//! - 4: Operation failed (storage error, lock contention)

use std::path::PathBuf;
use thiserror::Error;

use crate::task::MAX_TASKS_PER_PROJECT;

/// Exit codes for the tm CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const RULE_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tm operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Rule blocks (exit code 3)
    #[error("Project task limit reached: {project_id} already holds {limit} tasks", limit = MAX_TASKS_PER_PROJECT)]
    TaskLimitReached { project_id: String },

    #[error("Task priority cannot be changed: {task_id}")]
    PriorityImmutable { task_id: String },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::TaskNotFound(_) | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Rule blocks
            Error::TaskLimitReached { .. } | Error::PriorityImmutable { .. } => {
                exit_codes::RULE_BLOCKED
            }

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output, where the error carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TaskLimitReached { project_id } => Some(serde_json::json!({
                "project_id": project_id,
                "limit": MAX_TASKS_PER_PROJECT,
            })),
            Error::PriorityImmutable { task_id } => Some(serde_json::json!({
                "task_id": task_id,
            })),
            _ => None,
        }
    }
}

/// Result type alias for tm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
