//! tm - Task Management Library
//!
//! This library provides the core functionality for the tm CLI tool:
//! projects own tasks, tasks accrue comments and an append-only audit
//! history of field-level changes.
//!
//! # Core Concepts
//!
//! - **Projects**: named task containers owned by a user, capped at 20
//!   tasks each
//! - **Tasks**: units of work with an immutable priority fixed at creation
//! - **History**: an append-only audit trail, one entry per effective edit
//!   or comment addition, never rewritten
//! - **Reports**: per-user completion counts over a trailing 30-day window
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `.tm.toml`
//! - `error`: error types and result aliases
//! - `storage`: file storage and directory management
//! - `lock`: file locking and atomic writes for concurrency safety
//! - `project`, `task`, `comment`, `history`: entities and their stores
//! - `service`: business rules over the stores
//! - `report`: the rolling-window completion report

pub mod cli;
pub mod comment;
pub mod config;
pub mod error;
pub mod history;
pub mod lock;
pub mod output;
pub mod project;
pub mod report;
pub mod service;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
