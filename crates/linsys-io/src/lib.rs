//! File-level collaborators for the linsys engine.
//!
//! This crate provides:
//! - **Problem documents** (JSON): matrix, vector, optional method list and
//!   policy overrides, converted to engine inputs
//! - **Report writers**: execution reports as JSON or as a plain-text `.dat` summary
//!
//! The engine itself never touches files; everything here hands it
//! already-parsed numeric arrays.

pub mod error;
mod output;
mod problem;

pub use error::{IoError, Result};
pub use output::{
    ReportDocument, load_report_json, render_report, write_report_dat, write_report_json,
};
pub use problem::{PROBLEM_SCHEMA_VERSION, ProblemDocument, load_problem, save_problem};
