use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use linsys_solver::{ExecutionReport, Outcome, SolverPolicy};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An execution report together with the job metadata it was produced under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub job_name: String,
    /// RFC 3339 timestamp supplied by the caller
    pub generated_at: String,
    pub policy: SolverPolicy,
    pub report: ExecutionReport,
}

impl ReportDocument {
    pub fn new(
        job_name: impl Into<String>,
        generated_at: impl Into<String>,
        report: ExecutionReport,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            generated_at: generated_at.into(),
            policy: report.policy,
            report,
        }
    }
}

pub fn write_report_json(path: impl AsRef<Path>, doc: &ReportDocument) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let bytes = serde_json::to_vec_pretty(doc)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn load_report_json(path: impl AsRef<Path>) -> Result<ReportDocument> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn write_report_dat(path: impl AsRef<Path>, doc: &ReportDocument) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    fs::write(path, render_report(doc))?;
    Ok(())
}

/// Plain-text summary: one line per method, then the cross-check.
pub fn render_report(doc: &ReportDocument) -> String {
    let precision = doc.policy.round_decimals as usize;
    let mut out = String::new();
    let _ = writeln!(out, "*LINSYS REPORT");
    let _ = writeln!(out, "JOB: {}", doc.job_name);
    let _ = writeln!(out, "GENERATED: {}", doc.generated_at);
    let _ = writeln!(
        out,
        "POLICY: zero_threshold={:e} round_decimals={} cramer_max_order={}",
        doc.policy.zero_threshold,
        doc.policy.round_decimals,
        doc.policy
            .cramer_max_order
            .map_or_else(|| "none".to_string(), |n| n.to_string())
    );
    let _ = writeln!(out, "METHOD        STATUS              TIME_US  RANK  RESULT");

    for entry in &doc.report.entries {
        let rank = entry
            .outcome
            .rank()
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        let (status, result) = match &entry.outcome {
            Outcome::Solved { values, .. } => {
                let values: Vec<String> =
                    values.iter().map(|v| format!("{v:.precision$}")).collect();
                ("SOLVED", format!("[{}]", values.join(", ")))
            }
            Outcome::Failed { kind, message, .. } => (kind.as_str(), message.clone()),
        };
        let _ = writeln!(
            out,
            "{:<13} {:<19} {:>7}  {:>4}  {}",
            entry.method.name(),
            status,
            entry.elapsed.as_micros(),
            rank,
            result
        );
    }

    let check = doc.report.cross_check_default();
    if check.compared >= 2 {
        let _ = writeln!(
            out,
            "CROSS-CHECK: {} solutions, max deviation {:e}, {}",
            check.compared,
            check.max_deviation,
            if check.agree { "AGREE" } else { "DISAGREE" }
        );
    } else {
        let _ = writeln!(
            out,
            "CROSS-CHECK: skipped ({} solution(s))",
            check.compared
        );
    }
    if let Some(fastest) = doc.report.fastest() {
        let _ = writeln!(
            out,
            "FASTEST: {} ({})",
            fastest.method.name(),
            fastest.method.label()
        );
    }
    out
}

pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
