use std::fs;
use std::path::Path;

use linsys_solver::{
    DMatrix, DVector, Method, SolverPolicy, matrix_from_rows, vector_from_slice,
};
use serde::{Deserialize, Serialize};

use crate::error::{IoError, Result};
use crate::output::ensure_parent_dir;

pub const PROBLEM_SCHEMA_VERSION: u32 = 1;

/// A linear system `A x = b` as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemDocument {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub name: String,
    /// Coefficient matrix, one inner vector per row
    pub matrix: Vec<Vec<f64>>,
    pub vector: Vec<f64>,
    /// Methods to run; empty means all of them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<SolverPolicy>,
}

fn default_schema_version() -> u32 {
    PROBLEM_SCHEMA_VERSION
}

impl ProblemDocument {
    pub fn new(name: impl Into<String>, matrix: Vec<Vec<f64>>, vector: Vec<f64>) -> Self {
        Self {
            schema_version: PROBLEM_SCHEMA_VERSION,
            name: name.into(),
            matrix,
            vector,
            methods: Vec::new(),
            policy: None,
        }
    }

    /// Dense engine inputs. Ragged or empty matrices are rejected here;
    /// length mismatches are left for the solvers to classify.
    pub fn system(&self) -> Result<(DMatrix<f64>, DVector<f64>)> {
        let a = matrix_from_rows(&self.matrix)?;
        Ok((a, vector_from_slice(&self.vector)))
    }

    /// Requested methods, defaulting to all three.
    pub fn requested_methods(&self) -> Vec<Method> {
        if self.methods.is_empty() {
            Method::ALL.to_vec()
        } else {
            self.methods.clone()
        }
    }

    pub fn effective_policy(&self) -> SolverPolicy {
        self.policy.unwrap_or_default()
    }
}

pub fn save_problem(path: impl AsRef<Path>, doc: &ProblemDocument) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let bytes = serde_json::to_vec_pretty(doc)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn load_problem(path: impl AsRef<Path>) -> Result<ProblemDocument> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let doc: ProblemDocument = serde_json::from_slice(&bytes)?;
    if doc.schema_version != PROBLEM_SCHEMA_VERSION {
        return Err(IoError::InvalidDocument(format!(
            "{}: unsupported schema version {}",
            path.display(),
            doc.schema_version
        )));
    }
    log::debug!(
        "loaded problem '{}' ({}x{}) from {}",
        doc.name,
        doc.matrix.len(),
        doc.matrix.first().map_or(0, Vec::len),
        path.display()
    );
    Ok(doc)
}
