//! Numerical policy constants and solver configuration.
//!
//! The zero threshold and the output precision decide where "true singularity"
//! ends and floating-point noise begins, so they are carried as an explicit
//! policy rather than being hard-coded in each solver.

use serde::{Deserialize, Serialize};

use crate::error::SolveError;

/// Absolute value below which a pivot, residual or determinant counts as zero.
pub const ZERO_THRESHOLD: f64 = 1e-12;

/// Number of decimal places kept in reported solution entries.
pub const ROUND_DECIMALS: u32 = 6;

/// Largest matrix order accepted by Cramer's rule by default.
///
/// Cofactor expansion is O(n!): order 10 is already ~3.6 million minors per
/// determinant, and Cramer needs n + 1 of them.
pub const CRAMER_MAX_ORDER: usize = 10;

/// Tunable numerical policy shared by every solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverPolicy {
    /// Numerical-zero threshold (pivots, inconsistency, main determinant)
    pub zero_threshold: f64,
    /// Decimal places applied to every solution entry
    pub round_decimals: u32,
    /// Largest order accepted by Cramer's rule; `None` disables the cap
    pub cramer_max_order: Option<usize>,
}

impl Default for SolverPolicy {
    fn default() -> Self {
        Self {
            zero_threshold: ZERO_THRESHOLD,
            round_decimals: ROUND_DECIMALS,
            cramer_max_order: Some(CRAMER_MAX_ORDER),
        }
    }
}

impl SolverPolicy {
    /// Policy with the Cramer size cap removed.
    pub fn uncapped() -> Self {
        Self {
            cramer_max_order: None,
            ..Default::default()
        }
    }

    /// Check that the policy values are usable.
    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.zero_threshold.is_finite() || self.zero_threshold <= 0.0 {
            return Err(SolveError::InvalidPolicy(format!(
                "zero threshold must be positive and finite, got {}",
                self.zero_threshold
            )));
        }
        if self.round_decimals > 15 {
            return Err(SolveError::InvalidPolicy(format!(
                "round_decimals must be at most 15, got {}",
                self.round_decimals
            )));
        }
        Ok(())
    }

    /// Whether `value` is numerically zero under this policy.
    #[inline]
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.zero_threshold
    }

    /// Round `value` to the configured number of decimal places.
    ///
    /// Negative zero is normalized to `0.0` so that `-0.0000001` reports as `0`.
    /// Magnitudes of 2^52 and above carry no fractional digits and are
    /// returned unchanged, so scaling never overflows.
    pub fn round(&self, value: f64) -> f64 {
        if !value.is_finite() || value.abs() >= 4_503_599_627_370_496.0 {
            return value;
        }
        let scale = 10f64.powi(self.round_decimals as i32);
        let rounded = (value * scale).round() / scale;
        if rounded == 0.0 { 0.0 } else { rounded }
    }

    /// Default tolerance for comparing solutions produced under this policy.
    pub fn agreement_tolerance(&self) -> f64 {
        10f64.powi(-(self.round_decimals as i32))
    }
}
