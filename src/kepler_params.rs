//! # Kepler solver parameters
//!
//! This module defines the [`KeplerParams`](crate::kepler_params::KeplerParams) configuration
//! struct and its builder, which control the stopping rule of the Danby iteration
//! implemented in [`crate::kepler`].
//!
//! ## Purpose
//!
//! Two knobs govern every solve:
//!
//! - `max_error` – absolute tolerance on the residual `|E − e·sin(E) − M|`. The iteration
//!   stops as soon as the residual of the current iterate is strictly below it.
//! - `max_iterations` – hard cap on the number of refinements. It is the only
//!   bounded-time guarantee of the solver: when reached, the last iterate is returned
//!   with `converged = false`.
//!
//! ## Example
//!
//! ```rust
//! use danby::kepler_params::KeplerParams;
//!
//! let params = KeplerParams::builder()
//!     .max_error(1e-12)
//!     .max_iterations(20)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.max_iterations, 20);
//! ```
//!
//! ## See also
//!
//! * [`crate::kepler::solve_with`] – main entry point consuming these parameters.
//! * [`crate::kepler::KeplerSolver`] – solver handle owning a copy of the parameters.
use crate::constants::{DEFAULT_MAX_ERROR, DEFAULT_MAX_ITERATIONS};
use crate::kepler_errors::KeplerError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering::Greater;
use std::fmt;

/// Configuration parameters of the Danby Kepler solver.
///
/// Fields
/// -----------------
/// * `max_error` – absolute tolerance on `|E − e·sin(E) − M|` (radians).
/// * `max_iterations` – maximum number of Danby refinements.
///
/// Defaults
/// -----------------
/// * `max_error`: 1.0e-15
/// * `max_iterations`: 15
///
/// Tolerances below the spacing of doubles around `M` cannot be met for every input;
/// such solves run until the cap and are reported as not converged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerParams {
    /// Absolute tolerance on the Kepler residual.
    pub max_error: f64,
    /// Maximum number of refinements.
    pub max_iterations: u32,
}

impl KeplerParams {
    /// Create a new [`KeplerParamsBuilder`] initialized with the defaults.
    pub fn builder() -> KeplerParamsBuilder {
        KeplerParamsBuilder::new()
    }
}

impl Default for KeplerParams {
    fn default() -> Self {
        KeplerParams {
            max_error: DEFAULT_MAX_ERROR,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Builder for [`KeplerParams`], with validation.
#[derive(Debug, Clone)]
pub struct KeplerParamsBuilder {
    params: KeplerParams,
}

impl Default for KeplerParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeplerParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: KeplerParams::default(),
        }
    }

    pub fn max_error(mut self, v: f64) -> Self {
        self.params.max_error = v;
        self
    }

    pub fn max_iterations(mut self, v: u32) -> Self {
        self.params.max_iterations = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Finalize the builder and produce a [`KeplerParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `max_error > 0.0` and finite – NaN, zero, negative and infinite tolerances are rejected.
    /// * `1 ≤ max_iterations ≤ i32::MAX`, so that counts fit the result file.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(KeplerParams)` if all values are valid.
    /// * `Err(KeplerError::InvalidSolverParameter)` otherwise.
    pub fn build(self) -> Result<KeplerParams, KeplerError> {
        let p = &self.params;

        if !Self::gt0(p.max_error) || !p.max_error.is_finite() {
            return Err(KeplerError::InvalidSolverParameter(
                "max_error must be finite and > 0".into(),
            ));
        }
        if p.max_iterations == 0 {
            return Err(KeplerError::InvalidSolverParameter(
                "max_iterations must be >= 1".into(),
            ));
        }
        if i32::try_from(p.max_iterations).is_err() {
            return Err(KeplerError::InvalidSolverParameter(format!(
                "max_iterations must be <= {}",
                i32::MAX
            )));
        }

        Ok(self.params)
    }
}

impl fmt::Display for KeplerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 32;
            writeln!(f, "Kepler Solver Parameters")?;
            writeln!(f, "------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "max_error      = {:.1e}",
                self.max_error,
                "Tolerance on |E - e sin E - M|"
            )?;
            line!(
                "max_iterations = {}",
                self.max_iterations,
                "Cap on Danby refinements"
            )?;
            Ok(())
        } else {
            write!(
                f,
                "KeplerParams(max_error={:.1e}, max_iterations={})",
                self.max_error, self.max_iterations
            )
        }
    }
}
