//! # Kepler's equation solver (Danby's method)
//!
//! This module solves Kepler's equation for elliptic orbits,
//!
//! ```text
//! M = E − e·sin(E),     0 ≤ e < 1,
//! ```
//!
//! for the eccentric anomaly `E` given the eccentricity `e` and the mean anomaly `M`.
//!
//! ## Algorithm
//!
//! 1. **Normalization** – `M` is reduced modulo 2π into `(−π, π]` ([`principal_angle`]).
//! 2. **Initial guess** – `E₀ = M + sign(sin M)·0.85·e` ([`initial_guess`]). The offset
//!    moves the starting point towards the root on the side where `E` and `M` separate the
//!    most at high eccentricity.
//! 3. **Refinement** – with `f(E) = E − e·sin(E) − M` and its derivatives
//!    `f' = 1 − e·cos E`, `f'' = e·sin E`, `f''' = e·cos E`, each step applies three nested
//!    corrections:
//!
//!    ```text
//!    δ₁ = −f / f'
//!    δ₂ = −f / (f' + δ₁·f''/2)
//!    δ₃ = −f / (f' + δ₂·f''/2 + δ₂²·f'''/6)
//!    E  ← E + δ₃
//!    ```
//!
//!    ([`danby_correction`]). The iteration stops as soon as `|f(E)| < max_error`, or after
//!    `max_iterations` refinements.
//!
//! ## Non-convergence
//!
//! Reaching the iteration cap is **not** an error: a warning is emitted through
//! [`tracing`] and the last iterate is returned with
//! [`KeplerSolution::converged`] set to `false`. A simulation driving millions of solves
//! is never interrupted by a single pathological input.
//!
//! ## Example
//!
//! ```rust
//! use danby::kepler::{kepler_residual, solve_kepler_equation};
//!
//! let sol = solve_kepler_equation(0.5, 1.0, 1e-12);
//! assert!(sol.converged);
//! assert!(kepler_residual(0.5, sol.eccentric_anomaly, 1.0).abs() < 1e-12);
//! ```
//!
//! ## See also
//!
//! * [`crate::kepler_params::KeplerParams`] – tolerance and iteration cap.
//! * [`crate::orbit_elements::OrbitElements::solve_kepler`] – solve from stored elements.
//! * Danby, *Fundamentals of Celestial Mechanics*, 2nd ed., §6.6.
use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    constants::{Eccentricity, Radian, DPI, INITIAL_GUESS_FACTOR},
    kepler_errors::KeplerError,
    kepler_params::KeplerParams,
};

/// Outcome of one Kepler solve.
///
/// Fields
/// -----------------
/// * `eccentric_anomaly` – last iterate `E` (radians, not re-normalized).
/// * `iterations` – number of refinements applied (0 when the initial guess already met the tolerance).
/// * `converged` – whether `|E − e·sin(E) − M| < max_error` was reached before the cap.
/// * `residual` – `|E − e·sin(E) − M|` at the last evaluated iterate.
/// * `mean_anomaly` – the normalized mean anomaly in `(−π, π]` the solve actually used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerSolution {
    pub eccentric_anomaly: Radian,
    pub iterations: u32,
    pub converged: bool,
    pub residual: f64,
    pub mean_anomaly: Radian,
}

impl KeplerSolution {
    /// Return the `(E, iterations)` pair.
    pub fn into_pair(self) -> (Radian, u32) {
        (self.eccentric_anomaly, self.iterations)
    }
}

impl From<KeplerSolution> for (Radian, u32) {
    fn from(sol: KeplerSolution) -> Self {
        sol.into_pair()
    }
}

impl fmt::Display for KeplerSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E = {:.15} rad (M = {:.15} rad, {} iteration(s), residual = {:.3e}{})",
            self.eccentric_anomaly,
            self.mean_anomaly,
            self.iterations,
            self.residual,
            if self.converged { "" } else { ", NOT converged" }
        )
    }
}

/// Return the principal value of an angle in `(−π, π]`.
///
/// The angle is first reduced with the truncated remainder `a mod 2π` (same sign as `a`),
/// then shifted by ±2π when it falls outside `(−π, π]`.
pub fn principal_angle(a: Radian) -> Radian {
    let mut m = a % DPI;
    if m > PI {
        m -= DPI;
    }
    if m <= -PI {
        m += DPI;
    }
    m
}

/// Initial guess `E₀ = M + sign(sin M)·0.85·e`.
///
/// `sign(sin M)` is `+1` when `sin M > 0` and `−1` when `sin M < 0`. At `sin M = 0`
/// (`M = 0`) the offset vanishes, so the fixed point `E = M = 0` is returned as is.
#[inline]
pub fn initial_guess(eccentricity: Eccentricity, mean_anomaly: Radian) -> Radian {
    let s = mean_anomaly.sin();
    let sgn = if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    };
    mean_anomaly + sgn * INITIAL_GUESS_FACTOR * eccentricity
}

/// Third-order correction step of Danby's method.
///
/// Arguments
/// -----------------
/// * `f`: residual `E − e·sin(E) − M`.
/// * `df`: first derivative `1 − e·cos(E)`.
/// * `ddf`: second derivative `e·sin(E)`.
/// * `dddf`: third derivative `e·cos(E)`.
///
/// Return
/// ----------
/// * The correction `δ₃` to add to `E`.
#[inline]
pub fn danby_correction(f: f64, df: f64, ddf: f64, dddf: f64) -> f64 {
    let d1 = -f / df;
    let d2 = -f / (df + d1 * ddf / 2.0);
    -f / (df + d2 * ddf / 2.0 + d2 * d2 * dddf / 6.0)
}

/// Kepler's equation evaluated at `E`: `E − e·sin(E) − M`.
#[inline]
pub fn kepler_residual(
    eccentricity: Eccentricity,
    eccentric_anomaly: Radian,
    mean_anomaly: Radian,
) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}

/// Mean anomaly of an eccentric anomaly: `M = E − e·sin(E)`.
#[inline]
pub fn eccentric_to_mean(eccentric_anomaly: Radian, eccentricity: Eccentricity) -> Radian {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}

/// Check that `e` describes an ellipse (`0 ≤ e < 1`).
pub fn check_eccentricity(eccentricity: Eccentricity) -> Result<(), KeplerError> {
    if (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(KeplerError::InvalidEccentricity(eccentricity))
    }
}

/// Solve Kepler's equation with a tolerance and the default iteration cap.
///
/// Arguments
/// -----------------
/// * `eccentricity`: orbital eccentricity, **precondition** `0 ≤ e < 1` (not checked).
/// * `mean_anomaly`: mean anomaly in radians, any real value.
/// * `max_error`: absolute tolerance on `|E − e·sin(E) − M|`.
///
/// Return
/// ----------
/// * A [`KeplerSolution`]; see [`solve_with`] for the details.
///
/// See also
/// ------------
/// * [`try_solve_kepler_equation`] – same, with an eccentricity check.
pub fn solve_kepler_equation(
    eccentricity: Eccentricity,
    mean_anomaly: Radian,
    max_error: f64,
) -> KeplerSolution {
    let params = KeplerParams {
        max_error,
        ..KeplerParams::default()
    };
    solve_with(eccentricity, mean_anomaly, &params)
}

/// Checked variant of [`solve_kepler_equation`].
///
/// Return
/// ----------
/// * `Err(KeplerError::InvalidEccentricity)` if `e` is outside `[0, 1)` or NaN.
pub fn try_solve_kepler_equation(
    eccentricity: Eccentricity,
    mean_anomaly: Radian,
    max_error: f64,
) -> Result<KeplerSolution, KeplerError> {
    check_eccentricity(eccentricity)?;
    Ok(solve_kepler_equation(eccentricity, mean_anomaly, max_error))
}

/// Solve Kepler's equation with explicit solver parameters.
///
/// Arguments
/// -----------------
/// * `eccentricity`: orbital eccentricity, **precondition** `0 ≤ e < 1` (not checked).
/// * `mean_anomaly`: mean anomaly in radians, normalized into `(−π, π]` before solving.
/// * `params`: tolerance and iteration cap.
///
/// Return
/// ----------
/// * A [`KeplerSolution`] holding the last iterate, the refinement count and the
///   convergence flag. When the cap is reached, `iterations == params.max_iterations`,
///   `converged == false` and a warning is logged.
pub fn solve_with(
    eccentricity: Eccentricity,
    mean_anomaly: Radian,
    params: &KeplerParams,
) -> KeplerSolution {
    let m = principal_angle(mean_anomaly);
    let mut ecc_anom = initial_guess(eccentricity, m);

    let mut residual = f64::INFINITY;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < params.max_iterations {
        let es = eccentricity * ecc_anom.sin();
        let ec = eccentricity * ecc_anom.cos();
        let f = ecc_anom - es - m;
        residual = f.abs();
        if residual < params.max_error {
            converged = true;
            break;
        }

        ecc_anom += danby_correction(f, 1.0 - ec, es, ec);
        iterations += 1;
    }

    if !converged {
        warn!(
            eccentricity,
            mean_anomaly = m,
            residual,
            iterations,
            "Kepler equation failed to converge"
        );
    }

    KeplerSolution {
        eccentric_anomaly: ecc_anom,
        iterations,
        converged,
        residual,
        mean_anomaly: m,
    }
}

/// Reusable solver handle carrying its [`KeplerParams`].
///
/// The solver holds no mutable state: one instance can be shared by reference across
/// threads and used for any number of solves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeplerSolver {
    params: KeplerParams,
}

impl KeplerSolver {
    pub fn new(params: KeplerParams) -> Self {
        Self { params }
    }

    /// Solve for `E`; the eccentricity precondition is not checked.
    pub fn solve(&self, eccentricity: Eccentricity, mean_anomaly: Radian) -> KeplerSolution {
        solve_with(eccentricity, mean_anomaly, &self.params)
    }

    /// Solve for `E` after checking `0 ≤ e < 1`.
    pub fn try_solve(
        &self,
        eccentricity: Eccentricity,
        mean_anomaly: Radian,
    ) -> Result<KeplerSolution, KeplerError> {
        check_eccentricity(eccentricity)?;
        Ok(self.solve(eccentricity, mean_anomaly))
    }
}
