//! # Orbit elements
//!
//! This module defines the [`OrbitElements`](crate::orbit_elements::OrbitElements) value type,
//! the six classical elements of an elliptic orbit:
//!
//! 1. **a** – Semi-major axis (length unit of the caller, ≥ 0)
//! 2. **e** – Eccentricity (unitless, `0 ≤ e < 1` for the solver)
//! 3. **I** – Inclination (radians)
//! 4. **Ω** – Longitude of ascending node (radians)
//! 5. **ϖ** – Longitude of periapse (radians)
//! 6. **M** – Mean anomaly (radians)
//!
//! Angles are conventionally kept in `[−π, π]`, but nothing is enforced on construction.
//!
//! ## Example
//!
//! ```rust
//! use danby::kepler_params::KeplerParams;
//! use danby::orbit_elements::OrbitElements;
//!
//! let orbit = OrbitElements::new(1.0, 0.5, 0.0, 0.0, 0.0, 1.0);
//! let sol = orbit.solve_kepler(&KeplerParams::default()).unwrap();
//! assert!(sol.converged);
//!
//! // Solving never touches the orbit itself
//! assert_eq!(orbit.mean_anomaly, 1.0);
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Eccentricity, Radian, DEGRAD},
    kepler::{check_eccentricity, solve_with, KeplerSolution},
    kepler_errors::KeplerError,
    kepler_params::KeplerParams,
};

/// Orbit elements `(a, e, I, Ω, ϖ, M)`.
///
/// Units
/// -----
/// * `semi_major_axis`: caller-defined length unit.
/// * `eccentricity`: unitless.
/// * `inclination`, `ascending_node_longitude`, `periapsis_longitude`, `mean_anomaly`: radians.
///
/// Notes
/// -----
/// Plain value object: [`Default`] gives all zeros, [`OrbitElements::new`] takes all six
/// values. Fields are public and may be reassigned freely, typically `mean_anomaly`
/// before each solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitElements {
    pub semi_major_axis: f64,
    pub eccentricity: Eccentricity,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_longitude: Radian,
    pub mean_anomaly: Radian,
}

impl OrbitElements {
    pub fn new(
        semi_major_axis: f64,
        eccentricity: Eccentricity,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_longitude: Radian,
        mean_anomaly: Radian,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis_longitude,
            mean_anomaly,
        }
    }

    /// Same orbit with another mean anomaly.
    pub fn with_mean_anomaly(self, mean_anomaly: Radian) -> Self {
        Self {
            mean_anomaly,
            ..self
        }
    }

    /// Solve Kepler's equation for the stored eccentricity and mean anomaly.
    ///
    /// Arguments
    /// ---------
    /// * `params` – tolerance and iteration cap of the solver.
    ///
    /// Return
    /// ------
    /// * `Ok(KeplerSolution)` – eccentric anomaly, iteration count and the normalized
    ///   mean anomaly used. The orbit itself is left unchanged.
    /// * `Err(KeplerError::InvalidEccentricity)` – if `e` is outside `[0, 1)`.
    ///
    /// See also
    /// --------
    /// * [`crate::kepler::solve_with`] – unchecked solver entry point.
    pub fn solve_kepler(&self, params: &KeplerParams) -> Result<KeplerSolution, KeplerError> {
        check_eccentricity(self.eccentricity)?;
        Ok(solve_with(self.eccentricity, self.mean_anomaly, params))
    }
}

impl fmt::Display for OrbitElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbit Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6}",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  I   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination * DEGRAD
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6} rad ({:.6}°)",
            self.ascending_node_longitude,
            self.ascending_node_longitude * DEGRAD
        )?;
        writeln!(
            f,
            "  ϖ   (longitude of periapse) = {:.6} rad ({:.6}°)",
            self.periapsis_longitude,
            self.periapsis_longitude * DEGRAD
        )?;
        writeln!(
            f,
            "  M   (mean anomaly)          = {:.6} rad ({:.6}°)",
            self.mean_anomaly,
            self.mean_anomaly * DEGRAD
        )
    }
}
