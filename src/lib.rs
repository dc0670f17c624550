//! # Danby
//!
//! Kepler's equation solver for elliptic orbits, `M = E − e·sin(E)` with `0 ≤ e < 1`,
//! based on Danby's third-order iteration, plus the benchmark driver used to measure
//! its speed and accuracy over random orbits.
//!
//! ```rust
//! use danby::kepler::solve_kepler_equation;
//!
//! let (ecc_anom, iterations) = solve_kepler_equation(0.5, 1.0, 1e-12).into_pair();
//! assert!((ecc_anom - 1.498_701_133_5).abs() < 1e-9);
//! assert!(iterations <= 6);
//! ```
pub mod benchmark;
pub mod constants;
pub mod kepler;
pub mod kepler_errors;
pub mod kepler_params;
pub mod orbit_elements;
