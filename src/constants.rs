//! # Constants and type definitions for Danby
//!
//! This module centralizes the **numerical defaults** of the Kepler solver, the
//! **sampling bounds** used by the benchmark driver and a few **type aliases**
//! shared across the crate.
//!
//! ## Overview
//!
//! - Angle constants (2π)
//! - Solver defaults (tolerance, iteration cap, initial-guess factor)
//! - Random orbit sampling bounds for the benchmark driver
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Angles
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------
// Solver defaults
// -------------------------------------------------------------------------------------------------

/// Maximum number of Danby refinements before the solver gives up.
pub const DEFAULT_MAX_ITERATIONS: u32 = 15;

/// Default absolute tolerance on the residual `|E − e·sin(E) − M|`.
pub const DEFAULT_MAX_ERROR: f64 = 1.0e-15;

/// Offset factor of the initial guess `E₀ = M + sign(sin M)·k·e`.
pub const INITIAL_GUESS_FACTOR: f64 = 0.85;

// -------------------------------------------------------------------------------------------------
// Benchmark driver
// -------------------------------------------------------------------------------------------------

/// Decades spanned by `1 − e` when sampling random orbits: `log10(1 − e) ∈ (−6, 0]`.
pub const SAMPLED_ECC_DECADES: f64 = 6.0;

/// Number of orbits solved by a default benchmark run.
pub const DEFAULT_BENCH_ORBITS: usize = 10_000_000;

/// Number of solutions persisted by a default benchmark run.
pub const DEFAULT_BENCH_SAVED: usize = 100_000;

/// Default name of the binary result file.
pub const DEFAULT_RESULT_FILE: &str = "keplers_eqn.dat";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Orbital eccentricity (unitless)
pub type Eccentricity = f64;
