//! # Benchmark driver
//!
//! Bulk timing of the Kepler solver on random elliptic orbits:
//!
//! - [`orbit_sampler`](crate::benchmark::orbit_sampler): seeded generator of random orbits
//!   (eccentricity log-uniform in `1 − e`, mean anomaly uniform over `[−π, π)`),
//! - [`bench_run`](crate::benchmark::bench_run): timed sample + solve loop and its report,
//! - [`result_file`](crate::benchmark::result_file): fixed-layout binary result file (and CSV export),
//! - [`progress_bar`](crate::benchmark::progress_bar): chunk timer and duration formatting
//!   used by the optional progress bar (`progress` feature).
//!
//! ## Typical workflow
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use danby::benchmark::bench_run::{run_benchmark, BenchConfig};
//! use danby::benchmark::result_file::write_results;
//!
//! let report = run_benchmark(&BenchConfig::default());
//! println!("execution time (sec) = {}", report.execution_time_sec);
//! write_results(Utf8Path::new("keplers_eqn.dat"), &report).unwrap();
//! ```

/// Timed bulk solve and its report.
pub mod bench_run;

/// Random orbit generation.
pub mod orbit_sampler;

/// Chunk timing helpers.
pub mod progress_bar;

/// Binary result file and CSV export.
pub mod result_file;
