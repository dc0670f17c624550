//! Timed bulk solve over random orbits.
//!
//! [`run_benchmark`] draws `n_orbits` orbits from an [`OrbitSampler`], solves Kepler's
//! equation for each one and measures the wall-clock time of the whole loop (sampling
//! included). The first `n_save` solutions are kept in the [`BenchReport`] so they can be
//! persisted with [`crate::benchmark::result_file`] for plotting and accuracy checks.
//!
//! ```rust
//! use danby::benchmark::bench_run::{run_benchmark, BenchConfig};
//!
//! let config = BenchConfig::builder().n_orbits(1_000).n_save(10).build().unwrap();
//! let report = run_benchmark(&config);
//! assert_eq!(report.saved_count(), 10);
//! ```
use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::{
    benchmark::{orbit_sampler::OrbitSampler, progress_bar::fmt_dur},
    constants::{DEFAULT_BENCH_ORBITS, DEFAULT_BENCH_SAVED},
    kepler::{kepler_residual, KeplerSolver},
    kepler_errors::KeplerError,
    kepler_params::KeplerParams,
};

#[cfg(feature = "progress")]
use crate::benchmark::progress_bar::ChunkTimer;
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Benchmark configuration.
///
/// Defaults
/// -----------------
/// * `n_orbits`: 10 000 000
/// * `n_save`: 100 000
/// * `seed`: 1
/// * `params`: [`KeplerParams::default`] (`max_error = 1e-15`, 15 iterations)
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub n_orbits: usize,
    pub n_save: usize,
    pub seed: u64,
    pub params: KeplerParams,
}

impl BenchConfig {
    pub fn builder() -> BenchConfigBuilder {
        BenchConfigBuilder::new()
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            n_orbits: DEFAULT_BENCH_ORBITS,
            n_save: DEFAULT_BENCH_SAVED,
            seed: 1,
            params: KeplerParams::default(),
        }
    }
}

/// Builder for [`BenchConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct BenchConfigBuilder {
    config: BenchConfig,
}

impl BenchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: BenchConfig::default(),
        }
    }

    pub fn n_orbits(mut self, v: usize) -> Self {
        self.config.n_orbits = v;
        self
    }
    pub fn n_save(mut self, v: usize) -> Self {
        self.config.n_save = v;
        self
    }
    pub fn seed(mut self, v: u64) -> Self {
        self.config.seed = v;
        self
    }
    pub fn params(mut self, v: KeplerParams) -> Self {
        self.config.params = v;
        self
    }

    /// Validate and return the configuration.
    ///
    /// * `n_orbits ≥ 1`
    /// * `n_save ≤ n_orbits`
    /// * `n_save` fits the `i32` count of the result file
    pub fn build(self) -> Result<BenchConfig, KeplerError> {
        let c = &self.config;
        if c.n_orbits == 0 {
            return Err(KeplerError::InvalidBenchConfig(
                "n_orbits must be >= 1".into(),
            ));
        }
        if c.n_save > c.n_orbits {
            return Err(KeplerError::InvalidBenchConfig(format!(
                "n_save ({}) must not exceed n_orbits ({})",
                c.n_save, c.n_orbits
            )));
        }
        if i32::try_from(c.n_save).is_err() {
            return Err(KeplerError::InvalidBenchConfig(format!(
                "n_save ({}) does not fit in the result file",
                c.n_save
            )));
        }
        Ok(self.config)
    }
}

/// Outcome of a benchmark run.
///
/// The four sample vectors hold the first `saved_count()` orbits in generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    /// Wall-clock time of the sample + solve loop (seconds).
    pub execution_time_sec: f64,
    pub eccentricities: Vec<f64>,
    pub mean_anomalies: Vec<f64>,
    pub eccentric_anomalies: Vec<f64>,
    pub iterations: Vec<u32>,
    /// Number of solves performed.
    pub n_solved: usize,
    /// Number of solves that hit the iteration cap.
    pub n_not_converged: usize,
    /// Largest `|E − e·sin(E) − M|` over all solves.
    pub max_residual: f64,
    /// Average refinement count over all solves.
    pub mean_iterations: f64,
}

impl BenchReport {
    pub fn saved_count(&self) -> usize {
        self.eccentricities.len()
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kepler benchmark")?;
        writeln!(f, "----------------")?;
        writeln!(f, "  solves            = {}", self.n_solved)?;
        writeln!(
            f,
            "  execution time    = {} ({:.6} s)",
            fmt_dur(Duration::from_secs_f64(self.execution_time_sec)),
            self.execution_time_sec
        )?;
        if self.n_solved > 0 {
            writeln!(
                f,
                "  time per solve    = {:.1} ns",
                self.execution_time_sec * 1e9 / self.n_solved as f64
            )?;
        }
        writeln!(f, "  mean iterations   = {:.3}", self.mean_iterations)?;
        writeln!(f, "  not converged     = {}", self.n_not_converged)?;
        writeln!(f, "  max residual      = {:.3e}", self.max_residual)?;
        write!(f, "  saved solutions   = {}", self.saved_count())
    }
}

/// Running totals of the benchmark loop.
struct BenchAccumulator {
    report: BenchReport,
    n_save: usize,
    total_iterations: u64,
}

impl BenchAccumulator {
    fn new(n_save: usize) -> Self {
        Self {
            report: BenchReport {
                execution_time_sec: 0.0,
                eccentricities: Vec::with_capacity(n_save),
                mean_anomalies: Vec::with_capacity(n_save),
                eccentric_anomalies: Vec::with_capacity(n_save),
                iterations: Vec::with_capacity(n_save),
                n_solved: 0,
                n_not_converged: 0,
                max_residual: 0.0,
                mean_iterations: 0.0,
            },
            n_save,
            total_iterations: 0,
        }
    }

    /// Sample and solve `n` orbits.
    #[inline]
    fn solve_chunk(&mut self, sampler: &mut OrbitSampler, solver: &KeplerSolver, n: usize) {
        for _ in 0..n {
            let orbit = sampler.sample();
            let (e, m) = (orbit.eccentricity, orbit.mean_anomaly);
            let sol = solver.solve(e, m);

            let report = &mut self.report;
            if report.eccentricities.len() < self.n_save {
                report.eccentricities.push(e);
                report.mean_anomalies.push(m);
                report.eccentric_anomalies.push(sol.eccentric_anomaly);
                report.iterations.push(sol.iterations);
            }

            report.n_solved += 1;
            self.total_iterations += u64::from(sol.iterations);
            if !sol.converged {
                report.n_not_converged += 1;
            }
            let residual = kepler_residual(e, sol.eccentric_anomaly, sol.mean_anomaly).abs();
            if residual > report.max_residual {
                report.max_residual = residual;
            }
        }
    }

    fn finish(mut self, elapsed: Duration) -> BenchReport {
        self.report.execution_time_sec = elapsed.as_secs_f64();
        if self.report.n_solved > 0 {
            self.report.mean_iterations =
                self.total_iterations as f64 / self.report.n_solved as f64;
        }
        self.report
    }
}

/// Number of solves between two progress bar updates.
#[cfg(feature = "progress")]
const PROGRESS_CHUNK: usize = 100_000;

/// Run the benchmark described by `config`.
///
/// Arguments
/// -----------------
/// * `config`: validated benchmark configuration (see [`BenchConfig::builder`]).
///
/// Return
/// ----------
/// * A [`BenchReport`] with the timing, convergence statistics and saved solutions.
#[cfg(feature = "progress")]
pub fn run_benchmark(config: &BenchConfig) -> BenchReport {
    debug!(
        n_orbits = config.n_orbits,
        n_save = config.n_save,
        seed = config.seed,
        "starting Kepler benchmark"
    );

    let mut sampler = OrbitSampler::new(config.seed);
    let solver = KeplerSolver::new(config.params);
    let mut acc = BenchAccumulator::new(config.n_save);

    let pb = ProgressBar::new(config.n_orbits as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) \
             | {per_sec} | ETA {eta_precise} | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let mut chunk_timer = ChunkTimer::new(0.2);

    let t0 = Instant::now();
    let mut remaining = config.n_orbits;
    while remaining > 0 {
        let n = remaining.min(PROGRESS_CHUNK);
        acc.solve_chunk(&mut sampler, &solver, n);
        remaining -= n;

        let last = chunk_timer.tick();
        let avg = chunk_timer.avg();
        pb.set_message(format!("last: {}, avg: {}", fmt_dur(last), fmt_dur(avg)));
        pb.inc(n as u64);
    }
    let elapsed = t0.elapsed();
    pb.finish_and_clear();

    let report = acc.finish(elapsed);
    debug!(
        execution_time_sec = report.execution_time_sec,
        n_not_converged = report.n_not_converged,
        "Kepler benchmark finished"
    );
    report
}

/// Run the benchmark described by `config`.
///
/// Arguments
/// -----------------
/// * `config`: validated benchmark configuration (see [`BenchConfig::builder`]).
///
/// Return
/// ----------
/// * A [`BenchReport`] with the timing, convergence statistics and saved solutions.
#[cfg(not(feature = "progress"))]
pub fn run_benchmark(config: &BenchConfig) -> BenchReport {
    debug!(
        n_orbits = config.n_orbits,
        n_save = config.n_save,
        seed = config.seed,
        "starting Kepler benchmark"
    );

    let mut sampler = OrbitSampler::new(config.seed);
    let solver = KeplerSolver::new(config.params);
    let mut acc = BenchAccumulator::new(config.n_save);

    let t0 = Instant::now();
    acc.solve_chunk(&mut sampler, &solver, config.n_orbits);
    let elapsed = t0.elapsed();

    let report = acc.finish(elapsed);
    debug!(
        execution_time_sec = report.execution_time_sec,
        n_not_converged = report.n_not_converged,
        "Kepler benchmark finished"
    );
    report
}

#[cfg(test)]
mod bench_run_test {
    use super::*;
    use crate::kepler::solve_with;

    #[test]
    fn test_config_validation() {
        assert!(BenchConfig::builder().build().is_ok());
        assert_eq!(
            BenchConfig::builder().n_orbits(0).n_save(0).build(),
            Err(KeplerError::InvalidBenchConfig(
                "n_orbits must be >= 1".into()
            ))
        );
        assert!(matches!(
            BenchConfig::builder().n_orbits(10).n_save(11).build(),
            Err(KeplerError::InvalidBenchConfig(_))
        ));
    }

    #[test]
    fn test_small_run() {
        let params = KeplerParams::builder().max_error(1e-12).build().unwrap();
        let config = BenchConfig::builder()
            .n_orbits(2_000)
            .n_save(50)
            .seed(3)
            .params(params)
            .build()
            .unwrap();
        let report = run_benchmark(&config);

        assert_eq!(report.n_solved, 2_000);
        assert_eq!(report.saved_count(), 50);
        assert_eq!(report.iterations.len(), 50);
        assert_eq!(report.n_not_converged, 0);
        assert!(report.max_residual < 1e-12);
        assert!(report.mean_iterations > 0.0 && report.mean_iterations < 15.0);
        assert!(report.execution_time_sec >= 0.0);

        // Saved samples are the sampler's first orbits, solved with the same parameters
        let mut sampler = OrbitSampler::new(3);
        for i in 0..50 {
            let orbit = sampler.sample();
            assert_eq!(report.eccentricities[i], orbit.eccentricity);
            assert_eq!(report.mean_anomalies[i], orbit.mean_anomaly);
            let sol = solve_with(orbit.eccentricity, orbit.mean_anomaly, &params);
            assert_eq!(report.eccentric_anomalies[i], sol.eccentric_anomaly);
            assert_eq!(report.iterations[i], sol.iterations);
        }
    }

    #[test]
    fn test_report_display() {
        let config = BenchConfig::builder().n_orbits(10).n_save(2).build().unwrap();
        let report = run_benchmark(&config);
        let out = report.to_string();
        assert!(out.contains("solves            = 10"));
        assert!(out.contains("saved solutions   = 2"));
    }
}
