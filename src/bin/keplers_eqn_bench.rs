use camino::Utf8PathBuf;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use danby::benchmark::bench_run::{run_benchmark, BenchConfig};
use danby::benchmark::result_file::{write_csv, write_results};
use danby::constants::{
    DEFAULT_BENCH_ORBITS, DEFAULT_BENCH_SAVED, DEFAULT_MAX_ERROR, DEFAULT_MAX_ITERATIONS,
    DEFAULT_RESULT_FILE,
};
use danby::kepler_errors::KeplerError;
use danby::kepler_params::KeplerParams;

/// Solve Kepler's equation for random elliptic orbits and time the batch.
///
/// Usage:
///   keplers_eqn_bench [--orbits N] [--save NSAVE] [--max-error TOL] [--output FILE]
/// Example:
///   keplers_eqn_bench --orbits 1000000 --save 10000 --csv saved.csv --verbose
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of random orbits to solve.
    #[arg(long, default_value_t = DEFAULT_BENCH_ORBITS)]
    orbits: usize,

    /// Number of solutions written to the result file.
    #[arg(long, default_value_t = DEFAULT_BENCH_SAVED)]
    save: usize,

    /// Seed of the orbit generator.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Absolute tolerance on |E - e sin E - M|.
    #[arg(long, default_value_t = DEFAULT_MAX_ERROR)]
    max_error: f64,

    /// Cap on Danby refinements per solve.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// Binary result file.
    #[arg(long, default_value = DEFAULT_RESULT_FILE)]
    output: Utf8PathBuf,

    /// Also export the saved solutions as CSV.
    #[arg(long)]
    csv: Option<Utf8PathBuf>,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<(), KeplerError> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let params = KeplerParams::builder()
        .max_error(args.max_error)
        .max_iterations(args.max_iterations)
        .build()?;
    let config = BenchConfig::builder()
        .n_orbits(args.orbits)
        .n_save(args.save)
        .seed(args.seed)
        .params(params)
        .build()?;
    info!("{params}");

    let report = run_benchmark(&config);
    println!("execution time (sec) = {}", report.execution_time_sec);
    println!("{report}");

    write_results(&args.output, &report)?;
    info!(path = %args.output, saved = report.saved_count(), "result file written");

    if let Some(csv_path) = &args.csv {
        write_csv(csv_path, &report)?;
        info!(path = %csv_path, "CSV export written");
    }

    Ok(())
}
