use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use danby::benchmark::orbit_sampler::OrbitSampler;
use danby::kepler::{solve_kepler_equation, solve_with};
use danby::kepler_params::KeplerParams;

const MAX_ERROR: f64 = 1e-15;

/// Uniform random in [−π, π)
#[inline]
fn rand_mean_anomaly(rng: &mut StdRng) -> f64 {
    std::f64::consts::PI * (2.0 * rng.random::<f64>() - 1.0)
}

/// Bench over eccentricities drawn uniformly in `[lo, hi)`.
fn bench_uniform_range(c: &mut Criterion, name: &str, seed: u64, lo: f64, hi: f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = 10_000usize;

    c.bench_function(name, |b| {
        b.iter_batched(
            || {
                // Pre-generate inputs to avoid RNG cost in the timed section
                (0..samples)
                    .map(|_| (rng.random_range(lo..hi), rand_mean_anomaly(&mut rng)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                // Benchmark only the solver calls
                for (e, m) in cases {
                    let sol = solve_kepler_equation(black_box(e), black_box(m), MAX_ERROR);
                    black_box(sol);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Typical regime: e ∈ [0.0, 0.7)
fn bench_typical(c: &mut Criterion) {
    bench_uniform_range(c, "solve_kepler_equation/typical_e<0.7", 0xDEADBEEF, 0.0, 0.7);
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.99)
fn bench_high_e(c: &mut Criterion) {
    bench_uniform_range(c, "solve_kepler_equation/high_e_0.7..0.99", 0xBADF00D, 0.7, 0.99);
}

/// Near-parabolic regime: e ∈ [0.99, 0.999999)
fn bench_near_parabolic(c: &mut Criterion) {
    bench_uniform_range(
        c,
        "solve_kepler_equation/near_parabolic_0.99..0.999999",
        0xFEEDFACE,
        0.99,
        0.999_999,
    );
}

/// Same orbit distribution as the benchmark driver (log-uniform in 1 − e).
fn bench_driver_distribution(c: &mut Criterion) {
    let mut sampler = OrbitSampler::new(1);
    let params = KeplerParams::default();
    let samples = 10_000usize;

    c.bench_function("solve_kepler_equation/driver_distribution", |b| {
        b.iter_batched(
            || sampler.by_ref().take(samples).collect::<Vec<_>>(),
            |orbits| {
                for orbit in orbits {
                    let sol = solve_with(
                        black_box(orbit.eccentricity),
                        black_box(orbit.mean_anomaly),
                        &params,
                    );
                    black_box(sol);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Fixed near-singular case, useful for stability profiling.
fn bench_fixed_stress(c: &mut Criterion) {
    let e = 0.999_999_f64;
    let m = 1.0e-4_f64;

    c.bench_function("solve_kepler_equation/fixed_stress_case", |b| {
        b.iter(|| {
            let sol = solve_kepler_equation(black_box(e), black_box(m), MAX_ERROR);
            black_box(sol.eccentric_anomaly);
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_near_parabolic, bench_driver_distribution, bench_fixed_stress
);
criterion_main!(benches);
