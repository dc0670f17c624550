mod common;

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use danby::constants::DPI;
use danby::kepler::{
    initial_guess, kepler_residual, solve_kepler_equation, solve_with, KeplerSolver,
};
use danby::kepler_params::KeplerParams;
use proptest::prelude::*;
use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::common::assert_solves_kepler;

proptest! {
    #[test]
    fn prop_solution_satisfies_equation(e in 0.0f64..0.999_999, m in -PI..PI) {
        let sol = solve_kepler_equation(e, m, 1e-12);
        assert_solves_kepler(e, m, &sol, 1e-12);
        prop_assert!(sol.iterations < 15);
    }

    #[test]
    fn prop_full_turns_do_not_change_solution(
        e in 0.0f64..0.99,
        m in -3.0f64..3.0,
        k in -5i32..=5,
    ) {
        let shifted = m + f64::from(k) * DPI;
        let a = solve_kepler_equation(e, m, 1e-10);
        let b = solve_kepler_equation(e, shifted, 1e-10);

        prop_assert!((a.mean_anomaly - b.mean_anomaly).abs() < 1e-13);
        prop_assert!((a.eccentric_anomaly - b.eccentric_anomaly).abs() < 1e-9);
        prop_assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn prop_odd_symmetry(e in 0.0f64..0.999_999, m in -3.1f64..3.1) {
        let pos = solve_kepler_equation(e, m, 1e-13);
        let neg = solve_kepler_equation(e, -m, 1e-13);

        prop_assert!((pos.eccentric_anomaly + neg.eccentric_anomaly).abs() < 1e-12);
        prop_assert_eq!(pos.iterations, neg.iterations);
    }

    #[test]
    fn prop_zero_mean_anomaly(e in 0.0f64..1.0) {
        let sol = solve_kepler_equation(e, 0.0, 1e-15);
        prop_assert_eq!(sol.eccentric_anomaly, 0.0);
        prop_assert_eq!(sol.iterations, 0);
    }

    #[test]
    fn prop_tighter_tolerance_never_worse(e in 0.0f64..0.999_999, m in -PI..PI) {
        let loose = solve_kepler_equation(e, m, 1e-6);
        let tight = solve_kepler_equation(e, m, 1e-15);

        let r_loose = kepler_residual(e, loose.eccentric_anomaly, loose.mean_anomaly).abs();
        let r_tight = kepler_residual(e, tight.eccentric_anomaly, tight.mean_anomaly).abs();
        prop_assert!(r_tight <= r_loose + 4.0 * f64::EPSILON);
        prop_assert!(tight.iterations >= loose.iterations);
    }
}

#[test]
fn test_concrete_scenario() {
    let sol = solve_kepler_equation(0.5, 1.0, 1e-12);

    assert_solves_kepler(0.5, 1.0, &sol, 1e-12);
    assert_abs_diff_eq!(sol.eccentric_anomaly, 1.498_701_133_5, epsilon = 1e-9);
    assert!(sol.iterations <= 6);
}

#[test]
fn test_near_parabolic_quarter_orbit() {
    let e = 0.999_999;
    let sol = solve_kepler_equation(e, PI / 2.0, 1e-15);

    assert!(sol.eccentric_anomaly.is_finite());
    assert!(sol.iterations <= 15);
    assert!(kepler_residual(e, sol.eccentric_anomaly, PI / 2.0).abs() <= 1e-14);
}

#[test]
fn test_near_parabolic_small_mean_anomaly() {
    // f' vanishes at the root as e -> 1 and M -> 0
    let e = 0.999_999;
    for m in [1e-3, 1e-6, -1e-8] {
        let sol = solve_kepler_equation(e, m, 1e-14);
        assert_solves_kepler(e, m, &sol, 1e-14);
    }
}

#[test]
fn test_matches_newton_raphson() {
    let solver = KeplerSolver::new(KeplerParams::builder().max_error(1e-14).build().unwrap());

    for &e in &[0.0, 0.01, 0.2, 0.5, 0.75, 0.9] {
        for i in -8..=8 {
            let m = f64::from(i) * 0.39;

            let f = |x: f64| x - e * x.sin() - m;
            let df = |x: f64| 1.0 - e * x.cos();
            let mut conv = SimpleConvergency {
                eps: 1e-14,
                max_iter: 100,
            };
            let newton = find_root_newton_raphson(initial_guess(e, m), &f, &df, &mut conv)
                .expect("Newton-Raphson reference solve");

            let sol = solver.solve(e, m);
            assert_abs_diff_eq!(sol.eccentric_anomaly, newton, epsilon = 1e-10);
        }
    }
}

#[test]
fn test_fewer_iterations_than_cap_is_reported() {
    let params = KeplerParams::builder()
        .max_error(1e-15)
        .max_iterations(2)
        .build()
        .unwrap();
    let sol = solve_with(0.999_999, 1e-3, &params);

    assert!(!sol.converged);
    assert_eq!(sol.iterations, 2);
    assert!(sol.eccentric_anomaly.is_finite());
}

#[test]
fn test_solver_is_shareable_across_threads() {
    let solver = KeplerSolver::default();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            std::thread::spawn(move || {
                let m = 0.5 + f64::from(t);
                (m, solver.solve(0.6, m))
            })
        })
        .collect();

    for h in handles {
        let (m, sol) = h.join().unwrap();
        assert_eq!(sol, solve_kepler_equation(0.6, m, 1e-15));
    }
}
