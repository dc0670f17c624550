use danby::kepler::{kepler_residual, principal_angle, KeplerSolution};

/// Re-substitute `E` into Kepler's equation and check the residual against `tolerance`.
pub fn assert_solves_kepler(e: f64, mean_anomaly: f64, sol: &KeplerSolution, tolerance: f64) {
    let m = principal_angle(mean_anomaly);
    assert_eq!(sol.mean_anomaly, m);

    let residual = kepler_residual(e, sol.eccentric_anomaly, m).abs();
    assert!(
        sol.converged,
        "no convergence for e = {e}, M = {mean_anomaly}: {sol}"
    );
    assert!(
        residual < tolerance,
        "residual {residual:e} above {tolerance:e} for e = {e}, M = {mean_anomaly}"
    );
}
