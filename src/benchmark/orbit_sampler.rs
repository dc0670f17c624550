//! Random elliptic orbits for the benchmark driver.
//!
//! Each orbit has `a = 1`, `I = Ω = ϖ = 0` and:
//!
//! * an eccentricity `e = 1 − x` with `x = 10^(−6·rn)`, so that `log10(1 − e)` is uniform over
//!   `(−6, 0]` and `e` spans `[0, 1 − 10⁻⁶]`, which stresses the near-parabolic regime;
//! * a mean anomaly `M = π·(2·rn − 1)`, uniform over `[−π, π)`.
//!
//! Two draws of [`rand::Rng::random`] are consumed per orbit, eccentricity first.
use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{constants::SAMPLED_ECC_DECADES, orbit_elements::OrbitElements};

/// Seeded generator of benchmark orbits.
pub struct OrbitSampler {
    rng: StdRng,
}

impl OrbitSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw an eccentricity, log-uniform in `1 − e`.
    #[inline]
    pub fn eccentricity(&mut self) -> f64 {
        let rn = self.rng.random::<f64>();
        1.0 - 10f64.powf(-SAMPLED_ECC_DECADES * rn)
    }

    /// Draw a mean anomaly uniform over `[−π, π)`.
    #[inline]
    pub fn mean_anomaly(&mut self) -> f64 {
        let rn = self.rng.random::<f64>();
        PI * (2.0 * rn - 1.0)
    }

    #[inline]
    pub fn sample(&mut self) -> OrbitElements {
        let e = self.eccentricity();
        let m = self.mean_anomaly();
        OrbitElements::new(1.0, e, 0.0, 0.0, 0.0, m)
    }
}

impl Iterator for OrbitSampler {
    type Item = OrbitElements;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.sample())
    }
}

#[cfg(test)]
mod orbit_sampler_test {
    use super::*;

    #[test]
    fn test_samples_are_elliptic() {
        let mut sampler = OrbitSampler::new(1);
        for orbit in sampler.by_ref().take(10_000) {
            assert!((0.0..=1.0 - 1e-6 + 1e-12).contains(&orbit.eccentricity));
            assert!(orbit.mean_anomaly >= -PI && orbit.mean_anomaly < PI);
            assert_eq!(orbit.semi_major_axis, 1.0);
            assert_eq!(orbit.inclination, 0.0);
        }
    }

    #[test]
    fn test_eccentricity_is_log_uniform() {
        // Roughly a sixth of the samples per decade of 1 - e
        let mut sampler = OrbitSampler::new(7);
        let n = 60_000;
        let above_1e3 = (0..n)
            .map(|_| sampler.eccentricity())
            .filter(|e| 1.0 - e < 1e-3)
            .count();
        let frac = above_1e3 as f64 / n as f64;
        assert!((frac - 0.5).abs() < 0.02, "fraction = {frac}");
    }

    #[test]
    fn test_same_seed_same_orbits() {
        let a: Vec<_> = OrbitSampler::new(42).take(5).collect();
        let b: Vec<_> = OrbitSampler::new(42).take(5).collect();
        assert_eq!(a, b);
    }
}
