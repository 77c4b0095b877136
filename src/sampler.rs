//! Uniform vertex sampling on the unit sphere.

use crate::UnitVec3;
use glam::DVec3;
use rand::Rng;
use rand_distr::StandardNormal;

/// Norms below this are redrawn instead of normalized.
const MIN_SAMPLE_NORM: f64 = 1e-12;

/// Draw `n` points uniformly distributed on the unit sphere.
///
/// Each point is a vector of three independent standard-normal draws
/// projected onto the sphere. The Gaussian is rotation invariant, so the
/// projection is uniform (unlike naive latitude/longitude sampling, which
/// clusters at the poles).
pub fn sample_unit_sphere<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<UnitVec3> {
    (0..n).map(|_| sample_one(rng)).collect()
}

fn sample_one<R: Rng + ?Sized>(rng: &mut R) -> UnitVec3 {
    loop {
        let v = DVec3::new(
            rng.sample(StandardNormal),
            rng.sample(StandardNormal),
            rng.sample(StandardNormal),
        );
        let len = v.length();
        if len > MIN_SAMPLE_NORM {
            return UnitVec3::from_dvec3(v / len);
        }
    }
}
