#![allow(dead_code)]

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use s2_sp_instance::UnitVec3;
use std::f64::consts::PI;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// (1,0,0), (0,1,0), (0,0,1), (-1,0,0): one antipodal pair, all other
/// pairs a quarter circle apart.
pub fn axis_points() -> Vec<UnitVec3> {
    vec![
        UnitVec3::new(1.0, 0.0, 0.0),
        UnitVec3::new(0.0, 1.0, 0.0),
        UnitVec3::new(0.0, 0.0, 1.0),
        UnitVec3::new(-1.0, 0.0, 0.0),
    ]
}

/// The six octahedron vertices (three antipodal pairs).
pub fn octahedron_points() -> Vec<UnitVec3> {
    vec![
        UnitVec3::new(1.0, 0.0, 0.0),
        UnitVec3::new(-1.0, 0.0, 0.0),
        UnitVec3::new(0.0, 1.0, 0.0),
        UnitVec3::new(0.0, -1.0, 0.0),
        UnitVec3::new(0.0, 0.0, 1.0),
        UnitVec3::new(0.0, 0.0, -1.0),
    ]
}

/// Generate Fibonacci sphere points (more uniform than random).
pub fn fibonacci_sphere_points(n: usize, jitter: f64, seed: u64) -> Vec<UnitVec3> {
    let mut rng = seeded_rng(seed);
    let golden_angle = PI * (3.0 - 5.0f64.sqrt());

    (0..n)
        .map(|i| {
            let y = 1.0 - (2.0 * i as f64 + 1.0) / n as f64;
            let radius = (1.0 - y * y).sqrt();
            let theta = golden_angle * i as f64;

            let mut x = radius * theta.cos();
            let mut z = radius * theta.sin();

            if jitter > 0.0 {
                x += rng.gen_range(-jitter..jitter);
                z += rng.gen_range(-jitter..jitter);
            }

            let len = (x * x + y * y + z * z).sqrt();
            UnitVec3::new(x / len, y / len, z / len)
        })
        .collect()
}

/// Evenly spaced points on the equator.
///
/// Produces many exactly tied arc lengths, which exercises the tie-break
/// in the deletion order.
pub fn great_circle_points(n: usize) -> Vec<UnitVec3> {
    (0..n)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / n as f64;
            UnitVec3::new(theta.cos(), theta.sin(), 0.0)
        })
        .collect()
}

/// Generate points clustered in a small spherical cap around the north pole.
///
/// Includes the south pole as an anchor so one arc is much longer than
/// the rest.
pub fn clustered_cap_points(n: usize, cap_radius_rad: f64, seed: u64) -> Vec<UnitVec3> {
    let mut rng = seeded_rng(seed);
    let mut points = Vec::with_capacity(n);
    points.push(UnitVec3::new(0.0, 0.0, -1.0));

    for _ in 1..n {
        let u: f64 = rng.gen();
        let cos_theta_max = cap_radius_rad.cos();
        let cos_theta = 1.0 - u * (1.0 - cos_theta_max);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let phi: f64 = rng.gen_range(0.0..2.0 * PI);
        points.push(UnitVec3::new(
            sin_theta * phi.cos(),
            sin_theta * phi.sin(),
            cos_theta,
        ));
    }

    points
}

/// Generate points on a hemisphere (asymmetric distribution).
pub fn hemisphere_points(n: usize, seed: u64) -> Vec<UnitVec3> {
    let mut rng = seeded_rng(seed);

    (0..n)
        .map(|_| {
            let z: f64 = rng.gen_range(0.0..1.0);
            let theta: f64 = rng.gen_range(0.0..2.0 * PI);
            let r = (1.0 - z * z).sqrt();
            UnitVec3::new(r * theta.cos(), r * theta.sin(), z)
        })
        .collect()
}
