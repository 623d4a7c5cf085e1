//! Random sampling helpers.

use lux_math::Vec2;
use rand::{Rng, RngCore};
use std::f64::consts::TAU;

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform point on a disk of `radius` via polar coordinates:
/// `r = radius·√U`, `θ = 2π·U'`.
pub fn sample_disk(radius: f64, rng: &mut dyn RngCore) -> Vec2 {
    let r = radius * gen_f64(rng).sqrt();
    let theta = TAU * gen_f64(rng);
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let u = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_sample_disk_stays_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(sample_disk(0.5, &mut rng).length() <= 0.5);
        }
    }

    #[test]
    fn test_sample_disk_is_area_uniform() {
        // Half the area of a unit disk lies within radius 1/√2
        let mut rng = StdRng::seed_from_u64(1);
        let n = 20_000;
        let inner = (0..n)
            .filter(|_| sample_disk(1.0, &mut rng).length() < std::f64::consts::FRAC_1_SQRT_2)
            .count();
        let fraction = inner as f64 / n as f64;
        assert!((fraction - 0.5).abs() < 0.02, "fraction {fraction}");
    }
}
