//! Fixed algebraic surfaces with hand-derived gradients.

use super::{ImplicitSurface, ScalarField};
use lux_math::{Aabb, Vec3};

/// Mitchell's quartic:
/// `4(x⁴ + (y² + z²)²) + 17x²(y² + z²) − 20(x² + y² + z²) + 17 = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mitchell;

impl ScalarField for Mitchell {
    fn value(&self, p: Vec3) -> f64 {
        let (x2, s) = (p.x * p.x, p.y * p.y + p.z * p.z);
        4.0 * (x2 * x2 + s * s) + 17.0 * x2 * s - 20.0 * (x2 + s) + 17.0
    }

    fn gradient(&self, p: Vec3) -> Option<Vec3> {
        let (x2, s) = (p.x * p.x, p.y * p.y + p.z * p.z);
        let dx = p.x * (16.0 * x2 + 34.0 * s - 40.0);
        // y and z only enter through s = y² + z²
        let radial = 16.0 * s + 34.0 * x2 - 40.0;
        Some(Vec3::new(dx, p.y * radial, p.z * radial))
    }
}

/// Taubin's heart:
/// `(x² + 9/4·y² + z² − 1)³ − x²z³ − 9/80·y²z³ = 0`, with z up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heart;

impl ScalarField for Heart {
    fn value(&self, p: Vec3) -> f64 {
        let (x2, y2, z3) = (p.x * p.x, p.y * p.y, p.z * p.z * p.z);
        let a = x2 + 2.25 * y2 + p.z * p.z - 1.0;
        a * a * a - x2 * z3 - 0.1125 * y2 * z3
    }

    fn gradient(&self, p: Vec3) -> Option<Vec3> {
        let (x2, y2, z2) = (p.x * p.x, p.y * p.y, p.z * p.z);
        let z3 = z2 * p.z;
        let a = x2 + 2.25 * y2 + z2 - 1.0;
        let a2 = 3.0 * a * a;
        Some(Vec3::new(
            a2 * 2.0 * p.x - 2.0 * p.x * z3,
            a2 * 4.5 * p.y - 0.225 * p.y * z3,
            a2 * 2.0 * p.z - 3.0 * x2 * z2 - 0.3375 * y2 * z2,
        ))
    }
}

impl ImplicitSurface<Mitchell> {
    /// Mitchell's surface in a box that just contains it (|p| < 2 on every axis).
    pub fn mitchell() -> Self {
        Self::new(Mitchell, Aabb::centered(Vec3::splat(2.2)))
    }
}

impl ImplicitSurface<Heart> {
    pub fn heart() -> Self {
        Self::new(
            Heart,
            Aabb::from_points(Vec3::new(-1.5, -1.0, -1.5), Vec3::new(1.5, 1.0, 1.5)),
        )
    }
}
