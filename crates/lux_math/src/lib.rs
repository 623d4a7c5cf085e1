//! Lux math - vectors, rays and affine transforms.
//!
//! All geometry runs in double precision. The glam `D*` types are re-exported
//! under their short names so downstream crates never spell out the precision.

pub use glam::{DMat4 as Mat4, DVec2 as Vec2, DVec3 as Vec3, DVec4 as Vec4};

mod aabb;
mod error;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use error::MathError;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{shear, Mat4Ext};

/// Checked operations on `Vec3` that glam leaves unchecked.
pub trait Vec3Ext: Sized {
    /// Normalize, failing on a zero-length (or non-finite) vector.
    fn unit(self) -> Result<Self, MathError>;
}

impl Vec3Ext for Vec3 {
    fn unit(self) -> Result<Self, MathError> {
        self.try_normalize().ok_or(MathError::ZeroLength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit() {
        let v = Vec3::new(3.0, 0.0, 4.0).unit().unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-12);
    }

    #[test]
    fn test_unit_zero_length_fails() {
        assert_eq!(Vec3::ZERO.unit(), Err(MathError::ZeroLength));
        assert_eq!(Vec3::splat(f64::NAN).unit(), Err(MathError::ZeroLength));
        assert_eq!(Vec3::new(f64::INFINITY, 0.0, 0.0).unit(), Err(MathError::ZeroLength));
    }

    #[test]
    fn test_unit_tiny_vector_keeps_direction() {
        let v = Vec3::new(0.0, -1e-100, 0.0).unit().unwrap();
        assert!((v + Vec3::Y).length() < 1e-12);
    }
}
