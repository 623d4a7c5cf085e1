use crate::{MathError, Vec3, Vec3Ext};

/// A ray in 3D space with origin and unit direction.
///
/// The direction is normalized at construction, so `t` along the ray is a
/// true Euclidean distance from `origin`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, MathError> {
        Ok(Self {
            origin,
            direction: direction.unit()?,
        })
    }

    /// Create a ray from a direction the caller already normalized.
    #[inline]
    pub fn from_unit(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!((direction.length_squared() - 1.0).abs() < 1e-9);
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
