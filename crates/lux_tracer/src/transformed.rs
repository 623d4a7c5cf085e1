//! Affine transform wrapper for any hittable.
//!
//! Instead of giving every primitive transform-aware intersection code, the
//! wrapper maps the world ray into object space, delegates, and maps the hit
//! back:
//! 1. origin through M⁻¹ as a point, direction through M⁻¹ as a vector
//! 2. intersect the wrapped object
//! 3. hit point through M, normal through (M⁻¹)ᵀ and renormalized
//! 4. recompute t along the world ray, since scaling changes the
//!    parametrization

use crate::{
    error::TracerResult,
    hittable::{HitRecord, Hittable, MaterialId, CAST_EPSILON},
};
use lux_math::{Mat4, Mat4Ext, Ray};

/// A hittable placed in the world by an invertible affine matrix.
pub struct Transformed {
    inner: Box<dyn Hittable>,

    /// Object-to-world transform
    matrix: Mat4,

    /// World-to-object transform (for ray transformation)
    inverse: Mat4,

    /// (M⁻¹)ᵀ for carrying normals to world space
    inverse_transpose: Mat4,

    /// Attached to hits whose wrapped object reports no material
    material: Option<MaterialId>,

    epsilon: f64,
}

impl Transformed {
    /// Wrap `inner` with the object-to-world `matrix`. Fails if the matrix
    /// is singular.
    pub fn new(inner: Box<dyn Hittable>, matrix: Mat4) -> TracerResult<Self> {
        let inverse = matrix.try_inverse()?;
        log::debug!("Created transform wrapper, det={}", matrix.determinant());

        Ok(Self {
            inner,
            matrix,
            inverse,
            inverse_transpose: inverse.transpose(),
            material: None,
            epsilon: CAST_EPSILON,
        })
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }
}

impl Hittable for Transformed {
    fn hit(&self, ray: &Ray) -> HitRecord {
        let object_origin = self.inverse.transform_point_homogeneous(ray.origin);
        let object_direction = self.inverse.transform_direction(ray.direction);
        let Ok(object_ray) = Ray::new(object_origin, object_direction) else {
            return HitRecord::miss();
        };

        let object_hit = self.inner.hit(&object_ray);
        let (Some(object_point), Some(object_normal)) = (object_hit.point(), object_hit.normal())
        else {
            return HitRecord::miss();
        };

        let world_point = self.matrix.transform_point_homogeneous(object_point);
        let Some(world_normal) = self
            .inverse_transpose
            .transform_direction(object_normal)
            .try_normalize()
        else {
            return HitRecord::miss();
        };

        let world_t = (world_point - ray.origin).dot(ray.direction);
        if world_t <= self.epsilon {
            return HitRecord::miss();
        }

        let mut rec = HitRecord::new(world_t, world_point, world_normal).with_ray(*ray);
        if let Some(uv) = object_hit.uv() {
            rec = rec.with_uv(uv);
        }
        if let Some(material) = object_hit.material().or(self.material) {
            rec = rec.with_material(material);
        }
        rec
    }
}
