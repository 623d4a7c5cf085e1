//! Axis-aligned cube centered at the local origin.

use crate::{
    error::{require_positive, TracerResult},
    hittable::{HitRecord, Hittable, CAST_EPSILON, PARALLEL_EPSILON},
};
use lux_math::{Aabb, Ray, Vec3};

/// A cube of edge `edge_size`, centered at the origin. Orient and place it
/// with [`crate::Transformed`].
#[derive(Debug, Clone)]
pub struct Cube {
    half_edge: f64,
    bounds: Aabb,
    epsilon: f64,
}

impl Cube {
    pub fn new(edge_size: f64) -> TracerResult<Self> {
        let half_edge = require_positive("cube edge size", edge_size)? / 2.0;
        Ok(Self {
            half_edge,
            bounds: Aabb::centered(Vec3::splat(half_edge)),
            epsilon: CAST_EPSILON,
        })
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn edge_size(&self) -> f64 {
        self.half_edge * 2.0
    }

    /// Outward normal of the face `point` lies on: the axis whose coordinate
    /// is closest to the half edge. Exact edge/corner ties go to the first
    /// axis in x, y, z order.
    fn face_normal(&self, point: Vec3) -> Vec3 {
        let mut best_axis = 0;
        let mut best_gap = f64::INFINITY;
        for axis in 0..3 {
            let gap = (self.half_edge - point[axis].abs()).abs();
            if gap < best_gap {
                best_gap = gap;
                best_axis = axis;
            }
        }

        let mut normal = Vec3::ZERO;
        normal[best_axis] = point[best_axis].signum();
        normal
    }
}

impl Hittable for Cube {
    fn hit(&self, ray: &Ray) -> HitRecord {
        let Some(span) = self.bounds.ray_interval(ray, PARALLEL_EPSILON) else {
            return HitRecord::miss();
        };

        // Rays starting inside the cube (entry behind the origin) are rejected
        if span.min < self.epsilon {
            return HitRecord::miss();
        }

        let t = span.min;
        let point = ray.at(t);
        HitRecord::new(t, point, self.face_normal(point))
    }
}
