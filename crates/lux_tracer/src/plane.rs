//! Infinite planes, with and without surface coordinates.

use crate::{
    error::TracerResult,
    hittable::{HitRecord, Hittable, CAST_EPSILON, PARALLEL_EPSILON},
};
use lux_math::{Ray, Vec2, Vec3, Vec3Ext};

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    epsilon: f64,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> TracerResult<Self> {
        Ok(Self {
            point,
            normal: normal.unit()?,
            epsilon: CAST_EPSILON,
        })
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Distance along `ray` to the plane, if it is in front of the ray and
    /// the ray is not parallel to the plane.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        (t > self.epsilon).then_some(t)
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray) -> HitRecord {
        match self.intersect(ray) {
            Some(t) => HitRecord::new(t, ray.at(t), self.normal),
            None => HitRecord::miss(),
        }
    }
}

/// A plane that also reports 2D surface coordinates, measured from `point`
/// along an orthonormal `(right, forward)` pair with `right = normal × forward`.
#[derive(Debug, Clone)]
pub struct PlaneUv {
    plane: Plane,
    right: Vec3,
    forward: Vec3,
}

impl PlaneUv {
    /// `forward_direction` need not be perpendicular to `normal`, only not
    /// parallel to it; it is re-orthogonalized against the normal.
    pub fn new(point: Vec3, normal: Vec3, forward_direction: Vec3) -> TracerResult<Self> {
        let plane = Plane::new(point, normal)?;
        let right = plane.normal.cross(forward_direction).unit()?;
        let forward = right.cross(plane.normal);
        Ok(Self {
            plane,
            right,
            forward,
        })
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.plane.epsilon = epsilon;
        self
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Surface coordinates of a point lying on the plane.
    pub fn uv_at(&self, point: Vec3) -> Vec2 {
        let offset = point - self.plane.point;
        Vec2::new(offset.dot(self.right), offset.dot(self.forward))
    }
}

impl Hittable for PlaneUv {
    fn hit(&self, ray: &Ray) -> HitRecord {
        match self.plane.intersect(ray) {
            Some(t) => {
                let point = ray.at(t);
                HitRecord::new(t, point, self.plane.normal).with_uv(self.uv_at(point))
            }
            None => HitRecord::miss(),
        }
    }
}
