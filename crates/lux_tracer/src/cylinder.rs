//! Finite capped cylinder along the local z axis.

use crate::{
    error::{require_positive, TracerResult},
    hittable::{solve_quadratic, HitRecord, Hittable, CAST_EPSILON, PARALLEL_EPSILON},
};
use lux_math::{Ray, Vec3};

/// A closed cylinder of `height` and `radius`, centered at the origin with
/// its axis on z. Caps sit at `z = ±height / 2`.
#[derive(Debug, Clone)]
pub struct Cylinder {
    half_height: f64,
    radius: f64,
    epsilon: f64,
}

impl Cylinder {
    pub fn new(height: f64, radius: f64) -> TracerResult<Self> {
        Ok(Self {
            half_height: require_positive("cylinder height", height)? / 2.0,
            radius: require_positive("cylinder radius", radius)?,
            epsilon: CAST_EPSILON,
        })
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn height(&self) -> f64 {
        self.half_height * 2.0
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Test the cap on the side of the ray origin, if the origin is beyond
    /// either cap plane.
    fn hit_cap(&self, ray: &Ray) -> Option<HitRecord> {
        let (cap_z, normal) = if ray.origin.z > self.half_height {
            (self.half_height, Vec3::Z)
        } else if ray.origin.z < -self.half_height {
            (-self.half_height, -Vec3::Z)
        } else {
            return None;
        };

        if ray.direction.z.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (cap_z - ray.origin.z) / ray.direction.z;
        if t <= self.epsilon {
            return None;
        }

        let point = ray.at(t);
        if point.x * point.x + point.y * point.y > self.radius * self.radius {
            return None;
        }

        Some(HitRecord::new(t, point, normal))
    }

    fn hit_side(&self, ray: &Ray) -> HitRecord {
        let (o, d) = (ray.origin, ray.direction);
        let a = d.x * d.x + d.y * d.y;
        if a < PARALLEL_EPSILON {
            return HitRecord::miss();
        }
        let b = 2.0 * (o.x * d.x + o.y * d.y);
        let c = o.x * o.x + o.y * o.y - self.radius * self.radius;

        let Some((near, far)) = solve_quadratic(a, b, c) else {
            return HitRecord::miss();
        };

        let t = if near > self.epsilon {
            near
        } else if far > self.epsilon {
            far
        } else {
            return HitRecord::miss();
        };

        let point = ray.at(t);
        if point.z.abs() > self.half_height {
            return HitRecord::miss();
        }

        let normal = Vec3::new(point.x, point.y, 0.0).normalize();
        HitRecord::new(t, point, normal)
    }
}

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray) -> HitRecord {
        self.hit_cap(ray).unwrap_or_else(|| self.hit_side(ray))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    #[test]
    fn test_cylinder_top_cap() {
        let cyl = Cylinder::new(2.0, 0.5).unwrap();
        let rec = cyl.hit(&ray(Vec3::new(0.2, 0.1, 5.0), -Vec3::Z));

        assert!((rec.t() - 4.0).abs() < 1e-12);
        assert_eq!(rec.normal(), Some(Vec3::Z));
    }

    #[test]
    fn test_cylinder_bottom_cap() {
        let cyl = Cylinder::new(2.0, 0.5).unwrap();
        let rec = cyl.hit(&ray(Vec3::new(0.0, 0.0, -3.0), Vec3::Z));

        assert!((rec.t() - 2.0).abs() < 1e-12);
        assert_eq!(rec.normal(), Some(-Vec3::Z));
    }

    #[test]
    fn test_cylinder_side() {
        let cyl = Cylinder::new(2.0, 0.5).unwrap();
        let rec = cyl.hit(&ray(Vec3::new(3.0, 0.0, 0.5), -Vec3::X));

        assert!((rec.t() - 2.5).abs() < 1e-12);
        assert!((rec.point().unwrap() - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-12);
        assert!((rec.normal().unwrap() - Vec3::X).length() < 1e-12);
    }

    #[test]
    fn test_cylinder_side_normal_is_radial() {
        let cyl = Cylinder::new(4.0, 1.0).unwrap();
        let rec = cyl.hit(&ray(Vec3::new(3.0, 3.0, 1.0), Vec3::new(-1.0, -1.0, -0.2)));

        let point = rec.point().unwrap();
        let normal = rec.normal().unwrap();
        assert_eq!(normal.z, 0.0);
        assert!((normal.length() - 1.0).abs() < 1e-12);
        assert!((point.truncate().length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cylinder_cap_miss_falls_through_to_side() {
        // Starts above the top cap but passes outside its disk, then
        // reaches the lateral surface below the rim
        let cyl = Cylinder::new(2.0, 0.5).unwrap();
        let rec = cyl.hit(&ray(Vec3::new(2.0, 0.0, 2.0), Vec3::new(-1.0, 0.0, -1.0)));

        let point = rec.point().unwrap();
        assert!((point.x - 0.5).abs() < 1e-9);
        assert!((point.z - 0.5).abs() < 1e-9);
        assert!((rec.normal().unwrap() - Vec3::X).length() < 1e-12);
    }

    #[test]
    fn test_cylinder_miss_above_and_beside() {
        let cyl = Cylinder::new(2.0, 0.5).unwrap();

        // Passes over the top
        assert!(!cyl.hit(&ray(Vec3::new(3.0, 0.0, 1.5), -Vec3::X)).is_hit());

        // Parallel to the axis, outside the radius
        assert!(!cyl.hit(&ray(Vec3::new(1.0, 0.0, 5.0), -Vec3::Z)).is_hit());

        // Misses the side entirely
        assert!(!cyl.hit(&ray(Vec3::new(3.0, 2.0, 0.0), -Vec3::X)).is_hit());
    }

    #[test]
    fn test_cylinder_invalid_parameters() {
        assert!(Cylinder::new(0.0, 1.0).is_err());
        assert!(Cylinder::new(1.0, -1.0).is_err());
    }
}
