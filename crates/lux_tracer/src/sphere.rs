//! Sphere primitive.

use crate::{
    error::{require_positive, TracerResult},
    hittable::{solve_quadratic, HitRecord, Hittable, CAST_EPSILON},
};
use lux_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    epsilon: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Vec3, radius: f64) -> TracerResult<Self> {
        Ok(Self {
            center,
            radius: require_positive("sphere radius", radius)?,
            epsilon: CAST_EPSILON,
        })
    }

    /// Override the minimum accepted hit distance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> HitRecord {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let Some((near, far)) = solve_quadratic(a, b, c) else {
            return HitRecord::miss();
        };

        // Find the nearest root past the epsilon
        let t = if near > self.epsilon {
            near
        } else if far > self.epsilon {
            far
        } else {
            return HitRecord::miss();
        };

        let point = ray.at(t);
        let normal = (point - self.center).normalize();
        HitRecord::new(t, point, normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    #[test]
    fn test_sphere_hit_front() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let rec = sphere.hit(&ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z));

        assert!(rec.is_hit());
        assert!((rec.t() - 4.0).abs() < 1e-12);
        assert!((rec.point().unwrap() - Vec3::Z).length() < 1e-12);
        assert!((rec.normal().unwrap() - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_sphere_hit_through_center_offset() {
        // t = distance(origin, center) - radius for rays through the center
        let center = Vec3::new(1.0, -2.0, 3.0);
        let sphere = Sphere::new(center, 0.75).unwrap();
        for origin in [
            Vec3::new(10.0, -2.0, 3.0),
            Vec3::new(-3.0, 4.0, 1.0),
            Vec3::new(1.0, -2.0, -8.0),
        ] {
            let rec = sphere.hit(&ray(origin, center - origin));
            let expected = (origin - center).length() - 0.75;

            assert!((rec.t() - expected).abs() < 1e-9);
            let normal = rec.normal().unwrap();
            let radial = (rec.point().unwrap() - center).normalize();
            assert!(normal.dot(radial) > 1.0 - 1e-12);
        }
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0).unwrap();
        let rec = sphere.hit(&ray(Vec3::ZERO, Vec3::X));

        assert!((rec.t() - 2.0).abs() < 1e-12);
        assert!((rec.normal().unwrap() - Vec3::X).length() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5).unwrap();

        // Ray pointing away from sphere
        let rec = sphere.hit(&ray(Vec3::ZERO, Vec3::Y));
        assert!(!rec.is_hit());
        assert_eq!(rec.t(), f64::INFINITY);

        // Sphere entirely behind the ray
        let rec = sphere.hit(&ray(Vec3::ZERO, Vec3::Z));
        assert!(!rec.is_hit());
    }

    #[test]
    fn test_sphere_surface_origin_ignores_self_hit() {
        // A secondary ray leaving the surface must not re-hit at t ~ 0
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let rec = sphere.hit(&ray(Vec3::Z, Vec3::Z));
        assert!(!rec.is_hit());
    }

    #[test]
    fn test_sphere_invalid_radius() {
        assert!(Sphere::new(Vec3::ZERO, 0.0).is_err());
        assert!(Sphere::new(Vec3::ZERO, -1.0).is_err());
    }
}
