use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));
        Self::new(x, y, z)
    }

    /// Create an AABB centered at the origin with the given half extents.
    pub fn centered(half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self::from_points(-half, half)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Parametric range over which a ray is inside the box (slab method).
    ///
    /// An axis whose direction component is below `parallel_eps` in magnitude
    /// rejects the ray unless the origin already lies within that slab.
    /// Returns `None` as soon as the running interval becomes empty. The
    /// returned range may start behind the ray origin; callers clamp it.
    pub fn ray_interval(&self, ray: &Ray, parallel_eps: f64) -> Option<Interval> {
        let mut ray_t = Interval::UNIVERSE;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];

            if dir.abs() < parallel_eps {
                if !slab.contains(origin) {
                    return None;
                }
                continue;
            }

            let adinv = 1.0 / dir;
            let mut t0 = (slab.min - origin) * adinv;
            let mut t1 = (slab.max - origin) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t = ray_t.intersect(&Interval::new(t0, t1));
            if ray_t.is_empty() {
                return None;
            }
        }

        Some(ray_t)
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.x, Interval::new(0.0, 10.0));
        assert_eq!(aabb.y, Interval::new(0.0, 10.0));
        assert_eq!(aabb.z, Interval::new(0.0, 10.0));
    }

    #[test]
    fn test_aabb_centered() {
        let aabb = Aabb::centered(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.x, Interval::new(-1.0, 1.0));
        assert_eq!(aabb.z, Interval::new(-3.0, 3.0));
        // Negative extents are folded
        assert_eq!(Aabb::centered(Vec3::new(-1.0, 2.0, 3.0)), aabb);
    }

    #[test]
    fn test_ray_interval_through_center() {
        let aabb = Aabb::centered(Vec3::ONE);
        let r = ray(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let t = aabb.ray_interval(&r, 1e-9).unwrap();
        assert!((t.min - 4.0).abs() < 1e-12);
        assert!((t.max - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_interval_behind_origin() {
        let aabb = Aabb::centered(Vec3::ONE);

        // Ray pointing away still yields the (negative) slab range
        let r = ray(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        let t = aabb.ray_interval(&r, 1e-9).unwrap();
        assert!(t.max < 0.0);
    }

    #[test]
    fn test_ray_interval_parallel_outside_slab() {
        let aabb = Aabb::centered(Vec3::ONE);

        // Parallel to x, but offset above the box in y
        let r = ray(Vec3::new(-5.0, 2.0, 0.0), Vec3::X);
        assert!(aabb.ray_interval(&r, 1e-9).is_none());

        // Parallel to x and inside the y/z slabs
        let r = ray(Vec3::new(-5.0, 0.5, 0.0), Vec3::X);
        assert!(aabb.ray_interval(&r, 1e-9).is_some());
    }

    #[test]
    fn test_ray_interval_miss() {
        let aabb = Aabb::centered(Vec3::ONE);
        let r = ray(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        assert!(aabb.ray_interval(&r, 1e-9).is_none());
    }
}
