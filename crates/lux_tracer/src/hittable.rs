//! Hittable trait and HitRecord for ray-object intersection.

use lux_math::{Ray, Vec2, Vec3};

/// Minimum accepted intersection distance. Hits closer than this are
/// dropped so secondary rays do not re-hit the surface they start on.
pub const CAST_EPSILON: f64 = 1e-4;

/// Ray/plane and ray/slab tests treat `|direction · normal|` below this as
/// parallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Opaque handle to a material owned by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Contact {
    point: Vec3,
    normal: Vec3,
}

/// Record of a ray-object intersection.
///
/// A miss has `t == f64::INFINITY` and no geometry. Point and normal are only
/// reachable through `Option`s, so a miss cannot be shaded by accident.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    t: f64,
    contact: Option<Contact>,
    uv: Option<Vec2>,
    material: Option<MaterialId>,
    ray: Option<Ray>,
}

impl HitRecord {
    /// The "no intersection" result.
    pub const fn miss() -> Self {
        Self {
            t: f64::INFINITY,
            contact: None,
            uv: None,
            material: None,
            ray: None,
        }
    }

    /// A hit at distance `t`. `normal` is expected to be unit length.
    pub fn new(t: f64, point: Vec3, normal: Vec3) -> Self {
        Self {
            t,
            contact: Some(Contact { point, normal }),
            ..Self::miss()
        }
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = Some(uv);
        self
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_ray(mut self, ray: Ray) -> Self {
        self.ray = Some(ray);
        self
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.contact.is_some()
    }

    /// Distance along the ray, `f64::INFINITY` on a miss.
    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn point(&self) -> Option<Vec3> {
        self.contact.map(|c| c.point)
    }

    pub fn normal(&self) -> Option<Vec3> {
        self.contact.map(|c| c.normal)
    }

    /// Surface coordinates, only produced by parameterized surfaces.
    pub fn uv(&self) -> Option<Vec2> {
        self.uv
    }

    pub fn material(&self) -> Option<MaterialId> {
        self.material
    }

    /// The world-space ray that produced this hit, when recorded.
    pub fn ray(&self) -> Option<Ray> {
        self.ray
    }

    /// True if this record is a hit strictly nearer than `other`.
    pub fn is_closer_than(&self, other: &HitRecord) -> bool {
        self.is_hit() && self.t < other.t
    }
}

impl Default for HitRecord {
    fn default() -> Self {
        Self::miss()
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementations return a hit only when its distance strictly exceeds
/// their cast epsilon.
pub trait Hittable: Send + Sync {
    fn hit(&self, ray: &Ray) -> HitRecord;
}

impl<T: Hittable + ?Sized> Hittable for Box<T> {
    fn hit(&self, ray: &Ray) -> HitRecord {
        (**self).hit(ray)
    }
}

/// Solve `a t² + b t + c = 0`, returning the real roots in ascending order.
pub(crate) fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a == 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();
    let t0 = (-b - sqrtd) / (2.0 * a);
    let t1 = (-b + sqrtd) / (2.0 * a);
    Some((t0.min(t1), t0.max(t1)))
}
