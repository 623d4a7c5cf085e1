//! Implicit surfaces: the zero set of a scalar field, intersected by
//! bracketing and bisection instead of closed-form roots.
//!
//! A query runs in four stages:
//! 1. Clip the ray against the surface's bounding box.
//! 2. March a fixed number of samples across the clipped span, stopping at
//!    the first sign change of the field.
//! 3. Bisect that bracket under a bounded iteration budget.
//! 4. Take the normalized gradient at the root as the surface normal.
//!
//! Any stage that cannot produce a well-conditioned root reports a miss.

mod surfaces;

pub use surfaces::{Heart, Mitchell};

use crate::{
    error::{TracerError, TracerResult},
    hittable::{HitRecord, Hittable, CAST_EPSILON, PARALLEL_EPSILON},
};
use lux_math::{Aabb, Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// A scalar field `f(p)` whose zero set is the surface. Points with
/// `f(p) <= 0` are inside.
pub trait ScalarField: Send + Sync {
    fn value(&self, p: Vec3) -> f64;

    /// Analytic gradient, if known. Without it no normal can be produced and
    /// every query misses.
    fn gradient(&self, _p: Vec3) -> Option<Vec3> {
        None
    }
}

/// Adapts closures into a [`ScalarField`].
pub struct FnField<F, G> {
    value: F,
    gradient: Option<G>,
}

impl<F> FnField<F, fn(Vec3) -> Vec3>
where
    F: Fn(Vec3) -> f64 + Send + Sync,
{
    /// A field with no gradient.
    pub fn new(value: F) -> Self {
        Self {
            value,
            gradient: None,
        }
    }
}

impl<F, G> FnField<F, G>
where
    F: Fn(Vec3) -> f64 + Send + Sync,
    G: Fn(Vec3) -> Vec3 + Send + Sync,
{
    pub fn with_gradient(value: F, gradient: G) -> Self {
        Self {
            value,
            gradient: Some(gradient),
        }
    }
}

impl<F, G> ScalarField for FnField<F, G>
where
    F: Fn(Vec3) -> f64 + Send + Sync,
    G: Fn(Vec3) -> Vec3 + Send + Sync,
{
    fn value(&self, p: Vec3) -> f64 {
        (self.value)(p)
    }

    fn gradient(&self, p: Vec3) -> Option<Vec3> {
        self.gradient.as_ref().map(|g| g(p))
    }
}

/// Numerical search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Number of equal steps in the coarse scan across the bounding box.
    pub samples: u32,
    /// `|f|` below this accepts a point as on the surface.
    pub abs_tolerance: f64,
    /// Bracket width below which bisection stops.
    pub distance_tolerance: f64,
    /// Minimum cosine between the gradients at the two ends of the final
    /// bracket.
    pub gradient_similarity: f64,
    /// Bisection iteration budget.
    pub max_depth: u32,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            samples: 200,
            abs_tolerance: 1e-6,
            distance_tolerance: 1e-7,
            gradient_similarity: 0.9,
            max_depth: 64,
        }
    }
}

/// A surface defined by a [`ScalarField`] inside a fixed bounding box.
pub struct ImplicitSurface<F: ScalarField> {
    field: F,
    bounds: Aabb,
    params: SolverParams,
    epsilon: f64,
}

impl<F: ScalarField> ImplicitSurface<F> {
    pub fn new(field: F, bounds: Aabb) -> Self {
        log::debug!("Created implicit surface with bounds {:?}", bounds);
        Self {
            field,
            bounds,
            params: SolverParams::default(),
            epsilon: CAST_EPSILON,
        }
    }

    /// Replace the search parameters. Fails on a zero sample count, a
    /// zero iteration budget or non-positive tolerances.
    pub fn with_params(mut self, params: SolverParams) -> TracerResult<Self> {
        if params.samples == 0 || params.max_depth == 0 {
            return Err(TracerError::InvalidParameter(
                "solver samples and max_depth must be at least 1".into(),
            ));
        }
        if !(params.abs_tolerance > 0.0 && params.distance_tolerance > 0.0) {
            return Err(TracerError::InvalidParameter(
                "solver tolerances must be positive".into(),
            ));
        }
        self.params = params;
        Ok(self)
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Field value at distance `t` along the ray.
    fn eval(&self, ray: &Ray, t: f64) -> f64 {
        self.field.value(ray.at(t))
    }

    /// Clip the ray against the bounding box, clamping the entry to epsilon.
    fn search_span(&self, ray: &Ray) -> Option<Interval> {
        let span = self.bounds.ray_interval(ray, PARALLEL_EPSILON)?;
        if span.max < self.epsilon {
            return None;
        }
        Some(Interval::new(span.min.max(self.epsilon), span.max))
    }

    /// Solve for the nearest root along the ray inside the bounds.
    pub fn find_root(&self, ray: &Ray) -> Option<f64> {
        let span = self.search_span(ray)?;
        let step = span.size() / self.params.samples as f64;

        let mut t_prev = span.min;
        let mut f_prev = self.eval(ray, t_prev);
        let mut best = (t_prev, f_prev.abs());

        for i in 1..=self.params.samples {
            let t = span.min + step * i as f64;
            let f = self.eval(ray, t);
            if f.abs() < best.1 {
                best = (t, f.abs());
            }
            if (f_prev <= 0.0) != (f <= 0.0) {
                return self.bisect(ray, t_prev, f_prev, t, f);
            }
            t_prev = t;
            f_prev = f;
        }

        // No sign change: a grazing sample may still sit on the surface
        (best.1 < self.params.abs_tolerance).then_some(best.0)
    }

    /// Narrow a sign-changing bracket `[a, b]` to a root.
    fn bisect(&self, ray: &Ray, mut a: f64, mut fa: f64, mut b: f64, mut fb: f64) -> Option<f64> {
        let p = &self.params;

        for _ in 0..p.max_depth {
            if fa.abs() < p.abs_tolerance {
                return Some(a);
            }
            if fb.abs() < p.abs_tolerance {
                return Some(b);
            }
            if b - a < p.distance_tolerance {
                return self.accept_bracket(ray, a, b);
            }

            let mid = 0.5 * (a + b);
            let fm = self.eval(ray, mid);
            if (fa <= 0.0) != (fm <= 0.0) {
                b = mid;
                fb = fm;
            } else {
                a = mid;
                fa = fm;
            }
        }

        log::trace!("Implicit bisection exhausted {} iterations", p.max_depth);
        None
    }

    /// Accept the midpoint of a collapsed bracket only where the gradient is
    /// consistent across it.
    fn accept_bracket(&self, ray: &Ray, a: f64, b: f64) -> Option<f64> {
        let ga = self.field.gradient(ray.at(a))?.try_normalize()?;
        let gb = self.field.gradient(ray.at(b))?.try_normalize()?;

        let similarity = ga.dot(gb);
        if similarity > self.params.gradient_similarity {
            Some(0.5 * (a + b))
        } else {
            log::trace!(
                "Rejected implicit root near t={}: gradient similarity {}",
                a,
                similarity
            );
            None
        }
    }
}

impl<F: ScalarField> Hittable for ImplicitSurface<F> {
    fn hit(&self, ray: &Ray) -> HitRecord {
        let Some(t) = self.find_root(ray) else {
            return HitRecord::miss();
        };
        if t <= self.epsilon {
            return HitRecord::miss();
        }

        let point = ray.at(t);
        match self
            .field
            .gradient(point)
            .and_then(|g| g.try_normalize())
        {
            Some(normal) => HitRecord::new(t, point, normal),
            None => HitRecord::miss(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    fn implicit_sphere(radius: f64) -> ImplicitSurface<impl ScalarField> {
        let field = FnField::with_gradient(
            move |p: Vec3| p.length_squared() - radius * radius,
            |p: Vec3| 2.0 * p,
        );
        ImplicitSurface::new(field, Aabb::centered(Vec3::splat(radius * 1.5)))
    }

    #[test]
    fn test_implicit_sphere_matches_closed_form() {
        let implicit = implicit_sphere(1.0);
        let exact = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let tol = implicit.params().distance_tolerance.max(1e-6) * 10.0;

        // Near root from outside, far root from inside
        for r in [
            ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z),
            ray(Vec3::new(0.0, 0.0, 0.5), -Vec3::Z),
            ray(Vec3::new(3.0, -2.0, 0.5), Vec3::new(-3.0, 2.0, -0.3)),
        ] {
            let got = implicit.hit(&r);
            let want = exact.hit(&r);

            assert!(got.is_hit());
            assert!((got.t() - want.t()).abs() < tol, "{} vs {}", got.t(), want.t());
            assert!((got.normal().unwrap() - want.normal().unwrap()).length() < 1e-4);
        }
    }

    #[test]
    fn test_implicit_sphere_both_roots() {
        let implicit = implicit_sphere(1.0);

        let near = implicit.hit(&ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z));
        assert!((near.t() - 4.0).abs() < 1e-5);
        assert!((near.point().unwrap().z - 1.0).abs() < 1e-5);

        // Restart just past the first root to recover the second one
        let far = implicit.hit(&ray(near.point().unwrap() - Vec3::Z * 0.01, -Vec3::Z));
        assert!((far.point().unwrap().z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_implicit_misses_outside_bounds() {
        let implicit = implicit_sphere(1.0);

        assert!(!implicit.hit(&ray(Vec3::new(5.0, 5.0, 0.0), Vec3::Z)).is_hit());
        // Box behind the ray
        assert!(!implicit.hit(&ray(Vec3::new(0.0, 0.0, 5.0), Vec3::Z)).is_hit());
        // Crosses the box but not the sphere
        assert!(!implicit.hit(&ray(Vec3::new(1.2, 1.2, 5.0), -Vec3::Z)).is_hit());
    }

    #[test]
    fn test_implicit_without_gradient_misses() {
        let field = FnField::new(|p: Vec3| p.length_squared() - 1.0);
        let implicit = ImplicitSurface::new(field, Aabb::centered(Vec3::splat(2.0)));

        // A root exists, but no normal can be produced
        assert!(implicit.find_root(&ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z)).is_some());
        assert!(!implicit.hit(&ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z)).is_hit());
    }

    #[test]
    fn test_implicit_rejects_inconsistent_gradient() {
        // A sign change with a gradient that flips across it
        let field = FnField::with_gradient(
            |p: Vec3| if p.z > 0.3 { 1.0 } else { -1.0 },
            |p: Vec3| if p.z > 0.3 { Vec3::Z } else { -Vec3::Z },
        );
        let implicit = ImplicitSurface::new(field, Aabb::centered(Vec3::ONE));

        assert!(!implicit.hit(&ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z)).is_hit());
    }

    #[test]
    fn test_implicit_tangent_touch_accepted_without_sign_change() {
        // Touches zero at z = 0.3 but never goes negative
        let field = FnField::with_gradient(
            |p: Vec3| (p.z - 0.3) * (p.z - 0.3),
            |_p: Vec3| Vec3::Z,
        );
        let implicit = ImplicitSurface::new(field, Aabb::centered(Vec3::ONE));
        let down = ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);

        let t = implicit.find_root(&down).unwrap();
        assert!((t - 4.7).abs() < 1e-9);

        let rec = implicit.hit(&down);
        assert!((rec.t() - 4.7).abs() < 1e-9);
        assert_eq!(rec.normal(), Some(Vec3::Z));
    }

    #[test]
    fn test_implicit_near_touch_rejected_without_sign_change() {
        // Closest approach stays above the tolerance
        let field = FnField::with_gradient(
            |p: Vec3| (p.z - 0.3) * (p.z - 0.3) + 1e-3,
            |_p: Vec3| Vec3::Z,
        );
        let implicit = ImplicitSurface::new(field, Aabb::centered(Vec3::ONE));
        let down = ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);

        assert!(implicit.find_root(&down).is_none());
        assert!(!implicit.hit(&down).is_hit());
    }

    #[test]
    fn test_implicit_step_discontinuity_accepted_with_consistent_gradient() {
        let field = FnField::with_gradient(
            |p: Vec3| if p.z > 0.3 { 1.0 } else { -1.0 },
            |_p: Vec3| Vec3::Z,
        );
        let implicit = ImplicitSurface::new(field, Aabb::centered(Vec3::ONE));

        let rec = implicit.hit(&ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z));
        assert!((rec.point().unwrap().z - 0.3).abs() < 1e-6);
        assert_eq!(rec.normal(), Some(Vec3::Z));
    }

    #[test]
    fn test_implicit_depth_budget_exhausted() {
        let field = FnField::with_gradient(
            |p: Vec3| if p.z > 0.3 { 1.0 } else { -1.0 },
            |_p: Vec3| Vec3::Z,
        );
        let params = SolverParams {
            max_depth: 2,
            ..SolverParams::default()
        };
        let implicit = ImplicitSurface::new(field, Aabb::centered(Vec3::ONE))
            .with_params(params)
            .unwrap();

        assert!(!implicit.hit(&ray(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z)).is_hit());
    }

    #[test]
    fn test_implicit_invalid_params() {
        let zero_samples = SolverParams {
            samples: 0,
            ..SolverParams::default()
        };
        assert!(implicit_sphere(1.0).with_params(zero_samples).is_err());

        let bad_tolerance = SolverParams {
            abs_tolerance: 0.0,
            ..SolverParams::default()
        };
        assert!(implicit_sphere(1.0).with_params(bad_tolerance).is_err());
    }

    #[test]
    fn test_solver_params_from_json() {
        let params: SolverParams =
            serde_json::from_str(r#"{ "samples": 50, "max_depth": 20 }"#).unwrap();

        assert_eq!(params.samples, 50);
        assert_eq!(params.max_depth, 20);
        assert_eq!(params.abs_tolerance, SolverParams::default().abs_tolerance);
    }
}
