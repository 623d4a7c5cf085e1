//! Lux tracer - ray/primitive intersection and cameras.
//!
//! Analytic primitives (sphere, box, cylinder, planes), implicit surfaces
//! found by sampling and bisection, an affine transform wrapper, and
//! pinhole/thin-lens cameras. A small single-threaded renderer shades the
//! nearest hit with shadows and mirror reflections so scenes can be checked
//! by eye.

mod camera;
mod cube;
mod cylinder;
mod error;
mod hittable;
mod implicit;
mod material;
mod plane;
mod renderer;
mod sampling;
mod sphere;
mod transformed;
mod world;

pub use camera::{Camera, DofCamera, RayGenerator};
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use error::{TracerError, TracerResult};
pub use hittable::{HitRecord, Hittable, MaterialId, CAST_EPSILON, PARALLEL_EPSILON};
pub use implicit::{FnField, Heart, ImplicitSurface, Mitchell, ScalarField, SolverParams};
pub use material::{Color, Finish, Material, PointLight};
pub use plane::{Plane, PlaneUv};
pub use renderer::{color_to_rgb, ray_color, render, render_pixel, shade, ImageBuffer, RenderConfig};
pub use sampling::sample_disk;
pub use sphere::Sphere;
pub use transformed::Transformed;
pub use world::World;

/// Re-export the math types the public API is written in
pub use lux_math::{shear, Aabb, Mat4, Ray, Vec2, Vec3};
