//! Reference single-threaded renderer.
//!
//! Casts every camera ray for each pixel center and shades the nearest hit
//! with ambient light, shadowed Phong point lighting and mirror reflections,
//! averaging the results.

use crate::{
    camera::RayGenerator,
    hittable::CAST_EPSILON,
    material::{reflect, Color, Finish},
    HitRecord, World,
};
use lux_math::{Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Ambient light added to every lit surface
    pub ambient: Color,
    /// Maximum ray segments per path (camera ray plus mirror bounces)
    pub max_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::ZERO,
            ambient: Color::splat(0.1),
            max_depth: 5,
        }
    }
}

/// Color of a surface hit. Mirrors recurse along the reflected ray with one
/// less level of `depth`; other materials get ambient plus the Phong terms of
/// every light that is not occluded.
pub fn shade(world: &World, hit: &HitRecord, depth: u32, config: &RenderConfig) -> Color {
    let (Some(point), Some(normal), Some(ray)) = (hit.point(), hit.normal(), hit.ray()) else {
        return config.background;
    };
    let Some(material) = hit.material().and_then(|id| world.material(id)) else {
        return config.background;
    };

    // Light the side facing the viewer
    let normal = if ray.direction.dot(normal) > 0.0 {
        -normal
    } else {
        normal
    };
    let origin = point + normal * CAST_EPSILON;

    let Some(finish) = material.finish() else {
        // Reflection of a unit direction about a unit normal stays unit length
        let reflected = Ray::from_unit(origin, reflect(ray.direction, normal));
        return material.reflect_color(ray_color(&reflected, world, depth.saturating_sub(1), config));
    };

    let albedo = material.albedo(hit);
    let mut color = config.ambient * albedo * finish.ambient;
    for light in world.lights() {
        let to_light = light.position - point;
        let distance = to_light.length();
        let Some(to_light) = to_light.try_normalize() else {
            continue;
        };
        let lambert = normal.dot(to_light);
        if lambert <= 0.0 || is_occluded(world, origin, to_light, distance) {
            continue;
        }

        let radiance = light.color * light.intensity;
        color += albedo * radiance * (finish.diffuse * lambert);
        color += specular(finish, to_light, normal, -ray.direction) * radiance;
    }
    color
}

/// Phong highlight for light arriving along `to_light` seen from `to_eye`.
fn specular(finish: &Finish, to_light: Vec3, normal: Vec3, to_eye: Vec3) -> Color {
    if finish.specular <= 0.0 {
        return Color::ZERO;
    }
    let alignment = reflect(-to_light, normal).dot(to_eye).max(0.0);
    finish.specular_color * (finish.specular * alignment.powf(finish.shininess))
}

/// True if anything lies between `origin` and a light `distance` away.
fn is_occluded(world: &World, origin: Vec3, to_light: Vec3, distance: f64) -> bool {
    let shadow_ray = Ray::from_unit(origin, to_light);
    world.closest_hit(&shadow_ray).t() < distance
}

/// Compute the color seen by a ray with `depth` segments left.
pub fn ray_color(ray: &Ray, world: &World, depth: u32, config: &RenderConfig) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let hit = world.closest_hit(ray).with_ray(*ray);
    if hit.is_hit() {
        shade(world, &hit, depth, config)
    } else {
        config.background
    }
}

/// Render a single pixel, averaging over every ray the camera produces.
pub fn render_pixel(
    camera: &dyn RayGenerator,
    world: &World,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let rays = camera.rays(x as f64 + 0.5, y as f64 + 0.5, rng);
    if rays.is_empty() {
        return config.background;
    }

    let sum: Color = rays
        .iter()
        .map(|ray| ray_color(ray, world, config.max_depth, config))
        .sum();
    sum / rays.len() as f64
}

/// Clamp a value to [0, 1] range.
#[inline]
fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_01(color.x)).round() as u8;
    let g = (255.0 * clamp_01(color.y)).round() as u8;
    let b = (255.0 * clamp_01(color.z)).round() as u8;
    [r, g, b]
}

/// Image buffer for storing render output. Row `y = 0` is the bottom of the
/// image, matching the camera's upward `v` axis.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to top-down RGB bytes, the row order image files use.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&color_to_rgb(self.get(x, y)));
            }
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
pub fn render(
    camera: &dyn RayGenerator,
    world: &World,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let (width, height) = camera.image_size();
    log::info!("Rendering {}x{} with {} objects", width, height, world.len());

    let mut image = ImageBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    log::info!("Finished rendering {} pixels", image.pixels.len());
    image
}
