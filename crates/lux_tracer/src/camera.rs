//! Cameras for primary ray generation.
//!
//! The world is right-handed with z up. The camera basis is
//! `w = normalize(eye - look_at)` (pointing back out of the scene),
//! `u = normalize(up × w)` (right) and `v = w × u` (up). The image plane sits
//! at unit distance along `-w`.

use crate::{
    error::{require_positive, TracerError, TracerResult},
    sampling::sample_disk,
};
use lux_math::{Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Something that turns pixel-plane coordinates into primary rays.
///
/// `x` runs over `[0, width]` and `y` over `[0, height]`; pixel centers are
/// at `i + 0.5`.
pub trait RayGenerator: Send + Sync {
    /// A single representative ray for the pixel.
    fn ray(&self, x: f64, y: f64) -> Ray;

    /// Every ray to trace for the pixel. Drivers average the results.
    fn rays(&self, x: f64, y: f64, rng: &mut dyn RngCore) -> Vec<Ray>;

    /// Image dimensions in pixels `(width, height)`.
    fn image_size(&self) -> (u32, u32);
}

/// Pinhole camera.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    /// Half extents of the image plane
    su: f64,
    sv: f64,
    image_width: u32,
    image_height: u32,
}

impl Camera {
    /// Build a camera looking from `eye` at `look_at`.
    ///
    /// `fov` is the vertical field of view in degrees. Fails for a zero-size
    /// image, a field of view outside (0, 180), `eye == look_at`, or `up`
    /// parallel to the view direction.
    pub fn new(
        eye: Vec3,
        look_at: Vec3,
        up: Vec3,
        fov: f64,
        image_width: u32,
        image_height: u32,
    ) -> TracerResult<Self> {
        if image_width == 0 || image_height == 0 {
            return Err(TracerError::InvalidParameter(format!(
                "image size must be non-zero, got {image_width}x{image_height}"
            )));
        }
        if !(fov > 0.0 && fov < 180.0) {
            return Err(TracerError::InvalidParameter(format!(
                "field of view must be in (0, 180) degrees, got {fov}"
            )));
        }

        let w = (eye - look_at).unit()?;
        let u = up.cross(w).unit()?;
        let v = w.cross(u).normalize();

        let aspect_ratio = image_height as f64 / image_width as f64;
        let sv = (fov.to_radians() / 2.0).tan();
        let su = sv / aspect_ratio;

        log::debug!(
            "Created camera at {} ({}x{}, fov {}°)",
            eye,
            image_width,
            image_height,
            fov
        );

        Ok(Self {
            eye,
            u,
            v,
            w,
            su,
            sv,
            image_width,
            image_height,
        })
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// The `(u, v, w)` basis.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Map pixel-plane coordinates to the world-space point on the image
    /// plane.
    pub fn image_to_world(&self, x: f64, y: f64) -> Vec3 {
        let x_ndc = self.su * (2.0 * x / self.image_width as f64 - 1.0);
        let y_ndc = self.sv * (2.0 * y / self.image_height as f64 - 1.0);
        self.eye + self.u * x_ndc + self.v * y_ndc - self.w
    }
}

impl RayGenerator for Camera {
    fn ray(&self, x: f64, y: f64) -> Ray {
        // The -w component keeps this at least unit length
        let direction = (self.image_to_world(x, y) - self.eye).normalize();
        Ray::from_unit(self.eye, direction)
    }

    fn rays(&self, x: f64, y: f64, _rng: &mut dyn RngCore) -> Vec<Ray> {
        vec![self.ray(x, y)]
    }

    fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }
}

/// Thin-lens camera. Rays start on a disk of `lens_radius` around the eye
/// and converge where the pinhole ray reaches `focal_distance`.
#[derive(Debug, Clone)]
pub struct DofCamera {
    pinhole: Camera,
    focal_distance: f64,
    lens_radius: f64,
    lens_samples: u32,
}

impl DofCamera {
    pub fn new(
        pinhole: Camera,
        focal_distance: f64,
        lens_radius: f64,
        lens_samples: u32,
    ) -> TracerResult<Self> {
        let focal_distance = require_positive("focal distance", focal_distance)?;
        if !(lens_radius >= 0.0 && lens_radius.is_finite()) {
            return Err(TracerError::InvalidParameter(format!(
                "lens radius must be non-negative, got {lens_radius}"
            )));
        }
        if lens_samples == 0 {
            return Err(TracerError::InvalidParameter(
                "lens samples must be at least 1".into(),
            ));
        }

        log::debug!(
            "Created depth of field camera: focus {}, aperture {}, {} samples",
            focal_distance,
            lens_radius,
            lens_samples
        );

        Ok(Self {
            pinhole,
            focal_distance,
            lens_radius,
            lens_samples,
        })
    }

    pub fn pinhole(&self) -> &Camera {
        &self.pinhole
    }

    /// True when the lens collapses to a pinhole.
    pub fn is_sharp(&self) -> bool {
        self.lens_radius <= 0.0 || self.lens_samples <= 1
    }

    /// The point every lens ray for this pixel passes through.
    pub fn focal_point(&self, x: f64, y: f64) -> Vec3 {
        self.pinhole.ray(x, y).at(self.focal_distance)
    }
}

impl RayGenerator for DofCamera {
    fn ray(&self, x: f64, y: f64) -> Ray {
        self.pinhole.ray(x, y)
    }

    fn rays(&self, x: f64, y: f64, rng: &mut dyn RngCore) -> Vec<Ray> {
        if self.is_sharp() {
            return vec![self.pinhole.ray(x, y)];
        }

        let focal_point = self.focal_point(x, y);
        let (u, v, _) = self.pinhole.basis();

        (0..self.lens_samples)
            .map(|_| {
                let offset = sample_disk(self.lens_radius, rng);
                let origin = self.pinhole.eye + u * offset.x + v * offset.y;
                // focal_point is in front of the lens plane, so this is non-zero
                Ray::from_unit(origin, (focal_point - origin).normalize())
            })
            .collect()
    }

    fn image_size(&self) -> (u32, u32) {
        self.pinhole.image_size()
    }
}
