//! Surface descriptions and lights used by the reference shader.

use crate::HitRecord;
use lux_math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Phong weights applied on top of a surface's base color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finish {
    /// Scale on the scene's ambient light
    pub ambient: f64,
    /// Scale on the Lambertian term
    pub diffuse: f64,
    /// Scale on the Phong highlight, 0 disables it
    pub specular: f64,
    pub specular_color: Color,
    /// Phong exponent; larger is a tighter highlight
    pub shininess: f64,
}

impl Default for Finish {
    fn default() -> Self {
        Self {
            ambient: 1.0,
            diffuse: 1.0,
            specular: 0.0,
            specular_color: Color::ONE,
            shininess: 32.0,
        }
    }
}

impl Finish {
    /// A finish with a white highlight.
    pub fn phong(ambient: f64, diffuse: f64, specular: f64, shininess: f64) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            specular_color: Color::ONE,
            shininess,
        }
    }
}

/// How a surface is colored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// A single diffuse color.
    Solid {
        color: Color,
        #[serde(default)]
        finish: Finish,
    },

    /// Alternating squares of `square_size`, laid out in the hit's surface
    /// coordinates. Surfaces without coordinates fall back to world x/y.
    Checker {
        square_size: f64,
        white: Color,
        black: Color,
        #[serde(default)]
        finish: Finish,
    },

    /// Perfect reflector. Each bounce scales the reflected color by
    /// `reflectance * decay_per_bounce` and blends it towards `tint`.
    Mirror {
        reflectance: f64,
        decay_per_bounce: f64,
        tint: Color,
        /// 0 keeps the reflection untinted, 1 multiplies it fully by `tint`
        tint_strength: f64,
    },
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Material::Solid {
            color,
            finish: Finish::default(),
        }
    }

    pub fn checker(square_size: f64, white: Color, black: Color) -> Self {
        Material::Checker {
            square_size,
            white,
            black,
            finish: Finish::default(),
        }
    }

    pub fn mirror(reflectance: f64, decay_per_bounce: f64) -> Self {
        Material::Mirror {
            reflectance,
            decay_per_bounce,
            tint: Color::ONE,
            tint_strength: 0.0,
        }
    }

    /// Replace the Phong weights. Mirrors have none and are returned as is.
    pub fn with_finish(mut self, new_finish: Finish) -> Self {
        match &mut self {
            Material::Solid { finish, .. } | Material::Checker { finish, .. } => *finish = new_finish,
            Material::Mirror { .. } => {}
        }
        self
    }

    /// Phong weights, `None` for mirrors.
    pub fn finish(&self) -> Option<&Finish> {
        match self {
            Material::Solid { finish, .. } | Material::Checker { finish, .. } => Some(finish),
            Material::Mirror { .. } => None,
        }
    }

    /// Diffuse color at a hit. Mirrors have no diffuse color of their own.
    pub fn albedo(&self, hit: &HitRecord) -> Color {
        match self {
            Material::Solid { color, .. } => *color,
            Material::Checker {
                square_size,
                white,
                black,
                ..
            } => {
                let coords = hit
                    .uv()
                    .or_else(|| hit.point().map(|p| p.truncate()))
                    .unwrap_or(Vec2::ZERO);
                let cell = (coords / *square_size).floor();
                if (cell.x as i64 + cell.y as i64).rem_euclid(2) == 0 {
                    *white
                } else {
                    *black
                }
            }
            Material::Mirror { .. } => Color::ZERO,
        }
    }

    /// Filter a reflected color through a mirror. Identity for other
    /// materials.
    pub fn reflect_color(&self, reflected: Color) -> Color {
        match self {
            Material::Mirror {
                reflectance,
                decay_per_bounce,
                tint,
                tint_strength,
            } => {
                let tinted = reflected.lerp(reflected * *tint, *tint_strength);
                tinted * (reflectance * decay_per_bounce)
            }
            _ => reflected,
        }
    }
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f64,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f64) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}
