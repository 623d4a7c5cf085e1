//! The list of objects, materials and lights a frame is rendered from.

use crate::{
    error::{TracerError, TracerResult},
    hittable::{HitRecord, Hittable, MaterialId},
    material::{Material, PointLight},
};
use lux_math::Ray;

/// An ordered list of hittables, each paired with a material.
#[derive(Default)]
pub struct World {
    objects: Vec<(Box<dyn Hittable>, MaterialId)>,
    materials: Vec<Material>,
    lights: Vec<PointLight>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and get its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Add an object shaded with `material`.
    pub fn add(&mut self, object: impl Hittable + 'static, material: MaterialId) -> TracerResult<()> {
        self.add_boxed(Box::new(object), material)
    }

    pub fn add_boxed(&mut self, object: Box<dyn Hittable>, material: MaterialId) -> TracerResult<()> {
        if material.0 >= self.materials.len() {
            return Err(TracerError::InvalidParameter(format!(
                "unknown material {:?}",
                material
            )));
        }
        self.objects.push((object, material));
        Ok(())
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the world has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest valid hit over every object, tagged with that object's
    /// material unless the object already reported one. Equal distances keep
    /// the earlier object.
    pub fn closest_hit(&self, ray: &Ray) -> HitRecord {
        let mut closest = HitRecord::miss();

        for (object, material) in &self.objects {
            let rec = object.hit(ray);
            if rec.is_closer_than(&closest) {
                closest = rec.with_material(rec.material().unwrap_or(*material));
            }
        }

        closest
    }
}

impl Hittable for World {
    fn hit(&self, ray: &Ray) -> HitRecord {
        self.closest_hit(ray)
    }
}
