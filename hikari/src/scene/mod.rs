pub mod obj;

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Instant};

use crate::{
    hikari_info,
    lights::Light,
    materials::Material,
    math::Ray,
    shapes::{CullMode, HitRecord, Plane, Sphere, TriangleMesh},
};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Clone, Deserialize, Serialize)]
pub struct SceneLoadSettings {
    pub path: PathBuf,
    pub cull_mode: CullMode,
    pub material_index: u8,
}

impl Default for SceneLoadSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            cull_mode: CullMode::BackFace,
            material_index: 0,
        }
    }
}

/// The render input: primitives, their materials and the lights.
///
/// Everything is set up before a frame starts and only read during one, so
/// the render workers can share it freely.
#[derive(Default)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub planes: Vec<Plane>,
    pub meshes: Vec<TriangleMesh>,
    pub materials: Vec<Material>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the closest hit of `ray` against everything in this `Scene`.
    ///
    /// Strictly closer hits win, so for exactly tied distances the earlier
    /// primitive in sphere, plane, mesh iteration order sticks.
    pub fn closest_hit(&self, ray: &Ray<f32>) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;

        for sphere in &self.spheres {
            if let Some(hit) = sphere.intersect(ray) {
                if closest.map_or(true, |c| hit.t < c.t) {
                    closest = Some(hit);
                }
            }
        }
        for plane in &self.planes {
            if let Some(hit) = plane.intersect(ray) {
                if closest.map_or(true, |c| hit.t < c.t) {
                    closest = Some(hit);
                }
            }
        }
        for mesh in &self.meshes {
            if let Some(hit) = mesh.intersect(ray) {
                if closest.map_or(true, |c| hit.t < c.t) {
                    closest = Some(hit);
                }
            }
        }

        closest
    }

    /// Checks if `ray` hits anything in this `Scene`.
    ///
    /// Mesh queries run with their cull mode inverted per the any-hit
    /// convention.
    pub fn does_hit(&self, ray: &Ray<f32>) -> bool {
        self.spheres.iter().any(|s| s.intersects(ray))
            || self.planes.iter().any(|p| p.intersects(ray))
            || self.meshes.iter().any(|m| m.intersects(ray))
    }

    /// Looks up a material by a hit record's index.
    pub fn material(&self, index: u8) -> &Material {
        &self.materials[index as usize]
    }

    /// Loads an OBJ file into this `Scene` as a new mesh.
    pub fn load_obj(&mut self, settings: &SceneLoadSettings) -> Result<()> {
        let load_start = Instant::now();

        let obj::ObjResult { positions, indices } = obj::load(&settings.path)?;
        self.meshes.push(TriangleMesh::new(
            positions,
            indices,
            settings.cull_mode,
            settings.material_index,
        ));

        hikari_info!(
            "scene: loaded '{}' in {:.2}s",
            settings.path.to_string_lossy(),
            load_start.elapsed().as_secs_f32()
        );

        Ok(())
    }
}
