use super::{CullMode, HitRecord};
use crate::math::{Ray, Vec3};

// Möller, Trumbore: Fast, Minimum Storage Ray/Triangle Intersection

/// A single triangle with a precomputed geometric normal.
#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    pub v0: Vec3<f32>,
    pub v1: Vec3<f32>,
    pub v2: Vec3<f32>,
    /// Unit normal of the winding `(v1 - v0) x (v2 - v0)`.
    pub normal: Vec3<f32>,
    pub cull_mode: CullMode,
    pub material_index: u8,
}

impl Triangle {
    /// Creates a new `Triangle`, deriving the normal from the winding.
    pub fn new(
        v0: Vec3<f32>,
        v1: Vec3<f32>,
        v2: Vec3<f32>,
        cull_mode: CullMode,
        material_index: u8,
    ) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalized();
        Self::with_normal(v0, v1, v2, normal, cull_mode, material_index)
    }

    /// Creates a new `Triangle` with an externally supplied unit normal.
    pub fn with_normal(
        v0: Vec3<f32>,
        v1: Vec3<f32>,
        v2: Vec3<f32>,
        normal: Vec3<f32>,
        cull_mode: CullMode,
        material_index: u8,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal,
            cull_mode,
            material_index,
        }
    }

    /// Möller-Trumbore against this `Triangle`, honoring `mode`.
    fn hit_t(&self, ray: &Ray<f32>, mode: CullMode) -> Option<f32> {
        let dot_nd = self.normal.dot(ray.d);
        match mode {
            // A ray against the normal sees the front face
            CullMode::FrontFace if dot_nd < 0.0 => return None,
            CullMode::BackFace if dot_nd > 0.0 => return None,
            _ => {}
        }

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let p = ray.d.cross(edge2);
        let det = edge1.dot(p);
        // Degenerate triangles and edge-on rays land here
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let to_origin = ray.o - self.v0;
        let u = to_origin.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = to_origin.cross(edge1);
        let v = ray.d.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        if t < ray.t_min || t > ray.t_max {
            return None;
        }

        Some(t)
    }

    /// Intersects `ray` with this `Triangle` using the declared cull mode.
    pub fn intersect(&self, ray: &Ray<f32>) -> Option<HitRecord> {
        let t = self.hit_t(ray, self.cull_mode)?;
        Some(HitRecord {
            origin: ray.point(t),
            normal: self.normal,
            t,
            material_index: self.material_index,
        })
    }

    /// Checks if `ray` hits this `Triangle` with the cull mode inverted, as
    /// any-hit queries do.
    pub fn intersects(&self, ray: &Ray<f32>) -> bool {
        self.hit_t(ray, self.cull_mode.inverted()).is_some()
    }
}
