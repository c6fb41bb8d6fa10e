use super::HitRecord;
use crate::math::{Ray, Vec3};

/// An infinite plane, hit from the side its normal points toward.
pub struct Plane {
    pub origin: Vec3<f32>,
    /// Unit normal of the plane.
    pub normal: Vec3<f32>,
    pub material_index: u8,
}

impl Plane {
    /// Creates a new `Plane`. `normal` is expected to be normalized.
    pub fn new(origin: Vec3<f32>, normal: Vec3<f32>, material_index: u8) -> Self {
        Self {
            origin,
            normal,
            material_index,
        }
    }

    fn hit_t(&self, ray: &Ray<f32>) -> Option<f32> {
        let denom = ray.d.dot(self.normal);

        // Back side is see-through, and a parallel ray can only graze
        if denom >= 0.0 {
            return None;
        }

        let t = (self.origin - ray.o).dot(self.normal) / denom;
        if t <= ray.t_min || t >= ray.t_max {
            return None;
        }

        Some(t)
    }

    /// Intersects `ray` with this `Plane`.
    pub fn intersect(&self, ray: &Ray<f32>) -> Option<HitRecord> {
        let t = self.hit_t(ray)?;
        Some(HitRecord {
            origin: ray.point(t),
            normal: self.normal,
            t,
            material_index: self.material_index,
        })
    }

    /// Checks if `ray` hits this `Plane`.
    pub fn intersects(&self, ray: &Ray<f32>) -> bool {
        self.hit_t(ray).is_some()
    }
}
