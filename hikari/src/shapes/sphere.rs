use super::HitRecord;
use crate::math::{Ray, Vec3};

/// A sphere surface.
pub struct Sphere {
    pub origin: Vec3<f32>,
    pub radius: f32,
    pub material_index: u8,
}

impl Sphere {
    /// Creates a new `Sphere`.
    pub fn new(origin: Vec3<f32>, radius: f32, material_index: u8) -> Self {
        Self {
            origin,
            radius,
            material_index,
        }
    }

    /// The projection test shared by both query flavors.
    ///
    /// Projects the center onto the ray; the hit distance follows from the
    /// perpendicular distance and the radius. Only the near root matters
    /// since rays starting inside a sphere don't come up in these scenes.
    fn hit_t(&self, ray: &Ray<f32>) -> Option<f32> {
        let to_center = self.origin - ray.o;
        let proj = to_center.dot(ray.d);
        let perp_sqr = to_center.len_sqr() - proj * proj;
        let radius_sqr = self.radius * self.radius;

        if perp_sqr > radius_sqr {
            return None;
        }

        let t = proj - (radius_sqr - perp_sqr).sqrt();
        if t < ray.t_min || t > ray.t_max {
            return None;
        }

        Some(t)
    }

    /// Intersects `ray` with this `Sphere`.
    pub fn intersect(&self, ray: &Ray<f32>) -> Option<HitRecord> {
        let t = self.hit_t(ray)?;
        let origin = ray.point(t);
        Some(HitRecord {
            origin,
            normal: (origin - self.origin).normalized(),
            t,
            material_index: self.material_index,
        })
    }

    /// Checks if `ray` hits this `Sphere`.
    pub fn intersects(&self, ray: &Ray<f32>) -> bool {
        self.hit_t(ray).is_some()
    }
}
