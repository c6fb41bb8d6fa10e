pub mod mesh;
pub mod plane;
pub mod sphere;
pub mod triangle;

pub use mesh::TriangleMesh;
pub use plane::Plane;
pub use sphere::Sphere;
pub use triangle::Triangle;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, EnumVariantNames};

use crate::math::Vec3;

/// Which triangle facing a ray is allowed to hit.
#[derive(
    Copy, Clone, Debug, PartialEq, Deserialize, Serialize, Display, EnumString, EnumVariantNames,
)]
pub enum CullMode {
    FrontFace,
    BackFace,
    None,
}

impl CullMode {
    /// The facing to cull for any-hit queries.
    ///
    /// Shadow rays leave from the lit side of a surface, so the culled facing
    /// flips to let back-facing geometry still block them. `None` culls
    /// nothing either way.
    pub fn inverted(self) -> Self {
        match self {
            CullMode::FrontFace => CullMode::BackFace,
            CullMode::BackFace => CullMode::FrontFace,
            CullMode::None => CullMode::None,
        }
    }
}

/// A closest-hit result on a scene surface.
#[derive(Copy, Clone, Debug)]
pub struct HitRecord {
    /// World position of the hit.
    pub origin: Vec3<f32>,
    /// Surface normal at the hit.
    pub normal: Vec3<f32>,
    /// Ray distance of the hit.
    pub t: f32,
    /// Index into the scene's material table.
    pub material_index: u8,
}
