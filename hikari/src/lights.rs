use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, EnumVariantNames};

use crate::math::{Spectrum, Vec3};

#[derive(
    Copy, Clone, Debug, PartialEq, Deserialize, Serialize, Display, EnumString, EnumVariantNames,
)]
pub enum LightKind {
    Point,
    Directional,
}

/// A sample from a surface point toward a light, for visibility testing and
/// shading.
pub struct LightSample {
    /// Unit direction toward the light.
    pub l: Vec3<f32>,
    /// Distance to the light, infinite for directional lights.
    pub dist: f32,
}

/// A scene light.
///
/// Point lights radiate from `origin` with inverse-square falloff,
/// directional lights arrive along `direction` with constant radiance.
pub struct Light {
    pub origin: Vec3<f32>,
    /// Unit direction the light travels in. Unused by point lights.
    pub direction: Vec3<f32>,
    pub color: Spectrum<f32>,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    /// Creates a new point `Light` at `origin`.
    pub fn point(origin: Vec3<f32>, color: Spectrum<f32>, intensity: f32) -> Self {
        Self {
            origin,
            direction: Vec3::zeros(),
            color,
            intensity,
            kind: LightKind::Point,
        }
    }

    /// Creates a new directional `Light` shining along `direction`.
    pub fn directional(direction: Vec3<f32>, color: Spectrum<f32>, intensity: f32) -> Self {
        Self {
            origin: Vec3::zeros(),
            direction: direction.normalized(),
            color,
            intensity,
            kind: LightKind::Directional,
        }
    }

    /// Returns the [LightSample] from `p` to this `Light`.
    pub fn sample(&self, p: Vec3<f32>) -> LightSample {
        match self.kind {
            LightKind::Point => {
                let to_light = self.origin - p;
                let dist = to_light.len();
                LightSample {
                    l: to_light / dist,
                    dist,
                }
            }
            LightKind::Directional => LightSample {
                l: -self.direction,
                dist: f32::INFINITY,
            },
        }
    }

    /// Returns the radiance this `Light` delivers at `p`.
    pub fn radiance(&self, p: Vec3<f32>) -> Spectrum<f32> {
        match self.kind {
            LightKind::Point => self.color * (self.intensity / (self.origin - p).len_sqr()),
            LightKind::Directional => self.color * self.intensity,
        }
    }
}
