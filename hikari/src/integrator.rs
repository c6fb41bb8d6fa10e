use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use strum::{Display, EnumString, EnumVariantNames};

use crate::{
    camera::Camera,
    film::FilmTile,
    lights::LightSample,
    math::{Ray, Spectrum, Vec2},
    scene::Scene,
};

/// Distance shadow-ray origins are nudged off the surface along the normal.
///
/// Large enough to clear self-intersection on the scene scales in use, and a
/// known source of light leak near thin geometry.
const SHADOW_BIAS: f32 = 0.05;

/// Near bound of shadow rays.
const SHADOW_T_MIN: f32 = 1e-4;

/// What the shading loop accumulates per visible light.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Deserialize,
    Serialize,
    Display,
    EnumString,
    EnumVariantNames,
    TryFromPrimitive,
)]
#[repr(usize)]
pub enum LightingMode {
    /// The cosine between surface normal and light direction.
    ObservedArea,
    /// Incoming radiance alone.
    Radiance,
    /// The material response alone.
    Brdf,
    /// The full product of the three.
    Combined,
}

impl LightingMode {
    /// Returns the mode after this one in host cycling order.
    pub fn cycled(self) -> Self {
        Self::try_from((self as usize + 1) % 4).unwrap()
    }
}

/// Renders a [FilmTile]. Returns the number of rays cast into the scene.
pub fn render_tile(
    scene: &Scene,
    camera: &Camera,
    tile: &mut FilmTile,
    res: Vec2<u16>,
    mode: LightingMode,
    shadows_enabled: bool,
) -> usize {
    let tile_width = (tile.bb.p_max.x - tile.bb.p_min.x) as usize;

    let mut ray_count = 0;
    for p in tile.bb {
        let p_film = Vec2::new((p.x as f32) + 0.5, (p.y as f32) + 0.5);
        let ray = camera.ray(p_film, res);

        let (color, rays) = incident_light(scene, &ray, mode, shadows_enabled);
        ray_count += rays;

        let Vec2 {
            x: tile_x,
            y: tile_y,
        } = p - tile.bb.p_min;
        tile.pixels[(tile_y as usize) * tile_width + (tile_x as usize)] = color.max_to_one();
    }
    ray_count
}

/// Evaluates direct lighting along a primary ray.
///
/// Also returns the number of rays intersected with the scene.
fn incident_light(
    scene: &Scene,
    ray: &Ray<f32>,
    mode: LightingMode,
    shadows_enabled: bool,
) -> (Spectrum<f32>, usize) {
    let mut ray_count = 1;

    let hit = match scene.closest_hit(ray) {
        Some(hit) => hit,
        None => return (Spectrum::zeros(), ray_count),
    };

    let mut color = Spectrum::zeros();
    for light in &scene.lights {
        let shadow_origin = hit.origin + hit.normal * SHADOW_BIAS;
        let LightSample { l, dist } = light.sample(shadow_origin);

        // Light grazing or behind the surface contributes nothing
        let observed_area = hit.normal.dot(l);
        if observed_area <= 0.0 {
            continue;
        }

        if shadows_enabled {
            ray_count += 1;
            let shadow_ray = Ray::with_bounds(shadow_origin, l, SHADOW_T_MIN, dist);
            if scene.does_hit(&shadow_ray) {
                continue;
            }
        }

        color += match mode {
            LightingMode::ObservedArea => Spectrum::from(observed_area),
            LightingMode::Radiance => light.radiance(hit.origin),
            LightingMode::Brdf => scene.material(hit.material_index).shade(&hit, l, ray.d),
            LightingMode::Combined => {
                scene.material(hit.material_index).shade(&hit, l, ray.d)
                    * light.radiance(hit.origin)
                    * observed_area
            }
        };
    }

    (color, ray_count)
}
