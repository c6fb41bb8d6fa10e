pub mod brdf;

use std::f32::consts::FRAC_1_PI;

use crate::{
    math::{Spectrum, Vec3},
    shapes::HitRecord,
};

/// A surface material.
///
/// A tagged enum instead of trait objects so the dispatch in the shading
/// loop stays a plain match and the BRDF math can inline.
pub enum Material {
    /// Flat color, ignoring geometry entirely.
    SolidColor { color: Spectrum<f32> },
    /// Lambert diffuse.
    Lambert {
        diffuse_reflectance: f32,
        diffuse_color: Spectrum<f32>,
    },
    /// Lambert diffuse with a Phong specular lobe on top.
    LambertPhong {
        diffuse_reflectance: f32,
        diffuse_color: Spectrum<f32>,
        specular_reflectance: f32,
        phong_exponent: f32,
    },
    /// GGX microfacet specular with an energy-conserving diffuse term.
    CookTorrance {
        albedo: Spectrum<f32>,
        metalness: f32,
        roughness: f32,
    },
}

impl Material {
    /// Evaluates this `Material` at `hit` for a light in direction `l` and a
    /// primary ray along `v`.
    ///
    /// `l` points from the surface toward the light, `v` from the camera
    /// toward the surface, matching the directions the shading loop has at
    /// hand.
    pub fn shade(&self, hit: &HitRecord, l: Vec3<f32>, v: Vec3<f32>) -> Spectrum<f32> {
        match self {
            Material::SolidColor { color } => *color,
            Material::Lambert {
                diffuse_reflectance,
                diffuse_color,
            } => brdf::lambert(*diffuse_reflectance, *diffuse_color),
            Material::LambertPhong {
                diffuse_reflectance,
                diffuse_color,
                specular_reflectance,
                phong_exponent,
            } => {
                brdf::lambert(*diffuse_reflectance, *diffuse_color)
                    + Spectrum::from(brdf::phong(
                        *specular_reflectance,
                        *phong_exponent,
                        l,
                        v,
                        hit.normal,
                    ))
            }
            Material::CookTorrance {
                albedo,
                metalness,
                roughness,
            } => {
                // The microfacet terms want the direction toward the viewer
                let view = -v;
                let half = view + l;
                // A light exactly opposite the view direction has no valid
                // half vector and contributes nothing
                if half.len_sqr() < f32::EPSILON {
                    return Spectrum::zeros();
                }
                let h = half.normalized();

                let f0 = Spectrum::lerp(Spectrum::new(0.04, 0.04, 0.04), *albedo, *metalness);
                let fresnel = brdf::fresnel_schlick(h, view, f0);

                let specular = {
                    let distribution = brdf::ggx_normal_distribution(hit.normal, h, *roughness);
                    let geometry = brdf::geometry_smith(hit.normal, view, l, *roughness);
                    let denom = 4.0 * hit.normal.dot(view) * hit.normal.dot(l);
                    if denom > f32::EPSILON {
                        (fresnel * (distribution * geometry / denom)).max(Spectrum::zeros())
                    } else {
                        Spectrum::zeros()
                    }
                };

                let diffuse = (Spectrum::ones() - fresnel)
                    * *albedo
                    * ((1.0 - metalness) * FRAC_1_PI);

                diffuse + specular
            }
        }
    }
}
