use std::f32::consts::{FRAC_1_PI, PI};

use crate::math::{Spectrum, Vec3};

// Microfacet terms follow the real-time direct-lighting forms from
// Real Shading in Unreal Engine 4, Brian Karis

/// Lambert diffuse term: `kd * cd / pi`.
#[inline]
pub fn lambert(kd: f32, cd: Spectrum<f32>) -> Spectrum<f32> {
    cd * kd * FRAC_1_PI
}

/// Phong specular lobe around the mirrored light direction.
///
/// `l` points toward the light, `v` along the primary ray.
#[inline]
pub fn phong(ks: f32, exp: f32, l: Vec3<f32>, v: Vec3<f32>, n: Vec3<f32>) -> f32 {
    let reflection = l.reflected(n);
    let cos_alpha = reflection.dot(v).max(0.0);
    ks * cos_alpha.powf(exp)
}

/// Schlick's approximation of the Fresnel term.
///
/// `h` is the half vector, `v` points toward the viewer and `f0` is the
/// reflectance at normal incidence.
#[inline]
pub fn fresnel_schlick(h: Vec3<f32>, v: Vec3<f32>, f0: Spectrum<f32>) -> Spectrum<f32> {
    fn pow5(v: f32) -> f32 {
        (v * v) * (v * v) * v
    }

    f0 + (Spectrum::ones() - f0) * pow5(1.0 - h.dot(v))
}

/// Trowbridge-Reitz GGX normal distribution, with `alpha = roughness^2`.
#[inline]
pub fn ggx_normal_distribution(n: Vec3<f32>, h: Vec3<f32>, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let alpha_sqr = alpha * alpha;
    let n_dot_h = n.dot(h);
    let d = n_dot_h * n_dot_h * (alpha_sqr - 1.0) + 1.0;
    alpha_sqr / (PI * d * d)
}

/// Schlick-GGX masking term for direct lighting, with `k = (r + 1)^2 / 8`.
#[inline]
pub fn geometry_schlick_ggx(n: Vec3<f32>, x: Vec3<f32>, roughness: f32) -> f32 {
    let n_dot_x = n.dot(x).max(0.0);
    let k = (roughness + 1.0) * (roughness + 1.0) * 0.125;
    n_dot_x / (n_dot_x * (1.0 - k) + k)
}

/// Smith's shadowing-masking combining the view and light directions.
#[inline]
pub fn geometry_smith(n: Vec3<f32>, v: Vec3<f32>, l: Vec3<f32>, roughness: f32) -> f32 {
    geometry_schlick_ggx(n, v, roughness) * geometry_schlick_ggx(n, l, roughness)
}
