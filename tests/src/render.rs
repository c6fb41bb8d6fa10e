use approx::assert_abs_diff_eq;
use std::sync::{Arc, Mutex};

use hikari::{
    camera::Camera,
    film::{Film, FilmSettings},
    integrator::LightingMode,
    lights::Light,
    materials::Material,
    math::{Ray, Spectrum, Vec2, Vec3},
    renderer::{self, RenderSettings},
    scene::Scene,
    shapes::{CullMode, Plane, Sphere, Triangle, TriangleMesh},
};

fn white_lambert() -> Material {
    Material::Lambert {
        diffuse_reflectance: 1.0,
        diffuse_color: Spectrum::ones(),
    }
}

/// One white sphere head-on, lit from the camera position.
fn sphere_scene() -> Scene {
    let mut scene = Scene::new();
    scene.materials.push(white_lambert());
    scene
        .spheres
        .push(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 0));
    scene
        .lights
        .push(Light::point(Vec3::zeros(), Spectrum::ones(), 25.0));
    scene
}

fn render_pixels(
    scene: &Scene,
    res: Vec2<u16>,
    mode: LightingMode,
    shadows_enabled: bool,
) -> (Vec<Spectrum<f32>>, Vec<u32>) {
    let camera = Camera::new(Vec3::zeros(), 90.0);
    let film_settings = FilmSettings {
        res,
        ..FilmSettings::default()
    };
    let film = Arc::new(Mutex::new(Film::new(res)));
    let settings = RenderSettings {
        lighting_mode: mode,
        shadows_enabled,
        match_logical_cores: true,
    };

    renderer::render(scene, &camera, &film, film_settings, settings);

    let film = film.lock().unwrap();
    (film.pixels().to_vec(), film.packed_argb())
}

#[test]
fn camera_basis_follows_yaw_and_pitch() {
    let mut camera = Camera::new(Vec3::zeros(), 90.0);

    camera.total_yaw = std::f32::consts::FRAC_PI_2;
    camera.recompute_basis();
    let forward = camera
        .camera_to_world()
        .transform_vector(Vec3::new(0.0, 0.0, 1.0));
    assert_abs_diff_eq!(forward, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);

    camera.total_yaw = 0.0;
    camera.total_pitch = std::f32::consts::FRAC_PI_4;
    camera.recompute_basis();
    let forward = camera
        .camera_to_world()
        .transform_vector(Vec3::new(0.0, 0.0, 1.0));
    let expected = Vec3::new(0.0, -1.0, 1.0).normalized();
    assert_abs_diff_eq!(forward, expected, epsilon = 1e-6);

    // The center ray of a 1x1 film leaves along the camera forward
    let ray = camera.ray(Vec2::new(0.5, 0.5), Vec2::new(1, 1));
    assert_abs_diff_eq!(ray.d, expected, epsilon = 1e-6);
}

#[test]
fn center_pixel_combines_terms() {
    let scene = sphere_scene();
    let (pixels, packed) =
        render_pixels(&scene, Vec2::new(3, 3), LightingMode::Combined, false);

    // The center ray hits at t = 4 facing the light head on:
    // radiance 25 / 16 times the white diffuse 1 / pi
    let expected = 25.0 / 16.0 * std::f32::consts::FRAC_1_PI;
    assert_abs_diff_eq!(pixels[4], Spectrum::from(expected), epsilon = 1e-4);
    assert_eq!(packed[4], 0xFF7F_7F7F);
}

#[test]
fn corner_pixel_misses() {
    let scene = sphere_scene();
    let (pixels, packed) =
        render_pixels(&scene, Vec2::new(3, 3), LightingMode::Combined, false);

    assert!(pixels[0].is_black());
    assert_eq!(packed[0], 0xFF00_0000);
}

#[test]
fn lighting_modes_isolate_terms() {
    let scene = sphere_scene();

    let (oa, _) = render_pixels(&scene, Vec2::new(3, 3), LightingMode::ObservedArea, false);
    assert_abs_diff_eq!(oa[4], Spectrum::ones(), epsilon = 1e-4);

    // Raw radiance is overbright there and clamps to white
    let (radiance, _) = render_pixels(&scene, Vec2::new(3, 3), LightingMode::Radiance, false);
    assert_abs_diff_eq!(radiance[4], Spectrum::ones(), epsilon = 1e-4);

    let (brdf, _) = render_pixels(&scene, Vec2::new(3, 3), LightingMode::Brdf, false);
    assert_abs_diff_eq!(
        brdf[4],
        Spectrum::from(std::f32::consts::FRAC_1_PI),
        epsilon = 1e-4
    );
}

#[test]
fn lighting_mode_cycles_in_order() {
    assert_eq!(LightingMode::ObservedArea.cycled(), LightingMode::Radiance);
    assert_eq!(LightingMode::Radiance.cycled(), LightingMode::Brdf);
    assert_eq!(LightingMode::Brdf.cycled(), LightingMode::Combined);
    assert_eq!(LightingMode::Combined.cycled(), LightingMode::ObservedArea);
}

#[test]
fn occluder_blocks_the_light_path() {
    let mut scene = sphere_scene();
    scene
        .spheres
        .push(Sphere::new(Vec3::new(0.0, 0.0, 2.0), 0.5, 0));

    // The shadow query from the far sphere's front pole toward the light
    // runs into the occluder
    let hit_offset = Vec3::new(0.0, 0.0, 4.0) + Vec3::new(0.0, 0.0, -1.0) * 0.05;
    let shadow_ray = Ray::with_bounds(
        hit_offset,
        Vec3::new(0.0, 0.0, -1.0),
        1e-4,
        hit_offset.len(),
    );
    assert!(scene.does_hit(&shadow_ray));
}

#[test]
fn shadowed_floor_pixel_goes_black() {
    let mut scene = Scene::new();
    scene.materials.push(white_lambert());
    scene.planes.push(Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        0,
    ));
    scene
        .lights
        .push(Light::point(Vec3::new(0.0, 5.0, 5.0), Spectrum::ones(), 50.0));

    // The bottom-center pixel looks down at the floor in front of the camera
    let (pixels, _) = render_pixels(&scene, Vec2::new(3, 3), LightingMode::Combined, true);
    let lit_floor = pixels[7];
    assert!(!lit_floor.is_black());

    // An occluder dropped onto the light path shadows it without getting in
    // front of the camera
    scene
        .spheres
        .push(Sphere::new(Vec3::new(0.0, 2.0, 3.25), 0.5, 0));

    let (shadowed, _) = render_pixels(&scene, Vec2::new(3, 3), LightingMode::Combined, true);
    assert!(shadowed[7].is_black());

    // With shadows off the occluder changes nothing about that pixel
    let (unshadowed, _) =
        render_pixels(&scene, Vec2::new(3, 3), LightingMode::Combined, false);
    assert_abs_diff_eq!(unshadowed[7], lit_floor, epsilon = 1e-5);
}

#[test]
fn culled_mesh_still_shadows() {
    let mut scene = Scene::new();
    scene.materials.push(white_lambert());
    scene.planes.push(Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        0,
    ));
    scene
        .lights
        .push(Light::point(Vec3::new(0.0, 5.0, 1.5), Spectrum::ones(), 50.0));

    // A large triangle over the floor, winding up so primary rays from
    // below face its back and get culled
    let triangle = Triangle::new(
        Vec3::new(-4.0, 2.0, 6.0),
        Vec3::new(4.0, 2.0, 6.0),
        Vec3::new(0.0, 2.0, -3.0),
        CullMode::BackFace,
        0,
    );
    assert_abs_diff_eq!(triangle.normal, Vec3::new(0.0, 1.0, 0.0));
    scene.meshes.push(TriangleMesh::from_triangles(
        &[triangle],
        CullMode::BackFace,
        0,
    ));

    // Invisible from below
    let up_ray = Ray::new(Vec3::new(0.0, -0.95, 1.5), Vec3::new(0.0, 1.0, 0.0));
    assert!(scene.closest_hit(&up_ray).is_none());

    // Yet the floor beneath it sits in shadow because the any-hit query
    // flips the culled facing
    let (pixels, _) = render_pixels(&scene, Vec2::new(3, 3), LightingMode::Combined, true);
    assert!(pixels[7].is_black());

    let (unshadowed, _) =
        render_pixels(&scene, Vec2::new(3, 3), LightingMode::Combined, false);
    assert!(!unshadowed[7].is_black());
}

#[test]
fn closest_hit_prefers_smallest_t() {
    let mut scene = Scene::new();
    scene.materials.push(white_lambert());
    scene.materials.push(Material::SolidColor {
        color: Spectrum::ones(),
    });
    scene
        .spheres
        .push(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 1));
    scene.planes.push(Plane::new(
        Vec3::new(0.0, 0.0, 8.0),
        Vec3::new(0.0, 0.0, -1.0),
        0,
    ));

    let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));
    let hit = scene.closest_hit(&ray).unwrap();
    assert_abs_diff_eq!(hit.t, 4.0);
    assert_eq!(hit.material_index, 1);

    // Past the sphere the plane is all that's left
    let behind = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
    let hit = scene.closest_hit(&behind).unwrap();
    assert_abs_diff_eq!(hit.t, 8.0);
    assert_eq!(hit.material_index, 0);
}

#[test]
fn shadow_queries_are_reciprocal() {
    let mut scene = Scene::new();
    scene.materials.push(white_lambert());
    scene
        .spheres
        .push(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 0));
    scene.meshes.push(TriangleMesh::new(
        vec![
            Vec3::new(-2.0, -2.0, 8.0),
            Vec3::new(0.0, 2.0, 8.0),
            Vec3::new(2.0, -2.0, 8.0),
        ],
        vec![0, 1, 2],
        CullMode::None,
        0,
    ));

    // Double-sided content blocks the same segments in both directions
    let points = [
        (Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0)),
        (Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.5, 9.0)),
        (Vec3::new(3.0, 0.0, 0.0), Vec3::new(-3.0, 0.0, 10.0)),
        (Vec3::new(3.0, 3.0, 0.0), Vec3::new(3.0, 3.0, 10.0)),
    ];
    for (p, q) in &points {
        let to_q = *q - *p;
        let forward = Ray::with_bounds(*p, to_q.normalized(), 1e-4, to_q.len());
        let backward = Ray::with_bounds(*q, (-to_q).normalized(), 1e-4, to_q.len());
        assert_eq!(
            scene.does_hit(&forward),
            scene.does_hit(&backward),
            "reciprocity broke between {:?} and {:?}",
            p,
            q
        );
    }
}

#[test]
fn renders_are_deterministic() {
    let mut scene = sphere_scene();
    scene.planes.push(Plane::new(
        Vec3::new(0.0, -2.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        0,
    ));
    scene.meshes.push(TriangleMesh::new(
        vec![
            Vec3::new(-2.0, 0.0, 7.0),
            Vec3::new(0.0, 3.0, 7.0),
            Vec3::new(2.0, 0.0, 7.0),
        ],
        vec![0, 1, 2],
        CullMode::None,
        0,
    ));
    scene
        .lights
        .push(Light::point(Vec3::new(3.0, 3.0, 0.0), Spectrum::ones(), 30.0));

    // Multiple tiles across however many workers the host has
    let res = Vec2::new(64, 48);
    let (pixels_a, packed_a) = render_pixels(&scene, res, LightingMode::Combined, true);
    let (pixels_b, packed_b) = render_pixels(&scene, res, LightingMode::Combined, true);

    assert_eq!(packed_a, packed_b);
    assert_eq!(pixels_a.len(), pixels_b.len());
    for (a, b) in pixels_a.iter().zip(&pixels_b) {
        assert_eq!(a, b);
    }
}
