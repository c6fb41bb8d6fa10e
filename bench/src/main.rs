use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use hikari::{
    camera::Camera,
    film::{Film, FilmSettings},
    lights::Light,
    materials::Material,
    math::{Spectrum, Vec2, Vec3},
    renderer::{self, RenderSettings},
    scene::Scene,
    shapes::{CullMode, Sphere, TriangleMesh},
};

const BVH_REBUILDS: usize = 100;

/// A tessellated sphere, `segments * rings * 2` triangles.
fn sphere_mesh(segments: usize, rings: usize) -> TriangleMesh {
    let mut positions = Vec::new();
    for ring in 0..=rings {
        let theta = std::f32::consts::PI * (ring as f32) / (rings as f32);
        for segment in 0..segments {
            let phi = 2.0 * std::f32::consts::PI * (segment as f32) / (segments as f32);
            positions.push(Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            ));
        }
    }

    let mut indices = Vec::new();
    for ring in 0..rings {
        for segment in 0..segments {
            let next_segment = (segment + 1) % segments;
            let i0 = (ring * segments + segment) as u32;
            let i1 = (ring * segments + next_segment) as u32;
            let i2 = ((ring + 1) * segments + segment) as u32;
            let i3 = ((ring + 1) * segments + next_segment) as u32;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    TriangleMesh::new(positions, indices, CullMode::BackFace, 0)
}

fn bench_bvh_build(mesh: &mut TriangleMesh) {
    let triangle_count = mesh.indices.len() / 3;

    let start = Instant::now();
    for _ in 0..BVH_REBUILDS {
        mesh.update_transforms();
        if mesh.bvh().nodes().is_empty() {
            panic!("We only wanted to force the rebuild to be executed!")
        }
    }
    let elapsed_ns = start.elapsed().as_nanos();
    let elapsed_ms = (elapsed_ns as f64) * 1e-6;
    let ms_per_build = elapsed_ms / (BVH_REBUILDS as f64);
    println!(
        "BVH build over {:5} tris took {:7.1} ms total, {:0.4} ms per build",
        triangle_count, elapsed_ms, ms_per_build
    );
}

fn bench_render(scene: &Scene) {
    let film_settings = FilmSettings {
        res: Vec2::new(640, 480),
        ..FilmSettings::default()
    };
    let film = Arc::new(Mutex::new(Film::new(film_settings.res)));
    let camera = Camera::new(Vec3::new(0.0, 1.0, -6.0), 60.0);

    let result = renderer::render(
        scene,
        &camera,
        &film,
        film_settings,
        RenderSettings::default(),
    );
    println!(
        "Frame    took {:7.1} ms, {} rays, {:0.2} Mrays/s",
        result.secs * 1e3,
        result.ray_count,
        (result.ray_count as f32) / result.secs * 1e-6
    );
}

fn main() {
    for (segments, rings) in [(16, 8), (32, 16), (64, 32)] {
        let mut mesh = sphere_mesh(segments, rings);
        bench_bvh_build(&mut mesh);
    }

    let mut scene = Scene::new();
    scene.materials.push(Material::CookTorrance {
        albedo: Spectrum::new(0.75, 0.75, 0.75),
        metalness: 0.0,
        roughness: 0.4,
    });
    scene.materials.push(Material::Lambert {
        diffuse_reflectance: 1.0,
        diffuse_color: Spectrum::new(0.57, 0.57, 0.57),
    });

    let mut mesh = sphere_mesh(64, 32);
    mesh.translate(Vec3::new(-1.5, 1.0, 0.0));
    mesh.update_transforms();
    scene.meshes.push(mesh);
    scene
        .spheres
        .push(Sphere::new(Vec3::new(1.5, 1.0, 0.0), 1.0, 1));
    scene.lights = vec![
        Light::point(Vec3::new(0.0, 5.0, -5.0), Spectrum::ones(), 70.0),
        Light::point(Vec3::new(-3.0, 3.0, 2.0), Spectrum::new(1.0, 0.8, 0.6), 40.0),
    ];

    bench_render(&scene);
}
