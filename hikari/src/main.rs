use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::File,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use hikari::{
    camera::Camera,
    expect,
    film::{Film, FilmSettings},
    hikari_error, hikari_info,
    lights::Light,
    materials::Material,
    math::{Spectrum, Vec2, Vec3},
    renderer::{self, RenderSettings},
    scene::{Result, Scene, SceneLoadSettings},
    shapes::{CullMode, Plane, Sphere, Triangle, TriangleMesh},
};

/// Launch settings, optionally read from a yaml file given as the first
/// argument.
#[derive(Deserialize, Serialize)]
#[serde(default)]
struct InitialSettings {
    width: u16,
    height: u16,
    render: RenderSettings,
    /// Optional OBJ mesh loaded into the showcase scene.
    obj: Option<SceneLoadSettings>,
    output: PathBuf,
}

impl Default for InitialSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            render: RenderSettings::default(),
            obj: None,
            output: PathBuf::from("render.bmp"),
        }
    }
}

fn setup_logger() -> std::result::Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .chain(std::fs::File::create("hikari.log")?)
        .apply()?;
    Ok(())
}

fn load_settings(path: &Path) -> Result<InitialSettings> {
    Ok(serde_yaml::from_reader(File::open(path)?)?)
}

/// Builds the material showcase: two rows of spheres sweeping roughness for
/// a metal and a dielectric, a gray room, and a fan of triangles with each
/// cull mode.
fn showcase_scene(obj: Option<&SceneLoadSettings>) -> Result<Scene> {
    let mut scene = Scene::new();

    scene.materials = vec![
        // 0: the room
        Material::Lambert {
            diffuse_reflectance: 1.0,
            diffuse_color: Spectrum::new(0.57, 0.57, 0.57),
        },
        // 1-3: rough to polished metal
        Material::CookTorrance {
            albedo: Spectrum::new(0.972, 0.960, 0.915),
            metalness: 1.0,
            roughness: 1.0,
        },
        Material::CookTorrance {
            albedo: Spectrum::new(0.972, 0.960, 0.915),
            metalness: 1.0,
            roughness: 0.6,
        },
        Material::CookTorrance {
            albedo: Spectrum::new(0.972, 0.960, 0.915),
            metalness: 1.0,
            roughness: 0.1,
        },
        // 4-6: rough to polished dielectric
        Material::CookTorrance {
            albedo: Spectrum::new(0.75, 0.75, 0.75),
            metalness: 0.0,
            roughness: 1.0,
        },
        Material::CookTorrance {
            albedo: Spectrum::new(0.75, 0.75, 0.75),
            metalness: 0.0,
            roughness: 0.6,
        },
        Material::CookTorrance {
            albedo: Spectrum::new(0.75, 0.75, 0.75),
            metalness: 0.0,
            roughness: 0.1,
        },
        // 7: the cull-mode fan
        Material::LambertPhong {
            diffuse_reflectance: 0.8,
            diffuse_color: Spectrum::new(0.49, 0.57, 0.57),
            specular_reflectance: 0.5,
            phong_exponent: 50.0,
        },
    ];

    scene.planes = vec![
        Plane::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0),
        Plane::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), 0),
        Plane::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 0),
        Plane::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 0),
        Plane::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 0),
    ];

    for (row, y) in [(0u8, 1.0f32), (3, 3.0)] {
        for (column, x) in [(1u8, -1.75f32), (2, 0.0), (3, 1.75)] {
            scene
                .spheres
                .push(Sphere::new(Vec3::new(x, y, 0.0), 0.75, row + column));
        }
    }

    for (i, cull_mode) in [CullMode::BackFace, CullMode::FrontFace, CullMode::None]
        .iter()
        .enumerate()
    {
        let triangle = Triangle::new(
            Vec3::new(-0.75, -0.75, 0.0),
            Vec3::new(0.0, 0.75, 0.0),
            Vec3::new(0.75, -0.75, 0.0),
            *cull_mode,
            7,
        );
        let mut mesh = TriangleMesh::from_triangles(&[triangle], *cull_mode, 7);
        mesh.translate(Vec3::new(-1.75 + 1.75 * (i as f32), 4.5, 0.0));
        mesh.update_transforms();
        scene.meshes.push(mesh);
    }

    if let Some(obj) = obj {
        scene.load_obj(obj)?;
    }

    scene.lights = vec![
        Light::point(Vec3::new(0.0, 5.0, 5.0), Spectrum::new(1.0, 0.61, 0.45), 50.0),
        Light::point(
            Vec3::new(-2.5, 5.0, -5.0),
            Spectrum::new(1.0, 0.8, 0.45),
            70.0,
        ),
        Light::point(
            Vec3::new(2.5, 2.5, -5.0),
            Spectrum::new(0.34, 0.47, 0.68),
            50.0,
        ),
        Light::directional(
            Vec3::new(0.577, -0.577, 0.577),
            Spectrum::new(1.0, 1.0, 1.0),
            0.2,
        ),
    ];

    Ok(scene)
}

fn main() {
    if let Err(why) = setup_logger() {
        panic!("{}", why);
    }

    // Let's catch panic messages ourselves and output everywhere
    std::panic::set_hook(Box::new(|info| {
        let loc = if let Some(loc) = info.location() {
            format!("Panic at {}:{}!", loc.file(), loc.line())
        } else {
            String::from("Panic!")
        };
        let msg = format!("{} {}", loc, info);

        hikari_error!("{}", msg);
        eprintln!("{}", msg);
    }));

    let settings = match env::args().nth(1) {
        Some(path) => expect!(
            load_settings(Path::new(&path)),
            "Failed to load launch settings"
        ),
        None => InitialSettings::default(),
    };

    let scene = expect!(showcase_scene(settings.obj.as_ref()), "Scene setup failed");
    let camera = Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0);

    let film_settings = FilmSettings {
        res: Vec2::new(settings.width, settings.height),
        ..FilmSettings::default()
    };
    let film = Arc::new(Mutex::new(Film::new(film_settings.res)));

    let result = renderer::render(&scene, &camera, &film, film_settings, settings.render);
    hikari_info!(
        "main: {:.2} Mrays/s",
        (result.ray_count as f32) / result.secs * 1e-6
    );

    let film = film.lock().unwrap();
    expect!(film.write_bmp(&settings.output), "Failed to write the render");
    hikari_info!("main: wrote '{}'", settings.output.to_string_lossy());
}
