use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    sync::{
        mpsc::{channel, Sender},
        Arc, Mutex,
    },
    thread,
    time::Instant,
};

use crate::{
    camera::Camera,
    film::{film_tiles, Film, FilmSettings, FilmTile},
    hikari_debug, hikari_error, hikari_info, hikari_trace,
    integrator::{self, LightingMode},
    scene::Scene,
};

#[derive(Debug, Copy, Clone, Deserialize, Serialize)]
pub struct RenderSettings {
    pub lighting_mode: LightingMode,
    pub shadows_enabled: bool,
    /// Size the worker pool by logical cores instead of physical ones.
    pub match_logical_cores: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            lighting_mode: LightingMode::Combined,
            shadows_enabled: true,
            match_logical_cores: true,
        }
    }
}

impl RenderSettings {
    /// Steps to the next lighting mode, wrapping after the last one.
    pub fn cycle_lighting_mode(&mut self) {
        self.lighting_mode = self.lighting_mode.cycled();
    }

    pub fn toggle_shadows(&mut self) {
        self.shadows_enabled = !self.shadows_enabled;
    }
}

#[derive(Copy, Clone)]
pub struct RenderResult {
    pub secs: f32,
    pub ray_count: usize,
}

/// Renders one frame of `scene` into `film`, blocking until every tile is
/// done.
///
/// The film is split into tiles behind a shared queue and a pool of workers
/// drains it. Workers read the scene and camera, own all their intermediate
/// state and write back disjoint pixel ranges, so the frame is deterministic
/// no matter how tiles land on threads.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    film: &Arc<Mutex<Film>>,
    film_settings: FilmSettings,
    settings: RenderSettings,
) -> RenderResult {
    let render_start = Instant::now();

    let mut camera = camera.clone();
    camera.recompute_basis();

    let tiles = {
        let mut film = film.lock().unwrap();
        Arc::new(Mutex::new(film_tiles(&mut film, &film_settings)))
    };

    let thread_count = if settings.match_logical_cores {
        num_cpus::get()
    } else {
        num_cpus::get_physical()
    };
    hikari_debug!("render: launching {} workers", thread_count);

    let (to_parent, from_workers) = channel();
    let camera = &camera;
    let ray_count = thread::scope(|s| {
        for thread_id in 0..thread_count {
            let to_parent = to_parent.clone();
            let tiles = Arc::clone(&tiles);
            let film = Arc::clone(film);
            s.spawn(move || {
                render_worker(
                    thread_id,
                    scene,
                    camera,
                    &tiles,
                    &film,
                    film_settings,
                    settings,
                    &to_parent,
                );
            });
        }
        drop(to_parent);

        // The channel closes once every worker has dropped its sender
        let mut ray_count = 0;
        while let Ok((thread_id, worker_rays)) = from_workers.recv() {
            hikari_trace!("render: worker {} done with {} rays", thread_id, worker_rays);
            ray_count += worker_rays;
        }
        ray_count
    });

    let secs = render_start.elapsed().as_secs_f32();
    hikari_info!("render: frame finished in {:.2}s, {} rays", secs, ray_count);

    RenderResult { secs, ray_count }
}

#[allow(clippy::too_many_arguments)]
fn render_worker(
    thread_id: usize,
    scene: &Scene,
    camera: &Camera,
    tiles: &Arc<Mutex<VecDeque<FilmTile>>>,
    film: &Arc<Mutex<Film>>,
    film_settings: FilmSettings,
    settings: RenderSettings,
    to_parent: &Sender<(usize, usize)>,
) {
    hikari_debug!("render worker {}: begin", thread_id);

    let mut rays = 0;
    loop {
        // Only hold the queue for the pop itself
        let tile = {
            let mut tiles = tiles.lock().unwrap();
            tiles.pop_front()
        };
        let mut tile = match tile {
            Some(tile) => tile,
            None => break,
        };
        hikari_trace!("render worker {}: tile {:?}", thread_id, tile.bb);

        rays += integrator::render_tile(
            scene,
            camera,
            &mut tile,
            film_settings.res,
            settings.lighting_mode,
            settings.shadows_enabled,
        );

        {
            let mut film = film.lock().unwrap();
            film.update_tile(&tile);
        }
    }

    if let Err(why) = to_parent.send((thread_id, rays)) {
        hikari_error!("render worker {}: {}", thread_id, why);
    }
    hikari_debug!("render worker {}: end", thread_id);
}
