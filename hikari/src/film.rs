use std::{collections::VecDeque, path::Path};

use crate::{
    hikari_trace,
    math::{Bounds2, Spectrum, Vec2},
};

/// The settings for a [Film].
#[derive(Debug, Copy, Clone)]
pub struct FilmSettings {
    /// The total film resolution.
    pub res: Vec2<u16>,
    /// The tile size to be used.
    pub tile_dim: u16,
    /// Value cleared pixels start out as.
    pub clear_color: Spectrum<f32>,
}

impl Default for FilmSettings {
    fn default() -> Self {
        Self {
            res: Vec2::new(640, 480),
            tile_dim: 16,
            clear_color: Spectrum::zeros(),
        }
    }
}

/// A film tile rendered independently of all the others.
#[derive(Debug, Clone)]
pub struct FilmTile {
    /// The [Film] pixel bounds of this tile.
    pub bb: Bounds2<u16>,
    /// Pixel values of this tile in row-major order.
    pub pixels: Vec<Spectrum<f32>>,
}

impl FilmTile {
    /// Creates a new cleared `FilmTile` with the given bounds.
    pub fn new(bb: Bounds2<u16>, clear_color: Spectrum<f32>) -> Self {
        let Vec2 { x: width, y: height } = bb.diagonal();

        Self {
            bb,
            pixels: vec![clear_color; (width as usize) * (height as usize)],
        }
    }
}

/// The full-frame pixel buffer tiles resolve into.
pub struct Film {
    res: Vec2<u16>,
    pixels: Vec<Spectrum<f32>>,
}

impl Film {
    /// Creates a new cleared `Film` at `res`.
    pub fn new(res: Vec2<u16>) -> Self {
        Self {
            res,
            pixels: vec![Spectrum::zeros(); (res.x as usize) * (res.y as usize)],
        }
    }

    /// Returns the resolution of this `Film`.
    pub fn res(&self) -> Vec2<u16> {
        self.res
    }

    /// Returns the pixels of this `Film` in row-major order.
    pub fn pixels(&self) -> &[Spectrum<f32>] {
        &self.pixels
    }

    /// Resizes this `Film` to match `settings`, clearing all pixels.
    fn resize(&mut self, settings: &FilmSettings) {
        self.res = settings.res;
        self.pixels = vec![
            settings.clear_color;
            (settings.res.x as usize) * (settings.res.y as usize)
        ];
    }

    /// Writes the pixel values of a [FilmTile] into this `Film`.
    pub fn update_tile(&mut self, tile: &FilmTile) {
        let tile_min = tile.bb.p_min;
        let tile_max = tile.bb.p_max;
        assert!(
            tile_max.x <= self.res.x && tile_max.y <= self.res.y,
            "Tile doesn't fit film ({:?} {:?})",
            self.res,
            tile.bb
        );

        let tile_width = (tile_max.x - tile_min.x) as usize;
        for (tile_row, film_row) in ((tile_min.y as usize)..(tile_max.y as usize)).enumerate() {
            let film_row_offset = film_row * (self.res.x as usize);
            let film_slice_start = film_row_offset + (tile_min.x as usize);
            let film_slice_end = film_row_offset + (tile_max.x as usize);

            let tile_slice_start = tile_row * tile_width;
            let tile_slice_end = (tile_row + 1) * tile_width;

            self.pixels[film_slice_start..film_slice_end]
                .copy_from_slice(&tile.pixels[tile_slice_start..tile_slice_end]);
        }
    }

    /// Packs the pixels into `0xAARRGGBB` words with opaque alpha, rounding
    /// each channel to 8 bits.
    pub fn packed_argb(&self) -> Vec<u32> {
        fn channel(v: f32) -> u32 {
            // The cast saturates so overbright values land on 255
            (v * 255.0).round() as u8 as u32
        }

        self.pixels
            .iter()
            .map(|p| {
                0xFF00_0000 | (channel(p.r) << 16) | (channel(p.g) << 8) | channel(p.b)
            })
            .collect()
    }

    /// Writes this `Film` to `path` as a 24bit bitmap.
    pub fn write_bmp(&self, path: &Path) -> Result<(), image::ImageError> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            bytes.push((p.r * 255.0).round() as u8);
            bytes.push((p.g * 255.0).round() as u8);
            bytes.push((p.b * 255.0).round() as u8);
        }
        image::save_buffer(
            path,
            &bytes,
            self.res.x as u32,
            self.res.y as u32,
            image::ColorType::Rgb8,
        )
    }
}

/// Resizes `film` to match `settings` and splits it into render tiles in
/// row-major order.
pub fn film_tiles(film: &mut Film, settings: &FilmSettings) -> VecDeque<FilmTile> {
    film.resize(settings);

    let dim = settings.tile_dim;
    let mut tiles = VecDeque::new();
    for j in (0..settings.res.y).step_by(dim as usize) {
        for i in (0..settings.res.x).step_by(dim as usize) {
            // Edge tiles clamp to the film
            let max_x = (i + dim).min(settings.res.x);
            let max_y = (j + dim).min(settings.res.y);

            tiles.push_back(FilmTile::new(
                Bounds2::new(Vec2::new(i, j), Vec2::new(max_x, max_y)),
                settings.clear_color,
            ));
        }
    }
    hikari_trace!("film_tiles: split {:?} into {} tiles", settings.res, tiles.len());

    tiles
}
