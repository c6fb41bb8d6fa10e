use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    time::Instant,
};

use super::Result;
use crate::{hikari_error, hikari_info, math::Vec3};

pub struct ObjResult {
    pub positions: Vec<Vec3<f32>>,
    pub indices: Vec<u32>,
}

/// Parses the `v` and triangular `f` statements of an OBJ file.
///
/// Indices come out 0-based with each face as a consecutive index triple.
/// Everything else in the file is skipped; faces with more than three
/// vertices are an error since the renderer has no polygon triangulation.
pub fn load(path: &Path) -> Result<ObjResult> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            hikari_error!("obj: could not open '{}'", path.to_string_lossy());
            return Err(e.into());
        }
    };

    let parse_start = Instant::now();

    let mut positions: Vec<Vec3<f32>> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line_number = i + 1;
        let mut words = line.split_whitespace();
        match words.next() {
            Some("v") => {
                let mut component = || -> Result<f32> {
                    let word = words
                        .next()
                        .ok_or(format!("obj: truncated vertex on line {}", line_number))?;
                    Ok(word.parse::<f32>()?)
                };
                let x = component()?;
                let y = component()?;
                let z = component()?;
                // "nan" and "inf" parse as floats but poison everything
                // downstream
                if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                    return Err(
                        format!("obj: non-finite vertex on line {}", line_number).into()
                    );
                }
                positions.push(Vec3::new(x, y, z));
            }
            Some("f") => {
                for _ in 0..3 {
                    let word = words
                        .next()
                        .ok_or(format!("obj: truncated face on line {}", line_number))?;
                    // Normal and uv references are separated by slashes,
                    // only the position index matters here
                    let index: u32 = word.split('/').next().unwrap().parse()?;
                    if index == 0 {
                        return Err(
                            format!("obj: 0 face index on line {}", line_number).into()
                        );
                    }
                    indices.push(index - 1);
                }
                if words.next().is_some() {
                    return Err(
                        format!("obj: non-triangular face on line {}", line_number).into()
                    );
                }
            }
            _ => (),
        }
    }

    if let Some(i) = indices.iter().find(|&&i| (i as usize) >= positions.len()) {
        return Err(format!("obj: face index {} out of range", i + 1).into());
    }

    hikari_info!(
        "obj: parsed {} vertices, {} triangles in {:.2}s",
        positions.len(),
        indices.len() / 3,
        parse_start.elapsed().as_secs_f32()
    );

    Ok(ObjResult { positions, indices })
}
