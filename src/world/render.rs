use std::path::Path;

use image::{imageops, RgbaImage};
use rayon::prelude::*;

use super::World;
use crate::error::Result;
use crate::graphics::NesPalette;
use crate::progress::ProgressReporter;
use crate::room::render_room;
use crate::rom::Rom;

/// Render and paste every room of a world onto one RGBA canvas.
///
/// Rooms are rendered in parallel, then pasted in placement order so later rooms
/// cover earlier ones where they overlap. Uncovered pixels stay transparent.
pub fn render_world(
    rom: &Rom,
    world: &World,
    palette: &NesPalette,
    progress_path: Option<&Path>,
) -> Result<RgbaImage> {
    let progress =
        progress_path.map(|path| ProgressReporter::new(path, "world", world.rooms.len()));

    let rendered: Result<Vec<RgbaImage>> = world
        .rooms
        .par_iter()
        .map(|placed| {
            let img = render_room(rom, &placed.descriptor)?.to_rgba(palette);
            if let Some(progress) = &progress {
                progress.advance();
            }
            Ok(img)
        })
        .collect();
    let rendered = rendered?;

    let mut canvas = RgbaImage::new(world.width as u32, world.height as u32);
    for (placed, img) in world.rooms.iter().zip(&rendered) {
        imageops::replace(&mut canvas, img, placed.x as i64, placed.y as i64);
    }

    if let Some(progress) = &progress {
        progress.finish();
    }
    Ok(canvas)
}
