//! # Export
//!
//! Writes rendered rooms and worlds as PNG (optionally shrunk with oxipng) and
//! world placements as JSON.

use std::{fs, fs::File, path::Path};

use image::RgbaImage;
use serde::Serialize;

use crate::error::Result;
use crate::room::{Orientation, RoomId};
use crate::world::World;

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub optimise_png: bool,
    pub write_metadata: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            optimise_png: true,
            write_metadata: true,
        }
    }
}

pub fn save_png(image: &RgbaImage, path: &Path, config: &ExportConfig) -> Result<()> {
    if !config.optimise_png {
        image.save(path)?;
        return Ok(());
    }

    let temp_path = path.with_extension("temp.png");
    image.save(&temp_path)?;

    // Rooms use at most 13 colours, so bit depth reduction gets them down to a
    // small indexed PNG
    let mut options = oxipng::Options::from_preset(2);
    options.bit_depth_reduction = true;
    options.interlace = None;

    match oxipng::optimize(
        &oxipng::InFile::Path(temp_path.clone()),
        &oxipng::OutFile::Path(Some(path.to_path_buf())),
        &options,
    ) {
        Ok(_) => {
            let _ = fs::remove_file(temp_path);
        }
        Err(e) => {
            fs::rename(&temp_path, path)?;
            log::warn!(
                "oxipng optimisation failed for {}: {}. File saved unoptimised.",
                path.display(),
                e
            );
        }
    }
    Ok(())
}

#[derive(Serialize)]
pub struct WorldMetadata {
    pub width: usize,
    pub height: usize,
    pub rooms: Vec<RoomPlacement>,
}

#[derive(Serialize)]
pub struct RoomPlacement {
    pub index: usize,
    pub id: RoomId,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub orientation: Orientation,
    pub length: usize,
    pub palette_index: u8,
    pub graphics_banks: [u8; 2],
}

pub fn build_metadata(world: &World) -> WorldMetadata {
    WorldMetadata {
        width: world.width,
        height: world.height,
        rooms: world
            .rooms
            .iter()
            .enumerate()
            .map(|(index, placed)| RoomPlacement {
                index,
                id: placed.descriptor.id,
                x: placed.x,
                y: placed.y,
                width: placed.width,
                height: placed.height,
                orientation: placed.descriptor.orientation,
                length: placed.descriptor.length,
                palette_index: placed.descriptor.palette_index,
                graphics_banks: [
                    placed.descriptor.graphics_bank_a,
                    placed.descriptor.graphics_bank_b,
                ],
            })
            .collect(),
    }
}

pub fn write_world_metadata(world: &World, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &build_metadata(world))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::RoomDescriptor;
    use crate::world::PlacedRoom;
    use image::Rgba;
    use test_log::test;

    fn world() -> World {
        let descriptor = RoomDescriptor {
            id: RoomId::new(3, 1, 2),
            graphics_bank_a: 0x4C,
            graphics_bank_b: 0x4D,
            palette_index: 7,
            room_type: 0,
            orientation: Orientation::Horizontal,
            tileset_definitions: 0,
            tileset_attributes: 0,
            length: 1,
            screen_map: 0,
        };
        World {
            rooms: vec![PlacedRoom {
                descriptor,
                x: 0,
                y: 16,
                width: 256,
                height: 192,
            }],
            width: 256,
            height: 208,
        }
    }

    #[test]
    fn metadata_lists_placements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        write_world_metadata(&world(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["width"], 256);
        assert_eq!(value["height"], 208);
        let room = &value["rooms"][0];
        assert_eq!(room["id"]["stage"], 3);
        assert_eq!(room["y"], 16);
        assert_eq!(room["orientation"], "horizontal");
        assert_eq!(room["graphics_banks"][1], 0x4D);
    }

    #[test]
    fn saves_png_without_optimisation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.png");
        let mut img = RgbaImage::new(4, 2);
        img.put_pixel(1, 1, Rgba([10, 20, 30, 255]));

        let config = ExportConfig {
            optimise_png: false,
            ..ExportConfig::default()
        };
        save_png(&img, &path, &config).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, img);
    }
}
