//! # Metatiles
//!
//! A metatile is a 4x4 grid of pattern tiles (32x32 pixels). Its tile ids live
//! in the stage's definition table (16 bytes per metatile, row-major) and its
//! colours come from one attribute byte holding a 2-bit palette selector per
//! 16x16 quadrant: bits 0-1 top-left, 2-3 top-right, 4-5 bottom-left, 6-7
//! bottom-right.

use super::canvas::IndexedImage;
use super::palette::RoomPalettes;
use super::tile::{decode_tile, tile_source_offset, TILE_DIM};
use crate::error::Result;
use crate::rom::Rom;

pub const METATILE_TILES: usize = 4;
pub const METATILE_DIM: usize = METATILE_TILES * TILE_DIM;
pub const DEFINITION_STRIDE: usize = METATILE_TILES * METATILE_TILES;

/// Everything needed to draw one stage's metatiles for a room
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetatileSet {
    pub definitions: usize,
    pub attributes: usize,
    pub bank_a: u8,
    pub bank_b: u8,
}

/// Tile data, metatile tables and palettes shared by every metatile of a room
#[derive(Clone, Copy, Debug)]
pub struct RoomGraphics<'a> {
    pub rom: &'a Rom,
    pub set: MetatileSet,
    pub palettes: &'a RoomPalettes,
}

/// Split an attribute byte into its quadrant palette selectors, `[row][col]`
pub fn quadrant_palettes(attribute: u8) -> [[usize; 2]; 2] {
    let sel = |shift: u8| usize::from((attribute >> shift) & 3);
    [[sel(0), sel(2)], [sel(4), sel(6)]]
}

pub fn render_metatile(
    gfx: &RoomGraphics<'_>,
    metatile_id: u8,
    target: &mut IndexedImage,
    x: usize,
    y: usize,
) -> Result<()> {
    let RoomGraphics { rom, set, palettes } = *gfx;
    let id = usize::from(metatile_id);
    let quadrants = quadrant_palettes(rom.prg_u8(set.attributes + id)?);
    let definition = set.definitions + id * DEFINITION_STRIDE;

    for row in 0..METATILE_TILES {
        for col in 0..METATILE_TILES {
            let palette = &palettes[quadrants[row / 2][col / 2]];
            let tile_id = rom.prg_u8(definition + row * METATILE_TILES + col)?;
            let source = tile_source_offset(u16::from(tile_id), set.bank_a, set.bank_b)?;
            let pixels = decode_tile(rom, source)?;
            target.blit_tile(x + col * TILE_DIM, y + row * TILE_DIM, &pixels, palette)?;
        }
    }
    Ok(())
}
