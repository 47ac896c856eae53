//! # Pattern Tiles
//!
//! 8x8 tiles stored as two consecutive 8-byte bitplanes: the low bit of every
//! pixel first, then the high bit. Bit 7 of each plane byte is the leftmost pixel.

use crate::error::{MapError, Result};
use crate::rom::{Region, Rom};

pub const TILE_DIM: usize = 8;
pub const TILE_PIXELS: usize = TILE_DIM * TILE_DIM;
pub const BYTES_PER_TILE: usize = 16;

/// 1 KiB slot size in the tile region
pub const TILE_BANK_SIZE: usize = 0x400;
/// Banks that never change: the first and last of the four background slots
pub const FIXED_LOW_BANK: u8 = 0x40;
pub const FIXED_HIGH_BANK: u8 = 0x43;

pub type TilePixels = [u8; TILE_PIXELS];

/// Decode a 16-byte bitplane tile into 8x8 pixel values (0-3)
pub fn decode_planes(planes: &[u8; BYTES_PER_TILE]) -> TilePixels {
    let mut pixels = [0u8; TILE_PIXELS];
    for row in 0..TILE_DIM {
        let low = planes[row];
        let high = planes[row + TILE_DIM];
        for col in 0..TILE_DIM {
            let shift = 7 - col;
            let low_bit = (low >> shift) & 1;
            let high_bit = (high >> shift) & 1;
            pixels[row * TILE_DIM + col] = (high_bit << 1) | low_bit;
        }
    }
    pixels
}

/// Decode the tile at `tile_offset` in the tile region
pub fn decode_tile(rom: &Rom, tile_offset: usize) -> Result<TilePixels> {
    let bytes = rom.read_bytes(Region::Tiles, tile_offset, BYTES_PER_TILE)?;
    let mut planes = [0u8; BYTES_PER_TILE];
    planes.copy_from_slice(bytes);
    Ok(decode_planes(&planes))
}

/// Locate a background tile id in the tile region.
///
/// The top two bits pick one of four 1 KiB slots (fixed low, `bank_a`, `bank_b`,
/// fixed high); the low six bits pick the tile inside the slot.
pub fn tile_source_offset(tile_id: u16, bank_a: u8, bank_b: u8) -> Result<usize> {
    if tile_id >= 0x100 {
        return Err(MapError::UnsupportedTileId(tile_id));
    }
    let slots = [FIXED_LOW_BANK, bank_a, bank_b, FIXED_HIGH_BANK];
    let bank = slots[usize::from(tile_id >> 6)];
    let index = usize::from(tile_id & 0x3F);
    Ok(usize::from(bank) * TILE_BANK_SIZE + index * BYTES_PER_TILE)
}
