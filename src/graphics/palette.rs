//! # Room Palettes
//!
//! A room uses four 4-colour background palettes. Entries are indices into the
//! console's 64-colour master table; [`NesPalette`] turns them into RGB.

use std::fs;
use std::path::Path;

use image::Rgba;
use serde::Serialize;

use crate::error::{MapError, Result};
use crate::rom::Rom;

pub const PALETTE_TABLE: usize = 0x06DF;
pub const PALETTE_STRIDE: usize = 9;
pub const BACKGROUND_COLOUR: u8 = 0x0F;

/// Palette 0 is not stored with the room data. This stands in until the real
/// source of the first palette is located.
pub const DEFAULT_PALETTE: Palette = Palette([BACKGROUND_COLOUR, 0x16, 0x26, 0x20]);

pub const COLOURS_PER_PALETTE: usize = 4;
pub const PALETTES_PER_ROOM: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Palette(pub [u8; COLOURS_PER_PALETTE]);

impl Palette {
    pub fn colour(&self, value: u8) -> u8 {
        self.0[usize::from(value & 3)]
    }
}

pub type RoomPalettes = [Palette; PALETTES_PER_ROOM];

/// Decode the four background palettes for a palette index
pub fn decode_palettes(rom: &Rom, palette_index: u8) -> Result<RoomPalettes> {
    let base = PALETTE_TABLE + usize::from(palette_index) * PALETTE_STRIDE;
    let mut palettes = [DEFAULT_PALETTE; PALETTES_PER_ROOM];
    for (group, palette) in palettes.iter_mut().skip(1).enumerate() {
        let offset = base + group * 3;
        *palette = Palette([
            BACKGROUND_COLOUR,
            rom.prg_u8(offset)?,
            rom.prg_u8(offset + 1)?,
            rom.prg_u8(offset + 2)?,
        ]);
    }
    Ok(palettes)
}

pub const MASTER_COLOURS: usize = 64;

/// 2C02 master palette (0xRRGGBB), used when no palette file is supplied
const BUILTIN_RGB: [u32; MASTER_COLOURS] = [
    0x545454, 0x001E74, 0x081090, 0x300088, 0x440064, 0x5C0030, 0x540400, 0x3C1800, 0x202A00,
    0x083A00, 0x004000, 0x003C00, 0x00302C, 0x000000, 0x000000, 0x000000, 0x989698, 0x084CC4,
    0x3032EC, 0x5C1EE4, 0x8814B0, 0xA01464, 0x982220, 0x783C00, 0x545A00, 0x287200, 0x087C00,
    0x007628, 0x006678, 0x000000, 0x000000, 0x000000, 0xECEEEC, 0x3C7EEC, 0x5C5CEC, 0x8844EC,
    0xB02CEC, 0xE028B0, 0xD83C50, 0xC45400, 0xAC7000, 0x808800, 0x409C30, 0x20A458, 0x209A88,
    0x404040, 0x000000, 0x000000, 0xECEEEC, 0xA8BCEC, 0xBCACEC, 0xD4A0EC, 0xEC94EC, 0xEC90D4,
    0xEC9CB4, 0xE4B090, 0xDCC878, 0xD4DC78, 0xB8EC98, 0xA8ECBC, 0xA0E4E4, 0xA0A0A0, 0x000000,
    0x000000,
];

/// Master colour table mapping colour indices to RGB
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NesPalette {
    colours: [[u8; 3]; MASTER_COLOURS],
}

impl Default for NesPalette {
    fn default() -> Self {
        let mut colours = [[0u8; 3]; MASTER_COLOURS];
        for (colour, rgb) in colours.iter_mut().zip(BUILTIN_RGB) {
            *colour = [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8];
        }
        Self { colours }
    }
}

impl NesPalette {
    /// Parse a `.pal` file: RGB triples, at least 64 of them.
    ///
    /// Files carrying the emphasis variants (512 entries) are accepted; only the
    /// first 64 colours are used.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < MASTER_COLOURS * 3 || data.len() % 3 != 0 {
            return Err(MapError::Format(format!(
                "palette file is {} bytes, expected a multiple of 3 and at least {}",
                data.len(),
                MASTER_COLOURS * 3
            )));
        }
        let mut colours = [[0u8; 3]; MASTER_COLOURS];
        for (colour, chunk) in colours.iter_mut().zip(data.chunks_exact(3)) {
            colour.copy_from_slice(chunk);
        }
        Ok(Self { colours })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    pub fn rgb(&self, colour: u8) -> [u8; 3] {
        self.colours[usize::from(colour) % MASTER_COLOURS]
    }

    pub fn rgba(&self, colour: u8) -> Rgba<u8> {
        let [r, g, b] = self.rgb(colour);
        Rgba([r, g, b, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn decodes_three_groups_after_default() {
        let mut program = vec![0u8; 0x800];
        let base = PALETTE_TABLE + 2 * PALETTE_STRIDE;
        program[base..base + 9].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let rom = Rom::from_regions(program, Vec::new());

        let palettes = decode_palettes(&rom, 2).unwrap();
        assert_eq!(palettes[0], DEFAULT_PALETTE);
        assert_eq!(palettes[1], Palette([BACKGROUND_COLOUR, 1, 2, 3]));
        assert_eq!(palettes[2], Palette([BACKGROUND_COLOUR, 4, 5, 6]));
        assert_eq!(palettes[3], Palette([BACKGROUND_COLOUR, 7, 8, 9]));
        for palette in palettes {
            assert_eq!(palette.0.len(), 4);
            assert_eq!(palette.0[0], BACKGROUND_COLOUR);
        }
    }

    #[test]
    fn palette_past_end_fails() {
        let rom = Rom::from_regions(vec![0u8; PALETTE_TABLE + 4], Vec::new());
        assert!(decode_palettes(&rom, 0).is_err());
    }

    #[test]
    fn colour_lookup_uses_low_two_bits() {
        let palette = Palette([0x0F, 0x11, 0x22, 0x33]);
        assert_eq!(palette.colour(0), 0x0F);
        assert_eq!(palette.colour(3), 0x33);
    }

    #[test]
    fn master_palette_file() {
        let mut data = vec![0u8; 64 * 3];
        data[0x16 * 3..0x16 * 3 + 3].copy_from_slice(&[0xB5, 0x31, 0x20]);
        let nes = NesPalette::from_bytes(&data).unwrap();
        assert_eq!(nes.rgb(0x16), [0xB5, 0x31, 0x20]);
        assert_eq!(nes.rgba(0x16 + 64), Rgba([0xB5, 0x31, 0x20, 255]));

        assert!(NesPalette::from_bytes(&data[..100]).is_err());
        assert!(NesPalette::from_bytes(&vec![0u8; 64 * 3 + 1]).is_err());
        assert!(NesPalette::from_bytes(&vec![0u8; 512 * 3]).is_ok());
    }

    #[test]
    fn builtin_background_is_black() {
        let nes = NesPalette::default();
        assert_eq!(nes.rgb(BACKGROUND_COLOUR), [0, 0, 0]);
        assert_eq!(nes.rgb(0x30), [0xEC, 0xEE, 0xEC]);
    }
}
