//! # Rooms
//!
//! A room is addressed by (stage, block, room). Its metadata is scattered over
//! independent pointer chains; [`RoomDescriptor::build`] walks all of them once
//! and keeps the results.

pub mod render;

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::graphics::metatile::MetatileSet;
use crate::pointers::{
    walk_chain, ChainKey, GRAPHICS_CHAIN, PALETTE_CHAIN, ROOM_TYPE_CHAIN, SCREEN_MAP_CHAIN,
    TILESET_ATTRIBUTE_CHAIN, TILESET_DEFINITION_CHAIN,
};
use crate::rom::Rom;

pub use render::render_room;

pub const SCREEN_WIDTH: usize = 256;
pub const HORIZONTAL_SCREEN_HEIGHT: usize = 192;
pub const VERTICAL_SCREEN_HEIGHT: usize = 240;
/// Rows of metatile data per vertical screen that are never displayed
pub const VERTICAL_OVERDRAW: usize = 16;

const VERTICAL_FLAG: u8 = 0x80;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RoomId {
    pub stage: u8,
    pub block: u8,
    pub room: u8,
}

impl RoomId {
    pub fn new(stage: u8, block: u8, room: u8) -> Self {
        Self { stage, block, room }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.stage, self.block, self.room)
    }
}

impl From<RoomId> for ChainKey {
    fn from(id: RoomId) -> Self {
        ChainKey {
            stage: id.stage,
            block: id.block,
            room: id.room,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn from_type_byte(room_type: u8) -> Self {
        if room_type & VERTICAL_FLAG != 0 {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoomDescriptor {
    pub id: RoomId,
    pub graphics_bank_a: u8,
    pub graphics_bank_b: u8,
    pub palette_index: u8,
    /// Raw type byte; bit 7 is the orientation, the rest is kept as-is
    pub room_type: u8,
    pub orientation: Orientation,
    pub tileset_definitions: usize,
    pub tileset_attributes: usize,
    /// Number of screen pages
    pub length: usize,
    pub screen_map: usize,
}

impl RoomDescriptor {
    pub fn build(rom: &Rom, id: RoomId) -> Result<Self> {
        let key = ChainKey::from(id);

        let graphics = walk_chain(rom, &GRAPHICS_CHAIN, key)?;
        let graphics_bank_a = rom.prg_u8(graphics)?;
        let graphics_bank_b = rom.prg_u8(graphics + 1)?;

        let palette_index = rom.prg_u8(walk_chain(rom, &PALETTE_CHAIN, key)?)?;

        let room_type = rom.prg_u8(walk_chain(rom, &ROOM_TYPE_CHAIN, key)?)?;

        let tileset_definitions = walk_chain(rom, &TILESET_DEFINITION_CHAIN, key)?;
        let tileset_attributes = walk_chain(rom, &TILESET_ATTRIBUTE_CHAIN, key)?;

        let screen_header = walk_chain(rom, &SCREEN_MAP_CHAIN, key)?;
        let length = usize::from(rom.prg_u8(screen_header)?) + 1;

        let descriptor = RoomDescriptor {
            id,
            graphics_bank_a,
            graphics_bank_b,
            palette_index,
            room_type,
            orientation: Orientation::from_type_byte(room_type),
            tileset_definitions,
            tileset_attributes,
            length,
            screen_map: screen_header + 1,
        };
        log::debug!(
            "room {}: {:?} x{}, banks {:02X}/{:02X}, palette {}",
            id,
            descriptor.orientation,
            descriptor.length,
            graphics_bank_a,
            graphics_bank_b,
            palette_index
        );
        Ok(descriptor)
    }

    /// Auxiliary type bits below the orientation flag
    pub fn type_flags(&self) -> u8 {
        self.room_type & !VERTICAL_FLAG
    }

    /// Displayed width in pixels
    pub fn width(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => self.length * SCREEN_WIDTH,
            Orientation::Vertical => SCREEN_WIDTH,
        }
    }

    /// Displayed height in pixels, after the vertical overdraw is cropped
    pub fn height(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => HORIZONTAL_SCREEN_HEIGHT,
            Orientation::Vertical => self.length * VERTICAL_SCREEN_HEIGHT,
        }
    }

    /// Metatile rows stored per screen page
    pub fn screen_rows(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => 6,
            Orientation::Vertical => 8,
        }
    }

    /// Bytes of screen map per page
    pub fn screen_stride(&self) -> usize {
        self.screen_rows() * crate::graphics::screen::SCREEN_COLUMNS
    }

    pub fn metatile_set(&self) -> MetatileSet {
        MetatileSet {
            definitions: self.tileset_definitions,
            attributes: self.tileset_attributes,
            bank_a: self.graphics_bank_a,
            bank_b: self.graphics_bank_b,
        }
    }
}

/// Anything that can describe rooms by id
pub trait RoomSource {
    fn describe(&self, id: RoomId) -> Result<RoomDescriptor>;
}

impl RoomSource for Rom {
    fn describe(&self, id: RoomId) -> Result<RoomDescriptor> {
        RoomDescriptor::build(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn descriptor(orientation: Orientation, length: usize) -> RoomDescriptor {
        RoomDescriptor {
            id: RoomId::new(0, 0, 0),
            graphics_bank_a: 0,
            graphics_bank_b: 0,
            palette_index: 0,
            room_type: if orientation == Orientation::Vertical { 0x80 } else { 0 },
            orientation,
            tileset_definitions: 0,
            tileset_attributes: 0,
            length,
            screen_map: 0,
        }
    }

    #[test]
    fn orientation_from_top_bit() {
        assert_eq!(Orientation::from_type_byte(0x80), Orientation::Vertical);
        assert_eq!(Orientation::from_type_byte(0x83), Orientation::Vertical);
        assert_eq!(Orientation::from_type_byte(0x7F), Orientation::Horizontal);
    }

    #[test]
    fn horizontal_geometry() {
        let room = descriptor(Orientation::Horizontal, 3);
        assert_eq!((room.width(), room.height()), (768, 192));
        assert_eq!(room.screen_stride(), 48);
    }

    #[test]
    fn vertical_geometry_excludes_overdraw() {
        let room = descriptor(Orientation::Vertical, 2);
        assert_eq!((room.width(), room.height()), (256, 480));
        assert_eq!(room.screen_stride(), 64);
    }

    #[test]
    fn type_flags_drop_orientation() {
        let mut room = descriptor(Orientation::Vertical, 1);
        room.room_type = 0x85;
        assert_eq!(room.type_flags(), 0x05);
    }
}
