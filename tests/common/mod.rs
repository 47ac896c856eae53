//! Builds a cartridge image containing just enough pointer tables, tile-set
//! data and tiles to describe a handful of rooms in one stage/block.

#![allow(dead_code)]

use cv3_mapper::pointers::STAGE_BANK_TABLE;
use cv3_mapper::rom::{HEADER_SIZE, PROGRAM_SIZE, TILE_SIZE};
use cv3_mapper::{Rom, RomLayout, RoomId};

pub const STAGE: u8 = 2;
pub const BLOCK: u8 = 1;

/// Stage bank table entry; doubled into bank 0x14 at 0x28000
const STAGE_BANK_ENTRY: u8 = 0x0A;

const GRAPHICS_BLOCKS: usize = 0x1000;
const GRAPHICS_ROOMS: usize = 0x1100;
const PALETTE_BLOCKS: usize = 0x1200;
const PALETTE_ROOMS: usize = 0x1300;
const TYPE_BLOCKS: usize = 0x3D000;
const TYPE_ROOMS: usize = 0x3D100;
const DEFINITIONS: usize = 0x28000;
const ATTRIBUTES: usize = 0x29000;
const SCREEN_BLOCKS: usize = 0x29800;
const SCREEN_ROOMS: usize = 0x29900;
const ROOM_DATA: usize = 0x2A000;
const ROOM_DATA_STRIDE: usize = 0x400;

pub const PALETTE_INDEX: u8 = 3;
pub const BANK_A: u8 = 0x44;
pub const BANK_B: u8 = 0x45;

/// Metatile drawn entirely with colour 1 of palette 0 (0x16)
pub const PLAIN_METATILE: u8 = 1;
pub const PLAIN_COLOUR: u8 = 0x16;
/// Metatile drawn entirely with colour 3 of palette 3 (0x23)
pub const BRIGHT_METATILE: u8 = 2;
pub const BRIGHT_COLOUR: u8 = 0x23;

#[derive(Clone, Copy, Debug)]
pub struct RoomShape {
    pub vertical: bool,
    pub length: u8,
    pub metatile: u8,
}

pub fn room_id(room: u8) -> RoomId {
    RoomId::new(STAGE, BLOCK, room)
}

pub struct SyntheticRom {
    program: Vec<u8>,
    tiles: Vec<u8>,
}

impl SyntheticRom {
    pub fn new(rooms: &[RoomShape]) -> Self {
        let mut rom = SyntheticRom {
            program: vec![0; PROGRAM_SIZE],
            tiles: vec![0; TILE_SIZE],
        };
        rom.write_tables();
        rom.write_graphics();
        for (i, shape) in rooms.iter().enumerate() {
            rom.write_room(i, shape);
        }
        rom
    }

    fn ptr(&mut self, at: usize, raw: u16) {
        self.program[at..at + 2].copy_from_slice(&raw.to_le_bytes());
    }

    fn stage_entry(base: usize) -> usize {
        base + usize::from(STAGE) * 2
    }

    fn write_tables(&mut self) {
        let block = usize::from(BLOCK);

        // Bank 0 tables store their targets directly
        self.ptr(Self::stage_entry(0x005F), GRAPHICS_BLOCKS as u16);
        self.ptr(GRAPHICS_BLOCKS + block * 4, GRAPHICS_ROOMS as u16);
        self.ptr(Self::stage_entry(0x0541), PALETTE_BLOCKS as u16);
        self.ptr(PALETTE_BLOCKS + block * 4, PALETTE_ROOMS as u16);

        // Bank 0x1E (0x3C000) through the CPU window at 0x8000
        self.ptr(Self::stage_entry(0x3D953), 0x8000 | (TYPE_BLOCKS - 0x3C000) as u16);
        self.ptr(TYPE_BLOCKS + block * 2, 0x8000 | (TYPE_ROOMS - 0x3C000) as u16);

        self.program[STAGE_BANK_TABLE + usize::from(STAGE)] = STAGE_BANK_ENTRY;
        let in_stage_bank = |offset: usize| 0x8000 | (offset - 0x28000) as u16;
        self.ptr(Self::stage_entry(0x3D917), in_stage_bank(DEFINITIONS));
        self.ptr(Self::stage_entry(0x3D935), in_stage_bank(ATTRIBUTES));
        self.ptr(Self::stage_entry(0x3D8F9), in_stage_bank(SCREEN_BLOCKS));
        self.ptr(SCREEN_BLOCKS + block * 2, in_stage_bank(SCREEN_ROOMS));

        let palette = 0x06DF + usize::from(PALETTE_INDEX) * 9;
        self.program[palette..palette + 9]
            .copy_from_slice(&[0x01, 0x02, 0x03, 0x11, 0x12, 0x13, 0x21, 0x22, 0x23]);
    }

    fn write_graphics(&mut self) {
        // Tile 1 of bank A: low plane only (value 1). Tile 1 of bank B: both planes (value 3).
        let a = usize::from(BANK_A) * 0x400 + 0x10;
        self.tiles[a..a + 8].fill(0xFF);
        let b = usize::from(BANK_B) * 0x400 + 0x10;
        self.tiles[b..b + 16].fill(0xFF);

        let plain = DEFINITIONS + usize::from(PLAIN_METATILE) * 16;
        self.program[plain..plain + 16].fill(0x41);
        self.program[ATTRIBUTES + usize::from(PLAIN_METATILE)] = 0x00;

        let bright = DEFINITIONS + usize::from(BRIGHT_METATILE) * 16;
        self.program[bright..bright + 16].fill(0x81);
        self.program[ATTRIBUTES + usize::from(BRIGHT_METATILE)] = 0xFF;
    }

    fn write_room(&mut self, room: usize, shape: &RoomShape) {
        self.program[GRAPHICS_ROOMS + room * 2] = BANK_A;
        self.program[GRAPHICS_ROOMS + room * 2 + 1] = BANK_B;
        self.program[PALETTE_ROOMS + room] = PALETTE_INDEX;
        self.program[TYPE_ROOMS + room] = if shape.vertical { 0x80 } else { 0x00 };

        let data = ROOM_DATA + room * ROOM_DATA_STRIDE;
        self.ptr(SCREEN_ROOMS + room * 2 + 1, 0x8000 | (data - 0x28000) as u16);
        self.program[data] = shape.length - 1;
        let page = if shape.vertical { 64 } else { 48 };
        let map_len = page * usize::from(shape.length);
        self.program[data + 1..data + 1 + map_len].fill(shape.metatile);
    }

    /// The full image file: header, program data, tile data
    pub fn image(&self) -> Vec<u8> {
        let mut image = b"NES\x1A".to_vec();
        image.resize(HEADER_SIZE, 0);
        image.extend_from_slice(&self.program);
        image.extend_from_slice(&self.tiles);
        image
    }

    pub fn load(&self) -> Rom {
        Rom::load(&self.image(), &RomLayout::default()).unwrap()
    }
}
