//! # Banked Pointer Tables
//!
//! Every table in program data is reached through 16-bit pointers that are only
//! meaningful relative to the 8 KiB bank their target lives in. A pointer is
//! resolved by masking it to the bank-local window and OR-ing in the bank base.
//!
//! The room metadata is spread over several independent pointer chains
//! (stage table -> block table -> room table). Each chain is described as
//! static data below and walked by [`walk_chain`].

use crate::error::{MapError, Result};
use crate::rom::{Region, Rom};

pub const BANK_SIZE: usize = 0x2000;

/// Per stage byte naming the bank pair that holds the stage's tile-set and screen data
pub const STAGE_BANK_TABLE: usize = 0x3C94B;

/// Width of the bank-local address window a table's pointers are masked to.
///
/// Every table read by the game uses the 14-bit window. The 13-bit window is kept
/// for tables whose targets never leave a single bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMask {
    Bits13,
    Bits14,
}

impl PointerMask {
    pub const fn bits(self) -> u16 {
        match self {
            PointerMask::Bits13 => 0x1FFF,
            PointerMask::Bits14 => 0x3FFF,
        }
    }
}

/// Where the bank for a pointer's target comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankRule {
    Fixed(u8),
    /// Twice the stage's entry in [`STAGE_BANK_TABLE`]
    StageBank,
}

/// Which component of a room id selects the table entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Index {
    Stage,
    Block,
    Room,
}

/// One indexed step into a table: `table + index * stride + skew`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub index: Index,
    pub stride: usize,
    pub skew: usize,
}

/// A step whose entry is a pointer to the next table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hop {
    pub step: Step,
    pub bank: BankRule,
    pub mask: PointerMask,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    pub name: &'static str,
    pub base: usize,
    pub hops: &'static [Hop],
    /// Final non-pointer step into the last table. `None` yields the table itself.
    pub leaf: Option<Step>,
}

const fn step(index: Index, stride: usize) -> Step {
    Step {
        index,
        stride,
        skew: 0,
    }
}

const fn hop(index: Index, stride: usize, bank: BankRule) -> Hop {
    Hop {
        step: step(index, stride),
        bank,
        mask: PointerMask::Bits14,
    }
}

/// Leaf: two bytes, the tile banks swapped into the middle two 1 KiB slots
pub const GRAPHICS_CHAIN: ChainConfig = ChainConfig {
    name: "graphics",
    base: 0x005F,
    hops: &[
        hop(Index::Stage, 2, BankRule::Fixed(0)),
        hop(Index::Block, 4, BankRule::Fixed(0)),
    ],
    leaf: Some(step(Index::Room, 2)),
};

/// Leaf: one byte, index into the palette table
pub const PALETTE_CHAIN: ChainConfig = ChainConfig {
    name: "palette",
    base: 0x0541,
    hops: &[
        hop(Index::Stage, 2, BankRule::Fixed(0)),
        hop(Index::Block, 4, BankRule::Fixed(0)),
    ],
    leaf: Some(step(Index::Room, 1)),
};

/// Leaf: one byte, bit 7 set for vertical rooms
pub const ROOM_TYPE_CHAIN: ChainConfig = ChainConfig {
    name: "room type",
    base: 0x3D953,
    hops: &[
        hop(Index::Stage, 2, BankRule::Fixed(0x1E)),
        hop(Index::Block, 2, BankRule::Fixed(0x1E)),
    ],
    leaf: Some(step(Index::Room, 1)),
};

/// Resolves to the stage's metatile definition table (16 tile ids per metatile)
pub const TILESET_DEFINITION_CHAIN: ChainConfig = ChainConfig {
    name: "tile-set definitions",
    base: 0x3D917,
    hops: &[hop(Index::Stage, 2, BankRule::StageBank)],
    leaf: None,
};

/// Resolves to the stage's metatile attribute table (one byte per metatile)
pub const TILESET_ATTRIBUTE_CHAIN: ChainConfig = ChainConfig {
    name: "tile-set attributes",
    base: 0x3D935,
    hops: &[hop(Index::Stage, 2, BankRule::StageBank)],
    leaf: None,
};

/// Resolves to the room's length byte, followed directly by its screen map.
///
/// The room hop reads the high byte of one pointer and the low byte of the next,
/// which is how the game indexes this table.
pub const SCREEN_MAP_CHAIN: ChainConfig = ChainConfig {
    name: "screen map",
    base: 0x3D8F9,
    hops: &[
        hop(Index::Stage, 2, BankRule::StageBank),
        hop(Index::Block, 2, BankRule::StageBank),
        Hop {
            step: Step {
                index: Index::Room,
                stride: 2,
                skew: 1,
            },
            bank: BankRule::StageBank,
            mask: PointerMask::Bits14,
        },
    ],
    leaf: None,
};

pub const ALL_CHAINS: [&ChainConfig; 6] = [
    &GRAPHICS_CHAIN,
    &PALETTE_CHAIN,
    &ROOM_TYPE_CHAIN,
    &TILESET_DEFINITION_CHAIN,
    &TILESET_ATTRIBUTE_CHAIN,
    &SCREEN_MAP_CHAIN,
];

/// Combine a raw pointer with the bank its target lives in
pub fn combine(raw: u16, bank: u16, mask: PointerMask) -> usize {
    usize::from(raw & mask.bits()) | (usize::from(bank) * BANK_SIZE)
}

/// Read the pointer stored at `offset` and turn it into an absolute program offset
pub fn resolve(rom: &Rom, offset: usize, bank: u16, mask: PointerMask) -> Result<usize> {
    let raw = rom.read_u16_le(Region::Program, offset)?;
    let target = combine(raw, bank, mask);
    let len = rom.program().len();
    if target >= len {
        return Err(MapError::OutOfRange {
            region: Region::Program,
            offset: target,
            len,
        });
    }
    log::trace!(
        "pointer at 0x{:05X} = 0x{:04X} (bank 0x{:02X}) -> 0x{:05X}",
        offset,
        raw,
        bank,
        target
    );
    Ok(target)
}

/// The bank holding a stage's tile-set and screen-map data.
///
/// Entries of 0x80 and up double to banks past the end of program data; they are
/// kept as such so the first pointer into them fails rather than aliasing a low bank.
pub fn stage_bank(rom: &Rom, stage: u8) -> Result<u16> {
    let entry = rom.prg_u8(STAGE_BANK_TABLE + usize::from(stage))?;
    Ok(u16::from(entry) * 2)
}

/// Identifies one table entry along each chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainKey {
    pub stage: u8,
    pub block: u8,
    pub room: u8,
}

impl ChainKey {
    fn component(&self, index: Index) -> usize {
        usize::from(match index {
            Index::Stage => self.stage,
            Index::Block => self.block,
            Index::Room => self.room,
        })
    }

    fn apply(&self, table: usize, step: &Step) -> usize {
        table + self.component(step.index) * step.stride + step.skew
    }
}

/// Follow a chain to the absolute program offset of its leaf entry
pub fn walk_chain(rom: &Rom, chain: &ChainConfig, key: ChainKey) -> Result<usize> {
    let mut stage_bank_cache = None;
    let mut table = chain.base;

    for hop in chain.hops {
        let bank = match hop.bank {
            BankRule::Fixed(bank) => u16::from(bank),
            BankRule::StageBank => match stage_bank_cache {
                Some(bank) => bank,
                None => {
                    let bank = stage_bank(rom, key.stage)?;
                    stage_bank_cache = Some(bank);
                    bank
                }
            },
        };
        table = resolve(rom, key.apply(table, &hop.step), bank, hop.mask)?;
    }

    let offset = match &chain.leaf {
        Some(leaf) => key.apply(table, leaf),
        None => table,
    };
    log::trace!("{} chain for {:?} -> 0x{:05X}", chain.name, key, offset);
    Ok(offset)
}
