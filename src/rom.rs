use std::fmt;
use std::fs;
use std::path::Path;

use crate::binary_utils;
use crate::error::{MapError, Result};

pub const HEADER_SIZE: usize = 16;
pub const PROGRAM_SIZE: usize = 256 * 1024;
pub const TILE_SIZE: usize = 128 * 1024;

/// Sizes of the three consecutive sections of the image file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RomLayout {
    pub header_size: usize,
    pub program_size: usize,
    pub tile_size: usize,
}

impl Default for RomLayout {
    fn default() -> Self {
        Self {
            header_size: HEADER_SIZE,
            program_size: PROGRAM_SIZE,
            tile_size: TILE_SIZE,
        }
    }
}

impl RomLayout {
    pub fn total_size(&self) -> usize {
        self.header_size + self.program_size + self.tile_size
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Program,
    Tiles,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Program => write!(f, "program data"),
            Region::Tiles => write!(f, "tile data"),
        }
    }
}

/// The two byte regions of a loaded image. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct Rom {
    program: Vec<u8>,
    tiles: Vec<u8>,
}

impl Rom {
    /// Load a ROM from a file path
    pub fn open<P: AsRef<Path>>(path: P, layout: &RomLayout) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        log::info!("Read {} bytes from {}", data.len(), path.display());
        Self::load(&data, layout)
    }

    /// Split a raw image into its program and tile regions, skipping the header.
    ///
    /// The input must be exactly the size the layout describes.
    pub fn load(bytes: &[u8], layout: &RomLayout) -> Result<Self> {
        let expected = layout.total_size();
        if bytes.len() != expected {
            return Err(MapError::Format(format!(
                "image is {} bytes, expected {} ({} header + {} program + {} tile)",
                bytes.len(),
                expected,
                layout.header_size,
                layout.program_size,
                layout.tile_size
            )));
        }

        let program_end = layout.header_size + layout.program_size;
        let program = bytes[layout.header_size..program_end].to_vec();
        let tiles = bytes[program_end..].to_vec();

        log::info!("Program data: {} bytes", program.len());
        log::info!("Tile data: {} bytes", tiles.len());

        Ok(Self { program, tiles })
    }

    /// Build a ROM directly from region buffers of any size
    pub fn from_regions(program: Vec<u8>, tiles: Vec<u8>) -> Self {
        Self { program, tiles }
    }

    pub fn program(&self) -> &[u8] {
        &self.program
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn region(&self, region: Region) -> &[u8] {
        match region {
            Region::Program => &self.program,
            Region::Tiles => &self.tiles,
        }
    }

    pub fn read_u8(&self, region: Region, offset: usize) -> Result<u8> {
        let data = self.region(region);
        binary_utils::read_u8(data, offset).ok_or(MapError::OutOfRange {
            region,
            offset,
            len: data.len(),
        })
    }

    pub fn read_u16_le(&self, region: Region, offset: usize) -> Result<u16> {
        let data = self.region(region);
        binary_utils::read_u16_le(data, offset).ok_or(MapError::OutOfRange {
            region,
            offset: offset.saturating_add(1),
            len: data.len(),
        })
    }

    pub fn read_bytes(&self, region: Region, offset: usize, length: usize) -> Result<&[u8]> {
        let data = self.region(region);
        binary_utils::read_bytes(data, offset, length).ok_or(MapError::OutOfRange {
            region,
            offset: offset.saturating_add(length.saturating_sub(1)),
            len: data.len(),
        })
    }

    /// Shorthand for the program region, which holds every table
    pub fn prg_u8(&self, offset: usize) -> Result<u8> {
        self.read_u8(Region::Program, offset)
    }
}
