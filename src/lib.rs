//! Background map extraction for Akumajou Densetsu.
//!
//! Loads the cartridge image, decodes room metadata through the banked pointer
//! tables, renders rooms from their tile, metatile and palette data, and stitches
//! rooms into a single world map.

pub mod binary_utils;
pub mod error;
pub mod export;
pub mod graphics;
pub mod pointers;
pub mod progress;
pub mod rom;
pub mod room;
pub mod world;

pub use error::{MapError, Result};
pub use rom::{Rom, RomLayout};
pub use room::{render_room, RoomDescriptor, RoomId, RoomSource};
pub use world::{render_world, Directive, Side, World, WorldPlan};
