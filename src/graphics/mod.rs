//! Background graphics decoding
//!
//! Pattern tiles, palettes, metatiles and screen pages, drawn into an indexed
//! pixel buffer.

pub mod canvas;
pub mod metatile;
pub mod palette;
pub mod screen;
pub mod tile;

pub use canvas::IndexedImage;
pub use palette::{NesPalette, Palette, RoomPalettes};
