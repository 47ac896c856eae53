use super::{
    Orientation, RoomDescriptor, HORIZONTAL_SCREEN_HEIGHT, SCREEN_WIDTH, VERTICAL_OVERDRAW,
    VERTICAL_SCREEN_HEIGHT,
};
use crate::error::Result;
use crate::graphics::palette::decode_palettes;
use crate::graphics::screen::render_screen;
use crate::graphics::metatile::RoomGraphics;
use crate::graphics::IndexedImage;
use crate::rom::Rom;

/// Render every screen page of a room into one indexed image.
///
/// Horizontal rooms place 8x6-metatile pages side by side. Vertical rooms stack
/// 8x8-metatile pages 240 pixels apart; each page's data is 16 pixels taller
/// than what the game shows, so every page overlaps the next and the leftover
/// strip at the bottom is cropped.
pub fn render_room(rom: &Rom, room: &RoomDescriptor) -> Result<IndexedImage> {
    let palettes = decode_palettes(rom, room.palette_index)?;
    let gfx = RoomGraphics {
        rom,
        set: room.metatile_set(),
        palettes: &palettes,
    };
    let rows = room.screen_rows();
    let stride = room.screen_stride();

    let img = match room.orientation {
        Orientation::Horizontal => {
            let width = room.length * SCREEN_WIDTH;
            let mut img = IndexedImage::new(width, HORIZONTAL_SCREEN_HEIGHT);
            for page in 0..room.length {
                let map = room.screen_map + stride * page;
                render_screen(&gfx, map, &mut img, page * SCREEN_WIDTH, 0, rows)?;
            }
            img
        }
        Orientation::Vertical => {
            let full_height = room.length * VERTICAL_SCREEN_HEIGHT;
            let mut img = IndexedImage::new(SCREEN_WIDTH, full_height + VERTICAL_OVERDRAW);
            for page in 0..room.length {
                let map = room.screen_map + stride * page;
                let y = page * VERTICAL_SCREEN_HEIGHT;
                render_screen(&gfx, map, &mut img, 0, y, rows)?;
            }
            img.crop_height(full_height);
            img
        }
    };

    log::debug!("rendered room {} at {}x{}", room.id, img.width(), img.height());
    Ok(img)
}
