use super::canvas::IndexedImage;
use super::metatile::{render_metatile, RoomGraphics, METATILE_DIM};
use crate::error::Result;

pub const SCREEN_COLUMNS: usize = 8;
pub const SCREEN_WIDTH: usize = SCREEN_COLUMNS * METATILE_DIM;

/// Draw one screen page: `rows` rows of 8 metatile ids starting at `map_offset`
pub fn render_screen(
    gfx: &RoomGraphics<'_>,
    map_offset: usize,
    target: &mut IndexedImage,
    x: usize,
    y: usize,
    rows: usize,
) -> Result<()> {
    for row in 0..rows {
        for col in 0..SCREEN_COLUMNS {
            let metatile_id = gfx.rom.prg_u8(map_offset + col + row * SCREEN_COLUMNS)?;
            render_metatile(
                gfx,
                metatile_id,
                target,
                x + col * METATILE_DIM,
                y + row * METATILE_DIM,
            )?;
        }
    }
    Ok(())
}
