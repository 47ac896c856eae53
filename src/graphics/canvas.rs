use image::{Rgba, RgbaImage};

use super::palette::{NesPalette, Palette};
use super::tile::{TilePixels, TILE_DIM};
use crate::error::{MapError, Result};

/// A 2-D grid of master colour indices, one byte per pixel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl IndexedImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Draw one decoded tile with its palette at (x, y)
    pub fn blit_tile(
        &mut self,
        x: usize,
        y: usize,
        tile: &TilePixels,
        palette: &Palette,
    ) -> Result<()> {
        if x + TILE_DIM > self.width || y + TILE_DIM > self.height {
            return Err(MapError::BlitOutOfBounds {
                x,
                y,
                width: TILE_DIM,
                height: TILE_DIM,
                canvas_width: self.width,
                canvas_height: self.height,
            });
        }
        for (row, values) in tile.chunks_exact(TILE_DIM).enumerate() {
            let start = (y + row) * self.width + x;
            for (dst, &value) in self.pixels[start..start + TILE_DIM].iter_mut().zip(values) {
                *dst = palette.colour(value);
            }
        }
        Ok(())
    }

    /// Keep only the top `height` rows
    pub fn crop_height(&mut self, height: usize) {
        if height < self.height {
            self.pixels.truncate(height * self.width);
            self.height = height;
        }
    }

    pub fn to_rgba(&self, palette: &NesPalette) -> RgbaImage {
        let mut lut = [Rgba([0, 0, 0, 0]); 256];
        for (colour, entry) in lut.iter_mut().enumerate() {
            *entry = palette.rgba(colour as u8);
        }
        let mut img = RgbaImage::new(self.width as u32, self.height as u32);
        for (dst, &colour) in img.pixels_mut().zip(&self.pixels) {
            *dst = lut[usize::from(colour)];
        }
        img
    }
}
