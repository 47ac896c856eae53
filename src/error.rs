use std::io;

use thiserror::Error;

use crate::rom::Region;

pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
    #[error("image error: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid or unsupported file format: {0}")]
    Format(String),
    #[error("offset 0x{offset:X} is out of range for {region} (length 0x{len:X})")]
    OutOfRange {
        region: Region,
        offset: usize,
        len: usize,
    },
    #[error("invalid world directive {index}: {reason}")]
    InvalidDirective { index: usize, reason: String },
    #[error("unsupported tile id: 0x{0:X}")]
    UnsupportedTileId(u16),
    #[error("{width}x{height} block at ({x}, {y}) does not fit a {canvas_width}x{canvas_height} canvas")]
    BlitOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        canvas_width: usize,
        canvas_height: usize,
    },
}

impl MapError {
    pub(crate) fn directive(index: usize, reason: impl Into<String>) -> Self {
        MapError::InvalidDirective {
            index,
            reason: reason.into(),
        }
    }
}
