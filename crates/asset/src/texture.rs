//! CPU-side texture pixel data (RGBA8) backing the texture collaborator.

use std::path::Path;

use corelib::{LoadError, LoadResult};

/// Decoded RGBA8 pixels before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self {
            data,
            width,
            height,
        }
    }

    /// Load and decode a PNG file into RGBA8.
    pub fn load_png(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        log::info!("Loading texture {}", path.display());

        let img = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => LoadError::from_io(path, io),
            other => LoadError::FileUnreadable {
                path: path.into(),
                source: std::io::Error::other(other),
            },
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::new_rgba8(width, height, rgba.into_raw()))
    }

    /// Returns `true` if dimensions are non-zero and match the pixel data.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() == (self.width * self.height * 4) as usize
    }
}
