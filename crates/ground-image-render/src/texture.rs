//! Decoded images and the named texture resource they are loaded into.

use std::fs::File;
use std::io::BufReader;

use image::{DynamicImage, ImageFormat};

use crate::error::{TextureError, TextureResult};

/// A decoded RGBA8 pixel buffer, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    width: u32,
    height: u32,
    format: ImageFormat,
    pixels: Vec<u8>,
}

impl ImageAsset {
    /// Converts a decoded image to RGBA8.
    pub fn from_dynamic(image: &DynamicImage, format: ImageFormat) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            format,
            pixels: rgba.into_raw(),
        }
    }

    /// Opens and decodes `path`.
    ///
    /// The container format is chosen from the text after the last `.` of the
    /// whole path; a path without `.` is rejected.
    pub fn read(path: &str) -> TextureResult<Self> {
        let file = File::open(path).map_err(|source| TextureError::Open {
            path: path.to_string(),
            source,
        })?;

        let index = path
            .rfind('.')
            .ok_or_else(|| TextureError::MissingExtension(path.to_string()))?;
        let extension = &path[index + 1..];
        let format = ImageFormat::from_extension(extension)
            .ok_or_else(|| TextureError::UnsupportedFormat(extension.to_string()))?;

        let image = image::load(BufReader::new(file), format)?;
        Ok(Self::from_dynamic(&image, format))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Container format the image was decoded from.
    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw RGBA8 bytes, `4 * width * height` long.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the RGBA value at (x, y), or `None` out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = 4 * (y as usize * self.width as usize + x as usize);
        let px = self.pixels.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A named texture resource.
///
/// The name is fixed for the lifetime of the resource, so materials can bind
/// it once. Contents are replaced wholesale; every change bumps
/// [`ImageTexture::generation`] so a renderer knows to re-upload.
#[derive(Debug, Clone)]
pub struct ImageTexture {
    name: String,
    image: Option<ImageAsset>,
    generation: u64,
}

impl ImageTexture {
    /// Creates an empty texture.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current contents, if any.
    #[must_use]
    pub fn image(&self) -> Option<&ImageAsset> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Content revision. Starts at 0 and increases on every load or unload.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops the current contents.
    pub fn unload(&mut self) {
        if self.image.take().is_some() {
            self.generation += 1;
        }
    }

    /// Replaces the contents with `image`.
    pub fn load_image(&mut self, image: ImageAsset) {
        self.image = Some(image);
        self.generation += 1;
    }
}
