//! A texture fed from an image file on disk.

use crate::error::TextureResult;
use crate::texture::{ImageAsset, ImageTexture};

/// Loads a single image file into a named [`ImageTexture`].
///
/// Exactly one image is live at a time. A failed load leaves the previous
/// image in place; the attempted path is remembered either way so
/// [`StaticImageTexture::update`] can retry it.
#[derive(Debug, Clone)]
pub struct StaticImageTexture {
    texture: ImageTexture,
    image_path: String,
}

impl StaticImageTexture {
    /// Creates an empty loader owning a texture named `texture_name`.
    pub fn new(texture_name: impl Into<String>) -> Self {
        Self {
            texture: ImageTexture::new(texture_name),
            image_path: String::new(),
        }
    }

    /// Name materials use to bind the texture.
    #[must_use]
    pub fn name(&self) -> &str {
        self.texture.name()
    }

    #[must_use]
    pub fn texture(&self) -> &ImageTexture {
        &self.texture
    }

    /// The last path a load was attempted from.
    #[must_use]
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Loads `image_path` into the texture. Returns false if the file cannot
    /// be opened, has no extension, or fails to decode.
    pub fn load_image_from_path(&mut self, image_path: &str) -> bool {
        self.image_path = image_path.to_string();

        match self.try_load() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("could not load image '{}': {e}", self.image_path);
                false
            }
        }
    }

    /// Reloads from the last attempted path.
    pub fn update(&mut self) -> bool {
        let path = self.image_path.clone();
        self.load_image_from_path(&path)
    }

    /// Drops the loaded image. The texture name stays valid.
    pub fn clear(&mut self) {
        self.texture.unload();
    }

    fn try_load(&mut self) -> TextureResult<()> {
        let image = ImageAsset::read(&self.image_path)?;
        log::debug!(
            "loaded {}x{} image from '{}' into texture '{}'",
            image.width(),
            image.height(),
            self.image_path,
            self.texture.name()
        );
        self.texture.unload();
        self.texture.load_image(image);
        Ok(())
    }
}
