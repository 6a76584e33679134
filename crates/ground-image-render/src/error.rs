//! Texture loading error types.

use thiserror::Error;

/// Why an image file could not be turned into a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    /// The file could not be opened for reading.
    #[error("failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The path contains no `.`, so the container format is unknown.
    #[error("'{0}' has no file extension")]
    MissingExtension(String),

    /// The extension does not name a format the decoder knows.
    #[error("unsupported image extension '{0}'")]
    UnsupportedFormat(String),

    /// The decoder rejected the file contents.
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// A specialized Result type for texture operations.
pub type TextureResult<T> = std::result::Result<T, TextureError>;
