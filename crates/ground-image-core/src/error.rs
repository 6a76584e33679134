//! Error types for ground-image-rs.

use thiserror::Error;

/// The main error type for ground-image-rs operations.
#[derive(Error, Debug)]
pub enum GroundImageError {
    /// A display with the given name already exists.
    #[error("display '{0}' already exists")]
    DisplayExists(String),

    /// A display with the given name was not found.
    #[error("display '{0}' not found")]
    DisplayNotFound(String),

    /// No plugin is registered under the given class name.
    #[error("unknown display class '{0}'")]
    UnknownDisplayClass(String),

    /// A plugin class name was registered twice.
    #[error("display class '{0}' already registered")]
    DisplayClassExists(String),

    /// The display exists but is not of the requested concrete type.
    #[error("display '{0}' is not a {1}")]
    DisplayTypeMismatch(String, &'static str),

    /// A scene node handle does not refer to a live node.
    #[error("scene node {0} does not exist")]
    NodeNotFound(u32),

    /// A manual object handle does not refer to a live object.
    #[error("manual object {0} does not exist")]
    ObjectNotFound(u32),

    /// A manual object with the given name already exists in the scene.
    #[error("manual object '{0}' already exists")]
    ObjectNameExists(String),

    /// A frame with the given name is not known to the frame table.
    #[error("frame '{0}' not found")]
    FrameNotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for ground-image-rs operations.
pub type Result<T> = std::result::Result<T, GroundImageError>;
