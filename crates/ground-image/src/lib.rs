//! ground-image-rs: show a static georeferenced image in a 3D scene.
//!
//! A ground image display draws an image file as a flat textured rectangle
//! whose top-left corner is pinned to a coordinate frame. The rectangle spans
//! `width` meters along the frame's +X axis and `height` meters along -Y, and
//! follows the frame as its transform changes.
//!
//! # Quick Start
//!
//! ```no_run
//! use ground_image::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut host = DisplayHost::new("map")?;
//!     host.frames_mut()
//!         .set_transform("gps", "map", Pose::from_translation(Vec3::new(5.0, 2.0, 0.0)));
//!
//!     let config = DisplayConfig::new()
//!         .with_image_path("/data/site.png")
//!         .with_frame("gps")
//!         .with_size(40.0, 30.0);
//!     host.add_display(Box::new(GroundImageDisplay::with_config("site", &config)))?;
//!
//!     host.update(0.1);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`DisplayHost`] owns the [`SceneGraph`], the [`FrameTable`] and the clock,
//!   and drives every display's lifecycle.
//! - A [`Display`] only reaches host services through the [`DisplayContext`]
//!   it is lent for the duration of one call.
//! - [`GroundImageDisplay`] keeps its texture in a [`StaticImageTexture`] and
//!   reports problems under the `"Image"` and `"Transform"` status categories.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod frames;
mod host;

pub use frames::FrameTable;
pub use host::DisplayHost;

// Re-export core types
pub use ground_image_core::{
    config::DisplayConfig,
    display::{Display, DisplayContext},
    error::{GroundImageError, Result},
    geometry::{ManualGeometry, Vertex},
    material::{Material, TextureAddressing},
    properties::FrameProperty,
    registry::PluginRegistry,
    scene::{NodeId, ObjectId, SceneManager},
    status::{StatusEntry, StatusLevel, StatusProperty},
    transform::{Pose, Timestamp, TransformResolver},
    Mat4, Quat, Vec2, Vec3,
};

// Re-export render types
#[cfg(feature = "gpu")]
pub use ground_image_render::GpuImageTexture;
pub use ground_image_render::{
    ImageAsset, ImageTexture, ManualObject, SceneGraph, SceneNode, StaticImageTexture,
    TextureError,
};

// Re-export displays
pub use ground_image_displays::{GroundImageDisplay, GROUND_IMAGE_CLASS};

/// Installs the `env_logger` backend for the `log` facade.
///
/// Verbosity follows `RUST_LOG`. Calling this more than once is harmless.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("ground-image-rs logging initialized");
    }
}
