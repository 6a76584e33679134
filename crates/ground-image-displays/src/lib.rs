//! Display implementations for ground-image-rs.
//!
//! This crate provides concrete [`Display`](ground_image_core::Display) plugins:
//! - Static ground image: an image file on a rectangle anchored to a frame

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod ground_image;

pub use ground_image::{GroundImageDisplay, CLASS_NAME as GROUND_IMAGE_CLASS};

use ground_image_core::error::Result;
use ground_image_core::registry::PluginRegistry;

/// Registers every display class in this crate.
pub fn register_plugins(plugins: &mut PluginRegistry) -> Result<()> {
    plugins.register(GROUND_IMAGE_CLASS, GroundImageDisplay::create)?;
    log::debug!("registered display class '{GROUND_IMAGE_CLASS}'");
    Ok(())
}
