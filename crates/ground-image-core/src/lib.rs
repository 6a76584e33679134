//! Core abstractions for ground-image-rs.
//!
//! This crate provides the host-facing traits and plain data used throughout ground-image-rs:
//! - [`Display`] trait for plugins and the [`DisplayContext`] a host lends them
//! - [`SceneManager`] and [`TransformResolver`] capabilities
//! - Typed properties, saved configuration and status reporting
//! - Geometry and material descriptions for manual scene objects

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Material state flags mirror renderer pipeline switches
#![allow(clippy::struct_excessive_bools)]

pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod material;
pub mod naming;
pub mod properties;
pub mod registry;
pub mod scene;
pub mod status;
pub mod transform;

pub use config::DisplayConfig;
pub use display::{Display, DisplayContext};
pub use error::{GroundImageError, Result};
pub use geometry::{ManualGeometry, ManualGeometryBuilder, Vertex};
pub use material::{
    CullMode, FilterOption, Material, TextureAddressing, TextureFiltering, TextureUnit,
};
pub use naming::SequentialNames;
pub use properties::{FloatProperty, FrameProperty, StringProperty};
pub use registry::{DisplayFactory, DisplayRegistry, PluginRegistry};
pub use scene::{NodeId, ObjectId, SceneManager};
pub use status::{StatusEntry, StatusLevel, StatusProperty, StatusSink};
pub use transform::{Pose, Timestamp, TransformResolver};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
