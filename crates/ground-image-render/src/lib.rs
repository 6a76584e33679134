//! Rendering backend for ground-image-rs.
//!
//! This crate provides:
//! - Image decoding into named, reloadable textures ([`StaticImageTexture`])
//! - A retained in-memory [`SceneGraph`] implementing the core scene capability
//! - wgpu texture upload behind the `gpu` feature

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod scene_graph;
pub mod static_image_texture;
pub mod texture;

pub use error::{TextureError, TextureResult};
#[cfg(feature = "gpu")]
pub use gpu::GpuImageTexture;
pub use scene_graph::{ManualObject, SceneGraph, SceneNode};
pub use static_image_texture::StaticImageTexture;
pub use texture::{ImageAsset, ImageTexture};
