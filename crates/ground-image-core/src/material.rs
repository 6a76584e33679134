//! Material descriptions for manual scene objects.
//!
//! A [`Material`] is plain data: the scene host turns it into whatever pipeline
//! state its renderer needs. Textures are referenced by name so a texture can
//! be reloaded without touching the materials that sample it.

use serde::{Deserialize, Serialize};

/// Which triangle faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CullMode {
    /// Both faces are drawn.
    None,
    /// Clockwise-wound faces are discarded.
    #[default]
    Clockwise,
}

/// Texture coordinate handling outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureAddressing {
    #[default]
    Wrap,
    Clamp,
}

/// A single filtering stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterOption {
    /// Stage disabled (only meaningful for mipmapping).
    None,
    Point,
    #[default]
    Linear,
}

/// Minification, magnification and mip filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureFiltering {
    pub min: FilterOption,
    pub mag: FilterOption,
    pub mip: FilterOption,
}

impl Default for TextureFiltering {
    fn default() -> Self {
        Self {
            min: FilterOption::Linear,
            mag: FilterOption::Linear,
            mip: FilterOption::Point,
        }
    }
}

/// A sampled texture, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureUnit {
    pub texture_name: String,
    pub addressing: TextureAddressing,
    pub filtering: TextureFiltering,
}

impl TextureUnit {
    /// Creates a texture unit with default sampling.
    pub fn new(texture_name: impl Into<String>) -> Self {
        Self {
            texture_name: texture_name.into(),
            addressing: TextureAddressing::default(),
            filtering: TextureFiltering::default(),
        }
    }
}

/// Render state for a manual object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Material name, unique within a scene.
    pub name: String,
    /// Whether scene lights contribute to shading.
    pub lighting_enabled: bool,
    pub depth_write_enabled: bool,
    pub depth_check_enabled: bool,
    /// When false, fragment output replaces what is in the framebuffer.
    pub blending_enabled: bool,
    pub culling: CullMode,
    pub texture_units: Vec<TextureUnit>,
}

impl Material {
    /// Creates a lit, depth-tested, opaque material with no textures.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lighting_enabled: true,
            depth_write_enabled: true,
            depth_check_enabled: true,
            blending_enabled: false,
            culling: CullMode::default(),
            texture_units: Vec::new(),
        }
    }

    /// Creates a material that ignores scene lights.
    pub fn with_no_lighting(name: impl Into<String>) -> Self {
        Self {
            lighting_enabled: false,
            ..Self::new(name)
        }
    }

    /// Material for a flat image overlay: unlit, drawn over everything
    /// without writing depth, visible from both sides, sampling
    /// `texture_name` with clamped edges.
    pub fn ground_image(name: impl Into<String>, texture_name: impl Into<String>) -> Self {
        let mut material = Self::with_no_lighting(name);
        material.blending_enabled = false;
        material.depth_write_enabled = false;
        material.depth_check_enabled = false;
        material.culling = CullMode::None;
        material.texture_units.push(TextureUnit {
            texture_name: texture_name.into(),
            addressing: TextureAddressing::Clamp,
            filtering: TextureFiltering {
                min: FilterOption::Point,
                mag: FilterOption::Linear,
                mip: FilterOption::None,
            },
        });
        material
    }

    /// Names of all textures this material samples.
    pub fn texture_names(&self) -> impl Iterator<Item = &str> {
        self.texture_units.iter().map(|tu| tu.texture_name.as_str())
    }
}
