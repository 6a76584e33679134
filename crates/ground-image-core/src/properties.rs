//! Typed inspector properties.
//!
//! Each setter returns whether the stored value actually changed; displays use
//! that to decide whether a change callback must run.

use crate::transform::TransformResolver;

/// A free-form text property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringProperty {
    name: &'static str,
    description: &'static str,
    value: String,
}

impl StringProperty {
    /// Creates a property with a default value.
    pub fn new(name: &'static str, default: impl Into<String>, description: &'static str) -> Self {
        Self {
            name,
            description,
            value: default.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    /// Stores `value`. Returns true if it differs from the previous one.
    pub fn set(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }
}

/// A finite floating point property with an optional lower bound.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatProperty {
    name: &'static str,
    description: &'static str,
    value: f32,
    min: Option<f32>,
}

impl FloatProperty {
    /// Creates an unbounded property with a default value.
    pub fn new(name: &'static str, default: f32, description: &'static str) -> Self {
        Self {
            name,
            description,
            value: default,
            min: None,
        }
    }

    /// Sets the lower bound and re-clamps the current value.
    #[must_use]
    pub fn with_min(mut self, min: f32) -> Self {
        self.min = Some(min);
        self.value = self.clamp(self.value);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn min(&self) -> Option<f32> {
        self.min
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    /// Stores `value` clamped to the lower bound. Returns true if the stored
    /// value changed. NaN and infinite input is ignored.
    pub fn set(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            log::warn!("ignoring non-finite value {value} for '{}'", self.name);
            return false;
        }
        let value = self.clamp(value);
        #[allow(clippy::float_cmp)]
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }

    fn clamp(&self, value: f32) -> f32 {
        match self.min {
            Some(min) => value.max(min),
            None => value,
        }
    }
}

/// A coordinate-frame selector.
///
/// Defaults to [`FrameProperty::FIXED_FRAME_STRING`], which follows whatever the
/// host's fixed frame currently is once the property is bound to a frame
/// manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameProperty {
    name: &'static str,
    description: &'static str,
    value: String,
    bound: bool,
}

impl FrameProperty {
    /// Placeholder value meaning "the host's fixed frame".
    pub const FIXED_FRAME_STRING: &'static str = "<Fixed Frame>";

    /// Creates a frame property with a default value.
    pub fn new(name: &'static str, default: impl Into<String>, description: &'static str) -> Self {
        Self {
            name,
            description,
            value: default.into(),
            bound: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Marks the property as connected to the host's frame manager.
    pub fn bind_frame_manager(&mut self) {
        self.bound = true;
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Raw stored value, possibly the fixed-frame placeholder.
    pub fn get(&self) -> &str {
        &self.value
    }

    /// Stores `value`. Returns true if it differs from the previous one.
    pub fn set(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }

    /// Concrete frame name, with the placeholder resolved through `frames`.
    ///
    /// An unbound property returns its raw value.
    pub fn frame_std(&self, frames: &dyn TransformResolver) -> String {
        if self.bound && self.value == Self::FIXED_FRAME_STRING {
            frames.fixed_frame().to_string()
        } else {
            self.value.clone()
        }
    }
}
