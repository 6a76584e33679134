//! Display instances and display plugin classes.

use std::collections::HashMap;

use crate::display::Display;
use crate::error::{GroundImageError, Result};

/// Constructs a display instance with the given name.
pub type DisplayFactory = fn(&str) -> Box<dyn Display>;

/// Plugin classes known to a host, keyed by class name.
#[derive(Default)]
pub struct PluginRegistry {
    factories: HashMap<String, DisplayFactory>,
}

impl PluginRegistry {
    /// Creates an empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a display class.
    ///
    /// Returns an error if the class name is taken.
    pub fn register(&mut self, class_name: &str, factory: DisplayFactory) -> Result<()> {
        if self.factories.contains_key(class_name) {
            return Err(GroundImageError::DisplayClassExists(class_name.to_string()));
        }
        self.factories.insert(class_name.to_string(), factory);
        Ok(())
    }

    /// Checks if a class is registered.
    pub fn contains(&self, class_name: &str) -> bool {
        self.factories.contains_key(class_name)
    }

    /// Instantiates a display of class `class_name`.
    pub fn create(&self, class_name: &str, name: &str) -> Result<Box<dyn Display>> {
        let factory = self
            .factories
            .get(class_name)
            .ok_or_else(|| GroundImageError::UnknownDisplayClass(class_name.to_string()))?;
        Ok(factory(name))
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Live display instances, kept in insertion order.
///
/// The host updates displays in this order every frame.
#[derive(Default)]
pub struct DisplayRegistry {
    displays: Vec<Box<dyn Display>>,
}

impl DisplayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a display.
    ///
    /// Returns an error if a display with the same name already exists.
    pub fn register(&mut self, display: Box<dyn Display>) -> Result<()> {
        if self.contains(display.name()) {
            return Err(GroundImageError::DisplayExists(display.name().to_string()));
        }
        self.displays.push(display);
        Ok(())
    }

    /// Gets a display by name.
    pub fn get(&self, name: &str) -> Option<&dyn Display> {
        self.displays
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.as_ref())
    }

    /// Gets a mutable display by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Display>> {
        self.displays.iter_mut().find(|d| d.name() == name)
    }

    /// Checks if a display with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.displays.iter().any(|d| d.name() == name)
    }

    /// Removes a display by name.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Display>> {
        let index = self.displays.iter().position(|d| d.name() == name)?;
        Some(self.displays.remove(index))
    }

    /// Removes and returns every display.
    pub fn drain(&mut self) -> Vec<Box<dyn Display>> {
        std::mem::take(&mut self.displays)
    }

    /// Iterates displays in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Display> {
        self.displays.iter().map(|d| d.as_ref())
    }

    /// Iterates displays mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Display>> + '_ {
        self.displays.iter_mut()
    }

    /// Returns the number of displays.
    pub fn len(&self) -> usize {
        self.displays.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }
}
