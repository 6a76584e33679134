//! User-facing status reporting.
//!
//! Every display carries a [`StatusProperty`]: one latched `(level, message)`
//! entry per category. Categories are independent, so an image error and a
//! transform error can be shown side by side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity of a status entry. `Error` is worse than `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum StatusLevel {
    /// Everything is fine.
    #[default]
    Ok,
    /// The display cannot show its data.
    Error,
}

/// A single latched status entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub level: StatusLevel,
    pub message: String,
}

/// Receiver of `(category, level, message)` status reports.
pub trait StatusSink {
    /// Latches `level` and `message` under `category`, replacing any previous entry.
    fn set_status(&mut self, level: StatusLevel, category: &str, message: &str);

    /// Removes the entry for `category`, if any.
    fn delete_status(&mut self, category: &str);

    /// Removes every entry.
    fn clear_statuses(&mut self);
}

/// Per-display status table.
#[derive(Debug, Clone, Default)]
pub struct StatusProperty {
    entries: BTreeMap<String, StatusEntry>,
}

impl StatusProperty {
    /// Creates an empty status table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry latched under `category`.
    pub fn get(&self, category: &str) -> Option<&StatusEntry> {
        self.entries.get(category)
    }

    /// Returns the level latched under `category`.
    pub fn level_of(&self, category: &str) -> Option<StatusLevel> {
        self.entries.get(category).map(|e| e.level)
    }

    /// Overall level: the worst level across all categories, `Ok` when empty.
    pub fn level(&self) -> StatusLevel {
        self.entries
            .values()
            .map(|e| e.level)
            .max()
            .unwrap_or_default()
    }

    /// Iterates categories in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatusEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of latched categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is latched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StatusSink for StatusProperty {
    fn set_status(&mut self, level: StatusLevel, category: &str, message: &str) {
        let entry = StatusEntry {
            level,
            message: message.to_string(),
        };
        if self.entries.get(category) != Some(&entry) {
            log::debug!("status [{category}] {level:?}: {message}");
            self.entries.insert(category.to_string(), entry);
        }
    }

    fn delete_status(&mut self, category: &str) {
        self.entries.remove(category);
    }

    fn clear_statuses(&mut self) {
        self.entries.clear();
    }
}
