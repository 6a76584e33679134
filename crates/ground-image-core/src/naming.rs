//! Unique scene object names.

use std::collections::HashMap;

/// Hands out `"<prefix><n>"` names, counting separately per prefix.
///
/// Owned by a host; two hosts never share counters.
#[derive(Debug, Clone, Default)]
pub struct SequentialNames {
    counters: HashMap<String, u64>,
}

impl SequentialNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused name for `prefix`, starting at `<prefix>0`.
    pub fn next(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        let name = format!("{prefix}{counter}");
        *counter += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_prefix() {
        let mut names = SequentialNames::new();
        assert_eq!(names.next("StaticImageDisplayObject"), "StaticImageDisplayObject0");
        assert_eq!(names.next("StaticImageDisplayObject"), "StaticImageDisplayObject1");
        assert_eq!(names.next("Other"), "Other0");
    }

    #[test]
    fn test_generators_are_independent() {
        let mut a = SequentialNames::new();
        let mut b = SequentialNames::new();
        a.next("x");
        assert_eq!(b.next("x"), "x0");
    }
}
