//! Setting levels
//!
//! A level is one atomic group of declarations: one xcconfig file's worth,
//! one target's settings, the process environment. Levels are plain ordered
//! storage; which declaration inside a level wins a lookup is decided by the
//! environment walking it.

use std::sync::Arc;

use crate::setting::Setting;

/// An ordered, shared group of setting declarations.
///
/// The settings vector is shared, so cloning a level (and any environment
/// stacking it) is O(1).
#[derive(Debug, Clone, Default)]
pub struct Level {
    settings: Arc<Vec<Setting>>,
}

impl Level {
    pub fn new(settings: Vec<Setting>) -> Self {
        Level {
            settings: Arc::new(settings),
        }
    }

    /// The declarations in declaration order.
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }
}

impl FromIterator<Setting> for Level {
    fn from_iter<I: IntoIterator<Item = Setting>>(iter: I) -> Self {
        Level::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_preserves_declaration_order() {
        let level = Level::new(vec![
            Setting::parse_pair("ONE", "1"),
            Setting::parse_pair("TWO", "2"),
        ]);
        let names: Vec<&str> = level.settings().iter().map(Setting::name).collect();
        assert_eq!(names, ["ONE", "TWO"]);
    }

    #[test]
    fn test_clone_shares_storage() {
        let level = Level::new(vec![Setting::parse_pair("ONE", "1")]);
        let clone = level.clone();
        assert!(Arc::ptr_eq(&level.settings, &clone.settings));
    }
}
