//! Conditional scoping for setting declarations
//!
//! A condition restricts when a setting declaration applies, as key=pattern
//! pairs over build dimensions: `[sdk=iphoneos*]`, `[arch=armv7,sdk=iphoneos*]`.
//! Patterns use `*` wildcards. Keys a condition does not declare are
//! unconstrained, so the empty condition matches everything.

use std::collections::BTreeMap;

use crate::wildcard;

/// A set of key=pattern constraints attached to a setting declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    values: BTreeMap<String, String>,
}

impl Condition {
    /// Build a condition from key=pattern pairs.
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Condition { values }
    }

    /// The condition with no constraints; it matches every condition.
    pub fn empty() -> Self {
        Condition::default()
    }

    /// The key=pattern map.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// True when no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of declared keys. A declaration with more keys is more
    /// specific and wins over a broader one in the same level.
    pub fn specificity(&self) -> usize {
        self.values.len()
    }

    /// Containment match: every key this condition declares must be declared
    /// in `other` with a value the pattern matches. Keys this condition does
    /// not declare are ignored; a key declared here but absent from `other`
    /// fails the match.
    pub fn matches(&self, other: &Condition) -> bool {
        self.values.iter().all(|(key, pattern)| {
            other
                .values
                .get(key)
                .is_some_and(|value| wildcard::matches(pattern, value))
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Condition {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Condition {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
