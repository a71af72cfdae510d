//! Setting declarations
//!
//! A declaration binds a name to a value, optionally scoped by conditions:
//!
//! ```text
//! ARCHS[sdk=iphoneos*] = armv7 arm64
//! ```
//!
//! Conditions ride in square bracket groups between the name and the
//! assignment `=`; one group may hold several comma-separated pairs and
//! several groups may be chained.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::condition::Condition;
use crate::value::Value;

/// Errors parsing a declaration line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingParseError {
    /// Declarations need an `=` outside the condition brackets
    #[error("setting declaration has no assignment: {0}")]
    MissingAssignment(String),
}

/// A single setting declaration: name, condition, value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    name: String,
    condition: Condition,
    value: Value,
}

impl Setting {
    /// Full constructor.
    pub fn new(name: impl Into<String>, condition: Condition, value: Value) -> Self {
        Setting {
            name: name.into(),
            condition,
            value,
        }
    }

    /// Unconditional setting. A string value is taken literally, not
    /// scanned for references.
    pub fn create(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Setting::new(name, Condition::empty(), value.into())
    }

    /// Unconditional setting whose value text is parsed for references.
    pub fn parse_pair(name: impl Into<String>, value: &str) -> Self {
        Setting::new(name, Condition::empty(), Value::parse(value))
    }

    /// Parse a full declaration line: `name [key=pattern,...]* = value`.
    /// Name and value are trimmed; the value text is parsed for references.
    pub fn parse(line: &str) -> Result<Self, SettingParseError> {
        // The assignment is the first `=` outside square brackets; the `=`
        // inside condition pairs like `[sdk=iphoneos*]` does not count.
        let mut in_brackets = false;
        let mut assignment = None;
        for (offset, c) in line.char_indices() {
            match c {
                '[' => in_brackets = true,
                ']' => in_brackets = false,
                '=' if !in_brackets => {
                    assignment = Some(offset);
                    break;
                }
                _ => {}
            }
        }
        let assignment =
            assignment.ok_or_else(|| SettingParseError::MissingAssignment(line.to_string()))?;

        let head = &line[..assignment];
        let name_end = head.find('[').unwrap_or(head.len());
        let name = head[..name_end].trim();

        let mut conditions = BTreeMap::new();
        let mut rest = &head[name_end..];
        while let Some(open) = rest.find('[') {
            let Some(close) = rest[open..].find(']') else {
                break;
            };
            for pair in rest[open + 1..open + close].split(',') {
                // Pairs without an `=` are malformed and skipped.
                let Some(eq) = pair.find('=') else {
                    continue;
                };
                let key = pair[..eq].trim().to_string();
                let pattern = pair[eq + 1..].trim().to_string();
                // The first declaration of a key wins across all groups.
                conditions.entry(key).or_insert(pattern);
            }
            rest = &rest[open + close + 1..];
        }

        Ok(Setting {
            name: name.to_string(),
            condition: Condition::new(conditions),
            value: Value::parse(line[assignment + 1..].trim()),
        })
    }

    /// The setting name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scoping condition; empty for unconditional settings.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// The declared value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// True when `name` is equal (case-sensitive) and this declaration's
    /// condition containment-matches the query condition.
    pub fn matches(&self, name: &str, condition: &Condition) -> bool {
        self.name == name && self.condition.matches(condition)
    }
}
