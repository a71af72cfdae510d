//! Layered setting resolution
//!
//! An environment stacks levels into a single search chain: override levels
//! front to back, then default levels front to back. Resolution walks the
//! chain for the first matching declaration and expands its value, giving
//! `$(inherited)` its meaning: continue the walk strictly below the level
//! that supplied the current assignment. A plain self-reference is treated
//! the same way, which is what makes `FOO = $(FOO) extra` terminate.

use std::collections::HashMap;

use crate::condition::Condition;
use crate::level::Level;
use crate::operations;
use crate::setting::Setting;
use crate::value::{Entry, Value};

/// An ordered stack of setting levels, split into overrides and defaults.
///
/// Cloning is cheap: levels share their storage. A child scope (a target
/// environment derived from its project's) is a clone plus inserts.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    override_levels: Vec<Level>,
    default_levels: Vec<Level>,
}

/// Chain position of the assignment being expanded. `$(inherited)` and
/// plain self-reference continue the walk strictly after it.
#[derive(Clone, Copy)]
struct Cursor<'a> {
    name: &'a str,
    position: usize,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Insert as the new first level of its group (highest precedence
    /// within overrides or within defaults).
    pub fn insert_front(&mut self, level: Level, is_default: bool) {
        if is_default {
            self.default_levels.insert(0, level);
        } else {
            self.override_levels.insert(0, level);
        }
    }

    /// Insert as the new last level of its group. Every override level
    /// still precedes every default level in the search chain.
    pub fn insert_back(&mut self, level: Level, is_default: bool) {
        if is_default {
            self.default_levels.push(level);
        } else {
            self.override_levels.push(level);
        }
    }

    fn chain_len(&self) -> usize {
        self.override_levels.len() + self.default_levels.len()
    }

    fn level_at(&self, position: usize) -> &Level {
        if position < self.override_levels.len() {
            &self.override_levels[position]
        } else {
            &self.default_levels[position - self.override_levels.len()]
        }
    }

    /// First chain position at or after `from` with a declaration matching
    /// `name` under `condition`, with the winning value of that level.
    fn find_assignment(
        &self,
        name: &str,
        condition: &Condition,
        from: usize,
    ) -> Option<(usize, &Value)> {
        (from..self.chain_len()).find_map(|position| {
            select_in_level(self.level_at(position), name, condition)
                .map(|value| (position, value))
        })
    }

    /// Fully resolve `name` under `condition`. Names with no matching
    /// declaration resolve to the empty string.
    pub fn resolve(&self, name: &str, condition: &Condition) -> String {
        self.resolve_assignment(name, condition)
    }

    /// Expand a free-standing value against the environment. There is no
    /// inheritance context: `$(inherited)` resolves like any other name,
    /// which is the empty string unless a setting is literally so named.
    pub fn expand(&self, value: &Value, condition: &Condition) -> String {
        self.resolve_value(value, condition, None)
    }

    /// Resolve every setting name declared in any level. Presence follows
    /// the first declaration encountered in chain order; each value is
    /// exactly `resolve(name, condition)`.
    pub fn compute_values(&self, condition: &Condition) -> HashMap<String, String> {
        let mut values = HashMap::new();
        for position in 0..self.chain_len() {
            for setting in self.level_at(position).settings() {
                if !values.contains_key(setting.name()) {
                    values.insert(
                        setting.name().to_string(),
                        self.resolve(setting.name(), condition),
                    );
                }
            }
        }
        values
    }

    fn resolve_assignment(&self, name: &str, condition: &Condition) -> String {
        match self.find_assignment(name, condition, 0) {
            Some((position, value)) => {
                self.resolve_value(value, condition, Some(Cursor { name, position }))
            }
            None => String::new(),
        }
    }

    fn resolve_inheritance(&self, cursor: Cursor, condition: &Condition) -> String {
        match self.find_assignment(cursor.name, condition, cursor.position + 1) {
            Some((position, value)) => self.resolve_value(
                value,
                condition,
                Some(Cursor {
                    name: cursor.name,
                    position,
                }),
            ),
            None => String::new(),
        }
    }

    fn resolve_value(&self, value: &Value, condition: &Condition, cursor: Option<Cursor>) -> String {
        let mut output = String::new();
        for entry in value.entries() {
            match entry {
                Entry::String(text) => output.push_str(text),
                Entry::Reference(name_value) => {
                    // The referenced name may itself be computed; the same
                    // cursor applies inside the name expansion.
                    let reference = self.resolve_value(name_value, condition, cursor);

                    if let Some(cursor) = cursor {
                        if reference == "inherited" || reference == cursor.name {
                            output.push_str(&self.resolve_inheritance(cursor, condition));
                            continue;
                        }
                    }

                    let (name, suffixes) = match reference.split_once(':') {
                        Some((name, suffixes)) => (name, Some(suffixes)),
                        None => (reference.as_str(), None),
                    };
                    let mut resolved = self.resolve_assignment(name, condition);
                    if let Some(suffixes) = suffixes {
                        for operation in suffixes.split(':') {
                            resolved = operations::apply(&resolved, operation);
                        }
                    }
                    output.push_str(&resolved);
                }
            }
        }
        output
    }
}

/// The winning declaration inside one level: the most condition keys wins,
/// and among equally specific matches the last in declaration order wins.
fn select_in_level<'a>(level: &'a Level, name: &str, condition: &Condition) -> Option<&'a Value> {
    let mut winner: Option<&Setting> = None;
    for setting in level.settings() {
        if !setting.matches(name, condition) {
            continue;
        }
        let better = match winner {
            Some(current) => {
                setting.condition().specificity() >= current.condition().specificity()
            }
            None => true,
        };
        if better {
            winner = Some(setting);
        }
    }
    winner.map(Setting::value)
}
