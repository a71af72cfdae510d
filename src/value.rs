//! Setting values and reference expansion syntax
//!
//! A value is a sequence of literal text runs and references to other
//! settings. References come in three spellings, `$(NAME)`, `${NAME}` and
//! bare `$NAME`, and nest freely so names can be computed:
//! `$(SUFFIX_$(INDEX))_VALUE`. Parsing never fails; anything that does not
//! form a complete reference stays literal text.

use std::ops::Add;

use thiserror::Error;

use crate::types;

/// Errors converting external objects into values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObjectError {
    /// Only scalar objects (string, number, boolean) carry setting values
    #[error("unsupported object type for a setting value: {0}")]
    UnsupportedType(&'static str),
}

/// One segment of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Literal text.
    String(String),
    /// A reference to another setting. The inner value is the referenced
    /// name expression, which may itself contain references.
    Reference(Value),
}

/// A parsed setting value: literal runs interleaved with references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    entries: Vec<Entry>,
}

/// How a reference region is terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    /// Top level; the region ends at the end of input.
    None,
    /// `$(NAME)`.
    Parentheses,
    /// `${NAME}`.
    Braces,
    /// Bare `$NAME`; the region is a nonempty run of `[A-Za-z0-9_]`.
    Identifier,
}

impl Delimiter {
    fn open_len(self) -> usize {
        match self {
            Delimiter::Parentheses | Delimiter::Braces => 2,
            Delimiter::Identifier => 1,
            Delimiter::None => 0,
        }
    }

    fn close_len(self) -> usize {
        match self {
            Delimiter::Parentheses | Delimiter::Braces => 1,
            Delimiter::Identifier | Delimiter::None => 0,
        }
    }
}

struct Region {
    value: Value,
    /// Offset of the closing delimiter (exclusive end of the region text).
    end: usize,
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// The next `$` opener at or after `from`. `$(` and `${` win over a bare
/// `$` at the same position.
fn next_opener(text: &str, from: usize) -> Option<(usize, Delimiter)> {
    let open = from + text[from..].find('$')?;
    let delimiter = if text[open..].starts_with("$(") {
        Delimiter::Parentheses
    } else if text[open..].starts_with("${") {
        Delimiter::Braces
    } else {
        Delimiter::Identifier
    };
    Some((open, delimiter))
}

/// Parse one region of `text` starting at `start`, up to the closing
/// delimiter. Returns `None` when the region never closes (unterminated
/// `$(` / `${`, or a bare `$` not followed by an identifier character);
/// the caller then treats the opener as literal text.
fn parse_region(text: &str, start: usize, delimiter: Delimiter) -> Option<Region> {
    let mut entries = Vec::new();
    let mut search = start;
    let mut append = start;

    loop {
        let to = match delimiter {
            Delimiter::None => Some(text.len()),
            Delimiter::Parentheses => text[search..].find(')').map(|at| search + at),
            Delimiter::Braces => text[search..].find('}').map(|at| search + at),
            Delimiter::Identifier => {
                let run = text.as_bytes()[search..]
                    .iter()
                    .position(|&byte| !is_identifier_byte(byte))
                    .map_or(text.len(), |at| search + at);
                (run > search).then_some(run)
            }
        };
        let to = to?;

        match next_opener(text, search) {
            Some((open, opener)) if open < to => {
                match parse_region(text, open + opener.open_len(), opener) {
                    Some(inner) => {
                        if open > append {
                            entries.push(Entry::String(text[append..open].to_string()));
                        }
                        entries.push(Entry::Reference(inner.value));
                        search = inner.end + opener.close_len();
                        append = search;
                    }
                    None => {
                        // False opener; leave it in the pending literal run
                        // and keep scanning after it.
                        search = open + opener.open_len();
                    }
                }
            }
            _ => {
                if to > append {
                    entries.push(Entry::String(text[append..to].to_string()));
                }
                return Some(Region {
                    value: Value { entries },
                    end: to,
                });
            }
        }
    }
}

impl Value {
    /// The value with no entries.
    pub fn empty() -> Self {
        Value::default()
    }

    /// A single literal entry; empty text gives the empty value. The text is
    /// not scanned for references.
    pub fn string(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Value::default();
        }
        Value {
            entries: vec![Entry::String(text)],
        }
    }

    /// A single reference to `name`; the name is taken literally.
    pub fn variable(name: impl Into<String>) -> Self {
        Value {
            entries: vec![Entry::Reference(Value::string(name))],
        }
    }

    /// Parse reference syntax out of raw text. Never fails: malformed
    /// openers degrade to literal text.
    pub fn parse(text: &str) -> Self {
        parse_region(text, 0, Delimiter::None)
            .map(|region| region.value)
            .unwrap_or_default()
    }

    /// Render back to source text. All references are normalized to the
    /// `$(NAME)` spelling, so `raw` after `parse` is idempotent.
    pub fn raw(&self) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            match entry {
                Entry::String(text) => output.push_str(text),
                Entry::Reference(name) => {
                    output.push_str("$(");
                    output.push_str(&name.raw());
                    output.push(')');
                }
            }
        }
        output
    }

    /// The entry sequence.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Convert an external scalar into a value. Strings are parsed for
    /// references; numbers and booleans become literal text. Anything else
    /// is rejected.
    pub fn from_object(object: &serde_json::Value) -> Result<Self, ObjectError> {
        match object {
            serde_json::Value::String(text) => Ok(Value::parse(text)),
            serde_json::Value::Bool(flag) => Ok(Value::string(types::format_boolean(*flag))),
            serde_json::Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Ok(Value::string(types::format_integer(integer)))
                } else if let Some(integer) = number.as_u64() {
                    Ok(Value::string(integer.to_string()))
                } else if let Some(real) = number.as_f64() {
                    Ok(Value::string(types::format_real(real)))
                } else {
                    Ok(Value::string(number.to_string()))
                }
            }
            serde_json::Value::Null => Err(ObjectError::UnsupportedType("null")),
            serde_json::Value::Array(_) => Err(ObjectError::UnsupportedType("array")),
            serde_json::Value::Object(_) => Err(ObjectError::UnsupportedType("object")),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::string(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::string(text)
    }
}

impl Add for Value {
    type Output = Value;

    /// Concatenation. Adjacent literal entries at the seam merge so parsed
    /// values never carry back-to-back literals.
    fn add(mut self, other: Value) -> Value {
        let mut incoming = other.entries.into_iter();
        if let Some(first) = incoming.next() {
            match (self.entries.last_mut(), first) {
                (Some(Entry::String(last)), Entry::String(text)) => last.push_str(&text),
                (_, first) => self.entries.push(first),
            }
        }
        self.entries.extend(incoming);
        self
    }
}
