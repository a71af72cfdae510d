//! Value operations
//!
//! A reference may carry `:`-separated operation suffixes that transform the
//! resolved text, applied left to right: `$(NAME:identifier)`,
//! `$(PATH:dir:quote)`. Operations are pure string transforms. An unknown
//! operation warns and leaves the value unchanged.

use tracing::warn;

/// Apply one named operation to a resolved value.
pub(crate) fn apply(value: &str, operation: &str) -> String {
    match operation {
        "identifier" | "c99extidentifier" => identifier(value),
        "rfc1034identifier" => rfc1034_identifier(value),
        "quote" => quote(value),
        "lower" => value.to_ascii_lowercase(),
        "upper" => value.to_ascii_uppercase(),
        "standardizepath" => normalize_path(value),
        "base" => base_name_without_extension(value),
        "dir" => directory_name(value),
        "file" => base_name(value),
        "suffix" => format!(".{}", file_extension(value)),
        _ => {
            warn!(operation, "unknown setting value operation");
            value.to_string()
        }
    }
}

/// Make a C identifier: first character `[A-Za-z_]`, the rest
/// `[A-Za-z0-9_]`; anything invalid becomes `_`.
fn identifier(value: &str) -> String {
    value
        .chars()
        .enumerate()
        .map(|(position, c)| {
            let valid = if position == 0 {
                c.is_ascii_alphabetic() || c == '_'
            } else {
                c.is_ascii_alphanumeric() || c == '_'
            };
            if valid {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Make a DNS-label-style identifier per RFC 1034: letters, digits and `-`,
/// labels starting with a letter. Dots and other invalid characters become
/// `-`. Replacement is in place, so a character after a replaced dot is
/// judged against its rewritten neighbor.
fn rfc1034_identifier(value: &str) -> String {
    let mut chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    for position in 0..len {
        let first = position == 0;
        let last = position + 1 == len;
        if (first || last) && chars[position] == '.' {
            chars[position] = '-';
        }
        let c = chars[position];
        let valid = if first || chars[position - 1] == '.' {
            c.is_ascii_alphabetic()
        } else {
            c.is_ascii_alphanumeric() || c == '-'
        };
        if !valid {
            chars[position] = '-';
        }
    }
    chars.into_iter().collect()
}

const QUOTE_SAFE: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@%_-+=:,./";

/// Shell-quote: text made of safe characters passes through; anything else
/// is wrapped in single quotes with embedded `'` encoded as `'"'"'`.
fn quote(value: &str) -> String {
    if value.chars().all(|c| QUOTE_SAFE.contains(c)) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

/// Lexically normalize a path: collapse `//` and `.`, resolve `..` against
/// parent components. Leading `..` runs survive for relative paths; `..` at
/// an absolute root stays at the root.
fn normalize_path(value: &str) -> String {
    let absolute = value.starts_with('/');
    let mut components: Vec<&str> = Vec::new();
    for component in value.split('/') {
        match component {
            "" | "." => {}
            ".." => match components.last() {
                Some(&parent) if parent != ".." => {
                    components.pop();
                }
                Some(_) => components.push(".."),
                None if absolute => {}
                None => components.push(".."),
            },
            _ => components.push(component),
        }
    }
    let joined = components.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Text after the last `/`; the whole value when there is none.
fn base_name(value: &str) -> String {
    match value.rfind('/') {
        Some(slash) => value[slash + 1..].to_string(),
        None => value.to_string(),
    }
}

fn base_name_without_extension(value: &str) -> String {
    let base = base_name(value);
    match base.rfind('.') {
        Some(dot) => base[..dot].to_string(),
        None => base,
    }
}

/// Text before the last `/`; empty when there is none.
fn directory_name(value: &str) -> String {
    match value.rfind('/') {
        Some(slash) => value[..slash].to_string(),
        None => String::new(),
    }
}

/// Extension of the base name, without the dot; empty when there is none.
fn file_extension(value: &str) -> String {
    let base = base_name(value);
    match base.rfind('.') {
        Some(dot) => base[dot + 1..].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert_eq!(apply("-_'hello%.", "identifier"), "___hello__");
        assert_eq!(apply("-_'hello%.", "c99extidentifier"), "___hello__");
        assert_eq!(apply("My App2", "identifier"), "My_App2");
        assert_eq!(apply("2fast", "identifier"), "_fast");
        assert_eq!(apply("", "identifier"), "");
    }

    #[test]
    fn test_rfc1034_identifier() {
        assert_eq!(apply("-_'hello%.", "rfc1034identifier"), "---hello--");
        assert_eq!(apply("My App", "rfc1034identifier"), "My-App");
        assert_eq!(apply(".start", "rfc1034identifier"), "-start");
    }

    #[test]
    fn test_quote() {
        assert_eq!(apply("-_'hello%.", "quote"), r#"'-_'"'"'hello%.'"#);
        assert_eq!(apply("safe@path/file.txt", "quote"), "safe@path/file.txt");
        assert_eq!(apply("has space", "quote"), "'has space'");
        assert_eq!(apply("", "quote"), "");
    }

    #[test]
    fn test_case_mapping() {
        assert_eq!(apply("Hello, world.", "lower"), "hello, world.");
        assert_eq!(apply("Hello, world.", "upper"), "HELLO, WORLD.");
    }

    #[test]
    fn test_standardize_path() {
        assert_eq!(apply("/a/b", "standardizepath"), "/a/b");
        assert_eq!(apply("/a/./b", "standardizepath"), "/a/b");
        assert_eq!(apply("/a/../b", "standardizepath"), "/b");
        assert_eq!(apply("a/./b", "standardizepath"), "a/b");
        assert_eq!(apply("a/../..", "standardizepath"), "..");
        assert_eq!(apply("/a/../..", "standardizepath"), "/");
        assert_eq!(apply("a/../../../..", "standardizepath"), "../../..");
        assert_eq!(apply("////", "standardizepath"), "/");
        assert_eq!(apply("/path/to/../file.ext", "standardizepath"), "/path/file.ext");
    }

    #[test]
    fn test_path_parts() {
        let path = "/path/to/../file.ext";
        assert_eq!(apply(path, "base"), "file");
        assert_eq!(apply(path, "dir"), "/path/to/..");
        assert_eq!(apply(path, "file"), "file.ext");
        assert_eq!(apply(path, "suffix"), ".ext");
    }

    #[test]
    fn test_path_parts_without_separator() {
        assert_eq!(apply("file.ext", "base"), "file");
        assert_eq!(apply("file.ext", "dir"), "");
        assert_eq!(apply("file.ext", "file"), "file.ext");
        assert_eq!(apply("plain", "suffix"), ".");
        // Dots in directories do not count as extensions.
        assert_eq!(apply("/pa.th/file", "suffix"), ".");
    }

    #[test]
    fn test_unknown_operation_passes_through() {
        assert_eq!(apply("value", "frobnicate"), "value");
        assert_eq!(apply("value", ""), "value");
    }
}
