//! Scalar conventions for stringly-typed settings
//!
//! Settings are strings end to end; booleans, integers, reals and lists
//! ride on conventions: `YES`/`NO`, decimal text, shell-style quoting for
//! lists. These helpers are the one place those conventions live.

/// True for `YES` or `TRUE` in any case; everything else is false.
pub fn parse_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("true")
}

pub fn format_boolean(value: bool) -> String {
    if value { "YES" } else { "NO" }.to_string()
}

/// C `strtoll(value, 0)` semantics: leading whitespace skipped, optional
/// sign, `0x` hex or leading-`0` octal prefix, longest valid digit run,
/// trailing junk ignored. Unparseable input is 0; out-of-range input
/// saturates.
pub fn parse_integer(value: &str) -> i64 {
    let text = value.trim_start();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits) = if let Some(rest) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        (16, rest)
    } else if text.len() > 1 && text.starts_with('0') {
        (8, &text[1..])
    } else {
        (10, text)
    };

    const LIMIT: i128 = i64::MAX as i128 + 1;
    let mut magnitude: i128 = 0;
    let mut any = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        any = true;
        magnitude = (magnitude * radix as i128 + digit as i128).min(LIMIT);
    }
    if !any {
        return 0;
    }
    if negative {
        (-magnitude).max(i64::MIN as i128) as i64
    } else {
        magnitude.min(i64::MAX as i128) as i64
    }
}

pub fn format_integer(value: i64) -> String {
    value.to_string()
}

/// Shortest decimal text that reads back as the same value.
pub fn format_real(value: f64) -> String {
    value.to_string()
}

/// Split a shell-style encoded list into items: single and double quotes
/// group, backslash escapes the next character (also inside quotes),
/// unquoted whitespace separates, empty items are dropped.
pub fn parse_list(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in value.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if let Some(open) = quote {
            if c == open {
                quote = None;
            } else {
                current.push(c);
            }
        } else if c == '\'' || c == '"' {
            quote = Some(c);
        } else if c.is_whitespace() {
            if !current.is_empty() {
                items.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        items.push(current);
    }
    items
}

/// Join items with spaces, backslash-escaping whitespace, quotes and
/// backslashes so `parse_list` round-trips lists of non-empty items.
pub fn format_list(items: &[String]) -> String {
    let mut encoded = Vec::with_capacity(items.len());
    for item in items {
        let mut out = String::with_capacity(item.len());
        for c in item.chars() {
            if c == '\\' || c == '\'' || c == '"' || c.is_whitespace() {
                out.push('\\');
            }
            out.push(c);
        }
        encoded.push(out);
    }
    encoded.join(" ")
}
