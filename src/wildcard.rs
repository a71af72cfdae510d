//! Wildcard matching for condition patterns
//!
//! Condition patterns are literal text plus `*`, which matches any run of
//! characters (including the empty run). That is the entire pattern language;
//! matching is case-sensitive and total over all inputs.

/// Check whether `pattern` matches the whole of `text`.
pub(crate) fn matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut p = 0;
    let mut t = 0;
    // Most recent star and the text position its run currently ends at,
    // for backtracking when a literal tail fails to match.
    let mut star: Option<usize> = None;
    let mut star_text = 0;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            star_text = t;
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some(star_pattern) = star {
            // Let the star absorb one more character and retry.
            star_text += 1;
            t = star_text;
            p = star_pattern + 1;
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}
