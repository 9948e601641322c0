//! Keyword-anchored snippet extraction.
//!
//! Offsets and lengths are counted in `char`s. Matching compares each
//! character's lowercase form, so the match offset always refers to the
//! original text even when lower-casing would change its length.

/// Find the char offset of the first case-insensitive occurrence of `needle`.
pub fn find_case_insensitive(haystack: &[char], needle: &str) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }

    haystack.windows(needle.len()).position(|window| {
        window
            .iter()
            .zip(&needle)
            .all(|(&a, &b)| chars_eq_ignore_case(a, b))
    })
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Return up to `max_chars` characters of `text` starting at the first
/// case-insensitive occurrence of `phrase`.
pub fn extract_snippet(text: &str, phrase: &str, max_chars: usize) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let start = find_case_insensitive(&chars, phrase)?;
    let end = start.saturating_add(max_chars).min(chars.len());
    Some(chars[start..end].iter().collect())
}
