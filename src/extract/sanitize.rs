//! Name sanitization
//!
//! Every extracted string passes through [`sanitize_name`] before it is used
//! in a folder or file name.

use std::borrow::Cow;

/// Characters rejected by common filesystems
pub const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Cleans a string for use as a folder or file name
///
/// 1. Percent-decode residual URL-encoded sequences
/// 2. Strip `\ / * ? : " < > |`
/// 3. Collapse whitespace runs (including newlines) to one space
/// 4. Trim
///
/// # Examples
///
/// ```
/// use catalog_harvest::extract::sanitize_name;
///
/// assert_eq!(sanitize_name("  Avil%C3%A9s \n - Natural: 60/60 "), "Avilés - Natural 6060");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let decoded = percent_decode(raw);
    let stripped: String = decoded
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();
    collapse_whitespace(&stripped)
}

/// Decodes `%XX` sequences; input that does not decode to UTF-8 is kept as-is
pub fn percent_decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('%') {
        return Cow::Borrowed(raw);
    }

    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(raw),
    }
}

/// Collapses whitespace runs to single spaces and trims both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max` characters, never splitting a character
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// Title-cases words: first letter upper, the rest lower
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
