use regex::Regex;
use std::sync::OnceLock;

fn format_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\d+(?:,\d+)?x\d+(?:,\d+)?(?:cm)?").expect("format pattern is valid")
    })
}

/// Extracts a tile format such as `20X141,50cm`, `80,5X140cm` or `23,8x150`
///
/// Whitespace is removed before matching, so `60 x 60 cm` yields `60x60cm`.
/// The first match wins and its case is preserved.
///
/// # Examples
///
/// ```
/// use catalog_harvest::extract::extract_format;
///
/// assert_eq!(extract_format("Formato: 20X141,50cm").as_deref(), Some("20X141,50cm"));
/// assert_eq!(extract_format("no format here"), None);
/// ```
pub fn extract_format(text: &str) -> Option<String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    format_pattern()
        .find(&compact)
        .map(|found| found.as_str().to_string())
}
