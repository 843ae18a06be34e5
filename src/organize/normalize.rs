use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Format folder used when a name carries no format
pub const NO_FORMAT: &str = "SEM_FORMATO";

/// Folds a folder name for keyword matching
///
/// Diacritics are stripped (NFKD, then non-ASCII dropped), the result is
/// upper-cased, `-` and `_` become spaces and whitespace runs collapse.
///
/// # Examples
///
/// ```
/// use catalog_harvest::organize::normalize_for_matching;
///
/// assert_eq!(normalize_for_matching("Decoração_Área - Externo"), "DECORACAO AREA EXTERNO");
/// ```
pub fn normalize_for_matching(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_uppercase(),
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn with_unit() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\d+(?:,\d+)?X\d+(?:,\d+)?CM").expect("format pattern is valid")
    })
}

fn without_unit() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\d+(?:,\d+)?X\d+(?:,\d+)?").expect("format pattern is valid")
    })
}

/// Upper-cased format token of a name, or [`NO_FORMAT`]
///
/// A token with a `CM` suffix is preferred over a bare one anywhere in the
/// name; spaces are ignored.
pub fn format_token(name: &str) -> String {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    with_unit()
        .find(&compact)
        .or_else(|| without_unit().find(&compact))
        .map(|found| found.as_str().to_uppercase())
        .unwrap_or_else(|| NO_FORMAT.to_string())
}
