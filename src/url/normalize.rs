use url::Url;

/// Resolves an anchor href against the page it was found on
///
/// # Resolution Steps
///
/// 1. Trim the href; reject empty and fragment-only hrefs
/// 2. Reject `javascript:`, `mailto:`, `tel:` and `data:` links
/// 3. Join against the base URL; reject non-HTTP(S) results
/// 4. Remove the fragment
/// 5. Remove a trailing slash (except for the root `/`)
///
/// # Arguments
///
/// * `href` - The raw attribute value
/// * `base_url` - The URL of the page the anchor was found on
///
/// # Returns
///
/// The absolute URL, or `None` if the link should be excluded
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://villagres.com.br/PT/produtos").unwrap();
/// assert_eq!(
///     resolve_link("/PT/produtos/naturale/", &base).as_deref(),
///     Some("https://villagres.com.br/PT/produtos/naturale")
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    absolute.set_fragment(None);

    let path = absolute.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        absolute.set_path(if trimmed.is_empty() { "/" } else { &trimmed });
    }

    Some(absolute.to_string())
}

/// Splits a URL path into its non-empty segments
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Host comparison key: lowercase, without a leading `www.`
pub fn host_key(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}
