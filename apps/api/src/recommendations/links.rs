use reqwest::Url;

/// Turns a model-supplied link into something clickable, or `None` when it
/// cannot confidently be treated as a URL.
///
/// - empty / absent → `None`
/// - already absolute (has a scheme) → unchanged
/// - bare host or path with a dot and no whitespace → `https://` prefixed
pub fn normalize_url(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    if Url::parse(raw).is_ok() {
        return Some(raw.to_string());
    }

    if raw.contains('.') && !raw.chars().any(char::is_whitespace) {
        return Some(format!("https://{raw}"));
    }

    None
}
