/// Derives the human-readable label for a seed URL
///
/// The label becomes the `SOURCE` column of every record produced by the
/// seed's traversal.
///
/// # Derivation Steps
///
/// 1. Strip a leading `https://` or `http://`
/// 2. Keep everything before the first `/`
/// 3. If a `.` is present, keep everything before the first `.`
///
/// No parsing or validation happens here; a malformed seed still gets a
/// label and is left for the fetcher to reject.
///
/// # Examples
///
/// ```
/// use link_harvester::url::derive_label;
///
/// assert_eq!(derive_label("https://example.com/page"), "example");
/// assert_eq!(derive_label("http://sub.example.org"), "sub");
/// assert_eq!(derive_label("example.net"), "example");
/// ```
pub fn derive_label(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let host = without_scheme.split('/').next().unwrap_or(without_scheme);

    match host.split_once('.') {
        Some((first, _)) => first.to_string(),
        None => host.to_string(),
    }
}
