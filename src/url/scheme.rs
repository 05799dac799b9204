/// Link prefixes a worker is allowed to emit and follow
pub const ACCEPTED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Returns true if the link starts with `http://` or `https://`
///
/// Relative links, `mailto:`, `javascript:`, anchors and every other scheme
/// are rejected. The comparison is a plain prefix match on the string the
/// fetcher produced.
pub fn has_accepted_scheme(link: &str) -> bool {
    ACCEPTED_SCHEMES
        .iter()
        .any(|prefix| link.starts_with(prefix))
}
