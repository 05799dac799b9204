//! Seed and record types
//!
//! A `Seed` is one caller-supplied starting URL together with its derived
//! label. A `DiscoveredLink` is one output record produced while traversing
//! a seed.

use crate::url::derive_label;
use std::collections::HashSet;

/// A starting point of one independent traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// The URL exactly as supplied by the caller
    pub url: String,

    /// Label derived from the URL host, used as the record source
    pub label: String,
}

impl Seed {
    /// Creates a seed, deriving its label from the URL
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let label = derive_label(&url);
        Self { url, label }
    }
}

/// One (source label, target URL) pair found during a seed's traversal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveredLink {
    /// Label of the seed whose traversal found the link
    pub source: String,

    /// Absolute HTTP(S) URL of the link target
    pub target: String,
}

/// Builds the seed list from raw caller input
///
/// Blank entries are skipped and duplicate URLs collapse to their first
/// occurrence; input order is otherwise preserved.
///
/// # Examples
///
/// ```
/// use link_harvester::seed::seeds_from_urls;
///
/// let seeds = seeds_from_urls(&[
///     "https://a.test".to_string(),
///     "  ".to_string(),
///     "https://a.test".to_string(),
///     "https://b.test".to_string(),
/// ]);
/// let labels: Vec<_> = seeds.iter().map(|s| s.label.as_str()).collect();
/// assert_eq!(labels, vec!["a", "b"]);
/// ```
pub fn seeds_from_urls(urls: &[String]) -> Vec<Seed> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::with_capacity(urls.len());

    for raw in urls {
        let url = raw.trim();
        if url.is_empty() {
            tracing::warn!("Skipping empty seed URL");
            continue;
        }

        if !seen.insert(url.to_string()) {
            tracing::debug!("Ignoring duplicate seed URL: {}", url);
            continue;
        }

        seeds.push(Seed::new(url));
    }

    seeds
}
