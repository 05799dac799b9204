//! HTML link extraction
//!
//! This module turns a fetched HTML document into the list of its outbound
//! anchor targets, resolved to absolute URLs:
//! - Every `<a href="...">` is considered
//! - A `<base href="...">` element, if present, replaces the page URL as the
//!   resolution base
//! - Fragment-only anchors (`#section`) are dropped
//! - Fragments are stripped from resolved targets
//!
//! Scheme filtering is not done here. A `mailto:` or `javascript:` href is
//! returned as-is and rejected later by the worker.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all anchor targets from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the document was served from (after redirects)
///
/// # Returns
///
/// Absolute link targets in document order. Duplicates are kept; the
/// worker's deduplicator handles them.
///
/// # Example
///
/// ```
/// use link_harvester::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(html, &page_url), vec!["https://example.com/page"]);
/// ```
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let base_url = document_base(&document, page_url);

    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, &base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Returns the resolution base for relative links
///
/// The first `<base href>` wins when it resolves against the page URL;
/// otherwise the page URL itself is the base.
fn document_base(document: &Html, page_url: &Url) -> Url {
    let Ok(base_selector) = Selector::parse("base[href]") else {
        return page_url.clone();
    };

    document
        .select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Resolves a link href to an absolute URL
///
/// Returns None for empty hrefs, fragment-only hrefs and hrefs that cannot
/// be resolved.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}
