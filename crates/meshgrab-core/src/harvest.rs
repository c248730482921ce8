//! Candidate link harvesting from page markup and observed requests.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::classify::{is_data_url, AssetClassifier};

/// Attributes that commonly carry resource references.
const LINK_ATTRIBUTES: [&str; 4] = ["href", "src", "data-src", "data"];

const SKIPPED_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "tel:", "about:"];

/// Every linked reference in `markup`, resolved against `base_url`.
///
/// `data:` references are kept verbatim; fragments-only, `javascript:` and
/// similar references are dropped. Order of first appearance is preserved and
/// duplicates removed.
pub fn harvest_links(markup: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    let base = Url::parse(base_url).ok();
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let selector = match Selector::parse("[href], [src], [data-src], object[data]") {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("link selector rejected: {:?}", e);
            return links;
        }
    };

    for element in document.select(&selector) {
        for attr in LINK_ATTRIBUTES {
            if attr == "data" && element.value().name() != "object" {
                continue;
            }
            let Some(raw) = element.value().attr(attr) else {
                continue;
            };
            if let Some(resolved) = resolve(raw, base.as_ref()) {
                if seen.insert(resolved.clone()) {
                    links.push(resolved);
                }
            }
        }
    }
    links
}

/// Merges markup links and observed request URLs, keeping asset references only.
pub fn collect_candidates<'a, M, R>(
    markup_links: M,
    request_urls: R,
    classifier: &AssetClassifier,
) -> Vec<String>
where
    M: IntoIterator<Item = &'a str>,
    R: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    markup_links
        .into_iter()
        .chain(request_urls)
        .map(str::trim)
        .filter(|c| classifier.is_asset_reference(c))
        .filter(|c| seen.insert(c.to_string()))
        .map(str::to_string)
        .collect()
}

fn resolve(raw: &str, base: Option<&Url>) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') {
        return None;
    }
    if is_data_url(raw) {
        return Some(raw.to_string());
    }
    let lower = raw.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return None;
    }
    match base {
        Some(base) => base.join(raw).ok().map(String::from),
        None => Url::parse(raw).ok().map(String::from),
    }
}
