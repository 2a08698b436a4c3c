use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::config::Marketplace;

/// Every anchor that carries a link target
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Invalid anchor selector")
});

/// Scheme written with a single slash, e.g. `https:/www.example.com`
static SINGLE_SLASH_SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(https?):/([^/])").expect("Invalid scheme regex")
});

/// Scheme missing its colon, e.g. `https//www.example.com`
static MISSING_COLON_SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(https?)//").expect("Invalid scheme regex")
});

/// Scheme occurrences anywhere in a string
static SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://").expect("Invalid scheme regex")
});

/// A single offer found on a results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offer {
    /// Numeric id embedded at the end of the offer path
    pub id: String,
    /// Absolute, normalized offer URL
    pub url: String,
}

/// Offers of one results page, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    offers: Vec<Offer>,
}

impl ExtractionResult {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self { offers }
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// The single offer, when exactly one was found
    pub fn single(&self) -> Option<&Offer> {
        match self.offers.as_slice() {
            [offer] => Some(offer),
            _ => None,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.offers.iter().map(|o| o.id.as_str())
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.offers.iter().map(|o| o.url.as_str())
    }

    /// Whether both results list the same ids in the same order
    pub fn same_ids(&self, other: &ExtractionResult) -> bool {
        self.len() == other.len() && self.ids().eq(other.ids())
    }
}

/// Extract every offer anchor from a results page
///
/// Empty or malformed HTML, or a page without offer anchors, yields an
/// empty result.
pub fn extract_offers(html: &str, market: &Marketplace) -> ExtractionResult {
    if html.trim().is_empty() {
        return ExtractionResult::default();
    }

    let document = Html::parse_document(html);
    let mut offers = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_offer_href(href, market) {
            continue;
        }

        let url = normalize_offer_url(href, &market.origin);
        match offer_id(&url, &market.id_prefix) {
            Some(id) => offers.push(Offer { id, url }),
            None => tracing::debug!(href, "offer link without a numeric id, skipped"),
        }
    }

    tracing::debug!(count = offers.len(), market = %market.name, "extracted offers");
    ExtractionResult::new(offers)
}

/// Whether an href points at an offer on this marketplace
fn is_offer_href(href: &str, market: &Marketplace) -> bool {
    let href = href.trim();
    if !href.contains(&market.offer_marker) {
        return false;
    }
    href.contains(&market.domain_token) || is_relative(href)
}

fn is_relative(href: &str) -> bool {
    !href.starts_with("//") && !SCHEME_RE.is_match(href) && !href.contains(':')
}

/// Turn an offer href into an absolute URL, repairing concatenation damage
///
/// Handles protocol-relative links, a missing colon or slash after the
/// scheme, doubled schemes and a domain glued in front of a second full URL.
/// Applying it to its own output returns the same string.
pub fn normalize_offer_url(href: &str, origin: &str) -> String {
    let href = href.trim();

    if let Some(rest) = href.strip_prefix("//") {
        return normalize_offer_url(&format!("https://{}", rest), origin);
    }

    let repaired = MISSING_COLON_SCHEME_RE.replace(href, "$1://");
    let repaired = SINGLE_SLASH_SCHEME_RE.replace(&repaired, "$1://$2").into_owned();
    let href = repaired.as_str();

    // Only look at the part before the query, redirect targets live there
    let head_len = href.find('?').unwrap_or(href.len());
    if let Some(last) = SCHEME_RE.find_iter(&href[..head_len]).last() {
        return href[last.start()..].to_string();
    }

    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// Pull the trailing numeric id out of an offer URL
///
/// `.../alternator-bosch-octavia-nr123456` gives `123456`.
pub fn offer_id(url: &str, id_prefix: &str) -> Option<String> {
    let path_end = url.find(['?', '#']).unwrap_or(url.len());
    let path = url[..path_end].trim_end_matches('/');

    let tail = path.rsplit('-').next()?;
    let tail = tail.strip_suffix(".html").unwrap_or(tail);
    let tail = tail.strip_prefix(id_prefix).unwrap_or(tail);
    let id = tail.trim_start_matches(|c: char| !c.is_ascii_digit());

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://sprzedajemy.pl";

    fn market() -> Marketplace {
        Marketplace::default()
    }

    #[test]
    fn test_no_anchors_gives_empty_result() {
        assert!(extract_offers("", &market()).is_empty());
        assert!(extract_offers("<html><body><p>nothing</p></body></html>", &market()).is_empty());
        assert!(extract_offers("<a href=", &market()).is_empty());
    }

    #[test]
    fn test_extracts_in_document_order_with_duplicates() {
        let html = r#"
            <div>
              <a href="https://sprzedajemy.pl/lampa-tyl-lewa-octavia-nr200">Lampa</a>
              <a href="https://sprzedajemy.pl/lusterko-fabia-nr100">Lusterko</a>
              <a href="https://sprzedajemy.pl/lampa-tyl-lewa-octavia-nr200">Lampa again</a>
              <a href="https://sprzedajemy.pl/konto">Account</a>
              <a href="https://other.example/lampa-nr300">Elsewhere</a>
            </div>
        "#;
        let result = extract_offers(html, &market());

        assert_eq!(result.ids().collect::<Vec<_>>(), vec!["200", "100", "200"]);
        assert_eq!(
            result.urls().next(),
            Some("https://sprzedajemy.pl/lampa-tyl-lewa-octavia-nr200")
        );
        assert_eq!(result.ids().count(), result.urls().count());
    }

    #[test]
    fn test_normalize_relative() {
        assert_eq!(
            normalize_offer_url("/maska-octavia-nr1", "https://sprzedajemy.pl/"),
            "https://sprzedajemy.pl/maska-octavia-nr1"
        );
        assert_eq!(
            normalize_offer_url("maska-octavia-nr1", ORIGIN),
            "https://sprzedajemy.pl/maska-octavia-nr1"
        );
    }

    #[test]
    fn test_normalize_repairs_malformed_concatenation() {
        let expected = "https://sprzedajemy.pl/maska-octavia-nr1";

        assert_eq!(normalize_offer_url("https://https://sprzedajemy.pl/maska-octavia-nr1", ORIGIN), expected);
        assert_eq!(normalize_offer_url("httpshttps://sprzedajemy.pl/maska-octavia-nr1", ORIGIN), expected);
        assert_eq!(normalize_offer_url("https:/sprzedajemy.pl/maska-octavia-nr1", ORIGIN), expected);
        assert_eq!(
            normalize_offer_url("https://sprzedajemy.plhttps://sprzedajemy.pl/maska-octavia-nr1", ORIGIN),
            expected
        );
        assert_eq!(normalize_offer_url("//sprzedajemy.pl/maska-octavia-nr1", ORIGIN), expected);
    }

    #[test]
    fn test_normalize_repairs_missing_colon() {
        assert_eq!(
            normalize_offer_url("https//sprzedajemy.pl/alternator-nr123", ORIGIN),
            "https://sprzedajemy.pl/alternator-nr123"
        );
        assert_eq!(
            normalize_offer_url("HTTP//sprzedajemy.pl/alternator-nr123", ORIGIN),
            "HTTP://sprzedajemy.pl/alternator-nr123"
        );
    }

    #[test]
    fn test_normalize_keeps_redirects_in_query() {
        let url = "https://sprzedajemy.pl/maska-octavia-nr1?ref=https://example.com/";
        assert_eq!(normalize_offer_url(url, ORIGIN), url);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for href in [
            "/maska-octavia-nr1",
            "https:/sprzedajemy.pl/maska-octavia-nr1",
            "https//sprzedajemy.pl/maska-octavia-nr1",
            "https://sprzedajemy.plhttps://sprzedajemy.pl/maska-octavia-nr1#photos",
            "//sprzedajemy.pl/maska-octavia-nr1",
        ] {
            let once = normalize_offer_url(href, ORIGIN);
            assert_eq!(normalize_offer_url(&once, ORIGIN), once);
        }
    }

    #[test]
    fn test_offer_id() {
        assert_eq!(offer_id("https://sprzedajemy.pl/alternator-bosch-nr71234567", "nr"), Some("71234567".into()));
        assert_eq!(offer_id("https://sprzedajemy.pl/alternator-nr987?utm=x#top", "nr"), Some("987".into()));
        assert_eq!(offer_id("https://parts.example.com/item/alternator-ID123456.html", "ID"), Some("123456".into()));
        assert_eq!(offer_id("https://sprzedajemy.pl/konto", "nr"), None);
    }
}
