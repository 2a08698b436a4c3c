//! Search URL construction for both marketplaces

use crate::config::{Marketplace, SecondaryMarketplace};

/// Which of the two primary-marketplace searches a URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Free-text search over offer titles
    Title,
    /// Search for an exact listing id or OEM number
    Id,
}

/// Trim the operator's query; `None` means search is disabled
pub fn clean_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Form-style encoding: spaces become `+`, everything else non-alphanumeric
/// is percent-encoded
pub fn encode_term(term: &str) -> String {
    urlencoding::encode(term.trim()).replace("%20", "+")
}

/// Build the primary-marketplace listing URL for a query
pub fn listing_url(query: &str, market: &Marketplace, mode: SearchMode) -> String {
    let url = market
        .search_template
        .replace("{category}", &market.category)
        .replace("{term}", &encode_term(query));

    match mode {
        SearchMode::Title => url,
        SearchMode::Id => format!("{}{}", url, market.id_mode_flag),
    }
}

/// Build the pre-filtered storefront search on the secondary marketplace
pub fn secondary_search_url(query: &str, secondary: &SecondaryMarketplace) -> String {
    secondary
        .template
        .replace("{seller}", &encode_term(&secondary.seller))
        .replace("{term}", &encode_term(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_query() {
        assert_eq!(clean_query("  alternator 12V "), Some("alternator 12V"));
        assert_eq!(clean_query("   "), None);
        assert_eq!(clean_query(""), None);
    }

    #[test]
    fn test_encode_term() {
        assert_eq!(encode_term("maska skoda octavia"), "maska+skoda+octavia");
        assert_eq!(encode_term(" lampa tył "), "lampa+ty%C5%82");
        assert_eq!(encode_term("1K0/615 & co"), "1K0%2F615+%26+co");
    }

    #[test]
    fn test_listing_urls() {
        let market = Marketplace::default();
        assert_eq!(
            listing_url("lusterko fabia", &market, SearchMode::Title),
            "https://oscar.sprzedajemy.pl/szukaj?schm2=ls&catCode=6bea9f&inp_text%5Bv%5D=lusterko+fabia&inp_category_id=2&inp_location_id=1"
        );
        assert_eq!(
            listing_url("5J0853661", &market, SearchMode::Id),
            "https://oscar.sprzedajemy.pl/szukaj?schm2=ls&catCode=6bea9f&inp_text%5Bv%5D=5J0853661&inp_category_id=2&inp_location_id=1&inp_text%5Bn%5D=1"
        );
    }

    #[test]
    fn test_secondary_url_encodes_query() {
        let url = secondary_search_url("1K0 615 301 & co", &SecondaryMarketplace::default());
        assert_eq!(
            url,
            "https://allegro.pl/uzytkownik/PARTS_SKODA?string=1K0+615+301+%26+co"
        );
    }
}
