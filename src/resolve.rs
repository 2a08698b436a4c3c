//! Picks the single link that best represents a searched offer

use serde::Serialize;

use crate::config::Config;
use crate::fetch::PageSource;
use crate::extract::extract_offers;
use crate::search::{fetch_page, SearchOutcome};

/// Which marketplace a resolved link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Primary,
    Secondary,
}

/// Which result set a listing link came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingSource {
    Title,
    Id,
}

impl ListingSource {
    pub fn label(self) -> &'static str {
        match self {
            ListingSource::Title => "title",
            ListingSource::Id => "id",
        }
    }
}

/// How the link was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionKind {
    /// Exactly one offer matched
    SingleOffer { offer_id: String, from: ListingSource },
    /// Several offers matched, the link is a results page
    Listing { from: ListingSource },
    /// Nothing on the primary marketplace, storefront search instead
    SecondarySearch,
    /// Nothing anywhere, plain title search
    FallbackSearch,
}

/// The link recorded for a sale, with its label and description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub url: String,
    pub platform: Platform,
    /// Marketplace display name
    pub platform_label: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: ResolutionKind,
    /// Failures of the re-issued search in the last rule
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl Resolution {
    /// Offer id when a single offer was matched
    pub fn offer_id(&self) -> Option<&str> {
        match &self.kind {
            ResolutionKind::SingleOffer { offer_id, .. } => Some(offer_id),
            _ => None,
        }
    }
}

/// Decide which link represents the searched offer, without any network
///
/// First matching rule wins: one title match, one id match, the listing of
/// the larger result set (ties go to the id listing), the secondary
/// storefront search, and finally the plain title search.
pub fn choose(outcome: &SearchOutcome, config: &Config) -> Resolution {
    let query = outcome.query.as_str();
    let primary = config.primary.name.clone();

    if let Some(offer) = outcome.by_title.single() {
        return single_offer(offer.url.clone(), offer.id.clone(), ListingSource::Title, primary, query);
    }
    if let Some(offer) = outcome.by_id.single() {
        return single_offer(offer.url.clone(), offer.id.clone(), ListingSource::Id, primary, query);
    }

    if !outcome.is_empty() {
        let from = if outcome.by_title.len() > outcome.by_id.len() {
            ListingSource::Title
        } else {
            ListingSource::Id
        };
        let url = match from {
            ListingSource::Title => outcome.title_listing_url.clone(),
            ListingSource::Id => outcome.id_listing_url.clone(),
        };
        return Resolution {
            url,
            platform: Platform::Primary,
            platform_label: primary,
            description: format!("listing: {}", query),
            kind: ResolutionKind::Listing { from },
            issues: Vec::new(),
        };
    }

    if let Some(url) = &outcome.secondary_url {
        return Resolution {
            url: url.clone(),
            platform: Platform::Secondary,
            platform_label: config.secondary.name.clone(),
            description: format!("secondary-marketplace search: {}", query),
            kind: ResolutionKind::SecondarySearch,
            issues: Vec::new(),
        };
    }

    Resolution {
        url: outcome.title_listing_url.clone(),
        platform: Platform::Primary,
        platform_label: primary,
        description: format!("search: {}", query),
        kind: ResolutionKind::FallbackSearch,
        issues: Vec::new(),
    }
}

/// Pick the link to record for a sale
///
/// Same rules as [`choose`]; when nothing matched anywhere the title search
/// is asked once more before its listing is handed back. Never fails: a
/// failed re-issue lands in `issues`.
pub fn resolve(outcome: &SearchOutcome, source: &dyn PageSource, config: &Config) -> Resolution {
    let mut resolution = choose(outcome, config);

    if resolution.kind == ResolutionKind::FallbackSearch {
        if let Some(html) = fetch_page(source, &config.primary, &resolution.url, &mut resolution.issues) {
            let retry = extract_offers(&html, &config.primary);
            tracing::debug!(query = %outcome.query, found = retry.len(), "re-issued title search");
        }
    }
    resolution
}

fn single_offer(
    url: String,
    offer_id: String,
    from: ListingSource,
    platform_label: String,
    query: &str,
) -> Resolution {
    Resolution {
        url,
        platform: Platform::Primary,
        platform_label,
        description: format!("specific offer: {}", query),
        kind: ResolutionKind::SingleOffer { offer_id, from },
        issues: Vec::new(),
    }
}

/// Operator-facing message for a search, derived from the resolution
pub fn summarize(outcome: &SearchOutcome, resolution: &Resolution, config: &Config) -> String {
    let counts = format!(
        "{} by title, {} by id",
        outcome.by_title.len(),
        outcome.by_id.len()
    );

    match &resolution.kind {
        ResolutionKind::SingleOffer { offer_id, from } => {
            format!("Found a single offer ({}) by {} [{}]", offer_id, from.label(), counts)
        }
        ResolutionKind::Listing { .. } if outcome.by_title.same_ids(&outcome.by_id) => format!(
            "Both searches returned the same {} offers, showing the listing",
            outcome.by_id.len()
        ),
        ResolutionKind::Listing { from } => {
            format!("Several offers match [{}], showing the {} listing", counts, from.label())
        }
        ResolutionKind::SecondarySearch => format!(
            "No offers on {}, try the {} storefront search",
            config.primary.name, resolution.platform_label
        ),
        ResolutionKind::FallbackSearch => "No offers found, showing a plain title search".to_string(),
    }
}
