//! Runs the by-title and by-id searches and collects their offers

use serde::Serialize;

use crate::config::{Config, Marketplace};
use crate::extract::{extract_offers, ExtractionResult};
use crate::fetch::PageSource;
use crate::query::{clean_query, listing_url, secondary_search_url, SearchMode};

/// Everything one query produced, built fresh for every search
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub by_title: ExtractionResult,
    pub by_id: ExtractionResult,
    pub title_listing_url: String,
    pub id_listing_url: String,
    pub secondary_url: Option<String>,
    /// Fetch failures the operator should see (timeouts are not listed)
    pub issues: Vec<String>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty() && self.by_id.is_empty()
    }
}

/// Search the primary marketplace by title and by id, in that order
///
/// Returns `None` for a blank query. The two pages are one retrieval: if
/// either fetch fails, both result sets are empty and the id page is not
/// requested after a failed title fetch.
pub fn run_search(source: &dyn PageSource, config: &Config, query: &str) -> Option<SearchOutcome> {
    let query = clean_query(query)?;
    let market = &config.primary;

    let title_listing_url = listing_url(query, market, SearchMode::Title);
    let id_listing_url = listing_url(query, market, SearchMode::Id);

    let mut issues = Vec::new();
    let pages = fetch_page(source, market, &title_listing_url, &mut issues).and_then(|title_html| {
        fetch_page(source, market, &id_listing_url, &mut issues).map(|id_html| (title_html, id_html))
    });
    let (by_title, by_id) = match pages {
        Some((title_html, id_html)) => (
            extract_offers(&title_html, market),
            extract_offers(&id_html, market),
        ),
        None => (ExtractionResult::default(), ExtractionResult::default()),
    };

    let secondary_url = config
        .secondary()
        .map(|secondary| secondary_search_url(query, secondary));

    tracing::info!(
        query,
        by_title = by_title.len(),
        by_id = by_id.len(),
        issues = issues.len(),
        "search finished"
    );

    Some(SearchOutcome {
        query: query.to_string(),
        by_title,
        by_id,
        title_listing_url,
        id_listing_url,
        secondary_url,
        issues,
    })
}

/// Fetch one listing page, turning failures into `None`
///
/// Timeouts stay quiet; anything else is logged and recorded in `issues`.
pub fn fetch_page(
    source: &dyn PageSource,
    market: &Marketplace,
    url: &str,
    issues: &mut Vec<String>,
) -> Option<String> {
    match source.fetch_html(url) {
        Ok(html) => Some(html),
        Err(e) if e.is_timeout() => {
            tracing::debug!(error = %e, "search timed out, treating as no results");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "search failed, treating as no results");
            issues.push(format!("{} search failed: {}", market.name, e));
            None
        }
    }
}
