//! Turning a search, or the operator's own input, into a ledger entry

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::fetch::PageSource;
use crate::ledger::{LedgerEntry, LedgerStore, WriteReceipt};
use crate::query::{clean_query, listing_url, SearchMode};
use crate::resolve::{resolve, Resolution};
use crate::session::Session;

/// Id prefix and platform label of hand-entered sales
pub const MANUAL_PREFIX: &str = "manual";
pub const MANUAL_LABEL: &str = "Manual";

/// Optional fields the operator can supply when logging a sale
#[derive(Debug, Clone, Default)]
pub struct SaleDetails {
    pub title: Option<String>,
    pub price: Option<String>,
    pub note: Option<String>,
}

/// A sale written to the ledger
#[derive(Debug)]
pub struct LoggedSale {
    pub entry: LedgerEntry,
    /// Set when the link came from a search
    pub resolution: Option<Resolution>,
    /// Fetch failures met on the way, for the operator
    pub issues: Vec<String>,
    pub receipt: WriteReceipt,
}

/// Platform label as an id prefix: `Sprzedajemy.pl` becomes `sprzedajemypl`
pub fn platform_slug(label: &str) -> String {
    label.to_lowercase().replace('.', "")
}

/// Entry for a sale whose link was picked by the resolver
///
/// The id is `<platform>-<query>-<unix seconds>`, so selling the same part
/// twice gives two rows.
pub fn entry_from_resolution(
    query: &str,
    resolution: &Resolution,
    details: SaleDetails,
    at: DateTime<Local>,
) -> LedgerEntry {
    let query = query.trim();
    let id = format!(
        "{}-{}-{}",
        platform_slug(&resolution.platform_label),
        query,
        at.timestamp()
    );

    let mut entry = LedgerEntry::sold_at(id, at);
    entry.title = details.title.unwrap_or_else(|| query.to_string());
    entry.price = details.price.unwrap_or_default();
    entry.link = resolution.url.clone();
    entry.description = resolution.description.clone();
    entry.note = details.note.unwrap_or_default();
    entry
}

/// Entry for a sale typed in by hand
///
/// Without a link, the id search on the primary marketplace stands in.
pub fn manual_entry(
    config: &Config,
    part: &str,
    link: Option<String>,
    details: SaleDetails,
    at: DateTime<Local>,
) -> Result<LedgerEntry> {
    let part = clean_query(part)
        .ok_or_else(|| DeskError::Validation("an id is required for a manual entry".into()))?;

    let mut entry = LedgerEntry::sold_at(format!("{}-{}-{}", MANUAL_PREFIX, part, at.timestamp()), at);
    entry.link = link
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| listing_url(part, &config.primary, SearchMode::Id));
    entry.description = format!("manual entry: {}", part);
    entry.title = details.title.unwrap_or_else(|| part.to_string());
    entry.price = details.price.unwrap_or_default();
    entry.note = details.note.unwrap_or_default();
    Ok(entry)
}

/// Search afresh, resolve the link and append the sale
pub fn log_from_search(
    session: &mut Session,
    source: &dyn PageSource,
    config: &Config,
    store: &dyn LedgerStore,
    query: &str,
    details: SaleDetails,
) -> Result<LoggedSale> {
    let outcome = session
        .search(source, config, query)
        .ok_or_else(|| DeskError::Validation("search query is empty".into()))?;
    let resolution = resolve(&outcome, source, config);

    let mut entry = entry_from_resolution(&outcome.query, &resolution, details, Local::now());
    let receipt = store.insert(entry.clone())?;
    entry.id = receipt.id.clone();
    session.refresh_cache();

    let mut issues = outcome.issues;
    issues.extend(resolution.issues.iter().cloned());
    Ok(LoggedSale {
        entry,
        resolution: Some(resolution),
        issues,
        receipt,
    })
}

/// Append a hand-entered sale
pub fn log_manual(
    session: &mut Session,
    config: &Config,
    store: &dyn LedgerStore,
    part: &str,
    link: Option<String>,
    details: SaleDetails,
) -> Result<LoggedSale> {
    let mut entry = manual_entry(config, part, link, details, Local::now())?;
    let receipt = store.insert(entry.clone())?;
    entry.id = receipt.id.clone();
    session.refresh_cache();

    Ok(LoggedSale {
        entry,
        resolution: None,
        issues: Vec::new(),
        receipt,
    })
}

/// Which platform a ledger row belongs to, read from its id and link
pub fn entry_platform<'a>(entry: &LedgerEntry, config: &'a Config) -> &'a str {
    let id = entry.id.to_lowercase();
    let link = entry.link.to_lowercase();
    let secondary = config.secondary.name.to_lowercase();

    if !secondary.is_empty() && (id.contains(&secondary) || link.contains(&secondary)) {
        &config.secondary.name
    } else if id.contains(&platform_slug(&config.primary.name)) {
        &config.primary.name
    } else if id.starts_with(MANUAL_PREFIX) {
        MANUAL_LABEL
    } else {
        &config.primary.name
    }
}
