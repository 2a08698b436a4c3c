//! Marketplace commands: search, secondary

use colored::Colorize;
use serde_json::json;

use partdesk::config::Config;
use partdesk::error::{DeskError, Result};
use partdesk::fetch::{HttpSource, PageSource};
use partdesk::links::open_in_browser;
use partdesk::query::{clean_query, secondary_search_url};
use partdesk::resolve::{choose, summarize, Resolution};
use partdesk::search::SearchOutcome;
use partdesk::session::Session;

use crate::utils::truncate_str;

/// How many offers of each result set to print
const SHOWN_OFFERS: usize = 10;

/// Search the primary marketplace and show the chosen link
pub fn cmd_search(query: &str, open: bool, json: bool) -> Result<()> {
    let config = Config::load()?;
    let source = HttpSource::from_config(&config);
    let mut session = Session::new();
    search_and_show(&mut session, &source, &config, query, open, json)?;
    Ok(())
}

/// Shared by `search` and the dashboard
///
/// Display only: the chosen link never costs a request beyond the two
/// searches.
pub fn search_and_show(
    session: &mut Session,
    source: &dyn PageSource,
    config: &Config,
    query: &str,
    open: bool,
    json: bool,
) -> Result<Resolution> {
    let outcome = session
        .search(source, config, query)
        .ok_or_else(|| DeskError::Validation("search query is empty".into()))?;
    let resolution = choose(&outcome, config);

    if json {
        let value = json!({ "outcome": outcome, "resolution": resolution });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_outcome(&outcome, &resolution, config);
    }

    if open {
        open_in_browser(&resolution.url)?;
        session.mark_opened();
    }
    Ok(resolution)
}

fn print_outcome(outcome: &SearchOutcome, resolution: &Resolution, config: &Config) {
    println!("\n{} \"{}\"\n", "Search:".bold(), outcome.query);

    for issue in &outcome.issues {
        println!("  {} {}", "!".yellow(), issue.yellow());
    }

    print_offers("By title", &outcome.by_title, &outcome.title_listing_url);
    print_offers("By id", &outcome.by_id, &outcome.id_listing_url);

    println!("\n  {}", summarize(outcome, resolution, config).cyan());
    println!("  {} {}", "Link:".bold(), resolution.url);
    println!("  Platform: {}, {}", resolution.platform_label, resolution.description);
    println!();
}

fn print_offers(label: &str, result: &partdesk::extract::ExtractionResult, listing: &str) {
    println!("  {} ({}): {}", label.bold(), result.len(), listing.dimmed());
    for offer in result.offers().iter().take(SHOWN_OFFERS) {
        println!("    {:<12} {}", offer.id, truncate_str(&offer.url, 90));
    }
    if result.len() > SHOWN_OFFERS {
        println!("    ... and {} more", result.len() - SHOWN_OFFERS);
    }
}

/// Print (and optionally open) the secondary-marketplace storefront search
pub fn cmd_secondary(query: &str, open: bool) -> Result<()> {
    let config = Config::load()?;
    let query = clean_query(query)
        .ok_or_else(|| DeskError::Validation("search query is empty".into()))?;

    let url = secondary_search_url(query, &config.secondary);

    println!("{}", url);
    if open {
        open_in_browser(&url)?;
    }
    Ok(())
}
