//! Back-office link commands: links, open

use colored::Colorize;

use partdesk::config::Config;
use partdesk::error::Result;
use partdesk::links::{find_link, open_in_browser};

/// List the configured back-office links
pub fn cmd_links() -> Result<()> {
    let config = Config::load()?;

    if config.links.is_empty() {
        println!("No links configured. Add [[links]] entries to the config file.");
        return Ok(());
    }

    let width = config.links.iter().map(|l| l.label.chars().count()).max().unwrap_or(8);
    println!("\nLinks:\n");
    for link in &config.links {
        println!("  {:<width$}  {}", link.label.bold(), link.url, width = width);
    }
    println!();
    Ok(())
}

/// Open a back-office link in the browser
pub fn cmd_open(label: &str) -> Result<()> {
    let config = Config::load()?;
    let link = find_link(&config.links, label)?;
    open_in_browser(&link.url)?;
    println!("Opened {} ({})", link.label, link.url);
    Ok(())
}
