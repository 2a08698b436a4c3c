//! Ledger commands: add, manual, list, show, edit, delete

use colored::Colorize;
use inquire::Confirm;
use serde_json::json;

use partdesk::cli::ListOrder;
use partdesk::config::Config;
use partdesk::error::{DeskError, Result};
use partdesk::fetch::HttpSource;
use partdesk::ledger::{stats, update_field, LedgerEntry, LedgerField, LedgerStore, SortOrder};
use partdesk::sale::{log_from_search, log_manual, LoggedSale, SaleDetails};
use partdesk::session::Session;

use crate::utils::{entry_line, open_ledger, print_entry, print_receipt};

/// Log a sale, letting the resolver pick the link
pub fn cmd_add(
    query: &str,
    title: Option<String>,
    price: Option<String>,
    note: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let source = HttpSource::from_config(&config);
    let store = open_ledger(&config)?;
    let mut session = Session::new();

    let sale = log_from_search(
        &mut session,
        &source,
        &config,
        &store,
        query,
        SaleDetails { title, price, note },
    )?;
    print_sale(&sale);
    Ok(())
}

/// Log a sale by hand
pub fn cmd_manual(
    id: &str,
    link: Option<String>,
    note: Option<String>,
    title: Option<String>,
    price: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let store = open_ledger(&config)?;
    let mut session = Session::new();

    let sale = log_manual(
        &mut session,
        &config,
        &store,
        id,
        link,
        SaleDetails { title, price, note },
    )?;
    print_sale(&sale);
    Ok(())
}

/// Report a freshly logged sale
pub fn print_sale(sale: &LoggedSale) {
    for issue in &sale.issues {
        println!("  {} {}", "!".yellow(), issue.yellow());
    }

    let platform = sale
        .resolution
        .as_ref()
        .map(|r| r.platform_label.as_str())
        .unwrap_or("manual entry");
    println!("\n{} sale as {} ({})", "Logged".green(), sale.entry.id.bold(), platform);
    println!("  Link:    {}", sale.entry.link);
    println!("  Details: {}", sale.entry.description);
    print_receipt(&sale.receipt);
}

/// List ledger entries
pub fn cmd_list(status: Option<String>, sort: ListOrder, json: bool) -> Result<()> {
    let config = Config::load()?;
    let store = open_ledger(&config)?;
    let order = match sort {
        ListOrder::Newest => SortOrder::Newest,
        ListOrder::Oldest => SortOrder::Oldest,
        ListOrder::Title => SortOrder::Title,
    };
    let mut entries = store.list_sorted(order)?;

    if let Some(ref status) = status {
        entries.retain(|e| e.status.eq_ignore_ascii_case(status.trim()));
    }

    if json {
        let value = json!({ "stats": stats(&entries), "entries": entries });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if entries.is_empty() {
        match status {
            Some(status) => println!("No entries with status '{}'.", status),
            None => println!("Ledger is empty. Log a sale with `partdesk add <query>`."),
        }
        return Ok(());
    }

    print_entries(&entries, &config);
    Ok(())
}

/// Stats header followed by one line per entry
pub fn print_entries(entries: &[LedgerEntry], config: &Config) {
    let stats = stats(entries);
    println!(
        "\nLedger: {} entries, last added {}\n",
        stats.total.to_string().bold(),
        stats.last_added.as_deref().unwrap_or("-").bold()
    );

    let id_width = entries.iter().map(|e| e.id.chars().count()).max().unwrap_or(8).clamp(4, 40);
    for entry in entries {
        println!("{}", entry_line(entry, id_width, config));
    }
    println!();
}

/// Show one entry
pub fn cmd_show(id: &str, json: bool) -> Result<()> {
    let config = Config::load()?;
    let store = open_ledger(&config)?;
    let entry = store
        .get(id)?
        .ok_or_else(|| DeskError::EntryNotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!();
        print_entry(&entry, &config);
        println!();
    }
    Ok(())
}

/// Edit one field of an entry
pub fn cmd_edit(id: &str, field: &str, value: &str) -> Result<()> {
    let config = Config::load()?;
    let store = open_ledger(&config)?;
    edit_entry(&store, id, field, value)
}

/// Shared by `edit` and the dashboard
pub fn edit_entry(store: &dyn LedgerStore, id: &str, field: &str, value: &str) -> Result<()> {
    let field: LedgerField = field.parse()?;
    let receipt = update_field(store, id, field, value)?;
    println!("\nUpdated {} of entry {}", field.to_string().bold(), receipt.id);
    print_receipt(&receipt);
    Ok(())
}

/// Delete an entry
pub fn cmd_delete(id: &str, skip_confirm: bool) -> Result<()> {
    let config = Config::load()?;
    let store = open_ledger(&config)?;
    delete_entry(&store, id, skip_confirm)
}

/// Shared by `delete` and the dashboard
pub fn delete_entry(store: &dyn LedgerStore, id: &str, skip_confirm: bool) -> Result<()> {
    let entry = store
        .get(id)?
        .ok_or_else(|| DeskError::EntryNotFound(id.to_string()))?;

    if !skip_confirm {
        let label = if entry.title.is_empty() { entry.id.clone() } else { entry.title.clone() };
        let confirm = Confirm::new(&format!("Delete entry {} ({})?", entry.id, label))
            .with_default(false)
            .prompt()
            .map_err(|e| DeskError::PromptError(e.to_string()))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let receipt = store.delete(&entry.id)?;
    println!("Deleted entry: {}", receipt.id);
    print_receipt(&receipt);
    Ok(())
}
