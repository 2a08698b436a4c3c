//! Interactive dashboard: one session, every operator action behind a menu

use std::fmt;

use colored::Colorize;
use inquire::{Confirm, InquireError, Select, Text};

use partdesk::config::Config;
use partdesk::error::{DeskError, Result};
use partdesk::fetch::HttpSource;
use partdesk::ledger::{sort_entries, CsvLedger, LedgerField, LedgerStore, SortOrder};
use partdesk::links::{find_link, open_in_browser};
use partdesk::query::{clean_query, secondary_search_url};
use partdesk::sale::{log_from_search, log_manual, SaleDetails};
use partdesk::session::Session;

use super::ledger::{delete_entry, edit_entry, print_entries, print_sale};
use super::search::search_and_show;
use crate::utils::open_ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    AddFromSearch,
    AddManual,
    List,
    Edit,
    Delete,
    Secondary,
    OpenLink,
    RefreshCache,
    Quit,
}

impl Action {
    const ALL: [Action; 10] = [
        Action::Search,
        Action::AddFromSearch,
        Action::AddManual,
        Action::List,
        Action::Edit,
        Action::Delete,
        Action::Secondary,
        Action::OpenLink,
        Action::RefreshCache,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Search => "Search marketplace",
            Action::AddFromSearch => "Log sale from search",
            Action::AddManual => "Log sale manually",
            Action::List => "Show ledger",
            Action::Edit => "Edit entry",
            Action::Delete => "Delete entry",
            Action::Secondary => "Secondary storefront link",
            Action::OpenLink => "Open back-office link",
            Action::RefreshCache => "Reload ledger",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Everything the dashboard handlers share
struct Desk {
    config: Config,
    source: HttpSource,
    store: CsvLedger,
    session: Session,
}

/// Run the interactive dashboard until the operator quits
pub fn cmd_dashboard() -> Result<()> {
    let config = Config::load()?;
    let mut desk = Desk {
        source: HttpSource::from_config(&config),
        store: open_ledger(&config)?,
        session: Session::new(),
        config,
    };

    println!("\n{}", "partdesk dashboard".bold());
    println!("Ledger: {}\n", desk.store.path().display().to_string().dimmed());

    loop {
        let action = match Select::new("What next?", Action::ALL.to_vec())
            .with_page_size(Action::ALL.len())
            .prompt()
        {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(DeskError::PromptError(e.to_string())),
        };

        if action == Action::Quit {
            break;
        }

        // A failed action is reported and the menu comes back
        match run_action(&mut desk, action) {
            Ok(()) => {}
            Err(DeskError::Cancelled) => {}
            Err(e) => {
                println!("{} {}", "Error:".red().bold(), e);
                if let Some(hint) = e.hint() {
                    println!("{}", hint.dimmed());
                }
            }
        }
        println!();
    }

    Ok(())
}

fn run_action(desk: &mut Desk, action: Action) -> Result<()> {
    match action {
        Action::Search => {
            let query = ask("Query:", desk.session.last_query())?;
            let resolution =
                search_and_show(&mut desk.session, &desk.source, &desk.config, &query, false, false)?;

            // Offered once per query, like the open button next to the results
            if !desk.session.link_opened() {
                let open = Confirm::new("Open this link?")
                    .with_default(false)
                    .prompt()
                    .map_err(prompt_error)?;
                if open {
                    open_in_browser(&resolution.url)?;
                    desk.session.mark_opened();
                }
            }
            Ok(())
        }
        Action::AddFromSearch => {
            let query = ask("Query:", desk.session.last_query())?;
            let price = ask_optional("Price (optional):")?;
            let note = ask_optional("Note (optional):")?;
            let sale = log_from_search(
                &mut desk.session,
                &desk.source,
                &desk.config,
                &desk.store,
                &query,
                SaleDetails { title: None, price, note },
            )?;
            print_sale(&sale);
            Ok(())
        }
        Action::AddManual => {
            let part = ask("Part number or name:", None)?;
            let link = ask_optional("Link (optional):")?;
            let note = ask_optional("Note (optional):")?;
            let sale = log_manual(
                &mut desk.session,
                &desk.config,
                &desk.store,
                &part,
                link,
                SaleDetails { note, ..SaleDetails::default() },
            )?;
            print_sale(&sale);
            Ok(())
        }
        Action::List => {
            let orders = vec!["Newest", "Oldest", "Title"];
            let order = match Select::new("Sort:", orders).prompt().map_err(prompt_error)? {
                "Oldest" => SortOrder::Oldest,
                "Title" => SortOrder::Title,
                _ => SortOrder::Newest,
            };
            let mut entries = desk.session.entries(&desk.store)?.to_vec();
            if entries.is_empty() {
                println!("Ledger is empty.");
                return Ok(());
            }
            sort_entries(&mut entries, order);
            print_entries(&entries, &desk.config);
            Ok(())
        }
        Action::Edit => {
            let id = pick_entry(desk)?;
            let field = Select::new("Field:", LedgerField::ALL.to_vec())
                .prompt()
                .map_err(prompt_error)?;
            let current = desk
                .store
                .get(&id)?
                .map(|e| field.get(&e).to_string())
                .unwrap_or_default();
            let value = Text::new("New value:")
                .with_initial_value(&current)
                .prompt()
                .map_err(prompt_error)?;
            let result = edit_entry(&desk.store, &id, field.as_str(), &value);
            desk.session.refresh_cache();
            result
        }
        Action::Delete => {
            let id = pick_entry(desk)?;
            let result = delete_entry(&desk.store, &id, false);
            desk.session.refresh_cache();
            result
        }
        Action::Secondary => {
            let query = ask("Query:", desk.session.last_query())?;
            let url = secondary_search_url(&query, &desk.config.secondary);
            println!("{}", url);
            open_in_browser(&url)?;
            println!("Opened {}", url);
            Ok(())
        }
        Action::OpenLink => {
            let labels: Vec<String> = desk.config.links.iter().map(|l| l.label.clone()).collect();
            let label = Select::new("Link:", labels).prompt().map_err(prompt_error)?;
            let url = find_link(&desk.config.links, &label)?.url.clone();
            open_in_browser(&url)?;
            println!("Opened {}", url);
            Ok(())
        }
        Action::RefreshCache => {
            if desk.session.refresh_cache() {
                println!("Ledger will be read again on the next listing.");
            } else {
                println!("Nothing cached yet.");
            }
            Ok(())
        }
        Action::Quit => Ok(()),
    }
}

fn pick_entry(desk: &mut Desk) -> Result<String> {
    let entries = desk.session.entries(&desk.store)?;
    if entries.is_empty() {
        return Err(DeskError::EntryNotFound("ledger is empty".into()));
    }
    let options: Vec<String> = entries
        .iter()
        .map(|e| format!("{}  {}", e.id, e.title))
        .collect();
    let picked = Select::new("Entry:", options).raw_prompt().map_err(prompt_error)?;
    Ok(entries[picked.index].id.clone())
}

/// Required text; an empty answer is a validation error
fn ask(message: &str, default: Option<&str>) -> Result<String> {
    let mut prompt = Text::new(message);
    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }
    let answer = prompt.prompt().map_err(prompt_error)?;
    clean_query(&answer)
        .map(str::to_string)
        .ok_or_else(|| DeskError::Validation("a value is required".into()))
}

fn ask_optional(message: &str) -> Result<Option<String>> {
    let answer = Text::new(message).prompt().map_err(prompt_error)?;
    Ok(clean_query(&answer).map(str::to_string))
}

/// Esc on a sub-prompt goes back to the menu without an error line
fn prompt_error(e: InquireError) -> DeskError {
    match e {
        InquireError::OperationCanceled => DeskError::Cancelled,
        other => DeskError::PromptError(other.to_string()),
    }
}
