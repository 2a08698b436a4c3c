//! partdesk - search parts, log sales, jump to back-office sites

use clap::Parser;
use colored::Colorize;

use partdesk::cli::{Cli, Commands, ConfigCommands};
use partdesk::error::Result;

mod commands;
mod logging;
mod utils;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint.dimmed());
        }
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        // Marketplace
        Commands::Search { query, open, json } => commands::cmd_search(&query, open, json),
        Commands::Secondary { query, open } => commands::cmd_secondary(&query, open),

        // Ledger
        Commands::Add { query, title, price, note } => {
            commands::cmd_add(&query, title, price, note)
        }
        Commands::Manual { id, link, note, title, price } => {
            commands::cmd_manual(&id, link, note, title, price)
        }
        Commands::List { status, sort, json } => commands::cmd_list(status, sort, json),
        Commands::Show { id, json } => commands::cmd_show(&id, json),
        Commands::Edit { id, field, value } => commands::cmd_edit(&id, &field, &value),
        Commands::Delete { id, yes } => commands::cmd_delete(&id, yes),

        // Back office
        Commands::Links => commands::cmd_links(),
        Commands::Open { label } => commands::cmd_open(&label),

        // Miscellaneous
        Commands::Dashboard => commands::cmd_dashboard(),
        Commands::Config(ConfigCommands::Show) => commands::cmd_config_show(),
        Commands::Config(ConfigCommands::Path) => commands::cmd_config_path(),
        Commands::Config(ConfigCommands::Init { force }) => commands::cmd_config_init(force),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
