//! Miscellaneous commands: config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use partdesk::cli::{Cli, CompletionShell};
use partdesk::config::Config;
use partdesk::error::{DeskError, Result};

/// Print the effective configuration as TOML
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    let content = toml::to_string_pretty(&config)
        .map_err(|e| DeskError::ConfigError(e.to_string()))?;
    println!("{}", content);
    Ok(())
}

/// Print where partdesk reads and writes its files
pub fn cmd_config_path() -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;
    let exists = if config_path.exists() { "" } else { " (not created, using defaults)" };

    println!("Config: {}{}", config_path.display(), exists.dimmed());
    println!("Ledger: {}", config.ledger_path()?.display());
    Ok(())
}

/// Write the default configuration so it can be edited
pub fn cmd_config_init(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    if config_path.exists() && !force {
        return Err(DeskError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    Config::default().save()?;
    println!("Wrote {}", config_path.display());
    println!("Set {} to enable storefront search links.", "secondary.seller".bold());
    Ok(())
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "partdesk", &mut io::stdout());
    Ok(())
}
