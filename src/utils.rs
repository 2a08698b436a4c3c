//! Shared helpers for command output

use colored::Colorize;

use partdesk::config::Config;
use partdesk::ledger::{CsvLedger, LedgerEntry, WriteReceipt};
use partdesk::sale::entry_platform;

/// Whether stdout is a terminal that can show colors
pub fn use_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Ledger at the configured location
pub fn open_ledger(config: &Config) -> partdesk::Result<CsvLedger> {
    Ok(CsvLedger::new(config.ledger_path()?))
}

/// Truncate a string to max_len characters (not bytes), adding "..." if truncated.
/// Safe for non-ASCII content (emoji, CJK, etc).
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        chars[..max_len].iter().collect()
    } else {
        format!("{}...", chars[..max_len - 3].iter().collect::<String>())
    }
}

/// Placeholder for empty cells in human output
pub fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}

/// Report where a write landed and whether the backup worked
pub fn print_receipt(receipt: &WriteReceipt) {
    match &receipt.backup {
        Ok(path) => println!("  Backup:  {}", path.display().to_string().dimmed()),
        Err(e) => println!(
            "  {} backup copy failed ({}), the ledger itself was saved",
            "Warning:".yellow(),
            e
        ),
    }
}

/// Print every field of an entry
pub fn print_entry(entry: &LedgerEntry, config: &Config) {
    println!("  {} {}", "Id:".bold(), entry.id);
    println!("    Platform:    {}", entry_platform(entry, config));
    println!("    Title:       {}", or_dash(&entry.title));
    println!("    Price:       {}", or_dash(&entry.price));
    println!("    Link:        {}", or_dash(&entry.link));
    println!("    Description: {}", or_dash(&entry.description));
    println!("    Status:      {}", or_dash(&entry.status));
    println!("    Note:        {}", or_dash(&entry.note));
    println!("    Added:       {}", or_dash(&entry.added_at));
}

/// One-line form used by `list`
pub fn entry_line(entry: &LedgerEntry, id_width: usize, config: &Config) -> String {
    let status = if use_color() {
        match entry.status.as_str() {
            "sold" => entry.status.green().to_string(),
            "" => "-".to_string(),
            other => other.yellow().to_string(),
        }
    } else {
        or_dash(&entry.status).to_string()
    };

    format!(
        "  {:<id_width$}  {:<16}  {:<14}  {:>8}  {:<10}  {}",
        entry.id,
        truncate_str(or_dash(&entry.added_at), 16),
        truncate_str(entry_platform(entry, config), 14),
        truncate_str(or_dash(&entry.price), 8),
        status,
        truncate_str(or_dash(&entry.title), 35),
        id_width = id_width,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("ab", 3), "ab");
        assert_eq!(truncate_str("żółć żółć", 6), "żół...");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("  "), "-");
        assert_eq!(or_dash("120"), "120");
    }
}
