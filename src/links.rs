use std::process::Command;

use crate::config::Link;
use crate::error::{DeskError, Result};

/// Look up a back-office link by label, ignoring case
pub fn find_link<'a>(links: &'a [Link], label: &str) -> Result<&'a Link> {
    let label = label.trim();
    links
        .iter()
        .find(|l| l.label.eq_ignore_ascii_case(label))
        .ok_or_else(|| DeskError::LinkNotFound(label.to_string()))
}

/// Open a URL in the system browser
pub fn open_in_browser(url: &str) -> Result<()> {
    let status = opener(url)
        .status()
        .map_err(|e| DeskError::BrowserError(e.to_string()))?;

    if !status.success() {
        return Err(DeskError::BrowserError(format!(
            "opener exited with {} for {}",
            status, url
        )));
    }
    tracing::debug!(url, "opened in browser");
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_find_link_ignores_case() {
        let config = Config::default();
        let link = find_link(&config.links, "dhl").unwrap();
        assert_eq!(link.label, "DHL");
    }

    #[test]
    fn test_unknown_link() {
        let config = Config::default();
        assert!(matches!(
            find_link(&config.links, "FedEx"),
            Err(DeskError::LinkNotFound(_))
        ));
    }
}
