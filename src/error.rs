use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Ledger file error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown ledger field: {0}")]
    UnknownField(String),

    #[error("Ledger entry not found: {0}")]
    EntryNotFound(String),

    #[error("No link labelled: {0}")]
    LinkNotFound(String),

    #[error("Could not open browser: {0}")]
    BrowserError(String),

    #[error("Prompt failed: {0}")]
    PromptError(String),

    #[error("Cancelled")]
    Cancelled,
}

impl DeskError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DeskError::HttpError(_) | DeskError::Timeout(_) => Some(
                "Check your internet connection, or raise `timeout_secs` in the config:\n  partdesk config path"
            ),
            DeskError::CsvError(_) => Some(
                "The ledger file may be damaged. Restore a copy from the backups/ directory next to it"
            ),
            DeskError::TomlError(_) | DeskError::ConfigError(_) => Some(
                "Inspect the configuration with `partdesk config show`, or recreate it with `partdesk config init --force`"
            ),
            DeskError::UnknownField(_) => Some(
                "Editable fields: title, price, link, description, status, note"
            ),
            DeskError::EntryNotFound(_) => Some(
                "Run `partdesk list` to see ledger entries"
            ),
            DeskError::LinkNotFound(_) => Some(
                "Run `partdesk links` to see available labels"
            ),
            DeskError::BrowserError(_) => Some(
                "Copy the URL and open it manually, or install xdg-open"
            ),
            _ => None,
        }
    }

    /// Whether this error is a network timeout (treated as "no results")
    pub fn is_timeout(&self) -> bool {
        matches!(self, DeskError::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;
