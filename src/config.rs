use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{DeskError, Result};

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Generic desktop browser string sent as User-Agent
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Global partdesk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for marketplace requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Ledger CSV location (defaults to the data directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,

    /// Marketplace that gets scraped
    #[serde(default)]
    pub primary: Marketplace,

    /// Marketplace reached only through a constructed search link
    #[serde(default)]
    pub secondary: SecondaryMarketplace,

    /// Back-office shortcuts, in display order
    #[serde(default = "default_links")]
    pub links: Vec<Link>,
}

/// Primary marketplace: where search results are scraped from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Marketplace {
    /// Display name, also used as the platform label
    pub name: String,
    /// Scheme and host prepended to relative offer links
    pub origin: String,
    /// Substring an absolute offer link must contain
    pub domain_token: String,
    /// Path fragment identifying an offer resource
    pub offer_marker: String,
    /// Non-digit marker in front of the numeric offer id
    pub id_prefix: String,
    /// Search URL with `{category}` and `{term}` placeholders
    pub search_template: String,
    /// Category code substituted into the template
    pub category: String,
    /// Appended to the search URL when searching by exact id
    pub id_mode_flag: String,
}

impl Default for Marketplace {
    fn default() -> Self {
        Self {
            name: "Sprzedajemy.pl".into(),
            origin: "https://sprzedajemy.pl".into(),
            domain_token: "sprzedajemy.pl/".into(),
            offer_marker: "nr".into(),
            id_prefix: "nr".into(),
            search_template: "https://oscar.sprzedajemy.pl/szukaj?schm2=ls&catCode={category}&inp_text%5Bv%5D={term}&inp_category_id=2&inp_location_id=1".into(),
            category: "6bea9f".into(),
            id_mode_flag: "&inp_text%5Bn%5D=1".into(),
        }
    }
}

/// Secondary marketplace: a seller storefront search link, never scraped
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryMarketplace {
    /// Display name, also used as the platform label
    pub name: String,
    /// Storefront owner substituted into the template
    pub seller: String,
    /// Search URL with `{seller}` and `{term}` placeholders
    pub template: String,
    /// Whether the resolver may fall back to the storefront link
    pub enabled: bool,
}

impl Default for SecondaryMarketplace {
    fn default() -> Self {
        Self {
            name: "Allegro".into(),
            seller: "PARTS_SKODA".into(),
            template: "https://allegro.pl/uzytkownik/{seller}?string={term}".into(),
            enabled: true,
        }
    }
}

/// A labelled back-office URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_links() -> Vec<Link> {
    [
        ("Sprzedajemy", "https://oscar.sprzedajemy.pl/"),
        ("Allegro", "https://salescenter.allegro.com/my-assortment?limit=20&publication.status=ACTIVE&sellingMode.format=BUY_NOW&context.marketplace=allegro-pl"),
        ("Orders", "https://salescenter.allegro.com/orders"),
        ("Ovoko", "https://oscar.rrr.lt/v2"),
        ("Polcar", "https://catalog.polcar.com/polcar"),
        ("Invoice", "https://kontakt-oscar.fakturownia.pl/"),
        ("BaseLinker", "https://panel-f.baselinker.com/index.php"),
        // Carriers
        ("DHL", "https://dhl24.com.pl/pl/uzytkownik/zaloguj.html"),
        ("AmbroExpress", "https://ambro.opennet.pl/Default.aspx"),
        ("BLpaczka", "https://blpaczka.com/panel"),
        ("Sendit", "https://panel.sendit.pl/logowanie"),
        ("Polkurier", "https://www.polkurier.pl/logowanie"),
        ("CTL", "https://www.ctlgroup.pl/customers/login"),
    ]
    .into_iter()
    .map(|(label, url)| Link { label: label.into(), url: url.into() })
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            ledger_path: None,
            primary: Marketplace::default(),
            secondary: SecondaryMarketplace::default(),
            links: default_links(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration text, rejecting values the tool cannot work with
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.timeout_secs == 0 {
            return Err(DeskError::ConfigError("timeout_secs must be at least 1".into()));
        }
        if !config.primary.search_template.contains("{term}") {
            return Err(DeskError::ConfigError(
                "primary.search_template must contain {term}".into(),
            ));
        }
        if !config.secondary.template.contains("{term}") {
            return Err(DeskError::ConfigError(
                "secondary.template must contain {term}".into(),
            ));
        }
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| DeskError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Supports PARTDESK_CONFIG environment variable override
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("PARTDESK_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "partdesk")
            .ok_or_else(|| DeskError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "partdesk")
            .ok_or_else(|| DeskError::ConfigError("Could not determine data directory".into()))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the ledger path
    ///
    /// Supports PARTDESK_LEDGER environment variable for test isolation
    pub fn ledger_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var("PARTDESK_LEDGER") {
            return Ok(PathBuf::from(path));
        }
        match &self.ledger_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("ledger.csv")),
        }
    }

    /// Secondary marketplace, unless the storefront fallback is switched off
    pub fn secondary(&self) -> Option<&SecondaryMarketplace> {
        (self.secondary.enabled && !self.secondary.seller.trim().is_empty())
            .then_some(&self.secondary)
    }
}
