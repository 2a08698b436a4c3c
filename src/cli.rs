use clap::{Parser, Subcommand, ValueEnum};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Ledger listing order
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ListOrder {
    /// Most recently added first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Alphabetical by title
    Title,
}

#[derive(Parser)]
#[command(name = "partdesk")]
#[command(author, version, about = "Search parts, log sales, jump to back-office sites", long_about = None)]
#[command(after_help = r#"Examples:
  partdesk search "maska skoda octavia"          Search the marketplace
  partdesk add "lusterko fabia" --price 120      Log a sale, link found automatically
  partdesk manual 5J0853661 --note "paid cash"   Log a sale by hand
  partdesk list --sort oldest                    Show the ledger
  partdesk open DHL                              Open a carrier panel
  partdesk dashboard                             Interactive mode
"#)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the primary marketplace by title and by id
    #[command(after_help = r#"Examples:
  partdesk search "zderzak przód octavia"
  partdesk search 5J0853661 --open     Open the chosen link
  partdesk search 71234567 --json      Output offers as JSON
"#)]
    Search {
        /// Part name, OEM number or listing id
        query: String,

        /// Open the chosen link in the browser
        #[arg(long)]
        open: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log a sale, picking the link from a marketplace search
    #[command(after_help = r#"Examples:
  partdesk add "alternator bosch octavia"
  partdesk add 5J0853661 --price 250 --note "odbiór osobisty"
"#)]
    Add {
        /// Part name, OEM number or listing id
        query: String,

        /// Title stored in the ledger (defaults to the query)
        #[arg(long)]
        title: Option<String>,

        /// Sale price
        #[arg(long)]
        price: Option<String>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },

    /// Log a sale by hand
    #[command(after_help = r#"Examples:
  partdesk manual 5J0853661
  partdesk manual "maska octavia" --link https://sprzedajemy.pl/maska-octavia-nr71234567 --note "paid cash"
"#)]
    Manual {
        /// Part number or name (stored as the title)
        id: String,

        /// Offer link (defaults to an id search on the primary marketplace)
        #[arg(long)]
        link: Option<String>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,

        /// Title stored in the ledger
        #[arg(long)]
        title: Option<String>,

        /// Sale price
        #[arg(long)]
        price: Option<String>,
    },

    /// List ledger entries, newest first
    #[command(after_help = r#"Examples:
  partdesk list
  partdesk list --sort title
  partdesk list --status sold
  partdesk list --json | jq '.[].link'
"#)]
    List {
        /// Only show entries with this status
        #[arg(long)]
        status: Option<String>,

        /// Listing order
        #[arg(long, value_enum, default_value_t = ListOrder::Newest)]
        sort: ListOrder,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single ledger entry
    Show {
        /// Entry id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one field of a ledger entry
    #[command(after_help = r#"Examples:
  partdesk edit manual-5J0853661-1760000000 price 180
  partdesk edit manual-5J0853661-1760000000 status returned
  partdesk edit manual-5J0853661-1760000000 note ""
"#)]
    Edit {
        /// Entry id
        id: String,

        /// Field name (title, price, link, description, status, note)
        field: String,

        /// New value (empty string clears the field)
        value: String,
    },

    /// Delete a ledger entry
    Delete {
        /// Entry id
        id: String,

        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the secondary-marketplace storefront search link
    Secondary {
        /// Part name or OEM number
        query: String,

        /// Open the link in the browser
        #[arg(long)]
        open: bool,
    },

    /// List back-office links
    Links,

    /// Open a back-office link by label
    Open {
        /// Link label (see `partdesk links`)
        label: String,
    },

    /// Interactive dashboard with a shared search cache
    Dashboard,

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  partdesk completions bash >> ~/.bashrc
  partdesk completions zsh >> ~/.zshrc
  partdesk completions fish > ~/.config/fish/completions/partdesk.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the configuration and ledger paths
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
