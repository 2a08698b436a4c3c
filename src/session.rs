use crate::config::Config;
use crate::error::Result;
use crate::fetch::PageSource;
use crate::ledger::{LedgerEntry, LedgerStore};
use crate::query::clean_query;
use crate::search::{run_search, SearchOutcome};

/// Per-run operator context handed to every command handler
///
/// Search outcomes are never kept here: every search hits the marketplace.
/// What is kept is a snapshot of the ledger for browsing, dropped on every
/// write and on an explicit refresh.
#[derive(Debug, Default)]
pub struct Session {
    last_query: Option<String>,
    link_opened: bool,
    ledger: Option<Vec<LedgerEntry>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a fresh search and remember the query
    pub fn search(
        &mut self,
        source: &dyn PageSource,
        config: &Config,
        query: &str,
    ) -> Option<SearchOutcome> {
        let query = clean_query(query)?;
        self.begin_query(query);
        run_search(source, config, query)
    }

    /// A different query forgets that a link was opened
    fn begin_query(&mut self, query: &str) {
        if self.last_query.as_deref() != Some(query) {
            self.link_opened = false;
            self.last_query = Some(query.to_string());
        }
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn mark_opened(&mut self) {
        self.link_opened = true;
    }

    /// Whether a link was opened for the current query
    pub fn link_opened(&self) -> bool {
        self.link_opened
    }

    /// Ledger entries, read once and reused until the next refresh
    pub fn entries(&mut self, store: &dyn LedgerStore) -> Result<&[LedgerEntry]> {
        if self.ledger.is_none() {
            self.ledger = Some(store.list()?);
        } else {
            tracing::debug!("using cached ledger snapshot");
        }
        Ok(self.ledger.as_deref().unwrap_or_default())
    }

    /// Drop the ledger snapshot; returns whether there was one
    pub fn refresh_cache(&mut self) -> bool {
        self.ledger.take().is_some()
    }
}
