//! Canned marketplace shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use partdesk::config::Config;
use partdesk::error::{DeskError, Result};
use partdesk::fetch::PageSource;
use partdesk::query::{listing_url, SearchMode};

pub enum Reply {
    Page(String),
    Timeout,
    Fail,
}

/// Serves fixed pages per URL and records every request
#[derive(Default)]
pub struct FakeMarket {
    replies: HashMap<String, Reply>,
    requests: RefCell<Vec<String>>,
}

impl FakeMarket {
    pub fn reply(mut self, url: String, reply: Reply) -> Self {
        self.replies.insert(url, reply);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl PageSource for FakeMarket {
    fn fetch_html(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        match self.replies.get(url) {
            Some(Reply::Page(html)) => Ok(html.clone()),
            Some(Reply::Timeout) => Err(DeskError::Timeout(url.to_string())),
            Some(Reply::Fail) => Err(DeskError::HttpError(ureq::Error::StatusCode(503))),
            None => Ok(String::new()),
        }
    }
}

/// A results page listing the given offer ids
pub fn results_page(ids: &[&str]) -> String {
    let cards: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<article class="element"><a href="https://sprzedajemy.pl/czesc-samochodowa-nr{id}"><h2>Part {id}</h2></a></article>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><a href="https://sprzedajemy.pl/konto">Konto</a><section class="list">{cards}</section></body></html>"#
    )
}

pub fn offer_url(id: &str) -> String {
    format!("https://sprzedajemy.pl/czesc-samochodowa-nr{}", id)
}

pub fn title_url(config: &Config, query: &str) -> String {
    listing_url(query, &config.primary, SearchMode::Title)
}

pub fn id_url(config: &Config, query: &str) -> String {
    listing_url(query, &config.primary, SearchMode::Id)
}

/// Default configuration with the storefront fallback switched off
pub fn without_secondary() -> Config {
    let mut config = Config::default();
    config.secondary.enabled = false;
    config
}
