pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod ledger;
pub mod links;
pub mod query;
pub mod resolve;
pub mod sale;
pub mod search;
pub mod session;

pub use error::{DeskError, Result};
