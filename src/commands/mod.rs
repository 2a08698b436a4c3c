//! Command implementations for partdesk CLI

mod dashboard;
mod ledger;
mod links;
mod misc;
mod search;

pub use dashboard::*;
pub use ledger::*;
pub use links::*;
pub use misc::*;
pub use search::*;
