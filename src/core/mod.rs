//! Catalogue data model, template matching and JSON persistence.

mod call_site;
mod error;
mod message;
pub mod store;
pub mod template;

pub use call_site::CallSite;
pub use error::{CatalogError, CollectorError, MatchFailure};
pub use message::{GuardKind, Message};
pub use store::{CatalogStore, Catalogue, SaveOptions, SaveSummary};
pub use template::{CodeParser, MessageTemplate};
