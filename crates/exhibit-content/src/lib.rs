//! Exhibit Content
//!
//! Turns an exhibit's data source into the three display texts of the panel:
//! - Absent slots resolve to a placeholder naming the slot
//! - Inline slots resolve synchronously to their text, verbatim
//! - Remote slots are fetched asynchronously with a cache-busting parameter
//!
//! Every resolution is tagged with a [`RequestToken`]; results carrying a
//! superseded token are dropped on arrival.

mod cache_bust;
mod content;
mod error;
mod fetch;
mod resolver;
mod slot;
mod source;
mod token;

pub use cache_bust::{CacheBuster, FetchRequest, DEFAULT_PARAM as DEFAULT_CACHE_BUST_PARAM};
pub use content::{ResolvedContent, SlotContent};
pub use error::FetchError;
pub use fetch::{Fetcher, HttpFetcher, StaticDirFetcher};
pub use resolver::{ContentResolver, ContentSink, RemoteSlot, Resolution};
pub use slot::Slot;
pub use source::{ExhibitSource, SlotSource};
pub use token::{RequestToken, TokenIssuer};

pub type Result<T> = std::result::Result<T, FetchError>;
