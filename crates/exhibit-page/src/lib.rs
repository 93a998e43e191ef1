//! Exhibit Page
//!
//! Parses portfolio page markup once, at page-assembly time, into an owned
//! model the panel can query from any thread:
//! - Triggers, each bound to its exhibit data (explicit `data-exhibit`
//!   reference first, following-sibling walk as fallback)
//! - Exhibit data sources with their code / input / output slots
//! - Which parts of the panel surface the page actually provides
//! - Elements eligible for scroll reveal

mod error;
mod locator;
mod markup;
mod page;
mod surface;

pub use error::PageError;
pub use locator::{locate_data_container, read_exhibit};
pub use markup::{Markup, SlotClasses, SurfaceMarkup};
pub use page::{Association, ExhibitId, Page, RevealCandidate, Trigger, TriggerId};
pub use surface::{SurfaceElement, SurfaceReport};

pub type Result<T> = std::result::Result<T, PageError>;
