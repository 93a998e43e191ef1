//! Exhibit Reveal
//!
//! Marks page elements as revealed once enough of them has scrolled into
//! view. Reveal is terminal: a revealed element is never watched again and
//! never hidden again. Independent of the panel.
//!
//! Also computes the scroll-driven page indicators (progress bar and
//! back-to-top control).

mod bounds;
mod error;
mod monitor;
mod scroll;
mod settings;

pub use bounds::Bounds;
pub use error::RevealError;
pub use monitor::{RevealId, RevealMonitor};
pub use scroll::ScrollIndicators;
pub use settings::RevealSettings;

pub type Result<T> = std::result::Result<T, RevealError>;
