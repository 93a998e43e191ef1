//! Exhibit Panel
//!
//! The one code exhibit panel of a page.
//!
//! ```text
//! Closed
//!   ↓ open(trigger)
//! Opening ──(opening phase elapses)──→ Open
//!   ↓ close / backdrop / escape         ↓ close / backdrop / escape
//! Closing ──(closing phase elapses)──→ Closed
//! ```
//!
//! An open request in any state restarts at `Opening` for the new exhibit.

mod controller;
mod error;
mod position;
mod settings;
mod snapshot;
mod state;
mod tabs;

pub use controller::{Key, PanelController, PointerTarget};
pub use error::PanelError;
pub use position::{Anchor, PanelSize, Placement, Point, Rect, Viewport};
pub use settings::{PanelSettings, PanelVariant};
pub use snapshot::{PanelSnapshot, Presentation, SlotView};
pub use state::PanelState;
pub use tabs::{TabChange, TabSelector};

pub type Result<T> = std::result::Result<T, PanelError>;
