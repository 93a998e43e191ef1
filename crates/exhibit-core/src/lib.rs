//! Exhibit Core
//!
//! Ties a page's markup, its code exhibit panel and its reveal-on-scroll
//! monitor together behind one [`Showcase`], configured from a single
//! [`Config`].

mod config;
mod error;
mod event;
mod showcase;

pub use config::{Config, FetchSettings};
pub use error::CoreError;
pub use event::{Outcome, PageEvent};
pub use showcase::Showcase;

// Re-export the component crates' public surface
pub use exhibit_content::{
    ContentResolver, ExhibitSource, FetchError, Fetcher, HttpFetcher, RequestToken, Slot,
    SlotContent, SlotSource, StaticDirFetcher,
};
pub use exhibit_page::{Markup, Page, PageError, SurfaceElement, Trigger, TriggerId};
pub use exhibit_panel::{
    Anchor, Key, PanelController, PanelError, PanelSettings, PanelSnapshot, PanelState,
    PanelVariant, PointerTarget, Presentation, Rect, TabChange, Viewport,
};
pub use exhibit_reveal::{Bounds, RevealError, RevealId, RevealSettings, ScrollIndicators};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
