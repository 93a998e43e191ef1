//! Page events
//!
//! Everything a host page can report to the showcase, and what each report
//! caused.

use serde::{Deserialize, Serialize};

use exhibit_content::{RequestToken, Slot};
use exhibit_page::TriggerId;
use exhibit_panel::{Anchor, Key, PointerTarget, TabChange, Viewport};
use exhibit_reveal::RevealId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PageEvent {
    /// A trigger was activated. `anchor` is where it sat on screen, needed
    /// only by the floating panel.
    Activate {
        trigger: TriggerId,
        anchor: Option<Anchor>,
    },
    SelectTab(Slot),
    CloseControl,
    Pointer(PointerTarget),
    Key(Key),
    Scroll(Viewport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    Opened(RequestToken),
    Closing,
    TabChanged(TabChange),
    /// Elements revealed by a scroll, possibly none
    Revealed(Vec<RevealId>),
    /// The event had no effect in the current state
    Ignored,
}
