//! Resolved content
//!
//! Display text for each slot of the currently open exhibit, or a status
//! while a remote slot is still in flight.

use serde::Serialize;

use crate::slot::Slot;
use crate::token::RequestToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SlotContent {
    /// The exhibit provides nothing for this slot
    Absent,
    /// Remote fetch issued, no response yet
    Loading { path: String },
    /// Final text, shown verbatim
    Ready { text: String },
    /// Remote fetch failed
    Failed { path: String, detail: String },
}

impl SlotContent {
    pub fn ready(text: impl Into<String>) -> Self {
        SlotContent::Ready { text: text.into() }
    }

    /// Text shown in the slot's tab. Always literal text, never markup.
    pub fn display_text(&self, slot: Slot) -> String {
        match self {
            SlotContent::Absent => format!("// No {} provided for this exhibit.", slot),
            SlotContent::Loading { path } => format!("Loading {}...", path),
            SlotContent::Ready { text } => text.clone(),
            SlotContent::Failed { path, detail } => {
                format!("// Failed to load {}: {}", path, detail)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SlotContent::Loading { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SlotContent::Failed { .. })
    }
}

/// Content of one open panel instance, bound to the token of the open that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    token: RequestToken,
    slots: [SlotContent; 3],
}

impl ResolvedContent {
    pub(crate) fn new(token: RequestToken) -> Self {
        Self {
            token,
            slots: [SlotContent::Absent, SlotContent::Absent, SlotContent::Absent],
        }
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn get(&self, slot: Slot) -> &SlotContent {
        &self.slots[slot.index()]
    }

    pub fn text(&self, slot: Slot) -> String {
        self.get(slot).display_text(slot)
    }

    pub(crate) fn set(&mut self, slot: Slot, content: SlotContent) {
        self.slots[slot.index()] = content;
    }

    /// Apply a resolved slot. Returns false, leaving the content untouched,
    /// when `token` is not the token this content belongs to.
    pub fn apply(&mut self, token: RequestToken, slot: Slot, content: SlotContent) -> bool {
        if token != self.token {
            return false;
        }
        self.set(slot, content);
        true
    }

    /// No slot is still waiting on the network
    pub fn is_settled(&self) -> bool {
        self.slots.iter().all(|content| !content.is_loading())
    }
}
