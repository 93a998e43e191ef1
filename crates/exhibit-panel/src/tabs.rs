//! Tab selector
//!
//! Exactly one of code / input / output is active at any time.

use serde::Serialize;

use exhibit_content::Slot;

use crate::error::PanelError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabChange {
    pub from: Slot,
    pub to: Slot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabSelector {
    active: Slot,
}

impl TabSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Slot {
        self.active
    }

    pub fn is_active(&self, slot: Slot) -> bool {
        self.active == slot
    }

    /// Activate `slot`. Returns `None` when it was already active.
    pub fn select(&mut self, slot: Slot) -> Option<TabChange> {
        if self.active == slot {
            return None;
        }
        let change = TabChange {
            from: self.active,
            to: slot,
        };
        self.active = slot;
        Some(change)
    }

    /// Activate a tab by its control name (`code`, `cpp`, `input`, `output`).
    pub fn select_named(&mut self, name: &str) -> Result<Option<TabChange>> {
        let slot = name
            .parse::<Slot>()
            .map_err(|_| PanelError::UnknownTab(name.to_string()))?;
        Ok(self.select(slot))
    }

    /// Back to the default tab
    pub fn reset(&mut self) -> Option<TabChange> {
        self.select(Slot::default())
    }
}
