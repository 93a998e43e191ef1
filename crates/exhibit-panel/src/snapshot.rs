//! Panel snapshots
//!
//! What a renderer needs to draw the panel, published after every change.

use serde::Serialize;

use exhibit_content::{RequestToken, ResolvedContent, Slot, SlotContent};
use exhibit_page::TriggerId;

use crate::position::Point;
use crate::state::PanelState;

/// How the panel is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Placed next to its trigger
    Floating,
    /// Centred over the backdrop
    Modal,
    /// The page lacks the panel's display regions; all slots are drawn as one
    /// labelled text block
    Minimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub slot: Slot,
    pub active: bool,
    pub content: SlotContent,
    /// Literal text for the slot's region
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub state: PanelState,
    pub presentation: Presentation,
    pub active_tab: Slot,
    pub trigger: Option<TriggerId>,
    /// Label of the trigger that opened the panel
    pub title: Option<String>,
    pub token: Option<RequestToken>,
    pub position: Option<Point>,
    /// Empty while closed
    pub slots: Vec<SlotView>,
}

impl PanelSnapshot {
    pub(crate) fn new(
        state: PanelState,
        presentation: Presentation,
        active_tab: Slot,
        trigger: Option<TriggerId>,
        title: Option<String>,
        position: Option<Point>,
        content: Option<&ResolvedContent>,
    ) -> Self {
        let slots = content
            .map(|content| {
                Slot::ALL
                    .into_iter()
                    .map(|slot| SlotView {
                        slot,
                        active: slot == active_tab,
                        content: content.get(slot).clone(),
                        text: content.text(slot),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            state,
            presentation,
            active_tab,
            trigger,
            title,
            token: content.map(|c| c.token()),
            position,
            slots,
        }
    }

    pub fn closed(presentation: Presentation) -> Self {
        Self::new(
            PanelState::Closed,
            presentation,
            Slot::default(),
            None,
            None,
            None,
            None,
        )
    }

    pub fn slot(&self, slot: Slot) -> Option<&SlotView> {
        self.slots.iter().find(|view| view.slot == slot)
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.slot(slot).map(|view| view.text.as_str())
    }

    /// Every slot as one block, active slot marked. Used by the minimal
    /// presentation.
    pub fn minimal_text(&self) -> String {
        self.slots
            .iter()
            .map(|view| {
                let marker = if view.active { " *" } else { "" };
                format!("[{}]{}\n{}", view.slot, marker, view.text)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
