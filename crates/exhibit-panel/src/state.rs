//! Panel State Machine
//!
//! ```text
//! Closed → Opening → Open → Closing → Closed
//! ```
//! `Opening` and `Closing` are time-bounded: they last for the configured
//! phase duration and then advance on their own.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    /// Hidden and detached; no content
    #[default]
    Closed,
    /// Visible, opening transition playing
    Opening,
    /// Visible and settled
    Open,
    /// Closing transition playing
    Closing,
}

impl PanelState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: PanelState) -> bool {
        match (self, target) {
            // Any state can start opening; newest open request wins
            (_, PanelState::Opening) => true,
            (PanelState::Opening, PanelState::Open) => true,
            // Close is accepted while the panel is shown
            (PanelState::Opening, PanelState::Closing) => true,
            (PanelState::Open, PanelState::Closing) => true,
            (PanelState::Closing, PanelState::Closed) => true,
            // Same state is always valid (no-op)
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    /// Panel is in the document and receives input
    pub fn is_shown(&self) -> bool {
        matches!(self, PanelState::Opening | PanelState::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelState::Closed => "closed",
            PanelState::Opening => "opening",
            PanelState::Open => "open",
            PanelState::Closing => "closing",
        }
    }
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PanelState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "closed" => Ok(PanelState::Closed),
            "opening" => Ok(PanelState::Opening),
            "open" => Ok(PanelState::Open),
            "closing" => Ok(PanelState::Closing),
            _ => Err(format!("Unknown panel state: {}", s)),
        }
    }
}
