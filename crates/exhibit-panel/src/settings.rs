//! Panel settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::position::{PanelSize, Placement};

/// Page style of the panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelVariant {
    /// Positioned next to the trigger
    #[default]
    Floating,
    /// Centred over a full-page backdrop
    Modal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub variant: PanelVariant,
    /// Length of the opening phase in milliseconds
    pub opening_ms: u64,
    /// Length of the closing phase in milliseconds
    pub closing_ms: u64,
    pub width: f64,
    pub height: f64,
    pub placement: Placement,
}

impl PanelSettings {
    pub fn opening(&self) -> Duration {
        Duration::from_millis(self.opening_ms)
    }

    pub fn closing(&self) -> Duration {
        Duration::from_millis(self.closing_ms)
    }

    pub fn panel_size(&self) -> PanelSize {
        PanelSize {
            width: self.width,
            height: self.height,
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            variant: PanelVariant::Floating,
            opening_ms: 10,
            closing_ms: 200,
            width: 700.0,
            height: 450.0,
            placement: Placement::default(),
        }
    }
}
