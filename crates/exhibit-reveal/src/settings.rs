use serde::{Deserialize, Serialize};

use crate::error::RevealError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Visible proportion at which an element is revealed
    pub threshold: f64,
    /// Scroll offset past which the back-to-top control is shown
    pub back_to_top_offset: f64,
}

impl RevealSettings {
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_finite() && self.threshold > 0.0 && self.threshold <= 1.0 {
            Ok(())
        } else {
            Err(RevealError::InvalidThreshold(self.threshold))
        }
    }
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            back_to_top_offset: 300.0,
        }
    }
}
