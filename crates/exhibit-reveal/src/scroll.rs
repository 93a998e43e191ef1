//! Scroll indicators
//!
//! The reading-progress bar and the back-to-top control, both driven by the
//! vertical scroll offset alone.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollIndicators {
    /// Share of the scrollable height already scrolled, in percent
    pub progress: f64,
    pub back_to_top: bool,
}

impl ScrollIndicators {
    /// `document_height` is the full scroll height, `viewport_height` the
    /// client height. A page that does not scroll reports no progress.
    pub fn measure(
        scroll_y: f64,
        viewport_height: f64,
        document_height: f64,
        back_to_top_offset: f64,
    ) -> Self {
        let scrollable = document_height - viewport_height;
        let progress = if scrollable > 0.0 {
            (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            progress,
            back_to_top: scroll_y > back_to_top_offset,
        }
    }
}
