//! Floating panel placement
//!
//! Trigger rectangles arrive in viewport space; placements are returned in
//! document space so the panel stays put when the page scrolls.

use serde::{Deserialize, Serialize};

/// Viewport-space rectangle, as reported for an element's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Client width, excluding scrollbars
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn scrolled(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

/// Document-space top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

/// Where the trigger was when it was activated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub trigger: Rect,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Space between trigger and panel
    pub gap: f64,
    /// Minimum distance from the viewport's left and right edges
    pub inset: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            gap: 15.0,
            inset: 10.0,
        }
    }
}

impl Placement {
    /// Above the trigger and centred on it, kept inside the viewport
    /// horizontally, flipped below the trigger when it would start above the
    /// visible area.
    pub fn place(&self, trigger: Rect, panel: PanelSize, viewport: Viewport) -> Point {
        let min_left = viewport.scroll_x + self.inset;
        let max_left = viewport.scroll_x + viewport.width - panel.width - self.inset;

        let mut left =
            viewport.scroll_x + trigger.left + trigger.width / 2.0 - panel.width / 2.0;
        if left < min_left {
            left = min_left;
        }
        if left > max_left {
            // A panel wider than the viewport keeps its left edge visible
            left = max_left.max(min_left);
        }

        let mut top = viewport.scroll_y + trigger.top - panel.height - self.gap;
        if top < viewport.scroll_y {
            top = viewport.scroll_y + trigger.bottom() + self.gap;
        }

        Point { left, top }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL: PanelSize = PanelSize {
        width: 700.0,
        height: 450.0,
    };

    #[test]
    fn test_prefers_centered_above() {
        let trigger = Rect::new(600.0, 600.0, 100.0, 40.0);
        let viewport = Viewport::new(1400.0, 900.0);

        let point = Placement::default().place(trigger, PANEL, viewport);
        assert_eq!(point.left, 300.0);
        assert_eq!(point.top, 600.0 - 450.0 - 15.0);
    }

    #[test]
    fn test_clamps_left_edge() {
        let trigger = Rect::new(5.0, 600.0, 80.0, 40.0);
        let point = Placement::default().place(trigger, PANEL, Viewport::new(1400.0, 900.0));
        assert_eq!(point.left, 10.0);
    }

    #[test]
    fn test_clamps_right_edge() {
        let viewport = Viewport::new(1280.0, 800.0);
        for trigger_left in [900.0, 1100.0, 1200.0, 1270.0] {
            let trigger = Rect::new(trigger_left, 500.0, 60.0, 30.0);
            let point = Placement::default().place(trigger, PANEL, viewport);
            assert!(point.left + PANEL.width <= viewport.width - 10.0);
        }
    }

    #[test]
    fn test_flips_below_when_clipped_above() {
        let trigger = Rect::new(600.0, 100.0, 100.0, 40.0);
        let viewport = Viewport::new(1400.0, 900.0);

        let point = Placement::default().place(trigger, PANEL, viewport);
        assert_eq!(point.top, 140.0 + 15.0);
    }

    #[test]
    fn test_uses_document_coordinates() {
        let trigger = Rect::new(600.0, 600.0, 100.0, 40.0);
        let viewport = Viewport::new(1400.0, 900.0).scrolled(0.0, 2000.0);

        let point = Placement::default().place(trigger, PANEL, viewport);
        assert_eq!(point.top, 2000.0 + 600.0 - 450.0 - 15.0);

        // Near the top of the visible area the flip happens in document space too
        let high = Rect::new(600.0, 50.0, 100.0, 40.0);
        let point = Placement::default().place(high, PANEL, viewport);
        assert_eq!(point.top, 2000.0 + 90.0 + 15.0);
    }

    #[test]
    fn test_panel_wider_than_viewport_pins_left() {
        let trigger = Rect::new(100.0, 600.0, 50.0, 20.0);
        let point = Placement::default().place(trigger, PANEL, Viewport::new(500.0, 900.0));
        assert_eq!(point.left, 10.0);
    }
}
