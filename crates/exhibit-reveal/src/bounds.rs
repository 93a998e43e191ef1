//! Document-space rectangles

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
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

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Bounds::new(left, top, right - left, bottom - top))
    }

    /// Share of this rectangle's area inside `visible`, in `[0, 1]`.
    ///
    /// A zero-area rectangle counts as fully visible when it touches the
    /// visible area and invisible otherwise.
    pub fn visible_ratio(&self, visible: &Bounds) -> f64 {
        let area = self.area();
        if area <= 0.0 {
            return if visible.contains_point(self.left, self.top) {
                1.0
            } else {
                0.0
            };
        }

        match self.intersection(visible) {
            Some(overlap) => (overlap.area() / area).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}
