//! Placing finished parts next to each other on the sheet.

use jointkit_core::Point;
use serde::{Deserialize, Serialize};

/// Overall size of a drawn part including its joint margins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartExtent {
    pub width: f64,
    pub height: f64,
}

impl PartExtent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Places parts left to right, wrapping into rows.
///
/// Each row is as tall as its tallest part; parts and rows are separated
/// by `spacing`.
#[derive(Debug, Clone, Copy)]
pub struct PartLayout {
    x: f64,
    y: f64,
    row_height: f64,
    spacing: f64,
    max_width: Option<f64>,
}

impl PartLayout {
    pub fn new(spacing: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            row_height: 0.0,
            spacing,
            max_width: None,
        }
    }

    /// Starts a new row automatically once a part would pass `width`.
    pub fn with_max_width(mut self, width: f64) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Origin for the next part of size `extent`.
    pub fn place(&mut self, extent: PartExtent) -> Point {
        if let Some(max) = self.max_width {
            if self.x > 0.0 && self.x + extent.width > max {
                self.next_row();
            }
        }
        let position = Point::new(self.x, self.y);
        self.x += extent.width + self.spacing;
        self.row_height = self.row_height.max(extent.height);
        position
    }

    pub fn next_row(&mut self) {
        self.y += self.row_height + self.spacing;
        self.x = 0.0;
        self.row_height = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_advance_and_wrap() {
        let mut layout = PartLayout::new(2.0).with_max_width(100.0);
        assert_eq!(layout.place(PartExtent::new(40.0, 10.0)), Point::new(0.0, 0.0));
        assert_eq!(layout.place(PartExtent::new(40.0, 30.0)), Point::new(42.0, 0.0));
        assert_eq!(layout.place(PartExtent::new(40.0, 5.0)), Point::new(0.0, 32.0));
    }
}
