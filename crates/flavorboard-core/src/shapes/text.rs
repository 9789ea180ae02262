//! Text label.

use super::HexColor;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A single line of text anchored at its baseline-left point.
///
/// Only `x`, `y`, `text` and `color` are persisted; the hit box size is a
/// property of the editor, not of the saved board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    /// The text content.
    pub text: String,
    pub color: HexColor,
    /// Width of the hit box, measured right from the anchor.
    #[serde(skip, default = "TextLabel::default_width")]
    pub width: f64,
    /// Height of the hit box, centered vertically on the anchor.
    #[serde(skip, default = "TextLabel::default_height")]
    pub height: f64,
}

impl TextLabel {
    pub const DEFAULT_WIDTH: f64 = 150.0;
    pub const DEFAULT_HEIGHT: f64 = 40.0;

    /// Create a new label with the default hit box.
    pub fn new(position: Point, text: String, color: HexColor) -> Self {
        Self {
            x: position.x,
            y: position.y,
            text,
            color,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }

    fn default_width() -> f64 {
        Self::DEFAULT_WIDTH
    }

    fn default_height() -> f64 {
        Self::DEFAULT_HEIGHT
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn bounds(&self) -> Rect {
        let half = self.height / 2.0;
        Rect::new(self.x, self.y - half, self.x + self.width, self.y + half)
    }

    /// Inclusive box test around the anchor.
    pub fn hit_test(&self, point: Point) -> bool {
        let bounds = self.bounds();
        point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
    }
}
