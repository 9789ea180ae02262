//! Sticky note.

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// A filled rectangle with text, anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
}

impl StickyNote {
    pub const DEFAULT_WIDTH: f64 = 150.0;
    pub const DEFAULT_HEIGHT: f64 = 100.0;
    pub const PLACEHOLDER: &'static str = "Double click to edit";

    /// Create a note of default size with placeholder text.
    pub fn new(position: Point) -> Self {
        Self::with_size(position, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT, Self::PLACEHOLDER.to_string())
    }

    pub fn with_size(position: Point, width: f64, height: f64, text: String) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width,
            height,
            text,
        }
    }

    /// Fill color shared by every note.
    pub fn fill_color() -> Color {
        Color::from_rgba8(0xff, 0xf1, 0x76, 0xff)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn hit_test(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let note = StickyNote::new(Point::new(10.0, 20.0));
        assert_eq!(note.text, "Double click to edit");
        assert_eq!(note.bounds(), Rect::new(10.0, 20.0, 160.0, 120.0));
    }

    #[test]
    fn test_hit_test() {
        let note = StickyNote::new(Point::new(0.0, 0.0));
        assert!(note.hit_test(Point::new(0.0, 0.0)));
        assert!(note.hit_test(Point::new(150.0, 100.0)));
        assert!(note.hit_test(Point::new(75.0, 50.0)));
        assert!(!note.hit_test(Point::new(-1.0, 50.0)));
        assert!(!note.hit_test(Point::new(75.0, 101.0)));
    }

    #[test]
    fn test_fill_color() {
        let rgba = StickyNote::fill_color().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 241, 118, 255));
    }
}
