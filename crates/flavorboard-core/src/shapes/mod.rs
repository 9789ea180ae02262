//! Entity definitions for the whiteboard.

mod sticky;
mod stroke;
mod text;

pub use sticky::StickyNote;
pub use stroke::Stroke;
pub use text::TextLabel;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A color that could not be parsed as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?}")]
pub struct InvalidColor(pub String);

/// Serializable color in the `#rrggbb` form produced by the host color picker.
///
/// Scenes loaded from disk may carry strings that are not valid hex colors;
/// they are kept verbatim so a save reproduces them, and render as black.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn black() -> Self {
        Self("#000000".to_string())
    }

    /// Parse and normalize (lowercase) a `#rrggbb` string.
    pub fn parse(value: &str) -> Result<Self, InvalidColor> {
        match parse_rgb(value) {
            Some(_) => Ok(Self(value.to_ascii_lowercase())),
            None => Err(InvalidColor(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the color as a peniko Color (black if unparseable).
    pub fn to_color(&self) -> Color {
        let (r, g, b) = parse_rgb(&self.0).unwrap_or((0, 0, 0));
        Color::from_rgba8(r, g, b, 255)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::black()
    }
}

impl FromStr for HexColor {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&HexColor> for Color {
    fn from(color: &HexColor) -> Self {
        color.to_color()
    }
}

fn parse_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// One drawable item in the scene.
///
/// Serialized with a `type` tag so the persisted form is
/// `{"type": "path" | "text" | "sticky", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entity {
    #[serde(rename = "path")]
    Stroke(Stroke),
    #[serde(rename = "text")]
    TextLabel(TextLabel),
    #[serde(rename = "sticky")]
    StickyNote(StickyNote),
}

impl Entity {
    /// Check if a world point hits this entity.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Entity::Stroke(s) => s.hit_test(point, tolerance),
            Entity::TextLabel(t) => t.hit_test(point),
            Entity::StickyNote(n) => n.hit_test(point),
        }
    }

    /// Bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Entity::Stroke(s) => s.bounds(),
            Entity::TextLabel(t) => t.bounds(),
            Entity::StickyNote(n) => n.bounds(),
        }
    }

    /// Move the entity's anchor to `point`. Strokes have no anchor and are
    /// shifted by `delta` instead.
    pub fn move_to(&mut self, point: Point, delta: Vec2) {
        match self {
            Entity::Stroke(s) => s.translate(delta),
            Entity::TextLabel(t) => t.set_position(point),
            Entity::StickyNote(n) => n.set_position(point),
        }
    }

    /// Text content, for entities that carry text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Entity::Stroke(_) => None,
            Entity::TextLabel(t) => Some(&t.text),
            Entity::StickyNote(n) => Some(&n.text),
        }
    }

    /// Replace the text content. Returns false for strokes.
    pub fn set_text(&mut self, text: String) -> bool {
        match self {
            Entity::Stroke(_) => false,
            Entity::TextLabel(t) => {
                t.text = text;
                true
            }
            Entity::StickyNote(n) => {
                n.text = text;
                true
            }
        }
    }

    /// Whether double-click editing applies to this entity.
    pub fn is_editable(&self) -> bool {
        matches!(self, Entity::TextLabel(_) | Entity::StickyNote(_))
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Entity::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            Entity::Stroke(s) => Some(s),
            _ => None,
        }
    }

    /// Short name used in log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Entity::Stroke(_) => "path",
            Entity::TextLabel(_) => "text",
            Entity::StickyNote(_) => "sticky",
        }
    }
}

impl From<Stroke> for Entity {
    fn from(stroke: Stroke) -> Self {
        Entity::Stroke(stroke)
    }
}

impl From<TextLabel> for Entity {
    fn from(label: TextLabel) -> Self {
        Entity::TextLabel(label)
    }
}

impl From<StickyNote> for Entity {
    fn from(note: StickyNote) -> Self {
        Entity::StickyNote(note)
    }
}
