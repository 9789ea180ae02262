//! Tool system for the whiteboard.

use crate::shapes::HexColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Draw,
    Erase,
    Text,
    Sticky,
}

impl ToolKind {
    /// All tools, in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Select,
            ToolKind::Draw,
            ToolKind::Erase,
            ToolKind::Text,
            ToolKind::Sticky,
        ]
    }

    /// Name used by the host toolbar.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Draw => "draw",
            ToolKind::Erase => "erase",
            ToolKind::Text => "text",
            ToolKind::Sticky => "sticky",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool: {0:?}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::all()
            .iter()
            .copied()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// Current tool and the settings the toolbar controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Color applied to new strokes and labels.
    pub current_color: HexColor,
    /// Eraser radius in world units.
    pub eraser_radius: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            current_color: HexColor::black(),
            eraser_radius: 20.0,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Set the color from a `#rrggbb` string. Invalid strings are ignored.
    pub fn set_color(&mut self, color: &str) -> bool {
        match HexColor::parse(color) {
            Ok(color) => {
                self.current_color = color;
                true
            }
            Err(e) => {
                log::debug!("Ignoring color change: {}", e);
                false
            }
        }
    }

    /// Set the eraser radius. Only positive radii are accepted.
    pub fn set_eraser_radius(&mut self, radius: u32) -> bool {
        if radius == 0 {
            return false;
        }
        self.eraser_radius = f64::from(radius);
        true
    }
}
