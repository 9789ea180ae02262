//! Input events delivered by the host, in device (screen) coordinates.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch/pen handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// Pointer left the canvas; ends any gesture like `Up`.
    Leave,
    DoubleClick { position: Point },
    /// Wheel scroll; positive `delta_y` scrolls down (zooms out).
    Wheel { position: Point, delta_y: f64 },
}

impl PointerEvent {
    /// Device-space position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::DoubleClick { position }
            | PointerEvent::Wheel { position, .. } => Some(position),
            PointerEvent::Leave => None,
        }
    }
}
