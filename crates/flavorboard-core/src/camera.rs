//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom factor the camera accepts.
pub const MIN_ZOOM: f64 = 0.3;
/// Largest zoom factor the camera accepts.
pub const MAX_ZOOM: f64 = 4.0;
/// Zoom change per unit of wheel delta.
pub const WHEEL_ZOOM_SPEED: f64 = 0.001;

/// Camera manages the view transform for the canvas.
///
/// The offset is in device pixels, the zoom is a plain scale factor
/// (1.0 = world units map 1:1 to device pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in device pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with a custom zoom range. The initial zoom is 1.0
    /// clamped into the range.
    pub fn with_zoom_range(min_zoom: f64, max_zoom: f64) -> Self {
        let mut camera = Self {
            min_zoom,
            max_zoom,
            ..Self::default()
        };
        camera.zoom = camera.clamp_zoom(1.0);
        camera
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.zoom,
            (screen_point.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.zoom + self.offset.x,
            world_point.y * self.zoom + self.offset.y,
        )
    }

    /// The region of world space covered by a viewport of the given size.
    pub fn visible_world_rect(&self, viewport: Size) -> Rect {
        let origin = self.screen_to_world(Point::ZERO);
        Rect::new(
            origin.x,
            origin.y,
            origin.x + viewport.width / self.zoom,
            origin.y + viewport.height / self.zoom,
        )
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Change the zoom by `delta`, keeping the given screen point fixed.
    ///
    /// Returns `false` and leaves the camera untouched when the resulting
    /// zoom would fall outside `[min_zoom, max_zoom]`.
    pub fn zoom_at(&mut self, screen_point: Point, delta: f64) -> bool {
        let new_zoom = self.zoom + delta;
        if !(self.min_zoom..=self.max_zoom).contains(&new_zoom) {
            return false;
        }

        // Scaling the anchor-to-offset vector by new/old zoom keeps the
        // world point under the cursor in place.
        let scale = delta / self.zoom;
        self.offset = Vec2::new(
            self.offset.x - (screen_point.x - self.offset.x) * scale,
            self.offset.y - (screen_point.y - self.offset.y) * scale,
        );
        self.zoom = new_zoom;
        true
    }

    /// Zoom in response to a wheel event. Positive deltas zoom out.
    pub fn zoom_by_wheel(&mut self, screen_point: Point, wheel_delta: f64) -> bool {
        self.zoom_at(screen_point, -wheel_delta * WHEEL_ZOOM_SPEED)
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = self.clamp_zoom(1.0);
    }
}
