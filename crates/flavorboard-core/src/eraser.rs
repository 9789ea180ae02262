//! Stroke eraser.
//!
//! Erasing only ever touches freehand strokes. Labels and sticky notes are
//! passed through untouched. Every stroke is replaced in place by the
//! fragments that survive outside the eraser circle, so strokes too short to
//! draw (fewer than two points) disappear on any erase.

use crate::scene::{EntityIndex, Scene};
use crate::shapes::Entity;
use kurbo::Point;

/// Outcome of one eraser application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EraseStats {
    /// Strokes that lost points or were dropped.
    pub strokes_hit: usize,
    /// Fragments written back in place of those strokes.
    pub fragments: usize,
}

impl EraseStats {
    pub fn changed(&self) -> bool {
        self.strokes_hit > 0
    }
}

/// Erase everything within `radius` of `center`, returning the new scene.
pub fn erase_at(scene: &Scene, center: Point, radius: f64) -> Scene {
    let mut erased = scene.clone();
    erase_in_place(&mut erased, center, radius);
    erased
}

/// Erase within `radius` of `center`, splitting strokes in place.
pub fn erase_in_place(scene: &mut Scene, center: Point, radius: f64) -> EraseStats {
    let mut stats = EraseStats::default();

    // Walk back to front so replacing one stroke with several fragments never
    // shifts an index that is still to be visited.
    for index in (0..scene.len()).rev() {
        let Some(Entity::Stroke(stroke)) = scene.get(EntityIndex(index)) else {
            continue;
        };

        let fragments = stroke.fragments_outside(center, radius);
        // Fragments are subsequences, so a single full-length one is the
        // stroke itself.
        if let [whole] = fragments.as_slice() {
            if whole.len() == stroke.len() {
                continue;
            }
        }
        stats.strokes_hit += 1;
        stats.fragments += fragments.len();
        scene.replace_range(
            EntityIndex(index),
            EntityIndex(index + 1),
            fragments.into_iter().map(Entity::Stroke),
        );
    }

    if stats.changed() {
        log::debug!(
            "Erased at ({:.1}, {:.1}) r={}: {} strokes -> {} fragments",
            center.x,
            center.y,
            radius,
            stats.strokes_hit,
            stats.fragments
        );
    }
    stats
}
