//! Scene document: the ordered list of entities that makes up a board.

use crate::shapes::Entity;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Scene errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Position of an entity in its scene.
///
/// Indices are only stable while nothing inserts or removes entities before
/// them, which is why the editor holds one for a single gesture at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityIndex(pub usize);

/// An ordered collection of entities.
///
/// Order is paint order (later entities draw on top). The scene serializes
/// as a bare JSON array of tagged entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Append an entity on top of the scene.
    pub fn append(&mut self, entity: impl Into<Entity>) -> EntityIndex {
        self.entities.push(entity.into());
        EntityIndex(self.entities.len() - 1)
    }

    /// Remove an entity. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: EntityIndex) -> Option<Entity> {
        (index.0 < self.entities.len()).then(|| self.entities.remove(index.0))
    }

    /// Replace `start..end` with `replacement`, keeping everything else in
    /// place. The range is clamped to the scene.
    pub fn replace_range(
        &mut self,
        start: EntityIndex,
        end: EntityIndex,
        replacement: impl IntoIterator<Item = Entity>,
    ) {
        let range = self.clamp(start.0..end.0);
        self.entities.splice(range, replacement);
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.entities.len());
        range.start.min(end)..end
    }

    /// Topmost entity (last in paint order) that contains `point` and
    /// satisfies `predicate`.
    pub fn find_topmost_at(
        &self,
        point: Point,
        tolerance: f64,
        predicate: impl Fn(&Entity) -> bool,
    ) -> Option<EntityIndex> {
        self.entities
            .iter()
            .enumerate()
            .rev()
            .find(|(_, entity)| predicate(*entity) && entity.hit_test(point, tolerance))
            .map(|(index, _)| EntityIndex(index))
    }

    /// Replace the text of a label or note. Returns false if the index is
    /// out of range or the entity has no text.
    pub fn set_text(&mut self, index: EntityIndex, text: String) -> bool {
        self.entities
            .get_mut(index.0)
            .is_some_and(|entity| entity.set_text(text))
    }

    /// Move an entity to `point` (see [`Entity::move_to`]).
    pub fn move_to(&mut self, index: EntityIndex, point: Point, delta: Vec2) -> bool {
        match self.entities.get_mut(index.0) {
            Some(entity) => {
                entity.move_to(point, delta);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: EntityIndex) -> Option<&Entity> {
        self.entities.get(index.0)
    }

    pub fn get_mut(&mut self, index: EntityIndex) -> Option<&mut Entity> {
        self.entities.get_mut(index.0)
    }

    /// Entities in paint order (back to front).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Get the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Get the bounding box of all entities.
    pub fn bounds(&self) -> Option<Rect> {
        self.entities
            .iter()
            .map(Entity::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deserialize a scene, treating anything unreadable as an empty board.
    pub fn from_json_or_empty(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable scene: {}", e);
            Self::new()
        })
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{HexColor, StickyNote, Stroke, TextLabel};

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke::from_points(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            HexColor::parse("#3366ff").unwrap(),
        )
    }

    #[test]
    fn test_append_returns_index() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.append(stroke(&[(0.0, 0.0)])), EntityIndex(0));
        assert_eq!(scene.append(StickyNote::new(Point::ZERO)), EntityIndex(1));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_remove_at() {
        let mut scene = Scene::new();
        scene.append(stroke(&[(0.0, 0.0)]));
        scene.append(StickyNote::new(Point::ZERO));

        assert!(scene.remove_at(EntityIndex(5)).is_none());
        let removed = scene.remove_at(EntityIndex(0)).unwrap();
        assert!(matches!(removed, Entity::Stroke(_)));
        assert!(matches!(scene.get(EntityIndex(0)), Some(Entity::StickyNote(_))));
    }

    #[test]
    fn test_replace_range_with_fragments() {
        let mut scene = Scene::new();
        scene.append(StickyNote::new(Point::ZERO));
        scene.append(stroke(&[(0.0, 0.0), (1.0, 1.0)]));
        scene.append(StickyNote::new(Point::new(5.0, 5.0)));

        let fragments = vec![
            Entity::from(stroke(&[(0.0, 0.0), (1.0, 0.0)])),
            Entity::from(stroke(&[(2.0, 0.0), (3.0, 0.0)])),
        ];
        scene.replace_range(EntityIndex(1), EntityIndex(2), fragments);

        assert_eq!(scene.len(), 4);
        assert!(matches!(scene.get(EntityIndex(0)), Some(Entity::StickyNote(_))));
        assert!(matches!(scene.get(EntityIndex(1)), Some(Entity::Stroke(_))));
        assert!(matches!(scene.get(EntityIndex(2)), Some(Entity::Stroke(_))));
        assert!(matches!(scene.get(EntityIndex(3)), Some(Entity::StickyNote(_))));

        scene.replace_range(EntityIndex(1), EntityIndex(3), Vec::new());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_replace_range_clamps() {
        let mut scene = Scene::new();
        scene.append(StickyNote::new(Point::ZERO));
        scene.replace_range(EntityIndex(3), EntityIndex(9), vec![Entity::from(stroke(&[]))]);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_topmost_wins() {
        let mut scene = Scene::new();
        scene.append(StickyNote::new(Point::new(0.0, 0.0)));
        scene.append(StickyNote::new(Point::new(50.0, 50.0)));

        let hit = scene.find_topmost_at(Point::new(100.0, 75.0), 5.0, |_| true);
        assert_eq!(hit, Some(EntityIndex(1)));

        let only_first = scene.find_topmost_at(Point::new(10.0, 10.0), 5.0, |_| true);
        assert_eq!(only_first, Some(EntityIndex(0)));

        assert_eq!(scene.find_topmost_at(Point::new(900.0, 900.0), 5.0, |_| true), None);
    }

    #[test]
    fn test_predicate_filters_hits() {
        let mut scene = Scene::new();
        scene.append(StickyNote::new(Point::new(0.0, 0.0)));
        scene.append(stroke(&[(10.0, 10.0), (20.0, 20.0)]));

        let any = scene.find_topmost_at(Point::new(10.0, 10.0), 5.0, |_| true);
        assert_eq!(any, Some(EntityIndex(1)));

        let editable = scene.find_topmost_at(Point::new(10.0, 10.0), 5.0, Entity::is_editable);
        assert_eq!(editable, Some(EntityIndex(0)));
    }

    #[test]
    fn test_set_text() {
        let mut scene = Scene::new();
        scene.append(stroke(&[(0.0, 0.0)]));
        scene.append(TextLabel::new(Point::ZERO, "old".into(), HexColor::black()));

        assert!(!scene.set_text(EntityIndex(0), "x".into()));
        assert!(!scene.set_text(EntityIndex(7), "x".into()));
        assert!(scene.set_text(EntityIndex(1), "new".into()));
        assert_eq!(scene.get(EntityIndex(1)).and_then(Entity::text), Some("new"));
    }

    #[test]
    fn test_bounds() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        scene.append(stroke(&[(-10.0, 0.0), (0.0, 5.0)]));
        scene.append(StickyNote::new(Point::new(100.0, 100.0)));
        assert_eq!(scene.bounds(), Some(Rect::new(-10.0, 0.0, 250.0, 200.0)));
    }

    #[test]
    fn test_json_shape() {
        let mut scene = Scene::new();
        scene.append(stroke(&[(1.0, 2.0), (3.0, 4.0)]));
        scene.append(TextLabel::new(Point::new(5.0, 6.0), "hi".into(), HexColor::black()));
        scene.append(StickyNote::new(Point::new(7.0, 8.0)));

        let value: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        let expected = serde_json::json!([
            {"type": "path", "points": [{"x": 1.0, "y": 2.0}, {"x": 3.0, "y": 4.0}], "color": "#3366ff"},
            {"type": "text", "x": 5.0, "y": 6.0, "text": "hi", "color": "#000000"},
            {"type": "sticky", "x": 7.0, "y": 8.0, "width": 150.0, "height": 100.0, "text": "Double click to edit"},
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_roundtrip() {
        let mut scene = Scene::new();
        let index = scene.append(stroke(&[(1.0, 2.0), (3.0, 4.0), (5.5, -6.25)]));
        scene.append(TextLabel::new(Point::new(5.0, 6.0), String::new(), HexColor::parse("#abcdef").unwrap()));
        let note = scene.append(StickyNote::new(Point::new(7.0, 8.0)));
        scene.set_text(note, "edited".into());
        scene.move_to(index, Point::ZERO, Vec2::new(1.0, 1.0));

        let loaded = Scene::from_json(&scene.to_json().unwrap()).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_loads_original_board_format() {
        let json = r##"[
            {"type":"path","points":[{"x":10,"y":20},{"x":11,"y":22}],"color":"#ff0000"},
            {"type":"text","x":100,"y":50,"text":"Hello","color":"#000000"},
            {"type":"sticky","x":300,"y":200,"text":"Double click to edit","width":150,"height":100}
        ]"##;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.len(), 3);
        let path = scene.get(EntityIndex(0)).and_then(Entity::as_stroke).unwrap();
        assert_eq!(path.points[1], Point::new(11.0, 22.0));
    }

    #[test]
    fn test_malformed_json() {
        assert!(Scene::from_json("not json").is_err());
        assert!(Scene::from_json(r#"[{"type":"sticky","x":1}]"#).is_err());
        assert!(Scene::from_json(r#"[{"type":"circle"}]"#).is_err());
        assert!(Scene::from_json(r#"{"objects": []}"#).is_err());
        assert!(Scene::from_json_or_empty(r#"[{"type":"path"}]"#).is_empty());
    }
}
