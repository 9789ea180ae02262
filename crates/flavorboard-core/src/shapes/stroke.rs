//! Freehand stroke.

use super::HexColor;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand drawing (series of world-space points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in the path, in drawing order.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: HexColor,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new(color: HexColor) -> Self {
        Self {
            points: Vec::new(),
            color,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, color: HexColor) -> Self {
        Self { points, color }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A stroke needs two points to draw anything.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// True if any stored point is strictly within `tolerance` of `point`
    /// on both axes.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.points
            .iter()
            .any(|p| (p.x - point.x).abs() < tolerance && (p.y - point.y).abs() < tolerance)
    }

    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |rect, p| {
                rect.union_pt(*p)
            })
    }

    /// Shift every point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    /// Polyline path for rendering.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(first) = points.next() {
            path.move_to(*first);
            for point in points {
                path.line_to(*point);
            }
        }
        path
    }

    /// Split the stroke around an eraser circle.
    ///
    /// Points farther than `radius` from `center` are kept; each maximal run
    /// of kept points with at least two points becomes a fragment carrying
    /// this stroke's color. Runs shorter than two points are dropped.
    pub fn fragments_outside(&self, center: Point, radius: f64) -> Vec<Stroke> {
        let mut fragments = Vec::new();
        let mut run: Vec<Point> = Vec::new();

        for &point in &self.points {
            if point.distance(center) > radius {
                run.push(point);
            } else {
                self.flush_run(&mut run, &mut fragments);
            }
        }
        self.flush_run(&mut run, &mut fragments);

        fragments
    }

    fn flush_run(&self, run: &mut Vec<Point>, fragments: &mut Vec<Stroke>) {
        if run.len() > 1 {
            fragments.push(Stroke::from_points(std::mem::take(run), self.color.clone()));
        } else {
            run.clear();
        }
    }

}
