//! Canvas editing session: scene, camera, tools and the pointer state machine.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::eraser::erase_in_place;
use crate::input::PointerEvent;
use crate::scene::{EntityIndex, Scene, SceneResult};
use crate::shapes::{Entity, HexColor, StickyNote, Stroke, TextLabel};
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Size};

/// A request for text the host must answer (for example with a modal
/// prompt or an inline editor).
#[derive(Debug, Clone, PartialEq)]
pub enum TextRequest {
    /// Text for a new label placed at `position` (world coordinates).
    NewLabel { position: Point },
    /// Replacement text for an existing label or note.
    Edit { index: EntityIndex, current: String },
}

/// Capability to obtain a string from the user.
///
/// `None` means the user cancelled.
pub trait TextSource {
    fn request_text(&mut self, request: &TextRequest) -> Option<String>;
}

impl<F> TextSource for F
where
    F: FnMut(&TextRequest) -> Option<String>,
{
    fn request_text(&mut self, request: &TextRequest) -> Option<String> {
        self(request)
    }
}

/// A text source that always cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoText;

impl TextSource for NoText {
    fn request_text(&mut self, _request: &TextRequest) -> Option<String> {
        None
    }
}

/// Pointer gesture in progress.
///
/// The held entity is referenced by index. Only `Erasing` ever runs the
/// eraser, so an index held by `Drawing` or `Dragging` cannot be shifted by
/// an erase while it is alive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Drawing {
        stroke: EntityIndex,
    },
    Erasing,
    Dragging {
        entity: EntityIndex,
        /// World position of the previous pointer sample.
        last: Point,
    },
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

/// The canvas editing session.
///
/// Owns the scene and camera; every pointer event arrives here in device
/// coordinates and is mapped to world coordinates before it touches the
/// scene. Methods return `true` when the host should repaint.
#[derive(Debug, Clone)]
pub struct Canvas {
    scene: Scene,
    /// Camera for view transform.
    pub camera: Camera,
    tools: ToolManager,
    gesture: Gesture,
    eraser_cursor: Option<Point>,
    config: EditorConfig,
    /// Viewport size in device pixels.
    pub viewport_size: Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty scene.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let tools = ToolManager {
            current_tool: ToolKind::default(),
            current_color: config.default_color.clone(),
            eraser_radius: f64::from(config.eraser_radius.max(1)),
        };
        Self {
            scene: Scene::new(),
            camera: Camera::with_zoom_range(config.min_zoom, config.max_zoom),
            tools,
            gesture: Gesture::Idle,
            eraser_cursor: None,
            config,
            viewport_size: Size::new(800.0, 600.0),
        }
    }

    /// Create a canvas with an existing scene.
    pub fn with_scene(scene: Scene) -> Self {
        let mut canvas = Self::new();
        canvas.scene = scene;
        canvas
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn color(&self) -> &HexColor {
        &self.tools.current_color
    }

    pub fn eraser_radius(&self) -> f64 {
        self.tools.eraser_radius
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Last known eraser position in world coordinates, for the preview ring.
    pub fn eraser_cursor(&self) -> Option<Point> {
        self.eraser_cursor
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Switch tools. Any gesture in progress ends.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        self.end_gesture();
        self.tools.set_tool(tool);
        if tool != ToolKind::Erase {
            self.eraser_cursor = None;
        }
        true
    }

    /// Set the active color from a `#rrggbb` string.
    pub fn set_color(&mut self, color: &str) -> bool {
        self.tools.set_color(color)
    }

    pub fn set_eraser_radius(&mut self, radius: u32) -> bool {
        self.tools.set_eraser_radius(radius)
    }

    /// Replace the whole scene (e.g. after loading a board).
    pub fn load_scene(&mut self, scene: Scene) {
        self.end_gesture();
        log::info!("Loaded scene with {} entities", scene.len());
        self.scene = scene;
    }

    /// Serialize the current scene for persistence.
    pub fn scene_json(&self) -> SceneResult<String> {
        self.scene.to_json()
    }

    /// Dispatch a pointer event from the host.
    pub fn handle_event(&mut self, event: PointerEvent, text: &mut dyn TextSource) -> bool {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position, text),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
            PointerEvent::DoubleClick { position } => self.double_click(position, text),
            PointerEvent::Wheel { position, delta_y } => self.wheel(position, delta_y),
        }
    }

    pub fn pointer_down(&mut self, screen_point: Point, text: &mut dyn TextSource) -> bool {
        // A missed pointer-up must not leave a stale gesture behind.
        self.end_gesture();
        let world = self.camera.screen_to_world(screen_point);

        match self.tools.current_tool {
            ToolKind::Draw => {
                let mut stroke = Stroke::new(self.tools.current_color.clone());
                stroke.add_point(world);
                let index = self.scene.append(stroke);
                self.gesture = Gesture::Drawing { stroke: index };
                log::debug!("Started stroke {:?}", index);
                true
            }
            ToolKind::Erase => {
                self.eraser_cursor = Some(world);
                self.gesture = Gesture::Erasing;
                erase_in_place(&mut self.scene, world, self.tools.eraser_radius);
                true
            }
            ToolKind::Text => {
                let request = TextRequest::NewLabel { position: world };
                match text.request_text(&request) {
                    Some(content) if !content.is_empty() => {
                        let label = TextLabel::new(world, content, self.tools.current_color.clone());
                        self.scene.append(label);
                        true
                    }
                    _ => false,
                }
            }
            ToolKind::Sticky => {
                self.scene.append(StickyNote::with_size(
                    world,
                    self.config.sticky_width,
                    self.config.sticky_height,
                    self.config.sticky_placeholder.clone(),
                ));
                true
            }
            ToolKind::Select => {
                match self
                    .scene
                    .find_topmost_at(world, self.config.hit_tolerance, |_| true)
                {
                    Some(entity) => {
                        log::debug!("Holding {:?}", entity);
                        self.gesture = Gesture::Dragging { entity, last: world };
                    }
                    None => self.gesture = Gesture::Idle,
                }
                false
            }
        }
    }

    pub fn pointer_move(&mut self, screen_point: Point) -> bool {
        let world = self.camera.screen_to_world(screen_point);

        if self.tools.current_tool == ToolKind::Erase {
            self.eraser_cursor = Some(world);
        }

        match self.gesture {
            Gesture::Idle => self.tools.current_tool == ToolKind::Erase,
            Gesture::Drawing { stroke } => {
                if let Some(stroke) = self.scene.get_mut(stroke).and_then(Entity::as_stroke_mut) {
                    stroke.add_point(world);
                }
                true
            }
            Gesture::Erasing => {
                erase_in_place(&mut self.scene, world, self.tools.eraser_radius);
                true
            }
            Gesture::Dragging { entity, last } => {
                let moved = self.scene.move_to(entity, world, world - last);
                self.gesture = Gesture::Dragging { entity, last: world };
                moved
            }
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        self.end_gesture()
    }

    /// The pointer left the canvas: end the gesture and hide the eraser ring.
    pub fn pointer_leave(&mut self) -> bool {
        let ended = self.end_gesture();
        let had_cursor = self.eraser_cursor.take().is_some();
        ended || had_cursor
    }

    fn end_gesture(&mut self) -> bool {
        let previous = std::mem::take(&mut self.gesture);
        if previous.is_active() {
            log::debug!("Ended gesture {:?}", previous);
        }
        previous.is_active()
    }

    /// Topmost label or note under a device point.
    pub fn editable_at(&self, screen_point: Point) -> Option<EntityIndex> {
        let world = self.camera.screen_to_world(screen_point);
        self.scene
            .find_topmost_at(world, self.config.hit_tolerance, Entity::is_editable)
    }

    /// Ask the host for replacement text for the label or note under the
    /// pointer. Cancelling leaves the text unchanged.
    pub fn double_click(&mut self, screen_point: Point, text: &mut dyn TextSource) -> bool {
        let Some(index) = self.editable_at(screen_point) else {
            return false;
        };
        let current = self
            .scene
            .get(index)
            .and_then(Entity::text)
            .unwrap_or_default()
            .to_string();

        match text.request_text(&TextRequest::Edit { index, current }) {
            Some(replacement) => self.set_text(index, replacement),
            None => false,
        }
    }

    /// Replace the text of a label or note.
    pub fn set_text(&mut self, index: EntityIndex, text: String) -> bool {
        self.scene.set_text(index, text)
    }

    /// Zoom around the pointer in response to a wheel event.
    pub fn wheel(&mut self, screen_point: Point, delta_y: f64) -> bool {
        self.camera.zoom_by_wheel(screen_point, delta_y)
    }
}
