//! Renderer trait and the draw-command backend.

use flavorboard_core::canvas::Canvas;
use flavorboard_core::shapes::{Entity, StickyNote};
use flavorboard_core::tools::ToolKind;
use kurbo::{Affine, BezPath, Cap, Circle, Join, Point, Rect, Size, Vec2};
use peniko::Color;

/// Offset of a sticky note's text from the note's top-left corner.
pub const STICKY_TEXT_INSET: Vec2 = Vec2::new(10.0, 25.0);

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in device pixels.
    pub viewport_size: Size,
    /// Color the visible area is cleared to.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
        }
    }

    /// Render at the canvas's own viewport size.
    pub fn for_canvas(canvas: &'a Canvas) -> Self {
        Self::new(canvas, canvas.viewport_size)
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// One drawing operation, in world coordinates once `SetTransform` is applied.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Replace the current world-to-device transform.
    SetTransform(Affine),
    /// Fill `rect` with the background color.
    Clear { rect: Rect, color: Color },
    Polyline {
        path: BezPath,
        color: Color,
        style: kurbo::Stroke,
    },
    /// Draw `text` with its baseline starting at `origin`.
    FillText {
        text: String,
        origin: Point,
        font_size: f64,
        color: Color,
    },
    FillRect { rect: Rect, color: Color },
    StrokeCircle {
        circle: Circle,
        color: Color,
        width: f64,
    },
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Renderer that records a frame as a list of [`DrawCommand`]s for the host
/// to replay on its drawing surface.
#[derive(Debug, Default)]
pub struct CommandRenderer {
    commands: Vec<DrawCommand>,
}

impl CommandRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last built frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn render_entity(&mut self, entity: &Entity, ctx: &RenderContext) {
        let config = ctx.canvas.config();
        match entity {
            Entity::Stroke(stroke) => {
                if stroke.is_empty() {
                    return;
                }
                self.commands.push(DrawCommand::Polyline {
                    path: stroke.to_path(),
                    color: stroke.color.to_color(),
                    style: kurbo::Stroke::new(config.stroke_width)
                        .with_caps(Cap::Round)
                        .with_join(Join::Round),
                });
            }
            Entity::TextLabel(label) => {
                self.commands.push(DrawCommand::FillText {
                    text: label.text.clone(),
                    origin: label.position(),
                    font_size: config.font_size,
                    color: label.color.to_color(),
                });
            }
            Entity::StickyNote(note) => {
                self.commands.push(DrawCommand::FillRect {
                    rect: note.bounds(),
                    color: StickyNote::fill_color(),
                });
                self.commands.push(DrawCommand::FillText {
                    text: note.text.clone(),
                    origin: note.position() + STICKY_TEXT_INSET,
                    font_size: config.font_size,
                    color: Color::from_rgba8(0, 0, 0, 255),
                });
            }
        }
    }
}

impl Renderer for CommandRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.commands.clear();
        let canvas = ctx.canvas;

        self.commands
            .push(DrawCommand::SetTransform(canvas.camera.transform()));
        self.commands.push(DrawCommand::Clear {
            rect: canvas.camera.visible_world_rect(ctx.viewport_size),
            color: self.background_color(ctx),
        });

        for entity in canvas.scene() {
            self.render_entity(entity, ctx);
        }

        if canvas.tool() == ToolKind::Erase {
            if let Some(center) = canvas.eraser_cursor() {
                self.commands.push(DrawCommand::StrokeCircle {
                    circle: Circle::new(center, canvas.eraser_radius()),
                    color: canvas.config().eraser_preview_color.to_color(),
                    width: 1.0,
                });
            }
        }

        log::trace!("Built frame with {} commands", self.commands.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flavorboard_core::scene::Scene;
    use flavorboard_core::shapes::{HexColor, Stroke, TextLabel};
    use flavorboard_core::NoText;

    fn rgba(color: Color) -> [u8; 4] {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    fn render(canvas: &Canvas) -> Vec<DrawCommand> {
        let mut renderer = CommandRenderer::new();
        renderer.build_scene(&RenderContext::new(canvas, Size::new(800.0, 600.0)));
        renderer.take_commands()
    }

    #[test]
    fn test_empty_canvas_frame() {
        let mut canvas = Canvas::new();
        canvas.camera.offset = Vec2::new(-100.0, 0.0);
        canvas.camera.zoom = 2.0;

        let commands = render(&canvas);
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::SetTransform(t) if t == canvas.camera.transform()));
        match &commands[1] {
            DrawCommand::Clear { rect, color } => {
                assert_eq!(*rect, Rect::new(50.0, 0.0, 450.0, 300.0));
                assert_eq!(rgba(*color), [255, 255, 255, 255]);
            }
            other => panic!("expected clear, got {other:?}"),
        }
    }

    #[test]
    fn test_entities_in_paint_order() {
        let scene = Scene::from_entities(vec![
            Stroke::from_points(
                vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
                HexColor::parse("#ff0000").unwrap(),
            )
            .into(),
            TextLabel::new(Point::new(5.0, 5.0), "hi".into(), HexColor::parse("#00ff00").unwrap()).into(),
            StickyNote::new(Point::new(20.0, 30.0)).into(),
        ]);
        let canvas = Canvas::with_scene(scene);
        let commands = render(&canvas);
        assert_eq!(commands.len(), 6);

        match &commands[2] {
            DrawCommand::Polyline { path, color, style } => {
                assert_eq!(path.elements().len(), 2);
                assert_eq!(rgba(*color), [255, 0, 0, 255]);
                assert!((style.width - 2.0).abs() < f64::EPSILON);
                assert_eq!(style.start_cap, Cap::Round);
                assert_eq!(style.join, Join::Round);
            }
            other => panic!("expected polyline, got {other:?}"),
        }
        match &commands[3] {
            DrawCommand::FillText { text, origin, font_size, color } => {
                assert_eq!(text, "hi");
                assert_eq!(*origin, Point::new(5.0, 5.0));
                assert!((font_size - 16.0).abs() < f64::EPSILON);
                assert_eq!(rgba(*color), [0, 255, 0, 255]);
            }
            other => panic!("expected label text, got {other:?}"),
        }
        match &commands[4] {
            DrawCommand::FillRect { rect, color } => {
                assert_eq!(*rect, Rect::new(20.0, 30.0, 170.0, 130.0));
                assert_eq!(rgba(*color), [0xff, 0xf1, 0x76, 0xff]);
            }
            other => panic!("expected note fill, got {other:?}"),
        }
        match &commands[5] {
            DrawCommand::FillText { text, origin, color, .. } => {
                assert_eq!(text, StickyNote::PLACEHOLDER);
                assert_eq!(*origin, Point::new(30.0, 55.0));
                assert_eq!(rgba(*color), [0, 0, 0, 255]);
            }
            other => panic!("expected note text, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_color_renders_black() {
        let scene = Scene::from_json(
            r#"[{"type":"path","points":[{"x":0,"y":0},{"x":1,"y":1}],"color":"tomato"}]"#,
        )
        .unwrap();
        let commands = render(&Canvas::with_scene(scene));
        match &commands[2] {
            DrawCommand::Polyline { color, .. } => assert_eq!(rgba(*color), [0, 0, 0, 255]),
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn test_eraser_preview() {
        let mut canvas = Canvas::new();
        assert_eq!(render(&canvas).len(), 2);

        canvas.set_tool(ToolKind::Erase);
        assert_eq!(render(&canvas).len(), 2);

        canvas.set_eraser_radius(12);
        canvas.pointer_move(Point::new(40.0, 50.0));
        let commands = render(&canvas);
        match commands.last() {
            Some(DrawCommand::StrokeCircle { circle, color, width }) => {
                assert_eq!(circle.center, Point::new(40.0, 50.0));
                assert!((circle.radius - 12.0).abs() < f64::EPSILON);
                assert_eq!(rgba(*color), [255, 0, 0, 255]);
                assert!((width - 1.0).abs() < f64::EPSILON);
            }
            other => panic!("expected eraser ring, got {other:?}"),
        }

        canvas.set_tool(ToolKind::Draw);
        assert_eq!(render(&canvas).len(), 2);
    }

    #[test]
    fn test_frame_is_rebuilt() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Sticky);
        canvas.pointer_down(Point::ZERO, &mut NoText);

        let mut renderer = CommandRenderer::new();
        let ctx = RenderContext::for_canvas(&canvas);
        renderer.build_scene(&ctx);
        renderer.build_scene(&ctx);
        assert_eq!(renderer.commands().len(), 4);
    }
}
