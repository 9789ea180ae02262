//! Flavorboard Core Library
//!
//! Platform-agnostic scene model and editing logic for the Flavorboard
//! infinite-canvas whiteboard. Hosts feed pointer events into a [`Canvas`],
//! read its [`Scene`] back for rendering, and persist scenes through a
//! [`storage::Storage`] provider.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod eraser;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, Gesture, NoText, TextRequest, TextSource};
pub use config::EditorConfig;
pub use eraser::{erase_at, erase_in_place};
pub use input::PointerEvent;
pub use scene::{EntityIndex, Scene, SceneError, SceneResult};
pub use shapes::{Entity, HexColor, StickyNote, Stroke, TextLabel};
pub use tools::ToolKind;
