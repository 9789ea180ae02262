//! Flavorboard Render Library
//!
//! Turns a [`flavorboard_core::Canvas`] into an ordered list of drawing
//! commands that a host replays on its own surface.

mod renderer;

pub use renderer::{CommandRenderer, DrawCommand, RenderContext, Renderer, STICKY_TEXT_INSET};
