//! Rift Render
//!
//! Read-only visualization of the editor selection. Every frame the overlay
//! layers read the level and the [`rift_editor::EditorSession`] and emit a
//! fresh [`draw::DrawList`] of debug-draw primitives for a backend to draw.
//!
//! - [`layer::OverlayLayer`] - one element of the overlay
//! - [`layer::OverlayRegistry`] - priority ordered layer stack
//! - [`frame::render_editor`] - build a frame with the built-in layers
//! - [`palette`] - overlay colors

pub mod draw;
pub mod frame;
pub mod layer;
pub mod layers;
pub mod palette;

pub use draw::{DrawList, DrawPrimitive, GizmoHandles};
pub use frame::{EditorOverlay, FrameContext, render_editor};
pub use layer::{OverlayLayer, OverlayRegistry};
