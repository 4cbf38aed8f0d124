//! Built-in overlay layers
//!
//! - [`WireframeLayer`]: every segment's edges, special segment fills
//! - [`WallMarkerLayer`]: wall markers, trigger and reactor trigger arrows
//! - [`MarkedLayer`]: marked elements of the current mode
//! - [`SelectionLayer`]: edges of the active segment
//! - [`GizmoLayer`]: transform gizmo or its drag preview
//! - [`CrosshairLayer`]: crosshair while the mouse is captured

pub mod crosshair;
pub mod gizmo;
pub mod marked;
pub mod selection;
pub mod walls;
pub mod wireframe;

pub use crosshair::CrosshairLayer;
pub use gizmo::GizmoLayer;
pub use marked::MarkedLayer;
pub use selection::SelectionLayer;
pub use walls::WallMarkerLayer;
pub use wireframe::WireframeLayer;

/// Emit order of the built-in layers, lower first
pub mod priorities {
    pub const WIREFRAME: i32 = 0;
    pub const WALL_MARKERS: i32 = 100;
    pub const MARKED: i32 = 200;
    /// Drawn after marks so the active selection stays readable
    pub const SELECTION: i32 = 250;
    pub const GIZMO: i32 = 1000;
    pub const CROSSHAIR: i32 = 1100;
}
