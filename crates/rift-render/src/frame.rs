//! Per-frame overlay generation

use rift_core::{Camera, Level};
use rift_editor::EditorSession;
use rift_editor::config::OverlayConfig;

use crate::draw::DrawList;
use crate::layer::OverlayRegistry;
use crate::layers::{
    CrosshairLayer, GizmoLayer, MarkedLayer, SelectionLayer, WallMarkerLayer, WireframeLayer,
};

/// Everything a layer may read while emitting
pub struct FrameContext<'a> {
    pub level: &'a Level,
    pub session: &'a EditorSession,
    pub camera: &'a Camera,
    /// Held "hide marks" binding: fills and marks are suppressed
    pub hide_marks: bool,
    /// Mouse is captured for fly-through, show the crosshair
    pub crosshair: bool,
}

impl<'a> FrameContext<'a> {
    pub fn new(level: &'a Level, session: &'a EditorSession, camera: &'a Camera) -> Self {
        Self {
            level,
            session,
            camera,
            hide_marks: false,
            crosshair: false,
        }
    }

    pub fn overlay(&self) -> &OverlayConfig {
        &self.session.config().overlay
    }
}

/// The built-in layer stack
pub struct EditorOverlay {
    registry: OverlayRegistry,
}

impl EditorOverlay {
    pub fn new() -> Self {
        let mut registry = OverlayRegistry::new();
        registry.register(WireframeLayer::new());
        registry.register(WallMarkerLayer::new());
        registry.register(MarkedLayer::new());
        registry.register(SelectionLayer::new());
        registry.register(GizmoLayer::new());
        registry.register(CrosshairLayer::new());
        Self { registry }
    }

    /// Enable or disable layers to match the overlay settings
    pub fn apply_config(&mut self, config: &OverlayConfig) {
        self.registry
            .set_enabled(WireframeLayer::NAME, config.show_wireframe);
        self.registry
            .set_enabled(WallMarkerLayer::NAME, config.show_wall_markers);
        self.registry.set_enabled(GizmoLayer::NAME, config.show_gizmo);
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut OverlayRegistry {
        &mut self.registry
    }

    /// Build this frame's primitives from scratch
    pub fn render(&self, ctx: &FrameContext) -> DrawList {
        let mut list = DrawList::new();
        self.registry.emit_all(ctx, &mut list);
        tracing::trace!("Overlay emitted {} primitives", list.len());
        list
    }
}

impl Default for EditorOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the editor overlay for one frame using the session's settings
pub fn render_editor(ctx: &FrameContext) -> DrawList {
    let mut overlay = EditorOverlay::new();
    overlay.apply_config(ctx.overlay());
    overlay.render(ctx)
}
