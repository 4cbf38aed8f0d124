//! Transform gizmo state
//!
//! Only the interaction state lives here. Drawing belongs to the render crate,
//! which shows the full widget while idle or hovered and a light preview while
//! a drag is in progress.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Interaction state of the gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoState {
    #[default]
    Idle,
    Hover,
    Dragging,
}

/// Which handles the gizmo shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

/// Gizmo placed at the selection origin
#[derive(Debug, Clone, PartialEq)]
pub struct TransformGizmo {
    pub state: GizmoState,
    /// None hides the gizmo
    pub origin: Option<Vec3>,
    pub mode: GizmoMode,
    pub show_translate: bool,
    pub show_rotate: bool,
    pub show_scale: bool,
    drag_start: Option<Vec3>,
}

impl Default for TransformGizmo {
    fn default() -> Self {
        Self {
            state: GizmoState::Idle,
            origin: None,
            mode: GizmoMode::Translate,
            show_translate: true,
            show_rotate: true,
            show_scale: true,
            drag_start: None,
        }
    }
}

impl TransformGizmo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the gizmo to a new origin. Ignored while dragging so the widget
    /// does not chase the geometry it is moving.
    pub fn update(&mut self, origin: Option<Vec3>) {
        if self.is_dragging() {
            return;
        }
        self.origin = origin;
        if origin.is_none() {
            self.state = GizmoState::Idle;
        }
    }

    pub fn set_hover(&mut self, hovered: bool) {
        if self.is_dragging() {
            return;
        }
        self.state = if hovered && self.origin.is_some() {
            GizmoState::Hover
        } else {
            GizmoState::Idle
        };
    }

    /// Returns false when there is nothing to drag
    pub fn begin_drag(&mut self) -> bool {
        let Some(origin) = self.origin else {
            return false;
        };
        self.drag_start = Some(origin);
        self.state = GizmoState::Dragging;
        true
    }

    /// Finish a drag, returning the offset from where it started
    pub fn end_drag(&mut self) -> Option<Vec3> {
        if !self.is_dragging() {
            return None;
        }
        self.state = GizmoState::Idle;
        let start = self.drag_start.take()?;
        self.origin.map(|origin| origin - start)
    }

    /// Follow the pointer during a drag
    pub fn drag_to(&mut self, position: Vec3) {
        if self.is_dragging() {
            self.origin = Some(position);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state == GizmoState::Dragging
    }

    /// Where the drag started, if one is in progress
    pub fn drag_start(&self) -> Option<Vec3> {
        self.drag_start
    }

    /// Whether the handles for the current mode are enabled
    pub fn mode_visible(&self) -> bool {
        match self.mode {
            GizmoMode::Translate => self.show_translate,
            GizmoMode::Rotate => self.show_rotate,
            GizmoMode::Scale => self.show_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_drag_cycle() {
        let mut gizmo = TransformGizmo::new();
        assert!(!gizmo.begin_drag());

        gizmo.update(Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(gizmo.begin_drag());
        assert!(gizmo.is_dragging());

        // Origin updates from the selection are ignored mid-drag
        gizmo.update(Some(Vec3::ZERO));
        gizmo.drag_to(Vec3::new(4.0, 2.0, 3.0));

        let offset = gizmo.end_drag().unwrap();
        assert_relative_eq!(offset, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(gizmo.state, GizmoState::Idle);
        assert!(gizmo.end_drag().is_none());
    }

    #[test]
    fn test_hover_requires_origin() {
        let mut gizmo = TransformGizmo::new();
        gizmo.set_hover(true);
        assert_eq!(gizmo.state, GizmoState::Idle);

        gizmo.update(Some(Vec3::ZERO));
        gizmo.set_hover(true);
        assert_eq!(gizmo.state, GizmoState::Hover);

        gizmo.update(None);
        assert_eq!(gizmo.state, GizmoState::Idle);
    }

    #[test]
    fn test_mode_visibility() {
        let mut gizmo = TransformGizmo::new();
        gizmo.mode = GizmoMode::Rotate;
        assert!(gizmo.mode_visible());
        gizmo.show_rotate = false;
        assert!(!gizmo.mode_visible());
    }
}
