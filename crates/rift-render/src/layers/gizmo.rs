//! Transform gizmo

use rift_editor::{GizmoState, SelectionMode};

use super::priorities;
use crate::draw::{DrawList, DrawPrimitive, GizmoHandles};
use crate::frame::FrameContext;
use crate::layer::OverlayLayer;

/// Full gizmo at the selection origin, or a drag preview while dragging
pub struct GizmoLayer {
    enabled: bool,
}

impl GizmoLayer {
    pub const NAME: &'static str = "gizmo";

    pub fn new() -> Self {
        Self { enabled: true }
    }
}

impl Default for GizmoLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles shown for the current mode, None hides the gizmo
fn visible_handles(ctx: &FrameContext) -> Option<GizmoHandles> {
    let gizmo = &ctx.session.gizmo;
    let mut handles = GizmoHandles {
        translate: gizmo.show_translate,
        rotate: gizmo.show_rotate,
        scale: gizmo.show_scale,
    };

    if ctx.session.mode() == SelectionMode::Object {
        // Objects have no scale
        handles.scale = false;
        ctx.level.try_get_object(ctx.session.selection.object)?;
    }

    handles.any().then_some(handles)
}

impl OverlayLayer for GizmoLayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        priorities::GIZMO
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn emit(&self, ctx: &FrameContext, list: &mut DrawList) {
        let gizmo = &ctx.session.gizmo;

        if gizmo.is_dragging() {
            if let (Some(start), Some(current)) = (gizmo.drag_start(), gizmo.origin) {
                list.push(DrawPrimitive::GizmoPreview {
                    start,
                    current,
                    mode: gizmo.mode,
                });
            }
            return;
        }

        // Recomputed every frame from the level
        let Some(origin) = ctx
            .session
            .selection
            .get_origin(ctx.session.mode(), ctx.level)
        else {
            return;
        };
        let Some(handles) = visible_handles(ctx) else {
            return;
        };
        if !gizmo.mode_visible() {
            return;
        }

        list.push(DrawPrimitive::Gizmo {
            origin,
            scale: ctx.camera.gizmo_scale(origin),
            mode: gizmo.mode,
            handles,
            hovered: gizmo.state == GizmoState::Hover,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use rift_core::{Camera, Level, ObjId, Object, ObjectType, SegId, SideId, Tag};
    use rift_editor::{EditorCommand, EditorConfig, EditorSession, GizmoMode};

    fn emit(level: &Level, session: &EditorSession) -> DrawList {
        let camera = Camera::default();
        let ctx = FrameContext::new(level, session, &camera);
        let mut list = DrawList::new();
        GizmoLayer::new().emit(&ctx, &mut list);
        list
    }

    #[test]
    fn test_no_origin_no_gizmo() {
        let level = Level::cube_row(1);
        let session = EditorSession::new(EditorConfig::new());
        assert!(emit(&level, &session).is_empty());
    }

    #[test]
    fn test_gizmo_at_selection_origin() {
        let level = Level::cube_row(2);
        let mut session = EditorSession::new(EditorConfig::new());
        session.selection.set_selection(&level, Tag::new(SegId(1), SideId::Left));

        let list = emit(&level, &session);
        match &list.primitives()[0] {
            DrawPrimitive::Gizmo { origin, handles, .. } => {
                assert_eq!(*origin, Vec3::new(-10.0, 0.0, 20.0));
                assert_eq!(*handles, GizmoHandles::ALL);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    fn drawn_origin(list: &DrawList) -> Option<Vec3> {
        list.iter().find_map(|p| match p {
            DrawPrimitive::Gizmo { origin, .. } => Some(*origin),
            _ => None,
        })
    }

    #[test]
    fn test_gizmo_follows_moved_geometry() {
        let mut level = Level::cube_row(1);
        let mut session = EditorSession::new(EditorConfig::new());
        session.selection.set_selection(&level, Tag::new(SegId(0), SideId::Top));
        let before = drawn_origin(&emit(&level, &session)).unwrap();
        assert_eq!(Some(before), session.selection.get_origin(session.mode(), &level));

        for vertex in &mut level.vertices {
            *vertex += Vec3::new(100.0, 0.0, 0.0);
        }

        let after = drawn_origin(&emit(&level, &session)).unwrap();
        assert_relative_eq!(after, before + Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_drag_draws_preview_only() {
        let level = Level::cube_row(1);
        let mut session = EditorSession::new(EditorConfig::new());
        session.gizmo.update(Some(Vec3::ZERO));
        session.gizmo.begin_drag();
        session.gizmo.drag_to(Vec3::X);

        let list = emit(&level, &session);
        assert_eq!(list.len(), 1);
        assert!(matches!(
            list.primitives()[0],
            DrawPrimitive::GizmoPreview {
                mode: GizmoMode::Translate,
                ..
            }
        ));
    }

    #[test]
    fn test_object_mode_hides_scale() {
        let mut level = Level::cube_row(1);
        level.add_object(Object::new(ObjectType::Robot, SegId(0), Vec3::ZERO, 2.0));
        let mut session = EditorSession::new(EditorConfig::new());
        session.execute(EditorCommand::SetMode(SelectionMode::Object), &level);

        // No active object
        assert!(emit(&level, &session).is_empty());

        session.selection.set_object(ObjId(0));
        let list = emit(&level, &session);
        match &list.primitives()[0] {
            DrawPrimitive::Gizmo { handles, .. } => {
                assert!(handles.translate && handles.rotate && !handles.scale);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
