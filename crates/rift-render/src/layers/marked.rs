//! Marked elements of the current mode

use rift_core::{Object, SideId, Tag};
use rift_editor::SelectionMode;

use super::priorities;
use crate::draw::DrawList;
use crate::frame::FrameContext;
use crate::layer::OverlayLayer;
use crate::palette;

/// Length of the normal drawn on marked walls
pub const WALL_NORMAL_LENGTH: f32 = 5.0;

/// Draws the marked set that belongs to the current selection mode
pub struct MarkedLayer {
    enabled: bool,
}

impl MarkedLayer {
    pub const NAME: &'static str = "marked";

    pub fn new() -> Self {
        Self { enabled: true }
    }

    fn emit_faces(&self, ctx: &FrameContext, list: &mut DrawList) {
        let level = ctx.level;
        for tag in &ctx.session.marked.faces {
            let (Some((_, side)), Some(face)) = (level.get_segment_and_side(*tag), level.face(*tag))
            else {
                continue;
            };

            if side.has_wall() {
                list.side_outline(&face, palette::MARKED_WALL);
                list.side_fill(&face, palette::MARKED_WALL_FILL);
                let center = face.center();
                list.line(
                    center,
                    center + face.average_normal() * WALL_NORMAL_LENGTH,
                    palette::MARKED_WALL,
                );
            } else {
                list.side_outline(&face, palette::MARKED_FACE);
                list.side_fill(&face, palette::MARKED_FACE_FILL);
            }
        }
    }

    fn emit_segments(&self, ctx: &FrameContext, list: &mut DrawList) {
        let level = ctx.level;
        for id in &ctx.session.marked.segments {
            let Some(seg) = level.try_get_segment(*id) else {
                continue;
            };
            let (outline, fill) = palette::segment_colors(seg.kind);

            for side in SideId::ALL {
                let Some(face) = level.face(Tag::new(*id, side)) else {
                    continue;
                };
                list.side_outline(&face, outline);
                // Shared internal sides only get an outline
                if seg.side_has_connection(side) {
                    continue;
                }
                list.side_fill(&face, fill);
            }
        }
    }

    fn emit_points(&self, ctx: &FrameContext, list: &mut DrawList) {
        for id in &ctx.session.marked.points {
            if let Some(position) = ctx.level.try_get_vertex(*id) {
                list.point(position, palette::MARKED_POINT);
            }
        }
    }

    fn emit_objects(&self, ctx: &FrameContext, list: &mut DrawList) {
        let level = ctx.level;
        let active = ctx.session.selection.object;
        let scale = ctx.overlay().object_outline_scale;

        if let Some(obj) = level.try_get_object(active) {
            object_outline(ctx, list, obj, palette::SELECTED_OBJECT, 1.0);
        }

        for id in ctx.session.marked.objects.iter().filter(|id| **id != active) {
            if let Some(obj) = level.try_get_object(*id) {
                object_outline(ctx, list, obj, palette::MARKED_OBJECT, scale);
            }
        }
    }
}

impl Default for MarkedLayer {
    fn default() -> Self {
        Self::new()
    }
}

fn object_outline(
    ctx: &FrameContext,
    list: &mut DrawList,
    obj: &Object,
    color: glam::Vec4,
    scale: f32,
) {
    list.facing_circle(ctx.camera, obj.position, obj.radius * scale, color);
}

impl OverlayLayer for MarkedLayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        priorities::MARKED
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn emit(&self, ctx: &FrameContext, list: &mut DrawList) {
        let mode = ctx.session.mode();

        // Object outlines double as the object selection, so they ignore the
        // marks toggles
        if mode == SelectionMode::Object {
            self.emit_objects(ctx, list);
            return;
        }
        if ctx.hide_marks || !ctx.overlay().show_marks {
            return;
        }

        match mode {
            SelectionMode::Face => self.emit_faces(ctx, list),
            SelectionMode::Segment => self.emit_segments(ctx, list),
            SelectionMode::Edge | SelectionMode::Point => self.emit_points(ctx, list),
            SelectionMode::Object => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawPrimitive;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use rift_core::{Camera, Level, ObjId, ObjectType, PointId, SegId, Wall, WallType};
    use rift_editor::{EditorCommand, EditorConfig, EditorSession};

    fn emit(level: &Level, session: &EditorSession) -> DrawList {
        let camera = Camera::default();
        let ctx = FrameContext::new(level, session, &camera);
        let mut list = DrawList::new();
        MarkedLayer::new().emit(&ctx, &mut list);
        list
    }

    fn fills(list: &DrawList) -> Vec<glam::Vec4> {
        list.iter()
            .filter_map(|p| match p {
                DrawPrimitive::FilledQuad { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_face_mode_wall_palette() {
        let mut level = Level::cube_row(1);
        level
            .add_wall(Wall::new(Tag::new(SegId(0), SideId::Top), WallType::Door))
            .unwrap();
        let mut session = EditorSession::new(EditorConfig::new());
        session.marked.faces.insert(Tag::new(SegId(0), SideId::Top));
        session.marked.faces.insert(Tag::new(SegId(0), SideId::Left));
        session.marked.faces.insert(Tag::new(SegId(7), SideId::Left));

        let list = emit(&level, &session);
        assert_eq!(fills(&list), vec![palette::MARKED_FACE_FILL, palette::MARKED_WALL_FILL]);
        // Two outlines plus the wall normal
        assert_eq!(list.lines().count(), 9);
    }

    #[test]
    fn test_segment_mode_skips_connected_fill() {
        let level = Level::cube_row(2);
        let mut session = EditorSession::new(EditorConfig::new());
        session.execute(EditorCommand::SetMode(SelectionMode::Segment), &level);
        session.marked.segments.insert(SegId(0));

        let list = emit(&level, &session);
        assert_eq!(list.lines().count(), 24);
        assert_eq!(fills(&list).len(), 5);
    }

    #[test]
    fn test_point_mode_and_hidden_marks() {
        let level = Level::cube_row(1);
        let mut session = EditorSession::new(EditorConfig::new());
        session.execute(EditorCommand::SetMode(SelectionMode::Point), &level);
        session.marked.points.extend([PointId(0), PointId(1), PointId(500)]);

        let list = emit(&level, &session);
        assert_eq!(list.count(|p| matches!(p, DrawPrimitive::Point { .. })), 2);

        session.config_mut().overlay.show_marks = false;
        assert!(emit(&level, &session).is_empty());
    }

    #[test]
    fn test_object_outlines() {
        let mut level = Level::cube_row(1);
        level.add_object(rift_core::Object::new(ObjectType::Robot, SegId(0), Vec3::ZERO, 2.0));
        level.add_object(rift_core::Object::new(ObjectType::Robot, SegId(0), Vec3::Z, 2.0));
        let mut session = EditorSession::new(EditorConfig::new());
        session.execute(EditorCommand::SetMode(SelectionMode::Object), &level);
        session.selection.set_object(ObjId(0));
        session.marked.objects.extend([ObjId(0), ObjId(1)]);

        let list = emit(&level, &session);
        let circles: Vec<(f32, glam::Vec4)> = list
            .iter()
            .filter_map(|p| match p {
                DrawPrimitive::Circle { radius, color, .. } => Some((*radius, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 2);
        assert_eq!(circles[0].1, palette::SELECTED_OBJECT);
        assert_relative_eq!(circles[0].0, 2.0);
        assert_eq!(circles[1].1, palette::MARKED_OBJECT);
        assert_relative_eq!(circles[1].0, 2.2);
    }

    #[test]
    fn test_empty_marks_draw_nothing() {
        let level = Level::cube_row(2);
        let session = EditorSession::new(EditorConfig::new());
        assert!(emit(&level, &session).is_empty());
    }
}
