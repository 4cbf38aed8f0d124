//! Wall markers and trigger arrows

use glam::Vec3;
use rift_core::{Level, Tag, TriggerType, WallType};

use super::priorities;
use crate::draw::DrawList;
use crate::frame::FrameContext;
use crate::layer::OverlayLayer;
use crate::palette;

/// Distance a marker floats in front of its side
pub const WALL_MARKER_OFFSET: f32 = 1.0;
/// Markers fade out over this camera distance
pub const MARKER_FADE_DISTANCE: f32 = 500.0;
pub const MARKER_MIN_ALPHA: f32 = 0.1;
pub const MARKER_MAX_ALPHA: f32 = 0.65;
/// Length of the fly-through direction arrow
pub const FLY_THROUGH_ARROW_LENGTH: f32 = 5.0;

/// Markers on walls plus arrows from triggers and the reactor to their targets
pub struct WallMarkerLayer {
    enabled: bool,
}

impl WallMarkerLayer {
    pub const NAME: &'static str = "wall-markers";

    pub fn new() -> Self {
        Self { enabled: true }
    }
}

impl Default for WallMarkerLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Alpha for a marker at `distance` from the camera
pub fn marker_alpha(distance: f32) -> f32 {
    ((MARKER_FADE_DISTANCE - distance) / MARKER_FADE_DISTANCE)
        .clamp(MARKER_MIN_ALPHA, MARKER_MAX_ALPHA)
}

/// Point just in front of a side, None for missing sides
fn marker_point(level: &Level, tag: Tag) -> Option<Vec3> {
    let face = level.face(tag)?;
    Some(face.center() + face.average_normal() * WALL_MARKER_OFFSET)
}

impl WallMarkerLayer {
    fn emit_walls(&self, ctx: &FrameContext, list: &mut DrawList) {
        let level = ctx.level;

        for wall in level.walls.iter().filter(|w| w.is_valid()) {
            let Some(face) = level.face(wall.tag) else {
                continue;
            };
            let normal = face.average_normal();
            let center = face.center() + normal * WALL_MARKER_OFFSET;
            let alpha = marker_alpha(ctx.camera.position.distance(center));
            let mut color = palette::wall_color(wall);

            if let Some(trigger) = level.try_get_trigger(wall.trigger) {
                color = palette::TRIGGER;

                for target in &trigger.targets {
                    let Some(target_seg) = level.try_get_segment(target.segment) else {
                        continue;
                    };
                    let is_matcen =
                        trigger.kind == TriggerType::Matcen && target_seg.matcen.is_some();

                    let arrow = if is_matcen {
                        level
                            .segment_center(target.segment)
                            .map(|c| (c, palette::MATCEN))
                    } else {
                        marker_point(level, *target).map(|c| (c, palette::TRIGGER_ARROW))
                    };
                    if let Some((end, arrow_color)) = arrow {
                        list.arrow(center, end, arrow_color);
                    }
                }
            }

            let color = palette::with_alpha(color, alpha);
            list.wall_marker(&face, WALL_MARKER_OFFSET, color);

            if wall.kind == WallType::FlyThroughTrigger {
                list.arrow(center, center - normal * FLY_THROUGH_ARROW_LENGTH, color);
            }
        }
    }

    fn emit_reactor_triggers(&self, ctx: &FrameContext, list: &mut DrawList) {
        let level = ctx.level;
        let Some(reactor) = level.objects.iter().find(|obj| obj.is_reactor()) else {
            return;
        };

        for target in &level.reactor_triggers {
            if let Some(end) = marker_point(level, *target) {
                list.arrow(reactor.position, end, palette::REACTOR_TRIGGER_ARROW);
            }
        }
    }
}

impl OverlayLayer for WallMarkerLayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        priorities::WALL_MARKERS
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn emit(&self, ctx: &FrameContext, list: &mut DrawList) {
        self.emit_walls(ctx, list);
        self.emit_reactor_triggers(ctx, list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawPrimitive;
    use approx::assert_relative_eq;
    use rift_core::{
        Camera, MatcenId, Object, ObjectType, SegId, SideId, Trigger, Wall,
    };
    use rift_editor::{EditorConfig, EditorSession};

    fn arrows(list: &DrawList) -> Vec<(Vec3, Vec3, glam::Vec4)> {
        list.iter()
            .filter_map(|p| match p {
                DrawPrimitive::Arrow { start, end, color } => Some((*start, *end, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_marker_alpha_clamped() {
        assert_relative_eq!(marker_alpha(0.0), MARKER_MAX_ALPHA);
        assert_relative_eq!(marker_alpha(250.0), 0.5);
        assert_relative_eq!(marker_alpha(10_000.0), MARKER_MIN_ALPHA);
    }

    #[test]
    fn test_trigger_arrows() {
        let mut level = Level::cube_row(3);
        level.segments[2].matcen = MatcenId(0);

        let mut trigger = Trigger::new(TriggerType::Matcen);
        trigger.targets.push(Tag::new(SegId(2), SideId::Top));
        trigger.targets.push(Tag::new(SegId(9), SideId::Top));
        let trigger_id = level.add_trigger(trigger);

        let mut wall = Wall::new(Tag::new(SegId(0), SideId::Top), WallType::FlyThroughTrigger);
        wall.trigger = trigger_id;
        level.add_wall(wall).unwrap();

        let session = EditorSession::new(EditorConfig::new());
        let camera = Camera::default();
        let ctx = FrameContext::new(&level, &session, &camera);
        let mut list = DrawList::new();
        WallMarkerLayer::new().emit(&ctx, &mut list);

        let arrows = arrows(&list);
        // One matcen arrow (missing target skipped) plus the fly-through arrow
        assert_eq!(arrows.len(), 2);
        assert_relative_eq!(arrows[0].1, Vec3::new(0.0, 0.0, 40.0));
        assert_eq!(arrows[0].2, palette::MATCEN);
        assert_eq!(list.lines().count(), 4);
    }

    #[test]
    fn test_reactor_arrows() {
        let mut level = Level::cube_row(2);
        level.add_object(Object::new(ObjectType::Reactor, SegId(0), Vec3::ZERO, 5.0));
        level.reactor_triggers.push(Tag::new(SegId(1), SideId::Left));

        let session = EditorSession::new(EditorConfig::new());
        let camera = Camera::default();
        let ctx = FrameContext::new(&level, &session, &camera);
        let mut list = DrawList::new();
        WallMarkerLayer::new().emit(&ctx, &mut list);

        let arrows = arrows(&list);
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].0, Vec3::ZERO);
        assert_relative_eq!(arrows[0].1, Vec3::new(-10.0 + WALL_MARKER_OFFSET, 0.0, 20.0));
    }
}
