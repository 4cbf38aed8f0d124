//! Editor session
//!
//! Owns everything selection related for one editing session and is the
//! single entry point for input handling. Mutations queue their events; the
//! session publishes them only after the whole operation has finished.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use rift_core::{Camera, Level, LevelError, LevelTexId, Ray, SegId, Tag};

use crate::commands::EditorCommand;
use crate::config::EditorConfig;
use crate::events::{EditorEvent, EventBus, SubscriptionId};
use crate::gizmo::TransformGizmo;
use crate::marked::{MarkAction, MultiSelection};
use crate::mode::SelectionMode;
use crate::selection::{EditorSelection, linked_faces};

/// Session shared between input and render code
pub type SharedSession = Arc<Mutex<EditorSession>>;

pub fn create_shared_session(config: EditorConfig) -> SharedSession {
    Arc::new(Mutex::new(EditorSession::new(config)))
}

#[derive(Debug)]
pub struct EditorSession {
    pub selection: EditorSelection,
    pub marked: MultiSelection,
    pub gizmo: TransformGizmo,
    mode: SelectionMode,
    config: EditorConfig,
    bus: EventBus,
    pending: Vec<EditorEvent>,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        tracing::info!(
            "Editor session started in {} mode",
            config.selection.default_mode.name()
        );

        let mut gizmo = TransformGizmo::new();
        gizmo.mode = config.overlay.gizmo_mode;

        Self {
            selection: EditorSelection::new(),
            marked: MultiSelection::new(),
            gizmo,
            mode: config.selection.default_mode,
            config,
            bus: EventBus::new(),
            pending: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch modes. Marks of every mode are kept.
    pub fn set_mode(&mut self, mode: SelectionMode, level: &Level) {
        self.switch_mode(mode);
        self.finish(level);
    }

    fn switch_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!("Selection mode {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        self.pending.push(EditorEvent::SelectionChanged);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&EditorEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // --- Input ---

    /// Select the nearest element under the ray
    pub fn click(&mut self, level: &Level, ray: &Ray) -> bool {
        let hit = self.selection.click(
            level,
            ray,
            self.mode,
            self.config.selection.include_invisible,
        );
        self.finish(level);
        hit
    }

    /// Toggle the mark on the nearest element under the ray
    pub fn mark_ray(&mut self, level: &Level, ray: &Ray) -> bool {
        let hit = self.marked.update(
            level,
            ray,
            self.mode,
            self.config.selection.include_invisible,
        );
        self.finish(level);
        hit
    }

    /// Mark or unmark everything inside a screen rectangle
    pub fn mark_window(
        &mut self,
        level: &Level,
        p0: Vec2,
        p1: Vec2,
        camera: &Camera,
        action: MarkAction,
    ) -> usize {
        let count = self
            .marked
            .update_from_window(level, p0, p1, camera, self.mode, action);
        self.finish(level);
        count
    }

    /// Run a named command
    pub fn execute(&mut self, command: EditorCommand, level: &Level) {
        tracing::debug!("Execute {}", command.name());
        let mode = self.mode;

        match command {
            EditorCommand::ToggleMark => self.marked.toggle_mark(&self.selection, level, mode),
            EditorCommand::ClearMarked => self.marked.clear(),
            EditorCommand::ClearCurrentMode => self.marked.clear_current_mode(mode),
            EditorCommand::MarkAll => self.marked.mark_all(level, mode),
            EditorCommand::InvertMarked => self.marked.invert_marked(level, mode),
            EditorCommand::SelectTexture { primary, secondary } => {
                self.select_texture(level, primary, secondary)
            }
            EditorCommand::MarkCoplanar(tag) => self.mark_coplanar(level, tag),
            EditorCommand::NextSide => self.selection.next_side(),
            EditorCommand::PreviousSide => self.selection.previous_side(),
            EditorCommand::NextPoint => self.selection.next_point(),
            EditorCommand::PreviousPoint => self.selection.previous_point(),
            EditorCommand::NextItem => self.selection.next_item(level, mode),
            EditorCommand::PreviousItem => self.selection.previous_item(level, mode),
            EditorCommand::CycleForward => self.selection.forward(),
            EditorCommand::CycleBack => self.selection.back(),
            EditorCommand::SetMode(mode) => self.switch_mode(mode),
        }

        self.finish(level);
    }

    /// Replace the face marks with every visible face that shares the active
    /// side's textures
    fn select_texture(&mut self, level: &Level, primary: bool, secondary: bool) {
        let (tmap, tmap2) = self.selection.get_textures(level);
        if (!primary && !secondary) || (primary && tmap.is_none()) {
            return;
        }
        if secondary && tmap2.is_none() {
            return;
        }

        let matches = |side_tmap: LevelTexId, side_tmap2: LevelTexId| {
            (!primary || side_tmap == tmap) && (!secondary || side_tmap2 == tmap2)
        };

        let faces: Vec<Tag> = level
            .tags()
            .filter(|tag| {
                level.get_segment_and_side(*tag).is_some_and(|(seg, side)| {
                    seg.side_is_visible(tag.side) && matches(side.tmap, side.tmap2)
                })
            })
            .collect();

        tracing::debug!("Texture {} / {} matched {} faces", tmap, tmap2, faces.len());
        self.marked.faces.clear();
        self.marked.mark_faces(faces);
        self.switch_mode(SelectionMode::Face);
    }

    /// Add the coplanar region around `tag` to the face marks
    fn mark_coplanar(&mut self, level: &Level, tag: Tag) {
        let start = if tag.is_none() { self.selection.tag() } else { tag };
        let region = linked_faces(level, start);
        if region.is_empty() {
            return;
        }
        self.marked.mark_faces(region);
        self.switch_mode(SelectionMode::Face);
    }

    /// Delete a segment and repair every id held by the session in one step
    pub fn delete_segment(&mut self, level: &mut Level, id: SegId) -> Result<(), LevelError> {
        level.delete_segment(id)?;
        self.marked.remove_segment(id);
        self.selection.remove_segment(id);
        tracing::info!("Deleted segment {}", id);

        self.pending.push(EditorEvent::SegmentDeleted(id));
        self.finish(level);
        Ok(())
    }

    /// Publish queued events. Returns how many were published.
    pub fn flush_events(&mut self) -> usize {
        let mut events = std::mem::take(&mut self.pending);
        events.extend(self.selection.take_events());
        events.extend(self.marked.take_events());
        events.dedup();

        for event in &events {
            self.bus.publish(event);
        }
        events.len()
    }

    fn finish(&mut self, level: &Level) {
        self.sync_gizmo(level);
        self.flush_events();
    }

    fn sync_gizmo(&mut self, level: &Level) {
        let origin = self.selection.get_origin(self.mode, level);
        self.gizmo.update(origin);
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        tracing::info!("Editor session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rift_core::{SideId, Wall, WallType};

    fn recorder(session: &mut EditorSession) -> Arc<Mutex<Vec<EditorEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        session.subscribe(move |e| sink.lock().push(*e));
        log
    }

    #[test]
    fn test_click_publishes_after_mutation() {
        let level = Level::cube_row(2);
        let mut session = EditorSession::new(EditorConfig::new());
        let log = recorder(&mut session);

        let ray = Ray::new(Vec3::new(1.0, 2.0, 0.0), Vec3::Z);
        assert!(session.click(&level, &ray));

        assert_eq!(session.selection.tag(), Tag::new(SegId(1), SideId::Back));
        assert_eq!(*log.lock(), vec![EditorEvent::SelectionChanged]);
        assert!(session.gizmo.origin.is_some());
    }

    #[test]
    fn test_execute_mark_commands() {
        let level = Level::cube_row(2);
        let mut session = EditorSession::new(EditorConfig::new());
        session.selection.set_selection(&level, Tag::new(SegId(0), SideId::Top));

        session.execute(EditorCommand::ToggleMark, &level);
        assert!(session.marked.faces.contains(&Tag::new(SegId(0), SideId::Top)));

        session.execute(EditorCommand::InvertMarked, &level);
        assert_eq!(session.marked.faces.len(), 9);

        session.execute(EditorCommand::ClearCurrentMode, &level);
        assert!(!session.marked.has_selection(SelectionMode::Face));
    }

    #[test]
    fn test_set_mode_keeps_marks() {
        let level = Level::cube_row(2);
        let mut session = EditorSession::new(EditorConfig::new());
        session.execute(EditorCommand::MarkAll, &level);
        session.execute(EditorCommand::SetMode(SelectionMode::Segment), &level);

        assert_eq!(session.mode(), SelectionMode::Segment);
        assert!(!session.marked.has_selection(SelectionMode::Segment));
        assert!(session.marked.has_selection(SelectionMode::Face));
    }

    #[test]
    fn test_select_texture_switches_to_face_mode() {
        let level = Level::cube_row(3);
        let mut session = EditorSession::new(EditorConfig::new());
        session.execute(EditorCommand::SetMode(SelectionMode::Segment), &level);
        session.selection.set_selection(&level, Tag::new(SegId(1), SideId::Top));

        session.execute(
            EditorCommand::SelectTexture {
                primary: true,
                secondary: false,
            },
            &level,
        );

        assert_eq!(session.mode(), SelectionMode::Face);
        let expected: Vec<Tag> = (0..3).map(|i| Tag::new(SegId(i), SideId::Top)).collect();
        assert_eq!(session.marked.faces.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_select_texture_needs_overlay_for_secondary() {
        let level = Level::cube_row(2);
        let mut session = EditorSession::new(EditorConfig::new());
        session.selection.set_selection(&level, Tag::new(SegId(0), SideId::Top));
        session.execute(
            EditorCommand::SelectTexture {
                primary: false,
                secondary: true,
            },
            &level,
        );
        assert!(session.marked.faces.is_empty());
    }

    #[test]
    fn test_mark_coplanar_uses_active_side() {
        let mut level = Level::cube_row(3);
        for i in 0..3 {
            level.segments[i].sides[SideId::Left.index()].tmap = LevelTexId(40);
        }
        let mut session = EditorSession::new(EditorConfig::new());
        session.selection.set_selection(&level, Tag::new(SegId(2), SideId::Left));

        session.execute(EditorCommand::from_name("mark-coplanar").unwrap(), &level);
        assert_eq!(session.marked.faces.len(), 3);
    }

    #[test]
    fn test_delete_segment_repairs_selection() {
        let mut level = Level::cube_row(3);
        level
            .add_wall(Wall::new(Tag::new(SegId(2), SideId::Top), WallType::Door))
            .unwrap();

        let mut session = EditorSession::new(EditorConfig::new());
        let log = recorder(&mut session);
        session.selection.set_selection(&level, Tag::new(SegId(2), SideId::Top));
        session.marked.faces.insert(Tag::new(SegId(1), SideId::Left));
        session.marked.faces.insert(Tag::new(SegId(2), SideId::Top));
        session.marked.segments.insert(SegId(2));
        session.marked.points.insert(rift_core::PointId(0));

        session.delete_segment(&mut level, SegId(1)).unwrap();

        assert_eq!(level.segments.len(), 2);
        assert_eq!(session.selection.tag(), Tag::new(SegId(1), SideId::Top));
        assert_eq!(
            session.marked.faces.iter().copied().collect::<Vec<_>>(),
            vec![Tag::new(SegId(1), SideId::Top)]
        );
        assert!(session.marked.segments.contains(&SegId(1)));
        assert!(session.marked.points.is_empty());
        // The wall moved with its segment
        assert_eq!(level.walls[0].tag, Tag::new(SegId(1), SideId::Top));
        assert!(log.lock().contains(&EditorEvent::SegmentDeleted(SegId(1))));
    }

    #[test]
    fn test_delete_missing_segment_leaves_state() {
        let mut level = Level::cube_row(1);
        let mut session = EditorSession::new(EditorConfig::new());
        session.marked.points.insert(rift_core::PointId(0));

        assert!(session.delete_segment(&mut level, SegId(5)).is_err());
        assert_eq!(session.marked.points.len(), 1);
    }

    #[test]
    fn test_window_marking() {
        let level = Level::cube_row(2);
        let camera = Camera::new(Vec3::new(0.0, 0.0, -60.0), Vec3::ZERO, Vec2::new(640.0, 480.0));
        let mut session = EditorSession::new(EditorConfig::new());
        session.execute(EditorCommand::SetMode(SelectionMode::Segment), &level);

        let count = session.mark_window(
            &level,
            Vec2::ZERO,
            Vec2::new(640.0, 480.0),
            &camera,
            MarkAction::Add,
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn test_shared_session() {
        let shared = create_shared_session(EditorConfig::new());
        let level = Level::cube_row(1);
        shared.lock().execute(EditorCommand::MarkAll, &level);
        assert!(shared.lock().marked.has_selection(SelectionMode::Face));
    }
}
