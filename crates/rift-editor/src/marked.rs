//! Marked (bulk) selection
//!
//! Four independent sets, one per kind of element. Only the set belonging to
//! the current [`SelectionMode`] is active, but switching modes keeps the
//! other sets intact.

use std::collections::BTreeSet;

use glam::{Vec2, Vec3};
use rift_core::{Camera, Level, ObjId, Object, PointId, Ray, SegId, SideId, Tag};

use crate::events::EditorEvent;
use crate::hit::cast_ray;
use crate::mode::SelectionMode;
use crate::selection::EditorSelection;

/// One markable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mark {
    Face(Tag),
    Segment(SegId),
    Point(PointId),
    Object(ObjId),
}

impl Mark {
    /// Representative position, None if the element no longer exists
    pub fn position(&self, level: &Level) -> Option<Vec3> {
        match self {
            Mark::Face(tag) => level.side_center(*tag),
            Mark::Segment(id) => level.segment_center(*id),
            Mark::Point(id) => level.try_get_vertex(*id),
            Mark::Object(id) => level.try_get_object(*id).map(|obj| obj.position),
        }
    }

    /// Level vertices that move with this element
    pub fn vertices(&self, level: &Level) -> Vec<PointId> {
        match self {
            Mark::Face(tag) => level
                .side_vertex_indices(*tag)
                .map(|v| v.to_vec())
                .unwrap_or_default(),
            Mark::Segment(id) => level
                .try_get_segment(*id)
                .map(|seg| seg.indices.to_vec())
                .unwrap_or_default(),
            Mark::Point(id) if level.vertex_is_valid(*id) => vec![*id],
            Mark::Point(_) | Mark::Object(_) => Vec::new(),
        }
    }
}

/// How a window pick changes the marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAction {
    Add,
    Remove,
}

/// All six faces of a segment
pub fn faces_for_segment(seg: SegId) -> Vec<Tag> {
    SideId::ALL
        .into_iter()
        .map(|side| Tag::new(seg, side))
        .collect()
}

/// All faces of the segments
pub fn faces_for_segments(segs: &[SegId]) -> Vec<Tag> {
    segs.iter().flat_map(|seg| faces_for_segment(*seg)).collect()
}

/// Marked faces, segments, points and objects
#[derive(Debug, Clone, Default)]
pub struct MultiSelection {
    pub faces: BTreeSet<Tag>,
    pub segments: BTreeSet<SegId>,
    pub points: BTreeSet<PointId>,
    pub objects: BTreeSet<ObjId>,
    events: Vec<EditorEvent>,
}

impl PartialEq for MultiSelection {
    fn eq(&self, other: &Self) -> bool {
        self.faces == other.faces
            && self.segments == other.segments
            && self.points == other.points
            && self.objects == other.objects
    }
}

impl MultiSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains pending change notifications
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    fn notify(&mut self) {
        self.events.push(EditorEvent::MarkedFacesChanged);
    }

    // --- Element level ---

    pub fn contains(&self, mark: Mark) -> bool {
        match mark {
            Mark::Face(tag) => self.faces.contains(&tag),
            Mark::Segment(id) => self.segments.contains(&id),
            Mark::Point(id) => self.points.contains(&id),
            Mark::Object(id) => self.objects.contains(&id),
        }
    }

    pub fn insert(&mut self, mark: Mark) -> bool {
        match mark {
            Mark::Face(tag) => self.faces.insert(tag),
            Mark::Segment(id) => self.segments.insert(id),
            Mark::Point(id) => self.points.insert(id),
            Mark::Object(id) => self.objects.insert(id),
        }
    }

    pub fn remove(&mut self, mark: Mark) -> bool {
        match mark {
            Mark::Face(tag) => self.faces.remove(&tag),
            Mark::Segment(id) => self.segments.remove(&id),
            Mark::Point(id) => self.points.remove(&id),
            Mark::Object(id) => self.objects.remove(&id),
        }
    }

    /// Remove the group if every element is marked, otherwise mark all of it
    fn toggle_group(&mut self, group: &[Mark]) {
        if group.is_empty() {
            return;
        }
        let mut changed = false;
        if group.iter().all(|m| self.contains(*m)) {
            for mark in group {
                changed |= self.remove(*mark);
            }
        } else {
            for mark in group {
                changed |= self.insert(*mark);
            }
        }
        if changed {
            self.notify();
        }
    }

    // --- Picking ---

    /// Toggle the nearest element under a ray in the current mode
    pub fn update(
        &mut self,
        level: &Level,
        ray: &Ray,
        mode: SelectionMode,
        include_invisible: bool,
    ) -> bool {
        let hits = cast_ray(level, ray, mode, include_invisible);
        let Some(hit) = hits.first() else {
            return false;
        };
        let group = mode.strategy().from_hit(hit, level);
        self.toggle_group(&group);
        !group.is_empty()
    }

    /// Add or remove every element of the current mode whose projected
    /// position falls inside the screen rectangle `p0`-`p1`. Returns the
    /// number of elements inside the rectangle.
    pub fn update_from_window(
        &mut self,
        level: &Level,
        p0: Vec2,
        p1: Vec2,
        camera: &Camera,
        mode: SelectionMode,
        action: MarkAction,
    ) -> usize {
        let min = p0.min(p1);
        let max = p0.max(p1);

        let inside: Vec<Mark> = mode
            .strategy()
            .universe(level)
            .into_iter()
            .filter(|mark| {
                mark.position(level)
                    .and_then(|pos| camera.world_to_screen(pos))
                    .is_some_and(|s| s.x >= min.x && s.x <= max.x && s.y >= min.y && s.y <= max.y)
            })
            .collect();

        let mut changed = false;
        for mark in &inside {
            changed |= match action {
                MarkAction::Add => self.insert(*mark),
                MarkAction::Remove => self.remove(*mark),
            };
        }

        tracing::debug!(
            "Window pick {:?} {} {} elements",
            action,
            inside.len(),
            mode.name()
        );
        if changed {
            self.notify();
        }
        inside.len()
    }

    // --- Queries ---

    pub fn has_selection(&self, mode: SelectionMode) -> bool {
        !mode.strategy().marks(self).is_empty()
    }

    /// Marks of the set active in `mode`
    pub fn marks(&self, mode: SelectionMode) -> Vec<Mark> {
        mode.strategy().marks(self)
    }

    /// Marked faces, with marked segments expanded to their six sides.
    /// Empty in edge, point and object mode.
    pub fn get_marked_faces(&self, mode: SelectionMode) -> Vec<Tag> {
        mode.strategy().marked_faces(self)
    }

    /// Mean position of the marks that still exist, zero if there are none
    pub fn get_marked_center(&self, mode: SelectionMode, level: &Level) -> Vec3 {
        let positions: Vec<Vec3> = self
            .marks(mode)
            .iter()
            .filter_map(|mark| mark.position(level))
            .collect();

        if positions.is_empty() {
            Vec3::ZERO
        } else {
            positions.iter().copied().sum::<Vec3>() / positions.len() as f32
        }
    }

    /// Vertices moved when the marks are transformed
    pub fn get_vertex_handles(&self, level: &Level, mode: SelectionMode) -> Vec<PointId> {
        let mut handles: Vec<PointId> = self
            .marks(mode)
            .iter()
            .flat_map(|mark| mark.vertices(level))
            .collect();
        handles.sort();
        handles.dedup();
        handles
    }

    /// Existing segments touched by the marks
    pub fn get_segments(&self, level: &Level, mode: SelectionMode) -> Vec<SegId> {
        let mut segs: Vec<SegId> = Vec::new();
        for mark in self.marks(mode) {
            match mark {
                Mark::Face(tag) => segs.push(tag.segment),
                Mark::Segment(id) => segs.push(id),
                Mark::Point(point) => segs.extend(
                    level
                        .segment_ids()
                        .filter(|id| level.get_segment(*id).indices.contains(&point)),
                ),
                Mark::Object(id) => {
                    if let Some(obj) = level.try_get_object(id) {
                        segs.push(obj.segment);
                    }
                }
            }
        }
        segs.retain(|id| level.segment_exists(*id));
        segs.sort();
        segs.dedup();
        segs
    }

    /// Run `f` on every marked object that still exists
    pub fn for_marked_objects(&self, level: &mut Level, mut f: impl FnMut(&mut Object)) {
        for id in &self.objects {
            if let Some(obj) = id.index().and_then(|i| level.objects.get_mut(i)) {
                f(obj);
            }
        }
    }

    // --- Repair ---

    /// Adjust the marks after segment `id` was deleted from the level.
    ///
    /// Faces and segments of the deleted segment are dropped and later
    /// segment ids shift down by one. Point marks are cleared outright: point
    /// ids have no simple renumbering after a deletion.
    pub fn remove_segment(&mut self, id: SegId) {
        let shift = |seg: SegId| if seg.0 > id.0 { SegId(seg.0 - 1) } else { seg };

        self.faces = std::mem::take(&mut self.faces)
            .into_iter()
            .filter(|face| face.segment != id)
            .map(|face| Tag::new(shift(face.segment), face.side))
            .collect();

        self.segments = std::mem::take(&mut self.segments)
            .into_iter()
            .filter(|seg| *seg != id)
            .map(shift)
            .collect();

        self.points.clear();
        self.notify();
    }

    // --- Bulk operations ---

    /// Add faces to the face marks
    pub fn mark_faces(&mut self, faces: impl IntoIterator<Item = Tag>) {
        let before = self.faces.len();
        self.faces.extend(faces);
        if self.faces.len() != before {
            self.notify();
        }
    }

    /// Mark every valid element of the current mode
    pub fn mark_all(&mut self, level: &Level, mode: SelectionMode) {
        let mut changed = false;
        for mark in mode.strategy().universe(level) {
            changed |= self.insert(mark);
        }
        if changed {
            self.notify();
        }
    }

    /// Replace the current mode's marks with their complement
    pub fn invert_marked(&mut self, level: &Level, mode: SelectionMode) {
        let strategy = mode.strategy();
        let universe = strategy.universe(level);
        let current: BTreeSet<Mark> = strategy.marks(self).into_iter().collect();

        strategy.clear_marks(self);
        for mark in universe {
            if !current.contains(&mark) {
                self.insert(mark);
            }
        }
        if strategy.marks(self).into_iter().collect::<BTreeSet<Mark>>() != current {
            self.notify();
        }
    }

    /// Flip the mark on the active single-selection element
    pub fn toggle_mark(&mut self, selection: &EditorSelection, level: &Level, mode: SelectionMode) {
        let group = mode.strategy().from_selection(selection, level);
        self.toggle_group(&group);
    }

    /// Empty all four sets
    pub fn clear(&mut self) {
        self.faces.clear();
        self.segments.clear();
        self.points.clear();
        self.objects.clear();
        self.notify();
    }

    /// Empty only the set of the current mode
    pub fn clear_current_mode(&mut self, mode: SelectionMode) {
        mode.strategy().clear_marks(self);
        self.notify();
    }
}
