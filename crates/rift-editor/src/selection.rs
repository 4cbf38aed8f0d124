//! The single active selection
//!
//! One segment/side/point/object plus the hits of the last ray cast, so the
//! user can cycle through overlapping candidates without moving the camera.

use std::collections::{BTreeSet, HashMap, VecDeque};

use glam::Vec3;
use rift_core::{Level, LevelTexId, ObjId, PointId, PointTag, Ray, SegId, SideId, Tag, TriggerId, WallId};

use crate::events::EditorEvent;
use crate::hit::{SelectionHit, cast_ray};
use crate::mode::SelectionMode;

/// Active segment, side, point and object
#[derive(Debug, Clone, Default)]
pub struct EditorSelection {
    pub segment: SegId,
    /// Only meaningful while `segment` is set
    pub side: SideId,
    /// Corner of the active side, 0..4
    pub point: u16,
    pub object: ObjId,
    /// Candidates from the last click, nearest first
    pub hits: Vec<SelectionHit>,
    cycle_depth: usize,
    events: Vec<EditorEvent>,
}

impl EditorSelection {
    pub fn new() -> Self {
        Self {
            segment: SegId::NONE,
            side: SideId::Left,
            point: 0,
            object: ObjId::NONE,
            hits: Vec::new(),
            cycle_depth: 0,
            events: Vec::new(),
        }
    }

    pub fn tag(&self) -> Tag {
        Tag::new(self.segment, self.side)
    }

    pub fn point_tag(&self) -> PointTag {
        PointTag::new(self.segment, self.side, self.point)
    }

    /// All six sides of the active segment
    pub fn segment_tags(&self) -> Vec<Tag> {
        SideId::ALL
            .into_iter()
            .map(|side| Tag::new(self.segment, side))
            .collect()
    }

    /// Position in the hit list used by forward/back
    pub fn cycle_depth(&self) -> usize {
        self.cycle_depth
    }

    /// Drains pending change notifications
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Picking ---

    /// Cast a ray and select the nearest candidate.
    ///
    /// Returns false if nothing was hit; the previous selection is kept.
    pub fn click(
        &mut self,
        level: &Level,
        ray: &Ray,
        mode: SelectionMode,
        include_invisible: bool,
    ) -> bool {
        self.hits = cast_ray(level, ray, mode, include_invisible);
        self.cycle_depth = 0;

        match self.hits.first().copied() {
            Some(hit) => {
                self.apply_hit(&hit);
                true
            }
            None => false,
        }
    }

    /// Select the next candidate behind the current one
    pub fn forward(&mut self) {
        if self.hits.is_empty() {
            return;
        }
        self.cycle_depth = (self.cycle_depth + 1) % self.hits.len();
        let hit = self.hits[self.cycle_depth];
        self.apply_hit(&hit);
    }

    /// Select the previous candidate
    pub fn back(&mut self) {
        if self.hits.is_empty() {
            return;
        }
        let len = self.hits.len();
        self.cycle_depth = (self.cycle_depth + len - 1) % len;
        let hit = self.hits[self.cycle_depth];
        self.apply_hit(&hit);
    }

    fn apply_hit(&mut self, hit: &SelectionHit) {
        if hit.is_object() {
            self.set_object(hit.object);
        } else {
            self.segment = hit.tag.segment;
            self.side = hit.tag.side;
            self.point = hit.edge % 4;
            self.notify_selection();
        }
    }

    // --- Navigation ---

    pub fn next_side(&mut self) {
        if self.segment.is_none() {
            return;
        }
        self.side = self.side.next();
        self.notify_selection();
    }

    pub fn previous_side(&mut self) {
        if self.segment.is_none() {
            return;
        }
        self.side = self.side.prev();
        self.notify_selection();
    }

    pub fn next_point(&mut self) {
        if self.segment.is_none() {
            return;
        }
        self.point = if self.point >= 3 { 0 } else { self.point + 1 };
        self.notify_selection();
    }

    pub fn previous_point(&mut self) {
        if self.segment.is_none() {
            return;
        }
        self.point = if self.point == 0 { 3 } else { self.point.min(3) - 1 };
        self.notify_selection();
    }

    /// Step to the next element of the mode's kind
    pub fn next_item(&mut self, level: &Level, mode: SelectionMode) {
        self.step_item(level, mode, true);
    }

    /// Step to the previous element of the mode's kind
    pub fn previous_item(&mut self, level: &Level, mode: SelectionMode) {
        self.step_item(level, mode, false);
    }

    fn step_item(&mut self, level: &Level, mode: SelectionMode, forward: bool) {
        match mode {
            SelectionMode::Segment => {
                if let Some(id) = step_id(self.segment.index(), level.segments.len(), forward) {
                    self.set_selection(level, Tag::new(SegId::from_index(id), self.side));
                }
            }
            SelectionMode::Face => {
                if forward {
                    self.next_side()
                } else {
                    self.previous_side()
                }
            }
            SelectionMode::Edge | SelectionMode::Point => {
                if forward {
                    self.next_point()
                } else {
                    self.previous_point()
                }
            }
            SelectionMode::Object => {
                if let Some(id) = step_id(self.object.index(), level.objects.len(), forward) {
                    self.set_object(ObjId::from_index(id));
                }
            }
        }
    }

    // --- Queries ---

    /// Transform pivot for the gizmo, None when nothing is selected
    pub fn get_origin(&self, mode: SelectionMode, level: &Level) -> Option<Vec3> {
        mode.strategy().origin(self, level)
    }

    /// Vertices affected by transforming the active selection
    pub fn get_vertex_handles(&self, level: &Level, mode: SelectionMode) -> Vec<PointId> {
        mode.strategy().vertex_handles(self, level)
    }

    /// Base and overlay texture of the active side
    pub fn get_textures(&self, level: &Level) -> (LevelTexId, LevelTexId) {
        match level.try_get_side(self.tag()) {
            Some(side) => (side.tmap, side.tmap2),
            None => (LevelTexId::NONE, LevelTexId::NONE),
        }
    }

    /// Coplanar region around the active side
    pub fn select_linked(&self, level: &Level) -> Vec<Tag> {
        linked_faces(level, self.tag())
    }

    // --- Direct selection ---

    /// Select a side. Unknown segments clear the selection instead.
    pub fn set_selection(&mut self, level: &Level, tag: Tag) {
        if level.segment_exists(tag.segment) {
            self.segment = tag.segment;
            self.side = tag.side;
        } else {
            self.segment = SegId::NONE;
        }
        self.notify_selection();
    }

    /// Select a segment, keeping the active side
    pub fn set_segment(&mut self, level: &Level, id: SegId) {
        self.set_selection(level, Tag::new(id, self.side));
    }

    /// Select an object. Ids below the sentinel collapse to none.
    pub fn set_object(&mut self, id: ObjId) {
        self.object = ObjId::clamped(id.0);
        tracing::debug!("Selected object {}", self.object);
        self.events.push(EditorEvent::ObjectSelected(self.object));
    }

    /// Select the first side using a texture as base or overlay
    pub fn select_by_texture(&mut self, level: &Level, texture: LevelTexId) -> bool {
        if texture.is_none() {
            return false;
        }
        let found = level.tags().find(|tag| {
            level
                .try_get_side(*tag)
                .is_some_and(|side| side.tmap == texture || side.tmap2 == texture)
        });

        match found {
            Some(tag) => {
                self.set_selection(level, tag);
                true
            }
            None => false,
        }
    }

    /// Select the side holding the wall that owns a trigger
    pub fn select_by_trigger(&mut self, level: &Level, trigger: TriggerId) -> bool {
        if trigger.is_none() {
            return false;
        }
        match level.walls.iter().find(|wall| wall.trigger == trigger) {
            Some(wall) => {
                let tag = wall.tag;
                self.set_selection(level, tag);
                true
            }
            None => false,
        }
    }

    /// Select the side holding a wall
    pub fn select_by_wall(&mut self, level: &Level, wall: WallId) -> bool {
        match level.try_get_wall(wall) {
            Some(wall) => {
                let tag = wall.tag;
                self.set_selection(level, tag);
                true
            }
            None => false,
        }
    }

    /// Clear the segment and object selection
    pub fn reset(&mut self) {
        self.segment = SegId::NONE;
        self.object = ObjId::NONE;
        self.hits.clear();
        self.cycle_depth = 0;
        self.notify_selection();
    }

    /// Repair after a segment was deleted and later ids shifted down
    pub fn remove_segment(&mut self, id: SegId) {
        if self.segment == id {
            self.segment = SegId::NONE;
        } else if self.segment.0 > id.0 {
            self.segment.0 -= 1;
        }
        // Hit tags refer to the old numbering
        self.hits.clear();
        self.cycle_depth = 0;
        self.notify_selection();
    }

    fn notify_selection(&mut self) {
        tracing::debug!("Selection changed to {} point {}", self.tag(), self.point);
        self.events.push(EditorEvent::SelectionChanged);
    }
}

fn step_id(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current.filter(|i| *i < len), forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

/// Edge indices `(a, b)` where side `a` of one face meets side `b` of another
pub fn find_shared_edges(level: &Level, src: Tag, dest: Tag) -> Option<(u16, u16)> {
    let src_indices = level.side_vertex_indices(src)?;
    let dest_indices = level.side_vertex_indices(dest)?;

    for i in 0..4 {
        let a0 = src_indices[i];
        let a1 = src_indices[(i + 1) % 4];
        for j in 0..4 {
            let b0 = dest_indices[j];
            let b1 = dest_indices[(j + 1) % 4];
            if (a0 == b1 && a1 == b0) || (a0 == b0 && a1 == b1) {
                return Some((i as u16, j as u16));
            }
        }
    }
    None
}

/// Faces reachable from `start` across shared edges that are visible, lie in
/// the start face's plane and use the same textures. Includes `start`.
pub fn linked_faces(level: &Level, start: Tag) -> Vec<Tag> {
    let Some(start_face) = level.face(start) else {
        return Vec::new();
    };
    let Some(start_side) = level.try_get_side(start) else {
        return Vec::new();
    };
    let textures = (start_side.tmap, start_side.tmap2);

    // Visible faces keyed by their undirected edges
    let mut by_edge: HashMap<(PointId, PointId), Vec<Tag>> = HashMap::new();
    for tag in level.tags() {
        let visible = level
            .try_get_segment(tag.segment)
            .is_some_and(|seg| seg.side_is_visible(tag.side));
        if !visible {
            continue;
        }
        if let Some(indices) = level.side_vertex_indices(tag) {
            for i in 0..4 {
                let a = indices[i];
                let b = indices[(i + 1) % 4];
                by_edge.entry((a.min(b), a.max(b))).or_default().push(tag);
            }
        }
    }

    let mut region = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(tag) = queue.pop_front() {
        let Some(indices) = level.side_vertex_indices(tag) else {
            continue;
        };
        for i in 0..4 {
            let a = indices[i];
            let b = indices[(i + 1) % 4];
            let Some(neighbours) = by_edge.get(&(a.min(b), a.max(b))) else {
                continue;
            };
            for next in neighbours {
                if region.contains(next) {
                    continue;
                }
                let same_texture = level
                    .try_get_side(*next)
                    .is_some_and(|side| (side.tmap, side.tmap2) == textures);
                let coplanar = level
                    .face(*next)
                    .is_some_and(|face| start_face.is_coplanar_with(&face));
                if same_texture && coplanar {
                    region.insert(*next);
                    queue.push_back(*next);
                }
            }
        }
    }

    region.into_iter().collect()
}
