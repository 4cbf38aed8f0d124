//! Selection modes
//!
//! Each mode is a [`ModeStrategy`]: it decides which marked set is active,
//! which elements a mark-all covers, how a single selection or ray hit turns
//! into marks, and where the transform origin sits. Everything else in the
//! editor asks the strategy instead of branching on the mode.

use glam::Vec3;
use rift_core::{EDGES_OF_SIDE, Level, PointId, SideId, Tag};
use serde::{Deserialize, Serialize};

use crate::hit::SelectionHit;
use crate::marked::{Mark, MultiSelection};
use crate::selection::EditorSelection;

/// What a click selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    Segment,
    #[default]
    Face,
    Edge,
    Point,
    Object,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 5] = [
        SelectionMode::Segment,
        SelectionMode::Face,
        SelectionMode::Edge,
        SelectionMode::Point,
        SelectionMode::Object,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SelectionMode::Segment => "Segment",
            SelectionMode::Face => "Face",
            SelectionMode::Edge => "Edge",
            SelectionMode::Point => "Point",
            SelectionMode::Object => "Object",
        }
    }

    /// Behaviour for this mode
    pub fn strategy(self) -> &'static dyn ModeStrategy {
        match self {
            SelectionMode::Segment => &SegmentMode,
            SelectionMode::Face => &FaceMode,
            SelectionMode::Edge => &EdgeMode,
            SelectionMode::Point => &PointMode,
            SelectionMode::Object => &ObjectMode,
        }
    }
}

/// Mode-specific selection behaviour
pub trait ModeStrategy: Sync {
    fn mode(&self) -> SelectionMode;

    /// Marks in the set this mode works on
    fn marks(&self, marked: &MultiSelection) -> Vec<Mark>;

    /// Empties the set this mode works on
    fn clear_marks(&self, marked: &mut MultiSelection);

    /// Faces covered by the marks. Only face-level modes produce any.
    fn marked_faces(&self, _marked: &MultiSelection) -> Vec<Tag> {
        Vec::new()
    }

    /// Every valid element this mode can mark
    fn universe(&self, level: &Level) -> Vec<Mark>;

    /// Marks for the active single selection (what toggle-mark flips)
    fn from_selection(&self, selection: &EditorSelection, level: &Level) -> Vec<Mark>;

    /// Marks for a ray hit
    fn from_hit(&self, hit: &SelectionHit, level: &Level) -> Vec<Mark>;

    /// Transform pivot of the active single selection
    fn origin(&self, selection: &EditorSelection, level: &Level) -> Option<Vec3>;

    /// Vertices moved when the active single selection is transformed
    fn vertex_handles(&self, selection: &EditorSelection, level: &Level) -> Vec<PointId>;
}

/// Whole segments
pub struct SegmentMode;
/// Individual sides
pub struct FaceMode;
/// Side edges; marks are the edge end points
pub struct EdgeMode;
/// Side corners
pub struct PointMode;
/// Level objects
pub struct ObjectMode;

fn visible_faces(level: &Level) -> Vec<Mark> {
    level
        .tags()
        .filter(|tag| {
            level
                .try_get_segment(tag.segment)
                .is_some_and(|seg| seg.side_is_visible(tag.side))
        })
        .map(Mark::Face)
        .collect()
}

fn used_points(level: &Level) -> Vec<Mark> {
    level.used_vertices().into_iter().map(Mark::Point).collect()
}

fn point_marks(marked: &MultiSelection) -> Vec<Mark> {
    marked.points.iter().copied().map(Mark::Point).collect()
}

/// Level vertices at both ends of edge `edge` of a side
fn edge_points(level: &Level, tag: Tag, edge: u16) -> Vec<PointId> {
    match level.side_vertex_indices(tag) {
        Some(indices) => {
            let i = edge as usize % 4;
            vec![indices[i], indices[(i + 1) % 4]]
        }
        None => Vec::new(),
    }
}

fn corner_point(level: &Level, tag: Tag, point: u16) -> Option<PointId> {
    level
        .side_vertex_indices(tag)
        .map(|indices| indices[point as usize % 4])
}

impl ModeStrategy for SegmentMode {
    fn mode(&self) -> SelectionMode {
        SelectionMode::Segment
    }

    fn marks(&self, marked: &MultiSelection) -> Vec<Mark> {
        marked.segments.iter().copied().map(Mark::Segment).collect()
    }

    fn clear_marks(&self, marked: &mut MultiSelection) {
        marked.segments.clear();
    }

    fn marked_faces(&self, marked: &MultiSelection) -> Vec<Tag> {
        let segs: Vec<_> = marked.segments.iter().copied().collect();
        crate::marked::faces_for_segments(&segs)
    }

    fn universe(&self, level: &Level) -> Vec<Mark> {
        level.segment_ids().map(Mark::Segment).collect()
    }

    fn from_selection(&self, selection: &EditorSelection, level: &Level) -> Vec<Mark> {
        if level.segment_exists(selection.segment) {
            vec![Mark::Segment(selection.segment)]
        } else {
            Vec::new()
        }
    }

    fn from_hit(&self, hit: &SelectionHit, level: &Level) -> Vec<Mark> {
        if level.segment_exists(hit.tag.segment) {
            vec![Mark::Segment(hit.tag.segment)]
        } else {
            Vec::new()
        }
    }

    fn origin(&self, selection: &EditorSelection, level: &Level) -> Option<Vec3> {
        level.segment_center(selection.segment)
    }

    fn vertex_handles(&self, selection: &EditorSelection, level: &Level) -> Vec<PointId> {
        level
            .try_get_segment(selection.segment)
            .map(|seg| seg.indices.to_vec())
            .unwrap_or_default()
    }
}

impl ModeStrategy for FaceMode {
    fn mode(&self) -> SelectionMode {
        SelectionMode::Face
    }

    fn marks(&self, marked: &MultiSelection) -> Vec<Mark> {
        marked.faces.iter().copied().map(Mark::Face).collect()
    }

    fn clear_marks(&self, marked: &mut MultiSelection) {
        marked.faces.clear();
    }

    fn marked_faces(&self, marked: &MultiSelection) -> Vec<Tag> {
        marked.faces.iter().copied().collect()
    }

    fn universe(&self, level: &Level) -> Vec<Mark> {
        visible_faces(level)
    }

    fn from_selection(&self, selection: &EditorSelection, level: &Level) -> Vec<Mark> {
        if level.segment_exists(selection.segment) {
            vec![Mark::Face(selection.tag())]
        } else {
            Vec::new()
        }
    }

    fn from_hit(&self, hit: &SelectionHit, level: &Level) -> Vec<Mark> {
        if level.segment_exists(hit.tag.segment) {
            vec![Mark::Face(hit.tag)]
        } else {
            Vec::new()
        }
    }

    fn origin(&self, selection: &EditorSelection, level: &Level) -> Option<Vec3> {
        level.side_center(selection.tag())
    }

    fn vertex_handles(&self, selection: &EditorSelection, level: &Level) -> Vec<PointId> {
        level
            .side_vertex_indices(selection.tag())
            .map(|indices| indices.to_vec())
            .unwrap_or_default()
    }
}

impl ModeStrategy for EdgeMode {
    fn mode(&self) -> SelectionMode {
        SelectionMode::Edge
    }

    fn marks(&self, marked: &MultiSelection) -> Vec<Mark> {
        point_marks(marked)
    }

    fn clear_marks(&self, marked: &mut MultiSelection) {
        marked.points.clear();
    }

    fn universe(&self, level: &Level) -> Vec<Mark> {
        used_points(level)
    }

    fn from_selection(&self, selection: &EditorSelection, level: &Level) -> Vec<Mark> {
        edge_points(level, selection.tag(), selection.point)
            .into_iter()
            .map(Mark::Point)
            .collect()
    }

    fn from_hit(&self, hit: &SelectionHit, level: &Level) -> Vec<Mark> {
        edge_points(level, hit.tag, hit.edge)
            .into_iter()
            .map(Mark::Point)
            .collect()
    }

    fn origin(&self, selection: &EditorSelection, level: &Level) -> Option<Vec3> {
        level
            .face(selection.tag())
            .map(|face| face.edge_midpoint(selection.point as usize))
    }

    fn vertex_handles(&self, selection: &EditorSelection, level: &Level) -> Vec<PointId> {
        edge_points(level, selection.tag(), selection.point)
    }
}

impl ModeStrategy for PointMode {
    fn mode(&self) -> SelectionMode {
        SelectionMode::Point
    }

    fn marks(&self, marked: &MultiSelection) -> Vec<Mark> {
        point_marks(marked)
    }

    fn clear_marks(&self, marked: &mut MultiSelection) {
        marked.points.clear();
    }

    fn universe(&self, level: &Level) -> Vec<Mark> {
        used_points(level)
    }

    fn from_selection(&self, selection: &EditorSelection, level: &Level) -> Vec<Mark> {
        corner_point(level, selection.tag(), selection.point)
            .map(Mark::Point)
            .into_iter()
            .collect()
    }

    fn from_hit(&self, hit: &SelectionHit, level: &Level) -> Vec<Mark> {
        corner_point(level, hit.tag, hit.edge)
            .map(Mark::Point)
            .into_iter()
            .collect()
    }

    fn origin(&self, selection: &EditorSelection, level: &Level) -> Option<Vec3> {
        corner_point(level, selection.tag(), selection.point)
            .and_then(|id| level.try_get_vertex(id))
    }

    fn vertex_handles(&self, selection: &EditorSelection, level: &Level) -> Vec<PointId> {
        corner_point(level, selection.tag(), selection.point)
            .into_iter()
            .collect()
    }
}

impl ModeStrategy for ObjectMode {
    fn mode(&self) -> SelectionMode {
        SelectionMode::Object
    }

    fn marks(&self, marked: &MultiSelection) -> Vec<Mark> {
        marked.objects.iter().copied().map(Mark::Object).collect()
    }

    fn clear_marks(&self, marked: &mut MultiSelection) {
        marked.objects.clear();
    }

    fn universe(&self, level: &Level) -> Vec<Mark> {
        level.object_ids().map(Mark::Object).collect()
    }

    fn from_selection(&self, selection: &EditorSelection, level: &Level) -> Vec<Mark> {
        if level.try_get_object(selection.object).is_some() {
            vec![Mark::Object(selection.object)]
        } else {
            Vec::new()
        }
    }

    fn from_hit(&self, hit: &SelectionHit, level: &Level) -> Vec<Mark> {
        if level.try_get_object(hit.object).is_some() {
            vec![Mark::Object(hit.object)]
        } else {
            Vec::new()
        }
    }

    fn origin(&self, selection: &EditorSelection, level: &Level) -> Option<Vec3> {
        level
            .try_get_object(selection.object)
            .map(|obj| obj.position)
    }

    fn vertex_handles(&self, _selection: &EditorSelection, _level: &Level) -> Vec<PointId> {
        Vec::new()
    }
}

/// Segment edge index of the active edge of a side
pub fn active_edge(side: SideId, point: u16) -> usize {
    EDGES_OF_SIDE[side.index()][point as usize % 4]
}
