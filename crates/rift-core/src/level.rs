//! Level geometry arena
//!
//! Segments, vertices, objects, walls and triggers are stored in dense
//! vectors and referenced by id. Read accessors never panic on a missing id;
//! they return `None`/`false` so callers can treat stale ids as "nothing".

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::face::Face;
use crate::ids::{ObjId, PointId, SegId, SideId, Tag, TriggerId, WallId};
use crate::object::Object;
use crate::segment::{Segment, Side};
use crate::wall::{Trigger, Wall};

/// Errors from structural level edits
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("Segment not found: {0}")]
    SegmentNotFound(SegId),

    #[error("Wall not found: {0}")]
    WallNotFound(WallId),

    #[error("Invalid vertex: {0:?}")]
    InvalidVertex(PointId),

    #[error("Side already connected: {0}")]
    SideAlreadyConnected(Tag),

    #[error("Side already has a wall: {0}")]
    SideHasWall(Tag),
}

/// A loaded level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub segments: Vec<Segment>,
    pub vertices: Vec<Vec3>,
    pub objects: Vec<Object>,
    pub walls: Vec<Wall>,
    pub triggers: Vec<Trigger>,
    /// Sides opened when the reactor is destroyed
    pub reactor_triggers: Vec<Tag>,
}

impl Level {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    // --- Read accessors ---

    pub fn segment_exists(&self, id: SegId) -> bool {
        id.index().is_some_and(|i| i < self.segments.len())
    }

    /// Gets a segment that is known to exist.
    ///
    /// # Panics
    ///
    /// Panics if the id is not valid. Check with [`Level::segment_exists`] first.
    pub fn get_segment(&self, id: SegId) -> &Segment {
        match self.try_get_segment(id) {
            Some(seg) => seg,
            None => panic!("segment {id} does not exist"),
        }
    }

    pub fn try_get_segment(&self, id: SegId) -> Option<&Segment> {
        self.segments.get(id.index()?)
    }

    pub fn try_get_segment_mut(&mut self, id: SegId) -> Option<&mut Segment> {
        self.segments.get_mut(id.index()?)
    }

    pub fn try_get_side(&self, tag: Tag) -> Option<&Side> {
        self.try_get_segment(tag.segment).map(|seg| seg.side(tag.side))
    }

    pub fn get_segment_and_side(&self, tag: Tag) -> Option<(&Segment, &Side)> {
        let seg = self.try_get_segment(tag.segment)?;
        Some((seg, seg.side(tag.side)))
    }

    pub fn vertex_is_valid(&self, id: PointId) -> bool {
        id.index() < self.vertices.len()
    }

    pub fn try_get_vertex(&self, id: PointId) -> Option<Vec3> {
        self.vertices.get(id.index()).copied()
    }

    pub fn try_get_object(&self, id: ObjId) -> Option<&Object> {
        self.objects.get(id.index()?)
    }

    pub fn try_get_wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(id.index()?)
    }

    pub fn try_get_trigger(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.get(id.index()?)
    }

    /// Wall placed on a side, if any
    pub fn try_get_wall_at(&self, tag: Tag) -> Option<&Wall> {
        self.try_get_side(tag)
            .and_then(|side| self.try_get_wall(side.wall))
    }

    pub fn segment_ids(&self) -> impl Iterator<Item = SegId> + '_ {
        (0..self.segments.len()).map(SegId::from_index)
    }

    pub fn object_ids(&self) -> impl Iterator<Item = ObjId> + '_ {
        (0..self.objects.len()).map(ObjId::from_index)
    }

    /// Every (segment, side) in the level
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.segment_ids()
            .flat_map(|seg| SideId::ALL.into_iter().map(move |side| Tag::new(seg, side)))
    }

    // --- Geometry queries ---

    /// World positions of the 8 corners, None if any vertex is missing
    pub fn segment_vertices(&self, id: SegId) -> Option<[Vec3; 8]> {
        let seg = self.try_get_segment(id)?;
        let mut out = [Vec3::ZERO; 8];
        for (slot, index) in seg.indices.iter().enumerate() {
            out[slot] = self.try_get_vertex(*index)?;
        }
        Some(out)
    }

    pub fn segment_center(&self, id: SegId) -> Option<Vec3> {
        let verts = self.segment_vertices(id)?;
        Some(verts.iter().copied().sum::<Vec3>() / 8.0)
    }

    pub fn side_vertex_indices(&self, tag: Tag) -> Option<[PointId; 4]> {
        self.try_get_segment(tag.segment)
            .map(|seg| seg.vertex_indices(tag.side))
    }

    pub fn face(&self, tag: Tag) -> Option<Face> {
        let indices = self.side_vertex_indices(tag)?;
        let mut points = [Vec3::ZERO; 4];
        for (i, index) in indices.iter().enumerate() {
            points[i] = self.try_get_vertex(*index)?;
        }
        Some(Face::new(points))
    }

    pub fn side_center(&self, tag: Tag) -> Option<Vec3> {
        self.face(tag).map(|face| face.center())
    }

    pub fn side_has_connection(&self, tag: Tag) -> bool {
        self.try_get_segment(tag.segment)
            .is_some_and(|seg| seg.side_has_connection(tag.side))
    }

    /// Vertices referenced by at least one segment, sorted and deduplicated
    pub fn used_vertices(&self) -> Vec<PointId> {
        let mut ids: Vec<PointId> = self
            .segments
            .iter()
            .flat_map(|seg| seg.indices)
            .filter(|id| self.vertex_is_valid(*id))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    // --- Structural edits ---

    pub fn add_vertex(&mut self, position: Vec3) -> PointId {
        self.vertices.push(position);
        PointId((self.vertices.len() - 1) as u16)
    }

    pub fn add_segment(&mut self, segment: Segment) -> Result<SegId, LevelError> {
        if let Some(bad) = segment.indices.iter().find(|id| !self.vertex_is_valid(**id)) {
            return Err(LevelError::InvalidVertex(*bad));
        }
        self.segments.push(segment);
        Ok(SegId::from_index(self.segments.len() - 1))
    }

    pub fn add_object(&mut self, object: Object) -> ObjId {
        self.objects.push(object);
        ObjId::from_index(self.objects.len() - 1)
    }

    pub fn add_trigger(&mut self, trigger: Trigger) -> TriggerId {
        self.triggers.push(trigger);
        TriggerId::from_index(self.triggers.len() - 1)
    }

    /// Place a wall on a side
    pub fn add_wall(&mut self, wall: Wall) -> Result<WallId, LevelError> {
        let tag = wall.tag;
        let id = WallId::from_index(self.walls.len());
        let seg = self
            .try_get_segment_mut(tag.segment)
            .ok_or(LevelError::SegmentNotFound(tag.segment))?;
        let side = seg.side_mut(tag.side);
        if side.has_wall() {
            return Err(LevelError::SideHasWall(tag));
        }
        side.wall = id;
        self.walls.push(wall);
        Ok(id)
    }

    /// Link two sides so each segment lists the other as its neighbour
    pub fn connect(&mut self, a: Tag, b: Tag) -> Result<(), LevelError> {
        for tag in [a, b] {
            let seg = self
                .try_get_segment(tag.segment)
                .ok_or(LevelError::SegmentNotFound(tag.segment))?;
            if seg.side_has_connection(tag.side) {
                return Err(LevelError::SideAlreadyConnected(tag));
            }
        }

        if let Some(seg) = self.try_get_segment_mut(a.segment) {
            seg.connections[a.side.index()] = b.segment;
        }
        if let Some(seg) = self.try_get_segment_mut(b.segment) {
            seg.connections[b.side.index()] = a.segment;
        }
        Ok(())
    }

    /// Remove a wall, shifting later wall ids down by one
    pub fn remove_wall(&mut self, id: WallId) -> Result<Wall, LevelError> {
        let index = id
            .index()
            .filter(|i| *i < self.walls.len())
            .ok_or(LevelError::WallNotFound(id))?;

        let wall = self.walls.remove(index);
        for seg in &mut self.segments {
            for side in &mut seg.sides {
                if side.wall == id {
                    side.wall = WallId::NONE;
                } else if side.wall.0 > id.0 {
                    side.wall.0 -= 1;
                }
            }
        }
        Ok(wall)
    }

    /// Delete a segment and compact the segment id space.
    ///
    /// Neighbours are unlinked and walls on the deleted segment, or on
    /// sides that opened into it, are removed. Every stored segment id greater
    /// than `id` is decremented by one. Objects inside the deleted segment
    /// are left in place with no segment. Vertices are not pruned.
    pub fn delete_segment(&mut self, id: SegId) -> Result<Segment, LevelError> {
        if !self.segment_exists(id) {
            return Err(LevelError::SegmentNotFound(id));
        }

        // Walls on the segment itself and on neighbouring sides that become solid
        let mut doomed_walls: Vec<WallId> = Vec::new();
        let seg = self.get_segment(id).clone();
        for side in SideId::ALL {
            if seg.side(side).has_wall() {
                doomed_walls.push(seg.side(side).wall);
            }
            let neighbour = seg.connection(side);
            if let Some(other) = self.try_get_segment(neighbour) {
                if let Some(back) = other.side_connected_to(id) {
                    let wall = other.side(back).wall;
                    if wall.is_some() {
                        doomed_walls.push(wall);
                    }
                }
            }
        }

        doomed_walls.sort();
        doomed_walls.dedup();
        for wall in doomed_walls.into_iter().rev() {
            self.remove_wall(wall)?;
        }

        let Some(index) = id.index() else {
            return Err(LevelError::SegmentNotFound(id));
        };
        let removed = self.segments.remove(index);

        let shift = |seg_id: &mut SegId| {
            if *seg_id == id {
                *seg_id = SegId::NONE;
            } else if seg_id.0 > id.0 {
                seg_id.0 -= 1;
            }
        };

        for seg in &mut self.segments {
            for connection in &mut seg.connections {
                shift(connection);
            }
        }
        for wall in &mut self.walls {
            shift(&mut wall.tag.segment);
        }
        for trigger in &mut self.triggers {
            trigger.targets.retain(|t| t.segment != id);
            for target in &mut trigger.targets {
                shift(&mut target.segment);
            }
        }
        self.reactor_triggers.retain(|t| t.segment != id);
        for target in &mut self.reactor_triggers {
            shift(&mut target.segment);
        }
        for object in &mut self.objects {
            shift(&mut object.segment);
        }

        tracing::debug!(
            "Deleted segment {}, {} segments remain",
            id,
            self.segments.len()
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectType;
    use crate::wall::{TriggerType, WallType};
    use approx::assert_relative_eq;

    #[test]
    fn test_missing_ids_are_none() {
        let level = Level::cube_row(2);
        assert!(!level.segment_exists(SegId(2)));
        assert!(!level.segment_exists(SegId::NONE));
        assert!(level.try_get_segment(SegId(-5)).is_none());
        assert!(level.try_get_object(ObjId(0)).is_none());
        assert!(level.try_get_vertex(PointId(999)).is_none());
        assert!(level.face(Tag::new(SegId(9), SideId::Left)).is_none());
    }

    #[test]
    fn test_segment_center() {
        let level = Level::cube_row(2);
        assert_relative_eq!(level.segment_center(SegId(0)).unwrap(), Vec3::ZERO);
        assert_relative_eq!(
            level.segment_center(SegId(1)).unwrap(),
            Vec3::new(0.0, 0.0, 20.0)
        );
    }

    #[test]
    fn test_side_normals_point_inward() {
        let level = Level::cube_row(1);
        for side in SideId::ALL {
            let face = level.face(Tag::new(SegId(0), side)).unwrap();
            // Center of the cube is the origin, so the normal faces back toward it
            assert!(face.average_normal().dot(-face.center()) > 0.0);
        }
    }

    #[test]
    fn test_delete_segment_compacts_ids() {
        let mut level = Level::cube_row(3);
        let wall = level
            .add_wall(Wall::new(Tag::new(SegId(2), SideId::Left), WallType::Door))
            .unwrap();
        let mut trigger = Trigger::new(TriggerType::OpenDoor);
        trigger.targets = vec![
            Tag::new(SegId(0), SideId::Top),
            Tag::new(SegId(1), SideId::Top),
            Tag::new(SegId(2), SideId::Left),
        ];
        level.add_trigger(trigger);
        level.add_object(Object::new(
            ObjectType::Robot,
            SegId(2),
            Vec3::new(0.0, 0.0, 40.0),
            3.0,
        ));

        level.delete_segment(SegId(1)).unwrap();

        assert_eq!(level.segments.len(), 2);
        // Old segment 2 is now 1 and no longer connected to anything
        assert_eq!(level.get_segment(SegId(0)).connection(SideId::Back), SegId::NONE);
        assert_eq!(level.get_segment(SegId(1)).connection(SideId::Front), SegId::NONE);
        assert_eq!(level.walls[wall.index().unwrap()].tag.segment, SegId(1));
        assert_eq!(
            level.triggers[0].targets,
            vec![
                Tag::new(SegId(0), SideId::Top),
                Tag::new(SegId(1), SideId::Left)
            ]
        );
        assert_eq!(level.objects[0].segment, SegId(1));
    }

    #[test]
    fn test_delete_segment_removes_walls_into_it() {
        let mut level = Level::cube_row(2);
        level
            .add_wall(Wall::new(Tag::new(SegId(0), SideId::Back), WallType::Door))
            .unwrap();
        let keep = level
            .add_wall(Wall::new(Tag::new(SegId(0), SideId::Left), WallType::Illusion))
            .unwrap();
        assert_eq!(keep, WallId(1));

        level.delete_segment(SegId(1)).unwrap();

        assert_eq!(level.walls.len(), 1);
        assert_eq!(level.get_segment(SegId(0)).side(SideId::Left).wall, WallId(0));
        assert_eq!(level.get_segment(SegId(0)).side(SideId::Back).wall, WallId::NONE);
    }

    #[test]
    fn test_delete_missing_segment() {
        let mut level = Level::cube_row(1);
        assert_eq!(
            level.delete_segment(SegId(4)),
            Err(LevelError::SegmentNotFound(SegId(4)))
        );
    }

    #[test]
    fn test_add_segment_rejects_bad_vertex() {
        let mut level = Level::new("empty");
        let seg = Segment::new([PointId(0); 8]);
        assert_eq!(
            level.add_segment(seg),
            Err(LevelError::InvalidVertex(PointId(0)))
        );
    }
}
