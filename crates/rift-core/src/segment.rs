//! Segment and side definitions

use serde::{Deserialize, Serialize};

use crate::ids::{LevelTexId, MatcenId, PointId, SegId, SideId, WallId};

/// Corner vertex slots (0..8) of each side, indexed by [`SideId`]
pub const SIDE_INDICES: [[usize; 4]; 6] = [
    [7, 6, 2, 3], // Left
    [0, 4, 7, 3], // Top
    [0, 1, 5, 4], // Right
    [2, 6, 5, 1], // Bottom
    [4, 5, 6, 7], // Back
    [3, 2, 1, 0], // Front
];

/// Vertex slots of the 12 segment edges
pub const VERTS_OF_EDGE: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
];

/// Segment edge index for each side edge. Edge `i` of a side runs from
/// corner `i` to corner `i + 1`.
pub const EDGES_OF_SIDE: [[usize; 4]; 6] = [
    [10, 6, 2, 7],
    [4, 11, 7, 3],
    [0, 5, 8, 4],
    [6, 9, 5, 1],
    [8, 9, 10, 11],
    [2, 1, 0, 3],
];

/// Special segment behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SegmentType {
    #[default]
    None,
    Energy,
    Repair,
    Reactor,
    Matcen,
    Goal,
}

impl SegmentType {
    pub fn name(&self) -> &'static str {
        match self {
            SegmentType::None => "None",
            SegmentType::Energy => "Energy",
            SegmentType::Repair => "Repair",
            SegmentType::Reactor => "Reactor",
            SegmentType::Matcen => "Matcen",
            SegmentType::Goal => "Goal",
        }
    }
}

/// One face of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Side {
    /// Base texture
    pub tmap: LevelTexId,
    /// Overlay texture, NONE when unused
    pub tmap2: LevelTexId,
    /// Wall on this side, NONE when open or solid
    pub wall: WallId,
}

impl Default for Side {
    fn default() -> Self {
        Self {
            tmap: LevelTexId(0),
            tmap2: LevelTexId::NONE,
            wall: WallId::NONE,
        }
    }
}

impl Side {
    pub fn has_wall(&self) -> bool {
        self.wall.is_some()
    }
}

/// A six sided cell of level geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Neighbouring segment for each side, NONE when the side is solid
    pub connections: [SegId; 6],
    pub sides: [Side; 6],
    /// Level vertex for each of the 8 corners
    pub indices: [PointId; 8],
    pub kind: SegmentType,
    pub matcen: MatcenId,
}

impl Segment {
    /// Create a solid segment from 8 corner vertices
    pub fn new(indices: [PointId; 8]) -> Self {
        Self {
            connections: [SegId::NONE; 6],
            sides: [Side::default(); 6],
            indices,
            kind: SegmentType::None,
            matcen: MatcenId::NONE,
        }
    }

    pub fn side(&self, side: SideId) -> &Side {
        &self.sides[side.index()]
    }

    pub fn side_mut(&mut self, side: SideId) -> &mut Side {
        &mut self.sides[side.index()]
    }

    pub fn connection(&self, side: SideId) -> SegId {
        self.connections[side.index()]
    }

    /// True if another segment is attached to this side
    pub fn side_has_connection(&self, side: SideId) -> bool {
        self.connection(side).is_some()
    }

    /// True if the side is rendered: solid, or open with a wall in it
    pub fn side_is_visible(&self, side: SideId) -> bool {
        !self.side_has_connection(side) || self.side(side).has_wall()
    }

    /// The four corner vertices of a side
    pub fn vertex_indices(&self, side: SideId) -> [PointId; 4] {
        SIDE_INDICES[side.index()].map(|slot| self.indices[slot])
    }

    /// Level vertices of one of the 12 edges
    pub fn edge_vertex_indices(&self, edge: usize) -> [PointId; 2] {
        VERTS_OF_EDGE[edge % 12].map(|slot| self.indices[slot])
    }

    /// The side that connects to `other`, if any
    pub fn side_connected_to(&self, other: SegId) -> Option<SideId> {
        SideId::ALL
            .into_iter()
            .find(|side| self.connection(*side) == other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_of_side_match_corners() {
        for side in 0..6 {
            for i in 0..4 {
                let a = SIDE_INDICES[side][i];
                let b = SIDE_INDICES[side][(i + 1) % 4];
                let [ea, eb] = VERTS_OF_EDGE[EDGES_OF_SIDE[side][i]];
                assert!((ea == a && eb == b) || (ea == b && eb == a));
            }
        }
    }

    #[test]
    fn test_visibility() {
        let mut seg = Segment::new(std::array::from_fn(|i| PointId(i as u16)));
        assert!(seg.side_is_visible(SideId::Back));

        seg.connections[SideId::Back.index()] = SegId(1);
        assert!(!seg.side_is_visible(SideId::Back));

        seg.side_mut(SideId::Back).wall = WallId(0);
        assert!(seg.side_is_visible(SideId::Back));
        assert_eq!(seg.side_connected_to(SegId(1)), Some(SideId::Back));
    }
}
