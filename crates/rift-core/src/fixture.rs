//! Procedural demo geometry

use glam::Vec3;

use crate::ids::{LevelTexId, PointId, SegId, SideId, Tag};
use crate::level::{Level, LevelError};
use crate::segment::Segment;

/// Edge length of the generated cubes
pub const CUBE_SIZE: f32 = 20.0;

impl Level {
    /// A straight tunnel of `count` cube segments running along +Z.
    ///
    /// Segment `i` is centered at `(0, 0, i * CUBE_SIZE)`; its Back side
    /// connects to the Front side of segment `i + 1`. Every side uses the
    /// texture id of its side index, so matching sides share a texture.
    pub fn try_cube_row(count: usize) -> Result<Self, LevelError> {
        let mut level = Level::new(format!("tunnel-{count}"));
        if count == 0 {
            return Ok(level);
        }

        let h = CUBE_SIZE * 0.5;
        // One square ring of 4 vertices per cross-section, count + 1 rings
        let mut rings: Vec<[PointId; 4]> = Vec::with_capacity(count + 1);
        for ring in 0..=count {
            let z = ring as f32 * CUBE_SIZE - h;
            rings.push([
                level.add_vertex(Vec3::new(h, h, z)),
                level.add_vertex(Vec3::new(h, -h, z)),
                level.add_vertex(Vec3::new(-h, -h, z)),
                level.add_vertex(Vec3::new(-h, h, z)),
            ]);
        }

        let mut prev: Option<SegId> = None;
        for pair in rings.windows(2) {
            let [a0, a1, a2, a3] = pair[0];
            let [b0, b1, b2, b3] = pair[1];
            let mut seg = Segment::new([a0, a1, a2, a3, b0, b1, b2, b3]);
            for side in SideId::ALL {
                seg.side_mut(side).tmap = LevelTexId(side.index() as i16);
            }
            let id = level.add_segment(seg)?;
            if let Some(prev) = prev {
                level.connect(Tag::new(prev, SideId::Back), Tag::new(id, SideId::Front))?;
            }
            prev = Some(id);
        }

        Ok(level)
    }

    /// [`Level::try_cube_row`] for tests and demos.
    ///
    /// # Panics
    ///
    /// Panics if the generated tunnel is inconsistent.
    pub fn cube_row(count: usize) -> Self {
        Self::try_cube_row(count).expect("cube row segments share valid vertices")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_row_shares_vertices() {
        let level = Level::cube_row(3);
        assert_eq!(level.segments.len(), 3);
        assert_eq!(level.vertices.len(), 16);
        assert_eq!(level.get_segment(SegId(0)).connection(SideId::Back), SegId(1));
        assert_eq!(level.get_segment(SegId(1)).connection(SideId::Front), SegId(0));
        assert_eq!(level.get_segment(SegId(2)).connection(SideId::Back), SegId::NONE);
    }

    #[test]
    fn test_every_inner_side_is_connected() {
        let level = Level::try_cube_row(4).unwrap();
        for i in 0..3 {
            let seg = level.get_segment(SegId(i));
            let next = level.get_segment(SegId(i + 1));
            assert_eq!(seg.connection(SideId::Back), SegId(i + 1));
            assert_eq!(next.connection(SideId::Front), SegId(i));
        }
        assert!(Level::try_cube_row(0).unwrap().segments.is_empty());
    }
}
