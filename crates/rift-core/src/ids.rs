//! Id types for level geometry
//!
//! Ids are small signed integers with a `-1` "none" sentinel, matching how
//! level files store them. Segment ids are dense: deleting a segment shifts
//! every later id down by one.

use serde::{Deserialize, Serialize};

macro_rules! sentinel_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i16);

        impl $name {
            /// The "nothing" sentinel
            pub const NONE: Self = Self(-1);

            /// Returns true if this is the sentinel
            pub fn is_none(self) -> bool {
                self.0 == Self::NONE.0
            }

            /// Returns true if this refers to something
            pub fn is_some(self) -> bool {
                !self.is_none()
            }

            /// Array index for this id, None for the sentinel or negative values
            pub fn index(self) -> Option<usize> {
                usize::try_from(self.0).ok()
            }

            /// Id for an array index
            pub fn from_index(index: usize) -> Self {
                Self(index as i16)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::NONE
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if self.is_none() {
                    write!(f, "none")
                } else {
                    write!(f, "{}", self.0)
                }
            }
        }
    };
}

sentinel_id!(
    /// Segment id
    SegId
);
sentinel_id!(
    /// Object id
    ObjId
);
sentinel_id!(
    /// Wall id
    WallId
);
sentinel_id!(
    /// Trigger id
    TriggerId
);
sentinel_id!(
    /// Matcen (robot generator) id
    MatcenId
);
sentinel_id!(
    /// Level texture id
    LevelTexId
);

impl ObjId {
    /// Normalizes a raw id, collapsing anything below the sentinel into it
    pub fn clamped(raw: i16) -> Self {
        if raw < Self::NONE.0 {
            Self::NONE
        } else {
            Self(raw)
        }
    }
}

/// Index into the level vertex array
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub u16);

impl PointId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One of the six sides of a segment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum SideId {
    #[default]
    Left,
    Top,
    Right,
    Bottom,
    Back,
    Front,
}

impl SideId {
    /// All sides in id order
    pub const ALL: [SideId; 6] = [
        SideId::Left,
        SideId::Top,
        SideId::Right,
        SideId::Bottom,
        SideId::Back,
        SideId::Front,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The next side, wrapping from Front back to Left
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The previous side, wrapping from Left to Front
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    /// The side on the other end of the segment
    pub fn opposite(self) -> Self {
        match self {
            SideId::Left => SideId::Right,
            SideId::Right => SideId::Left,
            SideId::Top => SideId::Bottom,
            SideId::Bottom => SideId::Top,
            SideId::Back => SideId::Front,
            SideId::Front => SideId::Back,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SideId::Left => "Left",
            SideId::Top => "Top",
            SideId::Right => "Right",
            SideId::Bottom => "Bottom",
            SideId::Back => "Back",
            SideId::Front => "Front",
        }
    }
}

/// A (segment, side) pair
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Tag {
    pub segment: SegId,
    pub side: SideId,
}

impl Tag {
    pub fn new(segment: SegId, side: SideId) -> Self {
        Self { segment, side }
    }

    pub fn is_none(&self) -> bool {
        self.segment.is_none()
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.segment, self.side.name())
    }
}

/// A corner of a side, point is in 0..4
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct PointTag {
    pub segment: SegId,
    pub side: SideId,
    pub point: u16,
}

impl PointTag {
    pub fn new(segment: SegId, side: SideId, point: u16) -> Self {
        Self {
            segment,
            side,
            point,
        }
    }

    pub fn tag(&self) -> Tag {
        Tag::new(self.segment, self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_cycle_visits_each_side_once() {
        let mut side = SideId::Left;
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(side);
            side = side.next();
        }
        assert_eq!(side, SideId::Left);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_side_prev_wraps() {
        assert_eq!(SideId::Left.prev(), SideId::Front);
        assert_eq!(SideId::Front.next(), SideId::Left);
        for side in SideId::ALL {
            assert_eq!(side.next().prev(), side);
        }
    }

    #[test]
    fn test_obj_id_clamped() {
        assert_eq!(ObjId::clamped(-7), ObjId::NONE);
        assert_eq!(ObjId::clamped(-1), ObjId::NONE);
        assert_eq!(ObjId::clamped(4), ObjId(4));
    }

    #[test]
    fn test_sentinel_index() {
        assert_eq!(SegId::NONE.index(), None);
        assert_eq!(SegId(3).index(), Some(3));
        assert!(SegId::default().is_none());
    }
}
