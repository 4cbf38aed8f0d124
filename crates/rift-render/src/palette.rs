//! Overlay colors

use glam::Vec4;
use rift_core::{SegmentType, Wall, WallType};

// Active selection
pub const SELECTION_PRIMARY: Vec4 = Vec4::new(1.0, 0.85, 0.0, 1.0); // Yellow
pub const SELECTION_SECONDARY: Vec4 = Vec4::new(0.0, 0.9, 1.0, 1.0); // Cyan
pub const SELECTION_TERTIARY: Vec4 = Vec4::new(1.0, 0.45, 0.0, 1.0); // Orange
pub const SELECTION_OUTLINE: Vec4 = Vec4::new(0.9, 0.9, 0.9, 0.9);

// Marks
pub const MARKED_FACE: Vec4 = Vec4::new(1.0, 0.3, 0.3, 1.0);
pub const MARKED_FACE_FILL: Vec4 = Vec4::new(1.0, 0.3, 0.3, 0.25);
pub const MARKED_WALL: Vec4 = Vec4::new(1.0, 0.0, 1.0, 1.0);
pub const MARKED_WALL_FILL: Vec4 = Vec4::new(1.0, 0.0, 1.0, 0.25);
pub const MARKED_POINT: Vec4 = Vec4::new(1.0, 0.3, 0.3, 1.0);
pub const SELECTED_OBJECT: Vec4 = Vec4::new(1.0, 0.85, 0.0, 1.0);
pub const MARKED_OBJECT: Vec4 = Vec4::new(1.0, 0.3, 0.3, 1.0);

// Level
pub const WIREFRAME: Vec4 = Vec4::new(0.6, 0.6, 0.6, 1.0);
pub const WALL: Vec4 = Vec4::new(0.8, 0.8, 0.8, 1.0);
pub const DOOR: Vec4 = Vec4::new(0.2, 1.0, 0.2, 1.0);
pub const DOOR_BLUE: Vec4 = Vec4::new(0.2, 0.4, 1.0, 1.0);
pub const DOOR_GOLD: Vec4 = Vec4::new(1.0, 0.8, 0.0, 1.0);
pub const DOOR_RED: Vec4 = Vec4::new(1.0, 0.1, 0.1, 1.0);
pub const TRIGGER: Vec4 = Vec4::new(1.0, 0.6, 0.0, 1.0);
pub const TRIGGER_ARROW: Vec4 = Vec4::new(1.0, 0.6, 0.0, 0.8);
pub const MATCEN: Vec4 = Vec4::new(0.8, 0.2, 1.0, 1.0);
pub const REACTOR_TRIGGER_ARROW: Vec4 = Vec4::new(1.0, 0.2, 0.2, 0.8);
pub const CROSSHAIR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.8);

// Special segments
pub const ENERGY: Vec4 = Vec4::new(1.0, 0.85, 0.2, 1.0);
pub const REPAIR: Vec4 = Vec4::new(0.2, 0.6, 1.0, 1.0);
pub const REACTOR: Vec4 = Vec4::new(1.0, 0.2, 0.2, 1.0);
pub const GOAL: Vec4 = Vec4::new(0.2, 1.0, 0.6, 1.0);

/// Alpha of special segment fills
pub const SEGMENT_FILL_ALPHA: f32 = 0.1;
/// Alpha of the plain wireframe
pub const WIREFRAME_OPACITY: f32 = 0.35;
/// Alpha of wall fills in the wireframe pass
pub const WALL_FILL_ALPHA: f32 = 0.12;

pub fn with_alpha(color: Vec4, alpha: f32) -> Vec4 {
    Vec4::new(color.x, color.y, color.z, alpha)
}

/// Outline and fill for a segment of the given type
pub fn segment_colors(kind: SegmentType) -> (Vec4, Vec4) {
    let outline = match kind {
        SegmentType::None => MARKED_FACE,
        SegmentType::Energy => ENERGY,
        SegmentType::Repair => REPAIR,
        SegmentType::Reactor => REACTOR,
        SegmentType::Matcen => MATCEN,
        SegmentType::Goal => GOAL,
    };
    let fill = match kind {
        SegmentType::None => MARKED_FACE_FILL,
        _ => with_alpha(outline, SEGMENT_FILL_ALPHA),
    };
    (outline, fill)
}

/// Marker color of a wall. Doors are colored by the first key they need.
pub fn wall_color(wall: &Wall) -> Vec4 {
    if wall.kind != WallType::Door {
        return WALL;
    }
    if wall.keys.blue {
        DOOR_BLUE
    } else if wall.keys.gold {
        DOOR_GOLD
    } else if wall.keys.red {
        DOOR_RED
    } else {
        DOOR
    }
}
