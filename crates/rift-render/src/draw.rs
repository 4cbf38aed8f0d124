//! Debug-draw primitives
//!
//! A [`DrawList`] is rebuilt every frame and handed to whatever backend draws
//! lines and quads. Nothing here touches a GPU.

use glam::{Vec3, Vec4};
use rift_core::{Camera, Face};
use rift_editor::GizmoMode;

/// Segments used to approximate a circle
pub const CIRCLE_SEGMENTS: u32 = 32;
/// Scale of a wall marker relative to its side
pub const WALL_MARKER_SCALE: f32 = 0.8;

/// Which gizmo handles to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GizmoHandles {
    pub translate: bool,
    pub rotate: bool,
    pub scale: bool,
}

impl GizmoHandles {
    pub const ALL: GizmoHandles = GizmoHandles {
        translate: true,
        rotate: true,
        scale: true,
    };

    pub fn any(&self) -> bool {
        self.translate || self.rotate || self.scale
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Line {
        start: Vec3,
        end: Vec3,
        color: Vec4,
    },
    Point {
        position: Vec3,
        color: Vec4,
    },
    FilledQuad {
        corners: [Vec3; 4],
        color: Vec4,
    },
    /// Circle in the plane spanned by `right` and `up`
    Circle {
        center: Vec3,
        radius: f32,
        right: Vec3,
        up: Vec3,
        color: Vec4,
        segments: u32,
    },
    Arrow {
        start: Vec3,
        end: Vec3,
        color: Vec4,
    },
    Gizmo {
        origin: Vec3,
        scale: f32,
        mode: GizmoMode,
        handles: GizmoHandles,
        hovered: bool,
    },
    /// Lightweight stand-in while a gizmo drag is in progress
    GizmoPreview {
        start: Vec3,
        current: Vec3,
        mode: GizmoMode,
    },
    /// Screen-space crosshair, size in pixels
    Crosshair {
        size: f32,
        color: Vec4,
    },
}

impl DrawPrimitive {
    pub fn color(&self) -> Option<Vec4> {
        match self {
            DrawPrimitive::Line { color, .. }
            | DrawPrimitive::Point { color, .. }
            | DrawPrimitive::FilledQuad { color, .. }
            | DrawPrimitive::Circle { color, .. }
            | DrawPrimitive::Arrow { color, .. }
            | DrawPrimitive::Crosshair { color, .. } => Some(*color),
            DrawPrimitive::Gizmo { .. } | DrawPrimitive::GizmoPreview { .. } => None,
        }
    }
}

/// Ordered primitives for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    primitives: Vec<DrawPrimitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: DrawPrimitive) {
        self.primitives.push(primitive);
    }

    pub fn line(&mut self, start: Vec3, end: Vec3, color: Vec4) {
        self.push(DrawPrimitive::Line { start, end, color });
    }

    pub fn point(&mut self, position: Vec3, color: Vec4) {
        self.push(DrawPrimitive::Point { position, color });
    }

    pub fn arrow(&mut self, start: Vec3, end: Vec3, color: Vec4) {
        self.push(DrawPrimitive::Arrow { start, end, color });
    }

    /// The four edges of a side
    pub fn side_outline(&mut self, face: &Face, color: Vec4) {
        for i in 0..4 {
            let (a, b) = face.edge(i);
            self.line(a, b, color);
        }
    }

    pub fn side_fill(&mut self, face: &Face, color: Vec4) {
        self.push(DrawPrimitive::FilledQuad {
            corners: face.points,
            color,
        });
    }

    /// Circle that always faces the camera
    pub fn facing_circle(&mut self, camera: &Camera, center: Vec3, radius: f32, color: Vec4) {
        let (right, up) = camera.billboard(center);
        self.push(DrawPrimitive::Circle {
            center,
            radius,
            right,
            up,
            color,
            segments: CIRCLE_SEGMENTS,
        });
    }

    /// Inset outline of a side, pushed `offset` along the normal
    pub fn wall_marker(&mut self, face: &Face, offset: f32, color: Vec4) {
        let center = face.center();
        let shift = face.average_normal() * offset;
        let inset = face
            .points
            .map(|p| center + (p - center) * WALL_MARKER_SCALE + shift);
        self.side_outline(&Face::new(inset), color);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawPrimitive> {
        self.primitives.iter()
    }

    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    /// Line primitives only
    pub fn lines(&self) -> impl Iterator<Item = (Vec3, Vec3, Vec4)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            DrawPrimitive::Line { start, end, color } => Some((*start, *end, *color)),
            _ => None,
        })
    }

    /// Count primitives matching a predicate
    pub fn count(&self, f: impl Fn(&DrawPrimitive) -> bool) -> usize {
        self.primitives.iter().filter(|p| f(p)).count()
    }

    pub fn append(&mut self, other: &mut DrawList) {
        self.primitives.append(&mut other.primitives);
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}
