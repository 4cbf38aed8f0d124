//! Active selection outline

use glam::Vec4;
use rift_core::{EDGES_OF_SIDE, SIDE_INDICES, VERTS_OF_EDGE};
use rift_editor::SelectionMode;

use super::priorities;
use crate::draw::DrawList;
use crate::frame::FrameContext;
use crate::layer::OverlayLayer;
use crate::palette;

/// Colors for the 12 edges of the active segment.
///
/// Every edge starts with the segment color, the active side's edges are
/// overwritten with the side color and the active edge with the edge color,
/// so the most specific element wins.
pub fn edge_colors(mode: SelectionMode, side: usize, point: usize) -> [Vec4; 12] {
    let pick = |active: SelectionMode, otherwise: Vec4| {
        if mode == active {
            palette::SELECTION_PRIMARY
        } else {
            otherwise
        }
    };

    let mut colors = [pick(SelectionMode::Segment, palette::SELECTION_OUTLINE); 12];

    let edges = EDGES_OF_SIDE[side];
    for edge in edges {
        colors[edge] = pick(SelectionMode::Face, palette::SELECTION_TERTIARY);
    }
    colors[edges[point % 4]] = pick(SelectionMode::Edge, palette::SELECTION_SECONDARY);
    colors
}

/// The 12 edges of the active segment, plus a circle on the active point in
/// point mode
pub struct SelectionLayer {
    enabled: bool,
}

impl SelectionLayer {
    pub const NAME: &'static str = "selection";

    pub fn new() -> Self {
        Self { enabled: true }
    }
}

impl Default for SelectionLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayLayer for SelectionLayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        priorities::SELECTION
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn emit(&self, ctx: &FrameContext, list: &mut DrawList) {
        let selection = &ctx.session.selection;
        let Some(verts) = ctx.level.segment_vertices(selection.segment) else {
            return;
        };

        let mode = ctx.session.mode();
        let side = selection.side.index();
        let point = selection.point as usize % 4;
        let colors = edge_colors(mode, side, point);

        for (edge, [a, b]) in VERTS_OF_EDGE.iter().enumerate() {
            list.line(verts[*a], verts[*b], colors[edge]);
        }

        if mode == SelectionMode::Point {
            let position = verts[SIDE_INDICES[side][point]];
            list.facing_circle(
                ctx.camera,
                position,
                ctx.overlay().point_circle_radius,
                palette::SELECTION_PRIMARY,
            );
        }
    }
}
