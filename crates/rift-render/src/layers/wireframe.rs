//! Level wireframe

use rift_core::{SideId, Tag, VERTS_OF_EDGE};

use super::priorities;
use crate::draw::DrawList;
use crate::frame::FrameContext;
use crate::layer::OverlayLayer;
use crate::palette::{self, WALL_FILL_ALPHA, WIREFRAME, WIREFRAME_OPACITY};

/// Edges of every segment. Special segments get their type colors and a
/// translucent fill; walls get a faint fill.
pub struct WireframeLayer {
    enabled: bool,
}

impl WireframeLayer {
    pub const NAME: &'static str = "wireframe";

    pub fn new() -> Self {
        Self { enabled: true }
    }
}

impl Default for WireframeLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayLayer for WireframeLayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        priorities::WIREFRAME
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn emit(&self, ctx: &FrameContext, list: &mut DrawList) {
        let level = ctx.level;

        for id in level.segment_ids() {
            let Some(verts) = level.segment_vertices(id) else {
                continue;
            };
            let kind = level.get_segment(id).kind;
            let (color, fill) = match kind {
                rift_core::SegmentType::None => {
                    (palette::with_alpha(WIREFRAME, WIREFRAME_OPACITY), None)
                }
                _ => {
                    let (outline, fill) = palette::segment_colors(kind);
                    (outline, Some(fill))
                }
            };

            for [a, b] in VERTS_OF_EDGE {
                list.line(verts[a], verts[b], color);
            }

            if let Some(fill) = fill.filter(|_| !ctx.hide_marks) {
                for side in SideId::ALL {
                    if let Some(face) = level.face(Tag::new(id, side)) {
                        list.side_fill(&face, fill);
                    }
                }
            }
        }

        if ctx.hide_marks {
            return;
        }
        for wall in level.walls.iter().filter(|w| w.is_valid()) {
            if let Some(face) = level.face(wall.tag) {
                let color = palette::with_alpha(palette::wall_color(wall), WALL_FILL_ALPHA);
                list.side_fill(&face, color);
            }
        }
    }
}
