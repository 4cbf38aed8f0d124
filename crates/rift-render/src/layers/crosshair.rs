//! Fly-through crosshair

use super::priorities;
use crate::draw::{DrawList, DrawPrimitive};
use crate::frame::FrameContext;
use crate::layer::OverlayLayer;
use crate::palette;

/// Crosshair size in pixels
pub const CROSSHAIR_SIZE: f32 = 12.0;

pub struct CrosshairLayer {
    enabled: bool,
}

impl CrosshairLayer {
    pub const NAME: &'static str = "crosshair";

    pub fn new() -> Self {
        Self { enabled: true }
    }
}

impl Default for CrosshairLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayLayer for CrosshairLayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        priorities::CROSSHAIR
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn emit(&self, ctx: &FrameContext, list: &mut DrawList) {
        if ctx.crosshair {
            list.push(DrawPrimitive::Crosshair {
                size: CROSSHAIR_SIZE,
                color: palette::CROSSHAIR,
            });
        }
    }
}
