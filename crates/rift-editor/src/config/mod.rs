//! Editor configuration
//!
//! Selection and overlay preferences, persisted as RON in the OS config
//! directory.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use serde::{Deserialize, Serialize};

use crate::gizmo::GizmoMode;
use crate::mode::SelectionMode;

/// Selection preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Mode a new session starts in
    pub default_mode: SelectionMode,
    /// Pick open sides and back faces too
    pub include_invisible: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_mode: SelectionMode::Face,
            include_invisible: false,
        }
    }
}

/// Overlay preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub show_wireframe: bool,
    pub show_wall_markers: bool,
    /// Draw marked elements
    pub show_marks: bool,
    pub show_gizmo: bool,
    pub gizmo_mode: GizmoMode,
    /// World radius of the active point circle
    pub point_circle_radius: f32,
    /// Outline scale for marked objects other than the active one
    pub object_outline_scale: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            show_wireframe: true,
            show_wall_markers: true,
            show_marks: true,
            show_gizmo: true,
            gizmo_mode: GizmoMode::Translate,
            point_circle_radius: 1.5,
            object_outline_scale: 1.1,
        }
    }
}

impl OverlayConfig {
    /// Smallest radius and scale accepted from disk
    pub const MIN_SIZE: f32 = 0.01;

    /// Replace out of range values with defaults. Returns true if anything
    /// was changed.
    pub fn sanitize(&mut self) -> bool {
        let defaults = Self::default();
        let mut changed = false;
        if !self.point_circle_radius.is_finite() || self.point_circle_radius < Self::MIN_SIZE {
            tracing::warn!(
                "Rejected point_circle_radius {}, using {}",
                self.point_circle_radius,
                defaults.point_circle_radius
            );
            self.point_circle_radius = defaults.point_circle_radius;
            changed = true;
        }
        if !self.object_outline_scale.is_finite() || self.object_outline_scale < Self::MIN_SIZE {
            tracing::warn!(
                "Rejected object_outline_scale {}, using {}",
                self.object_outline_scale,
                defaults.object_outline_scale
            );
            self.object_outline_scale = defaults.object_outline_scale;
            changed = true;
        }
        changed
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EditorConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl EditorConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config: EditorConfig =
            ron::from_str("(version: 1, overlay: (show_wireframe: false))").unwrap();
        assert!(!config.overlay.show_wireframe);
        assert!(config.overlay.show_marks);
        assert_eq!(config.selection, SelectionConfig::default());
    }

    #[test]
    fn test_sanitize() {
        let mut overlay = OverlayConfig {
            point_circle_radius: -2.0,
            object_outline_scale: f32::NAN,
            ..Default::default()
        };
        assert!(overlay.sanitize());
        assert_eq!(overlay, OverlayConfig::default());
        assert!(!overlay.sanitize());
    }
}
