//! Overlay layers and their registry.
//!
//! Each layer emits one visual element of the editor overlay into the frame's
//! [`DrawList`]. Layers run in priority order (lower first):
//! - 0-99: level wireframe
//! - 100-199: walls and triggers
//! - 200-299: marks and the active selection
//! - 1000+: gizmo and HUD elements

use crate::draw::DrawList;
use crate::frame::FrameContext;

/// One element of the editor overlay
pub trait OverlayLayer: Send + Sync {
    /// Unique name of this layer
    fn name(&self) -> &str;

    /// Emit order, lower first
    fn priority(&self) -> i32;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Append this layer's primitives for the current frame
    fn emit(&self, ctx: &FrameContext, list: &mut DrawList);
}

/// Layers kept in priority order
#[derive(Default)]
pub struct OverlayRegistry {
    layers: Vec<Box<dyn OverlayLayer>>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer. Layers with equal priority keep registration order.
    pub fn register<L: OverlayLayer + 'static>(&mut self, layer: L) {
        self.layers.push(Box::new(layer));
        self.layers.sort_by_key(|l| l.priority());
    }

    /// Returns the removed layer, or None if not found
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn OverlayLayer>> {
        let pos = self.layers.iter().position(|l| l.name() == name)?;
        Some(self.layers.remove(pos))
    }

    pub fn get(&self, name: &str) -> Option<&dyn OverlayLayer> {
        self.layers
            .iter()
            .find(|l| l.name() == name)
            .map(|l| l.as_ref())
    }

    pub fn get_mut<'a>(&'a mut self, name: &str) -> Option<&'a mut (dyn OverlayLayer + 'a)> {
        for layer in &mut self.layers {
            if layer.name() == name {
                return Some(layer.as_mut());
            }
        }
        None
    }

    /// Returns false if no layer has that name
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.get_mut(name) {
            Some(layer) => {
                layer.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name() == name)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in priority order
    pub fn iter(&self) -> impl Iterator<Item = &dyn OverlayLayer> {
        self.layers.iter().map(|l| l.as_ref())
    }

    /// Run every enabled layer in priority order
    pub fn emit_all(&self, ctx: &FrameContext, list: &mut DrawList) {
        for layer in &self.layers {
            if layer.is_enabled() {
                layer.emit(ctx, list);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};
    use rift_core::{Camera, Level};
    use rift_editor::{EditorConfig, EditorSession};

    struct TestLayer {
        name: String,
        priority: i32,
        enabled: bool,
    }

    impl TestLayer {
        fn new(name: &str, priority: i32) -> Self {
            Self {
                name: name.to_string(),
                priority,
                enabled: true,
            }
        }
    }

    impl OverlayLayer for TestLayer {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn emit(&self, _ctx: &FrameContext, list: &mut DrawList) {
            list.point(Vec3::splat(self.priority as f32), Vec4::ONE);
        }
    }

    #[test]
    fn test_registry_ordering() {
        let mut registry = OverlayRegistry::new();

        registry.register(TestLayer::new("third", 300));
        registry.register(TestLayer::new("first", 100));
        registry.register(TestLayer::new("second", 200));

        let names: Vec<&str> = registry.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_registry_unregister() {
        let mut registry = OverlayRegistry::new();

        registry.register(TestLayer::new("test", 100));
        assert!(registry.contains("test"));

        let removed = registry.unregister("test");
        assert!(removed.is_some());
        assert!(!registry.contains("test"));
        assert!(registry.unregister("test").is_none());
    }

    #[test]
    fn test_disabled_layers_skipped() {
        let level = Level::cube_row(1);
        let session = EditorSession::new(EditorConfig::new());
        let camera = Camera::default();
        let ctx = FrameContext::new(&level, &session, &camera);

        let mut registry = OverlayRegistry::new();
        registry.register(TestLayer::new("a", 1));
        registry.register(TestLayer::new("b", 2));
        assert!(registry.set_enabled("a", false));
        assert!(!registry.set_enabled("missing", false));

        let mut list = DrawList::new();
        registry.emit_all(&ctx, &mut list);
        assert_eq!(list.len(), 1);
    }
}
