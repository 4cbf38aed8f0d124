//! Level objects (robots, powerups, player starts)

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ids::SegId;

/// Object category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectType {
    #[default]
    None,
    Robot,
    Hostage,
    Player,
    Coop,
    Powerup,
    Reactor,
    Weapon,
}

/// A placed object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub kind: ObjectType,
    /// Segment containing the object
    pub segment: SegId,
    pub position: Vec3,
    /// Hit sphere radius
    pub radius: f32,
}

impl Object {
    pub fn new(kind: ObjectType, segment: SegId, position: Vec3, radius: f32) -> Self {
        Self {
            kind,
            segment,
            position,
            radius,
        }
    }

    /// True for objects that behave as the level reactor
    pub fn is_reactor(&self) -> bool {
        self.kind == ObjectType::Reactor
    }
}
