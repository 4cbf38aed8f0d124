//! Walls and triggers attached to sides

use serde::{Deserialize, Serialize};

use crate::ids::{Tag, TriggerId};

/// Wall behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WallType {
    #[default]
    None,
    Destroyable,
    Door,
    Illusion,
    FlyThroughTrigger,
    Closed,
    Cloaked,
}

/// Keys required to open a door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WallKeys {
    pub blue: bool,
    pub gold: bool,
    pub red: bool,
}

/// A wall placed on a side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub tag: Tag,
    pub kind: WallType,
    pub keys: WallKeys,
    pub trigger: TriggerId,
}

impl Wall {
    pub fn new(tag: Tag, kind: WallType) -> Self {
        Self {
            tag,
            kind,
            keys: WallKeys::default(),
            trigger: TriggerId::NONE,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.tag.segment.is_some()
    }
}

/// Trigger behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriggerType {
    #[default]
    OpenDoor,
    CloseDoor,
    Matcen,
    Exit,
    SecretExit,
    IllusionOff,
    IllusionOn,
    LightOff,
    LightOn,
}

/// A trigger activated by a wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub kind: TriggerType,
    /// Sides affected by the trigger
    pub targets: Vec<Tag>,
}

impl Trigger {
    pub fn new(kind: TriggerType) -> Self {
        Self {
            kind,
            targets: Vec::new(),
        }
    }
}
