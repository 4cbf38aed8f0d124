//! Rift Core
//!
//! Level geometry and math shared by the editor and renderer.
//!
//! - [`level::Level`] - id-addressed geometry arena
//! - [`face::Face`] - the four corners of a side
//! - [`ray::Ray`] - picking rays and intersection tests
//! - [`camera::Camera`] - projection between world and screen space

pub mod camera;
pub mod face;
pub mod fixture;
pub mod ids;
pub mod level;
pub mod object;
pub mod ray;
pub mod segment;
pub mod wall;

pub use camera::Camera;
pub use face::Face;
pub use ids::*;
pub use level::{Level, LevelError};
pub use object::{Object, ObjectType};
pub use ray::Ray;
pub use segment::{EDGES_OF_SIDE, SIDE_INDICES, SegmentType, Segment, Side, VERTS_OF_EDGE};
pub use wall::{Trigger, TriggerType, Wall, WallKeys, WallType};
