//! Rift Editor
//!
//! Selection and marking for the level editor.
//!
//! # Architecture
//!
//! - [`selection::EditorSelection`] - the single active segment/side/point/object
//! - [`marked::MultiSelection`] - marked faces, segments, points and objects
//! - [`mode::ModeStrategy`] - per-mode behaviour behind [`mode::SelectionMode`]
//! - [`session::EditorSession`] - owns the above and publishes [`events::EditorEvent`]s
//!
//! # Example
//!
//! ```ignore
//! use rift_core::{Level, Ray};
//! use rift_editor::{EditorCommand, EditorConfig, EditorSession};
//!
//! let level = Level::cube_row(3);
//! let mut session = EditorSession::new(EditorConfig::new());
//! session.subscribe(|event| println!("{event:?}"));
//!
//! session.click(&level, &Ray::new(origin, direction));
//! session.execute(EditorCommand::ToggleMark, &level);
//! ```

pub mod commands;
pub mod config;
pub mod events;
pub mod gizmo;
pub mod hit;
pub mod marked;
pub mod mode;
pub mod selection;
pub mod session;

pub use commands::EditorCommand;
pub use config::{ConfigError, ConfigManager, EditorConfig, SharedConfig, create_shared_config};
pub use events::{EditorEvent, EventBus, SubscriptionId};
pub use gizmo::{GizmoMode, GizmoState, TransformGizmo};
pub use hit::{SelectionHit, cast_ray};
pub use marked::{Mark, MarkAction, MultiSelection};
pub use mode::{ModeStrategy, SelectionMode};
pub use selection::EditorSelection;
pub use session::{EditorSession, SharedSession, create_shared_session};
