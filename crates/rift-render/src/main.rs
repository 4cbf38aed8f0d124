//! Rift demo
//!
//! Builds a small level, applies the editor commands named on the command
//! line and logs the overlay it would draw.
//!
//! ```text
//! rift click mode-segment mark-all delete next-item
//! ```

use glam::Vec2;
use rift_core::{Camera, Level, LevelError};
use rift_editor::{EditorCommand, create_shared_config, create_shared_session};
use rift_render::{DrawPrimitive, FrameContext, render_editor};

/// Segments in the demo level
const DEMO_SEGMENTS: usize = 4;

fn main() -> Result<(), LevelError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rift_editor=debug,rift_render=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rift");

    let config = create_shared_config();
    let session = create_shared_session(config.read().config().clone());
    session.lock().subscribe(|event| tracing::info!("Event {:?}", event));

    let mut level = Level::try_cube_row(DEMO_SEGMENTS)?;
    let camera = Camera::new(
        glam::Vec3::new(5.0, 5.0, -30.0),
        glam::Vec3::new(0.0, 0.0, 30.0),
        Vec2::new(1280.0, 720.0),
    );

    for arg in std::env::args().skip(1) {
        let mut session = session.lock();
        match arg.as_str() {
            "click" => {
                let ray = camera.screen_to_ray(camera.viewport.x * 0.5, camera.viewport.y * 0.5);
                let hit = session.click(&level, &ray);
                tracing::info!("Click hit: {}", hit);
            }
            "delete" => {
                let id = session.selection.segment;
                if let Err(e) = session.delete_segment(&mut level, id) {
                    tracing::warn!("Delete failed: {}", e);
                }
            }
            name => match EditorCommand::from_name(name) {
                Some(command) => session.execute(command, &level),
                None => tracing::warn!("Unknown command '{}'", name),
            },
        }
    }

    let session = session.lock();
    let ctx = FrameContext::new(&level, &session, &camera);
    let list = render_editor(&ctx);

    let lines = list.count(|p| matches!(p, DrawPrimitive::Line { .. }));
    let fills = list.count(|p| matches!(p, DrawPrimitive::FilledQuad { .. }));
    let points = list.count(|p| matches!(p, DrawPrimitive::Point { .. }));
    let circles = list.count(|p| matches!(p, DrawPrimitive::Circle { .. }));
    let gizmos = list.count(|p| {
        matches!(
            p,
            DrawPrimitive::Gizmo { .. } | DrawPrimitive::GizmoPreview { .. }
        )
    });

    tracing::info!(
        "Mode {} selection {} marked {:?}",
        session.mode().name(),
        session.selection.tag(),
        session.marked.marks(session.mode()),
    );
    tracing::info!(
        "Frame: {} primitives ({} lines, {} fills, {} points, {} circles, {} gizmos)",
        list.len(),
        lines,
        fills,
        points,
        circles,
        gizmos
    );
    Ok(())
}
