//! Headless driver: runs a session against the in-memory scene with an
//! overlay that writes to the log, and a scripted click on the nearest
//! visible star.

use glam::{Vec2, Vec3};
use starfield_config::Config;
use starfield_input::{InputEvent, PointerButton};
use starfield_universe::{BodyId, Universe};
use starfield_view::{BodyDescription, CullStats, InMemoryScene, Overlay, SceneBackend};
use tracing::{debug, info, trace};

use crate::game_loop::FIXED_DT;
use crate::session::StarfieldSession;

/// Overlay that reports UI changes through `tracing`.
#[derive(Debug, Default)]
pub struct LogOverlay;

impl Overlay for LogOverlay {
    fn show_crosshair(&mut self, position: Vec2, size: f32) {
        trace!(x = position.x, y = position.y, size, "crosshair");
    }

    fn hide_crosshair(&mut self) {
        trace!("crosshair hidden");
    }

    fn show_info_panel(&mut self, description: &BodyDescription) {
        info!(body = %description, "info panel");
    }

    fn hide_info_panel(&mut self) {
        debug!("info panel hidden");
    }

    fn set_hover_cursor(&mut self, hovering: bool) {
        debug!(hovering, "hover cursor");
    }
}

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessSummary {
    /// Frames rendered.
    pub frames: u64,
    /// Orbit ticks simulated.
    pub orbit_ticks: u64,
    /// Frames that failed and were skipped.
    pub failed_frames: u64,
    /// Selection at the end of the run.
    pub selected: Option<BodyId>,
    /// Culling counts from the last good frame.
    pub last_cull: CullStats,
}

/// Closest star that was visible in the last culled frame.
pub fn nearest_visible_star(universe: &Universe, eye: Vec3) -> Option<BodyId> {
    universe
        .systems()
        .iter()
        .enumerate()
        .filter(|(_, s)| s.star.visibility.visible)
        .min_by(|(_, a), (_, b)| {
            a.star
                .position
                .distance_squared(eye)
                .total_cmp(&b.star.position.distance_squared(eye))
        })
        .map(|(system, _)| BodyId::Star { system })
}

/// Click the window pixel over the nearest visible star.
///
/// Returns the star aimed at, or `None` if no star is on screen.
pub fn click_nearest_star<S: SceneBackend, O: Overlay>(
    session: &mut StarfieldSession<S, O>,
) -> Option<BodyId> {
    let target = nearest_visible_star(session.universe(), session.camera().position)?;
    let position = session.universe().body_position(target)?;
    let pixel = session.camera().project_to_screen(position)?;
    debug!(body = ?target, x = pixel.x, y = pixel.y, "scripted click");
    session.handle_event(InputEvent::PointerDown {
        position: pixel,
        button: PointerButton::Left,
    });
    session.handle_event(InputEvent::PointerUp {
        position: pixel,
        button: PointerButton::Left,
    });
    Some(target)
}

/// Run `config.debug.frames` fixed-length frames over `universe`.
pub fn run_headless(config: &Config, universe: Universe) -> HeadlessSummary {
    let mut session = StarfieldSession::new(config, universe, InMemoryScene::new(), LogOverlay);
    info!(
        bodies = session.bindings().len(),
        meshes = session.scene().len(),
        frames = config.debug.frames,
        "headless run starting"
    );

    for frame in 0..config.debug.frames {
        session.advance(FIXED_DT);
        if frame == 0 && click_nearest_star(&mut session).is_none() {
            info!("no star on screen to click");
        }
    }

    let stats = session.stats();
    HeadlessSummary {
        frames: stats.frames,
        orbit_ticks: stats.orbit_ticks,
        failed_frames: stats.failed_frames,
        selected: session.controller().state().selected,
        last_cull: stats.last_cull,
    }
}
