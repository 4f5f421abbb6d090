//! One viewing session: the universe, camera, selection, and the renderer
//! and UI collaborators, driven frame by frame.

use starfield_config::Config;
use starfield_input::InputEvent;
use starfield_universe::Universe;
use starfield_view::{
    CullStats, FrameError, OrbitCamera, Overlay, SceneBackend, SceneBindings, SelectionController,
    ViewContext, VisibilityCuller,
};
use tracing::{error, warn};

use crate::game_loop::{GameLoop, MAX_FRAME_TIME};

/// Running totals for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames rendered, including failed ones.
    pub frames: u64,
    /// Simulation ticks that advanced orbits.
    pub orbit_ticks: u64,
    /// Frames that ended in a [`FrameError`].
    pub failed_frames: u64,
    /// Culling counts from the last good frame.
    pub last_cull: CullStats,
}

/// Owns everything a viewer needs between frames.
pub struct StarfieldSession<S, O> {
    universe: Universe,
    camera: OrbitCamera,
    home_camera: OrbitCamera,
    controller: SelectionController,
    culler: VisibilityCuller,
    scene: S,
    bindings: SceneBindings,
    overlay: O,
    game_loop: GameLoop,
    stats: SessionStats,
}

impl<S: SceneBackend, O: Overlay> StarfieldSession<S, O> {
    /// Bind `universe` into `scene` and set up the camera and controller.
    pub fn new(config: &Config, universe: Universe, mut scene: S, overlay: O) -> Self {
        let bindings = SceneBindings::bind(&universe, &mut scene);
        let camera = OrbitCamera::from_config(&config.camera);
        Self {
            universe,
            home_camera: camera.clone(),
            camera,
            controller: SelectionController::from_config(config),
            culler: VisibilityCuller::from_config(&config.camera),
            scene,
            bindings,
            overlay,
            game_loop: GameLoop::new(),
            stats: SessionStats::default(),
        }
    }

    /// The body tree.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The camera.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Mutable camera, for hosts that drive it directly.
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Selection state machine.
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Renderer collaborator.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Body to mesh map.
    pub fn bindings(&self) -> &SceneBindings {
        &self.bindings
    }

    /// UI collaborator.
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Running totals.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Frame loop accumulator.
    pub fn game_loop(&self) -> &GameLoop {
        &self.game_loop
    }

    /// Track a window resize in the camera and in the home pose used after a
    /// failed frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        self.home_camera.set_viewport(width, height);
    }

    /// Feed one input event to the selection controller.
    pub fn handle_event(&mut self, event: InputEvent) {
        let mut ctx = ViewContext {
            universe: &self.universe,
            camera: &mut self.camera,
            scene: &self.scene,
            bindings: &self.bindings,
            overlay: &mut self.overlay,
        };
        self.controller.handle_event(&event, &mut ctx);
    }

    /// Advance every orbit by one tick unless paused.
    pub fn simulate_tick(&mut self) {
        if self.controller.state().paused {
            return;
        }
        self.universe.advance_orbits();
        self.stats.orbit_ticks += 1;
    }

    /// Selection update, culling, and scene sync for one rendered frame.
    pub fn frame(&mut self, dt: f32) -> Result<CullStats, FrameError> {
        let mut ctx = ViewContext {
            universe: &self.universe,
            camera: &mut self.camera,
            scene: &self.scene,
            bindings: &self.bindings,
            overlay: &mut self.overlay,
        };
        self.controller.update(dt, &mut ctx);

        if !self.camera.is_finite() {
            return Err(FrameError::NonFiniteCamera {
                position: self.camera.position.to_array(),
                target: self.camera.target.to_array(),
            });
        }

        let state = self.controller.state();
        let cull = self.culler.cull(
            &mut self.universe,
            &self.camera,
            state.highlighted,
            state.orbits_visible,
        );
        self.bindings.sync(&self.universe, &mut self.scene)?;
        Ok(cull)
    }

    /// Run [`frame`](Self::frame), logging any failure. The next frame runs
    /// regardless; a non-finite camera is reset to its starting pose.
    pub fn render_frame(&mut self, dt: f32) {
        self.stats.frames += 1;
        match self.frame(dt) {
            Ok(cull) => self.stats.last_cull = cull,
            Err(err) => {
                self.stats.failed_frames += 1;
                error!(error = %err, frame = self.stats.frames, "frame failed");
                if matches!(err, FrameError::NonFiniteCamera { .. }) {
                    warn!("resetting camera to its starting pose");
                    self.camera = self.home_camera.clone();
                }
            }
        }
    }

    /// One host frame of `frame_time` seconds: fixed-rate orbit ticks, then
    /// a single render.
    pub fn advance(&mut self, frame_time: f64) {
        let mut ticks = 0u32;
        self.game_loop.advance(frame_time, |_, _| ticks += 1, |_| {});
        for _ in 0..ticks {
            self.simulate_tick();
        }
        self.render_frame(frame_time.clamp(0.0, MAX_FRAME_TIME) as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use starfield_universe::{Color, Star, StarSystem, Visibility};
    use starfield_view::{InMemoryScene, RecordingOverlay};

    use crate::game_loop::FIXED_DT;

    fn session() -> StarfieldSession<InMemoryScene, RecordingOverlay> {
        let star = Star {
            name: "Luxdex".into(),
            radius: 1.0,
            temperature: 6000.0,
            position: Vec3::new(0.0, 0.0, -5.0),
            color: Color::WHITE,
            light_active: false,
            visibility: Visibility::HIDDEN,
        };
        let universe = Universe::new(vec![StarSystem {
            star,
            planets: Vec::new(),
        }]);
        StarfieldSession::new(
            &Config::default(),
            universe,
            InMemoryScene::new(),
            RecordingOverlay::default(),
        )
    }

    #[test]
    fn test_frame_culls_and_syncs() {
        let mut s = session();
        s.advance(FIXED_DT);
        assert_eq!(s.stats().frames, 1);
        assert_eq!(s.stats().failed_frames, 0);
        assert_eq!(s.stats().last_cull.stars_visible, 1);
        assert_eq!(s.scene().visible_count(), 1);
    }

    #[test]
    fn test_non_finite_camera_is_logged_and_recovered() {
        let mut s = session();
        s.camera_mut().position = Vec3::splat(f32::NAN);
        s.advance(FIXED_DT);
        assert_eq!(s.stats().failed_frames, 1);
        assert!(s.camera().is_finite(), "camera reset after failure");
        s.advance(FIXED_DT);
        assert_eq!(s.stats().failed_frames, 1);
        assert_eq!(s.stats().frames, 2);
    }

    #[test]
    fn test_resize_changes_aspect() {
        let mut s = session();
        s.resize(800, 800);
        assert_eq!(s.camera().aspect_ratio(), 1.0);
        s.camera_mut().position = Vec3::splat(f32::NAN);
        s.advance(FIXED_DT);
        assert_eq!(s.camera().aspect_ratio(), 1.0);
    }

    #[test]
    fn test_ticks_follow_frame_time() {
        let mut s = session();
        s.advance(4.0 * FIXED_DT + 1e-9);
        assert_eq!(s.stats().orbit_ticks, 4);
        assert_eq!(s.stats().frames, 1);
    }
}
