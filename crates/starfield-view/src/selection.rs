//! Pointer and keyboard driven selection.
//!
//! A click picks the nearest body under the cursor, highlights its system,
//! shows the crosshair and info panel, and starts a camera focus. Clicking
//! the selected body again re-focuses it; clicking empty space clears the
//! selection. After a planet or moon focus completes the camera follows the
//! body until the user pans away or selects something else.

use std::f32::consts::TAU;

use glam::Vec2;
use starfield_config::{Config, ScaleConfig};
use starfield_input::{InputEvent, KeyBindings, PointerButton, ViewAction};
use starfield_universe::{BodyId, BodyKind, Universe};
use tracing::{debug, trace};

use crate::camera::OrbitCamera;
use crate::describe::BodyDescription;
use crate::focus::{FocusAnimation, FocusStep, focus_distance};
use crate::overlay::{Overlay, crosshair_size};
use crate::scene::{SceneBackend, SceneBindings};

/// Everything a controller reads or drives during one event or frame.
pub struct ViewContext<'a> {
    /// Body tree, read-only.
    pub universe: &'a Universe,
    /// Camera moved by drags, focus, and follow.
    pub camera: &'a mut OrbitCamera,
    /// Renderer, used for ray casts.
    pub scene: &'a dyn SceneBackend,
    /// Mesh handle to body map.
    pub bindings: &'a SceneBindings,
    /// Crosshair, info panel, and cursor.
    pub overlay: &'a mut dyn Overlay,
}

/// Selection, highlight, and the two global toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionState {
    /// Currently selected body.
    pub selected: Option<BodyId>,
    /// System whose orbit lines are shown. Always the selected body's system.
    pub highlighted: Option<usize>,
    /// Orbit lines of the highlighted system are drawn.
    pub orbits_visible: bool,
    /// Orbital motion is frozen.
    pub paused: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: None,
            highlighted: None,
            orbits_visible: true,
            paused: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Press {
    origin: Vec2,
    last: Vec2,
    button: PointerButton,
    dragging: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Follow {
    body: BodyId,
    distance: f32,
    engaged: bool,
}

/// Selection state machine plus camera drag, focus, and follow.
#[derive(Debug)]
pub struct SelectionController {
    state: SelectionState,
    keys: KeyBindings,
    scale: ScaleConfig,
    drag_threshold: f32,
    focus_duration_secs: f32,
    focus_base_distance: f32,
    zoom_min_factor: f32,
    zoom_max_factor: f32,
    zoom_rate: f32,
    press: Option<Press>,
    pending_hover: Option<Vec2>,
    hovering: bool,
    crosshair_shown: bool,
    generation: u64,
    focus: Option<FocusAnimation>,
    follow: Option<Follow>,
}

impl SelectionController {
    /// Controller with nothing selected.
    pub fn from_config(config: &Config) -> Self {
        let controls = &config.controls;
        Self {
            state: SelectionState::default(),
            keys: KeyBindings::from_config(&controls.keybindings),
            scale: config.scale.clone(),
            drag_threshold: controls.drag_threshold_px.max(0.0),
            focus_duration_secs: controls.focus_duration_ms as f32 / 1000.0,
            focus_base_distance: controls.focus_base_distance,
            zoom_min_factor: controls.follow_zoom_min_factor,
            zoom_max_factor: controls.follow_zoom_max_factor.max(controls.follow_zoom_min_factor),
            zoom_rate: controls.zoom_rate,
            press: None,
            pending_hover: None,
            hovering: false,
            crosshair_shown: false,
            generation: 0,
            focus: None,
            follow: None,
        }
    }

    /// Current selection state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Generation of the newest focus animation; bumps on every new focus.
    pub fn focus_generation(&self) -> u64 {
        self.generation
    }

    /// In-flight focus animation, if any.
    pub fn focus(&self) -> Option<&FocusAnimation> {
        self.focus.as_ref()
    }

    /// Whether the camera is currently locked onto a moving body.
    pub fn is_following(&self) -> bool {
        self.follow.is_some_and(|f| f.engaged)
    }

    /// Distance the camera keeps from a followed body.
    pub fn follow_distance(&self) -> Option<f32> {
        self.follow.map(|f| f.distance)
    }

    /// Whether the cursor is over a body.
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut ViewContext<'_>) {
        match *event {
            InputEvent::PointerDown { position, button } => self.on_pointer_down(position, button),
            InputEvent::PointerUp { position, button } => self.on_pointer_up(position, button, ctx),
            InputEvent::PointerMove { position } => self.on_pointer_move(position, ctx),
            InputEvent::Wheel { delta_y } => self.on_wheel(delta_y),
            InputEvent::KeyPress(key) => {
                if let Some(action) = self.keys.resolve(&key) {
                    self.on_action(action, ctx);
                }
            }
        }
    }

    /// Record where a press started. No state transition.
    pub fn on_pointer_down(&mut self, position: Vec2, button: PointerButton) {
        self.press = Some(Press {
            origin: position,
            last: position,
            button,
            dragging: false,
        });
    }

    /// A release close to its press is a click; anything else ends a drag.
    pub fn on_pointer_up(&mut self, position: Vec2, button: PointerButton, ctx: &mut ViewContext<'_>) {
        let Some(press) = self.press.take() else {
            return;
        };
        let travel = position.distance(press.origin);
        if button == PointerButton::Left && press.button == button && travel < self.drag_threshold {
            self.click(position, ctx);
        }
    }

    /// Drag the camera while a button is held, otherwise queue a hover test.
    pub fn on_pointer_move(&mut self, position: Vec2, ctx: &mut ViewContext<'_>) {
        let Some(press) = self.press.as_mut() else {
            self.pending_hover = Some(position);
            return;
        };
        if !press.dragging && position.distance(press.origin) >= self.drag_threshold {
            press.dragging = true;
            if press.button == PointerButton::Right {
                // Free drag: stop chasing the selection until a new one starts.
                self.generation += 1;
                self.focus = None;
                self.follow = None;
                debug!("free drag, follow suspended");
            }
        }
        let delta = position - press.last;
        press.last = position;
        if !press.dragging {
            return;
        }
        let viewport_height = ctx.camera.viewport().y;
        match press.button {
            PointerButton::Left => {
                let per_pixel = TAU / viewport_height;
                ctx.camera.orbit(-delta.x * per_pixel, delta.y * per_pixel);
            }
            PointerButton::Right => {
                let world_per_pixel = 2.0 * ctx.camera.distance_to_target() * (ctx.camera.fov_y * 0.5).tan()
                    / viewport_height;
                ctx.camera.pan(Vec2::new(-delta.x, delta.y) * world_per_pixel);
            }
            PointerButton::Middle | PointerButton::Other => {}
        }
    }

    /// Scale the follow distance of a selected planet or moon.
    ///
    /// Positive `delta_y` moves away. The change is proportional to the
    /// current distance and clamped to a band around the kind's focus distance.
    /// Ignored until the focus animation has handed over to follow mode.
    pub fn on_wheel(&mut self, delta_y: f32) {
        let Some(follow) = self.follow.as_mut().filter(|f| f.engaged) else {
            return;
        };
        if !delta_y.is_finite() {
            return;
        }
        let kind_distance = focus_distance(follow.body.kind(), self.focus_base_distance);
        let min = kind_distance * self.zoom_min_factor;
        let max = kind_distance * self.zoom_max_factor;
        let scaled = follow.distance * (1.0 + self.zoom_rate).powf(delta_y);
        follow.distance = scaled.clamp(min, max);
        trace!(distance = follow.distance, "follow zoom");
    }

    /// Apply a key action.
    pub fn on_action(&mut self, action: ViewAction, ctx: &mut ViewContext<'_>) {
        match action {
            ViewAction::ToggleOrbits => {
                self.state.orbits_visible = !self.state.orbits_visible;
                debug!(orbits_visible = self.state.orbits_visible, "orbit lines toggled");
            }
            ViewAction::FocusSelected => {
                if let Some(id) = self.state.selected {
                    self.start_focus(id, ctx.camera);
                }
            }
            ViewAction::TogglePause => {
                self.state.paused = !self.state.paused;
                debug!(paused = self.state.paused, "orbital motion toggled");
            }
        }
    }

    /// Per-frame work: one coalesced hover test, the focus step, follow,
    /// and crosshair reprojection.
    pub fn update(&mut self, dt: f32, ctx: &mut ViewContext<'_>) {
        if let Some(position) = self.pending_hover.take() {
            let hovering = self.pick(position, ctx).is_some();
            if hovering != self.hovering {
                self.hovering = hovering;
                ctx.overlay.set_hover_cursor(hovering);
            }
        }

        if let Some(mut animation) = self.focus.take() {
            let outcome = match ctx.universe.body_position(animation.body()) {
                Some(body_position) => {
                    animation.step(dt, self.generation, body_position, ctx.camera)
                }
                None => FocusStep::Cancelled,
            };
            match outcome {
                FocusStep::Continue => self.focus = Some(animation),
                FocusStep::Done => {
                    if let Some(follow) = self.follow.as_mut()
                        && follow.body == animation.body()
                    {
                        follow.engaged = true;
                    }
                }
                FocusStep::Cancelled => {}
            }
        }

        if self.focus.is_none()
            && let Some(follow) = self.follow.filter(|f| f.engaged)
            && let Some(body_position) = ctx.universe.body_position(follow.body)
        {
            let camera = &mut *ctx.camera;
            let direction = (camera.position - camera.target)
                .try_normalize()
                .unwrap_or(glam::Vec3::ONE.normalize());
            camera.target = body_position;
            camera.position = body_position + direction * follow.distance;
        }

        self.update_crosshair(ctx);
    }

    /// Crosshair over the selection while it is drawn and in front of the eye.
    fn update_crosshair(&mut self, ctx: &mut ViewContext<'_>) {
        let screen = self.state.selected.and_then(|id| {
            if !ctx.universe.body(id)?.visibility().visible {
                return None;
            }
            let position = ctx.universe.body_position(id)?;
            ctx.camera.project_to_screen(position).map(|p| (id, p))
        });
        match screen {
            Some((id, pixel)) => {
                ctx.overlay.show_crosshair(pixel, crosshair_size(id.kind()));
                self.crosshair_shown = true;
            }
            None if self.crosshair_shown => {
                ctx.overlay.hide_crosshair();
                self.crosshair_shown = false;
            }
            None => {}
        }
    }

    /// Nearest bound body under a window pixel.
    fn pick(&self, pixel: Vec2, ctx: &ViewContext<'_>) -> Option<BodyId> {
        let ray = ctx.camera.ray_through(ctx.camera.screen_to_ndc(pixel));
        ctx.scene
            .cast_ray(&ray)
            .into_iter()
            .find_map(|hit| ctx.bindings.body_for(hit.handle))
    }

    fn click(&mut self, pixel: Vec2, ctx: &mut ViewContext<'_>) {
        match self.pick(pixel, ctx) {
            Some(id) if self.state.selected == Some(id) => {
                debug!(body = ?id, "re-focusing selection");
                self.start_focus(id, ctx.camera);
            }
            Some(id) => self.select(id, ctx),
            None => self.clear(ctx),
        }
    }

    fn select(&mut self, id: BodyId, ctx: &mut ViewContext<'_>) {
        debug!(body = ?id, kind = id.kind().label(), "selected");
        self.state.selected = Some(id);
        self.state.highlighted = Some(id.system());
        match BodyDescription::of(ctx.universe, id, &self.scale) {
            Some(description) => ctx.overlay.show_info_panel(&description),
            None => ctx.overlay.hide_info_panel(),
        }
        self.start_focus(id, ctx.camera);
        self.update_crosshair(ctx);
    }

    fn clear(&mut self, ctx: &mut ViewContext<'_>) {
        if self.state.selected.is_some() {
            debug!("selection cleared");
        }
        self.state.selected = None;
        self.state.highlighted = None;
        self.generation += 1;
        self.focus = None;
        self.follow = None;
        ctx.overlay.hide_crosshair();
        ctx.overlay.hide_info_panel();
        self.crosshair_shown = false;
    }

    fn start_focus(&mut self, id: BodyId, camera: &OrbitCamera) {
        self.generation += 1;
        let distance = focus_distance(id.kind(), self.focus_base_distance);
        self.focus = Some(FocusAnimation::new(
            self.generation,
            id,
            camera,
            distance,
            self.focus_duration_secs,
        ));
        self.follow = match id.kind() {
            BodyKind::Star => None,
            BodyKind::Planet | BodyKind::Moon => Some(Follow {
                body: id,
                distance,
                engaged: false,
            }),
        };
    }
}
