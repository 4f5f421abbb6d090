//! Camera focus animation: a resumable step function that moves the eye
//! and orbit target toward a body over a fixed duration.

use glam::Vec3;
use starfield_universe::{BodyId, BodyKind};

use crate::camera::OrbitCamera;

/// Slow start, fast middle, slow end.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}

/// Eye distance from a focused body, as a multiple of the base distance.
pub fn focus_distance(kind: BodyKind, base: f32) -> f32 {
    let factor = match kind {
        BodyKind::Moon => 1.0,
        BodyKind::Planet => 2.0,
        BodyKind::Star => 20.0,
    };
    base * factor
}

/// Result of one animation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusStep {
    /// More frames are needed.
    Continue,
    /// The camera reached the body.
    Done,
    /// A newer focus superseded this one; the camera was not touched.
    Cancelled,
}

/// One in-flight focus.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusAnimation {
    generation: u64,
    body: BodyId,
    from_position: Vec3,
    from_target: Vec3,
    offset: Vec3,
    elapsed: f32,
    duration: f32,
}

impl FocusAnimation {
    /// Start from the camera's current pose.
    ///
    /// The eye ends at `distance` from the body along the (1, 1, 1)
    /// diagonal. A zero duration snaps on the first step.
    pub fn new(
        generation: u64,
        body: BodyId,
        camera: &OrbitCamera,
        distance: f32,
        duration_secs: f32,
    ) -> Self {
        Self {
            generation,
            body,
            from_position: camera.position,
            from_target: camera.target,
            offset: Vec3::ONE.normalize() * distance,
            elapsed: 0.0,
            duration: duration_secs.max(0.0),
        }
    }

    /// Token this animation was started with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Body being focused.
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Final eye distance from the body.
    pub fn distance(&self) -> f32 {
        self.offset.length()
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Advance by `dt` seconds and write the eased pose into `camera`.
    ///
    /// `body_position` is re-read every frame so a moving body is tracked
    /// while the animation runs. If `current_generation` no longer matches,
    /// the step does nothing and reports [`FocusStep::Cancelled`].
    pub fn step(
        &mut self,
        dt: f32,
        current_generation: u64,
        body_position: Vec3,
        camera: &mut OrbitCamera,
    ) -> FocusStep {
        if current_generation != self.generation {
            return FocusStep::Cancelled;
        }
        self.elapsed += dt.max(0.0);
        let t = ease_in_out(self.progress());
        camera.position = self.from_position.lerp(body_position + self.offset, t);
        camera.target = self.from_target.lerp(body_position, t);
        if self.progress() >= 1.0 {
            FocusStep::Done
        } else {
            FocusStep::Continue
        }
    }
}
