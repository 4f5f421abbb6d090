//! Fixed-timestep frame loop.
//!
//! Orbital motion advances in fixed 60 Hz ticks regardless of the render
//! rate; orbit speeds are expressed in radians per tick. Each frame runs
//! zero or more ticks, then exactly one render.

use std::time::Instant;
use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame the loop will catch up on. Longer frames are clamped and
/// the simulation falls behind wall-clock time instead.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state for the fixed-timestep loop.
#[derive(Debug)]
pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// Creates a new `GameLoop` starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Run one frame using wall-clock time since the previous call.
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64), render_fn: impl FnMut(f64)) {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.advance(frame_time, update_fn, render_fn);
    }

    /// Run one frame with an explicit frame time in seconds.
    ///
    /// - `update_fn(fixed_dt, total_sim_time)` is called zero or more times at
    ///   the fixed rate.
    /// - `render_fn(alpha)` is called exactly once with the interpolation alpha
    ///   in `[0.0, 1.0)`.
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64),
    ) {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                frame_ms = frame_time * 1000.0,
                max_ms = MAX_FRAME_TIME * 1000.0,
                "long frame clamped, orbits fall behind wall clock"
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Returns the current interpolation alpha without running a frame.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Returns the total number of frames rendered.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of simulation ticks executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Returns the total simulation time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(game_loop: &mut GameLoop, frame_time: f64) -> u32 {
        let mut ticks = 0u32;
        game_loop.advance(frame_time, |_, _| ticks += 1, |_| {});
        ticks
    }

    #[test]
    fn test_one_tick_per_fixed_frame() {
        let mut game_loop = GameLoop::new();
        assert_eq!(ticks(&mut game_loop, FIXED_DT), 1);
        assert!(game_loop.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_slow_frame_catches_up() {
        let mut game_loop = GameLoop::new();
        assert_eq!(ticks(&mut game_loop, 3.0 * FIXED_DT + 1e-9), 3);
        assert_eq!(game_loop.update_count(), 3);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_fast_frames_share_a_tick() {
        let mut game_loop = GameLoop::new();
        let mut alpha = -1.0;
        game_loop.advance(0.5 * FIXED_DT, |_, _| panic!("no tick yet"), |a| alpha = a);
        assert!((alpha - 0.5).abs() < 1e-10);
        assert_eq!(ticks(&mut game_loop, 0.5 * FIXED_DT + 1e-9), 1);
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut game_loop = GameLoop::new();
        let n = ticks(&mut game_loop, 5.0);
        let most = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(n > 0 && n <= most, "got {n} ticks");
    }

    #[test]
    fn test_negative_frame_time_runs_no_ticks() {
        let mut game_loop = GameLoop::new();
        assert_eq!(ticks(&mut game_loop, -1.0), 0);
        assert_eq!(game_loop.alpha(), 0.0);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_sim_time_is_ticks_times_step() {
        let mut game_loop = GameLoop::default();
        for frame_time in [0.017, 0.015, 0.020, 0.033, 0.008] {
            game_loop.advance(frame_time, |_, _| {}, |_| {});
        }
        let expected = game_loop.update_count() as f64 * FIXED_DT;
        assert!((game_loop.total_sim_time() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_tick_uses_wall_clock() {
        let mut game_loop = GameLoop::new();
        let mut renders = 0u32;
        game_loop.tick(|_, _| {}, |_| renders += 1);
        game_loop.tick(|_, _| {}, |_| renders += 1);
        assert_eq!(renders, 2);
        assert_eq!(game_loop.frame_count(), 2);
        assert!(game_loop.total_sim_time() >= 0.0);
    }
}
