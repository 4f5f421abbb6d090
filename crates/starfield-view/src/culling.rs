//! Per-frame visibility, opacity, and active-light selection.
//!
//! The culler is a pure function of camera pose and body positions: it
//! overwrites every body's [`Visibility`] on each call and keeps no state
//! between frames.

use glam::Vec3;
use starfield_config::CameraConfig;
use starfield_universe::{Universe, Visibility};

use crate::camera::OrbitCamera;
use crate::frustum::Frustum;

/// Counts from one culling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Stars drawn this frame.
    pub stars_visible: usize,
    /// Planets drawn this frame.
    pub planets_visible: usize,
    /// Moons drawn this frame.
    pub moons_visible: usize,
    /// Stars whose point light is on.
    pub active_lights: usize,
}

/// Distance-band and frustum visibility rules.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityCuller {
    fade_start: f32,
    fade_end: f32,
    always_visible_range: f32,
    planet_visible_range: f32,
    light_distance: f32,
    max_active_lights: usize,
}

impl VisibilityCuller {
    /// Read the distance bands from the camera config.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            fade_start: config.fade_start,
            fade_end: config.fade_end.max(config.fade_start),
            always_visible_range: config.always_visible_range,
            planet_visible_range: config.planet_visible_range,
            light_distance: config.light_distance,
            max_active_lights: config.max_active_lights,
        }
    }

    /// Opacity of a star at `distance`: 1 up to `fade_start`, falling
    /// linearly to 0 at `fade_end`.
    pub fn star_opacity(&self, distance: f32) -> f32 {
        if distance <= self.fade_start {
            return 1.0;
        }
        if distance >= self.fade_end {
            return 0.0;
        }
        let span = self.fade_end - self.fade_start;
        (1.0 - (distance - self.fade_start) / span).clamp(0.0, 1.0)
    }

    fn in_view(&self, frustum: &Frustum, center: Vec3, radius: f32, distance: f32) -> bool {
        frustum.contains_sphere(center, radius) || distance <= self.always_visible_range
    }

    /// Recompute visibility for every body.
    ///
    /// Orbit lines are shown only for bodies of the `highlighted` system and
    /// only while `orbits_visible` is set.
    pub fn cull(
        &self,
        universe: &mut Universe,
        camera: &OrbitCamera,
        highlighted: Option<usize>,
        orbits_visible: bool,
    ) -> CullStats {
        let frustum = camera.frustum();
        let eye = camera.position;
        let mut stats = CullStats::default();
        let mut light_candidates: Vec<(f32, usize)> = Vec::new();

        for (index, system) in universe.systems_mut().iter_mut().enumerate() {
            let star = &mut system.star;
            let star_distance = star.position.distance(eye);
            let opacity = self.star_opacity(star_distance);
            let star_visible = self.in_view(&frustum, star.position, star.radius, star_distance)
                && star_distance < self.fade_end;
            star.visibility = if star_visible {
                Visibility::new(true, opacity)
            } else {
                Visibility::HIDDEN
            };
            star.light_active = false;
            if star_visible {
                stats.stars_visible += 1;
            }
            if star_distance <= self.light_distance {
                light_candidates.push((star_distance, index));
            }

            let star_position = star.position;
            let evaluate_planets = star_distance <= self.planet_visible_range
                && (star_visible || star_distance <= self.always_visible_range);
            let lines_on = orbits_visible && highlighted == Some(index);

            for planet in &mut system.planets {
                let planet_position = star_position + planet.orbit.offset();
                let planet_visible = evaluate_planets && {
                    let d = planet_position.distance(eye);
                    self.in_view(&frustum, planet_position, planet.radius, d)
                };
                if !planet_visible {
                    planet.visibility = Visibility::HIDDEN;
                    planet.orbit_line_visible = false;
                    for moon in &mut planet.moons {
                        moon.visibility = Visibility::HIDDEN;
                        moon.orbit_line_visible = false;
                    }
                    continue;
                }
                planet.visibility = Visibility::new(true, opacity);
                planet.orbit_line_visible = lines_on;
                stats.planets_visible += 1;

                for moon in &mut planet.moons {
                    let moon_position = planet_position + moon.orbit.offset();
                    let d = moon_position.distance(eye);
                    let moon_visible = self.in_view(&frustum, moon_position, moon.radius, d);
                    moon.visibility = if moon_visible {
                        stats.moons_visible += 1;
                        Visibility::new(true, opacity)
                    } else {
                        Visibility::HIDDEN
                    };
                    moon.orbit_line_visible = lines_on;
                }
            }
        }

        light_candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        light_candidates.truncate(self.max_active_lights);
        let systems = universe.systems_mut();
        for &(_, index) in &light_candidates {
            systems[index].star.light_active = true;
        }
        stats.active_lights = light_candidates.len();
        stats
    }
}
