//! Procedural synthesis of stars, planets, and moons.
//!
//! Every draw goes through a caller-supplied [`Rng`], so a seeded
//! `ChaCha8Rng` reproduces the same bodies.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use starfield_config::{Config, MoonConfig, PlanetConfig, SpatialDistribution, StarConfig};
use tracing::{debug, warn};

use crate::body::{Moon, Orbit, Planet, Star, Visibility};
use crate::color::{random_moon_color, random_planet_color, star_color_from_temperature};
use crate::error::GenerationError;
use crate::naming;

/// Planets never orbit closer than this many star radii.
const STAR_CLEARANCE: f32 = 1.5;

/// Angular speed per tick for a circular orbit of `radius`.
///
/// Inverse-square-root law: farther orbits are slower.
pub fn orbit_speed(speed_factor: f32, radius: f32) -> f32 {
    speed_factor / radius.sqrt()
}

/// Distance from `point` to the closest of `others`, or infinity if empty.
pub fn nearest_distance(point: Vec3, others: &[Vec3]) -> f32 {
    others
        .iter()
        .map(|other| point.distance(*other))
        .fold(f32::INFINITY, f32::min)
}

/// Standard normal sample via the Box-Muller transform.
fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // Keep u1 away from zero so ln() stays finite.
    let u1: f32 = rng.random::<f32>().max(f32::MIN_POSITIVE);
    let u2: f32 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

fn check_range(field: &'static str, min: f64, max: f64) -> Result<(), GenerationError> {
    // Written negated so NaN bounds are rejected too.
    if !(min <= max) {
        return Err(GenerationError::InvalidRange { field, min, max });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), GenerationError> {
    if !(value > 0.0) {
        return Err(GenerationError::NonPositive { field, value });
    }
    Ok(())
}

/// Synthesizes bodies from validated generation parameters.
#[derive(Clone, Debug)]
pub struct BodyGenerator {
    stars: StarConfig,
    planets: PlanetConfig,
    moons: MoonConfig,
}

impl BodyGenerator {
    /// Validate the generation sections of `config` and build a generator.
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        let generator = Self {
            stars: config.stars.clone(),
            planets: config.planets.clone(),
            moons: config.moons.clone(),
        };
        generator.validate()?;
        Ok(generator)
    }

    /// Star generation parameters.
    pub fn star_config(&self) -> &StarConfig {
        &self.stars
    }

    fn validate(&self) -> Result<(), GenerationError> {
        let (s, p, m) = (&self.stars, &self.planets, &self.moons);

        check_positive("stars.min_radius", s.min_radius as f64)?;
        check_range("stars.radius", s.min_radius as f64, s.max_radius as f64)?;
        check_range(
            "stars.temperature",
            s.min_temperature as f64,
            s.max_temperature as f64,
        )?;
        check_positive("stars.space_range", s.space_range as f64)?;
        if !(0.0..=1.0).contains(&s.has_planets_chance) {
            return Err(GenerationError::InvalidProbability {
                field: "stars.has_planets_chance",
                value: s.has_planets_chance as f64,
            });
        }

        check_positive("planets.min_radius", p.min_radius as f64)?;
        check_range("planets.radius", p.min_radius as f64, p.max_radius as f64)?;
        check_positive("planets.min_orbit", p.min_orbit as f64)?;
        check_range("planets.orbit", p.min_orbit as f64, p.max_orbit as f64)?;
        check_range("planets.count", p.min_count as f64, p.max_count as f64)?;
        check_positive("planets.speed_factor", p.speed_factor as f64)?;

        check_positive("moons.min_size_ratio", m.min_size_ratio as f64)?;
        check_range(
            "moons.size_ratio",
            m.min_size_ratio as f64,
            m.max_size_ratio as f64,
        )?;
        check_positive("moons.min_orbit_ratio", m.min_orbit_ratio as f64)?;
        check_range(
            "moons.orbit_ratio",
            m.min_orbit_ratio as f64,
            m.max_orbit_ratio as f64,
        )?;
        check_range("moons.count", m.min_count as f64, m.max_count as f64)?;
        check_positive("moons.speed_factor", m.speed_factor as f64)?;
        Ok(())
    }

    fn draw_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let range = self.stars.space_range;
        match self.stars.distribution {
            SpatialDistribution::Uniform => {
                let half = range * 0.5;
                Vec3::new(
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                )
            }
            SpatialDistribution::Gaussian => {
                let sigma = range * 0.25;
                Vec3::new(
                    sample_standard_normal(rng) * sigma,
                    sample_standard_normal(rng) * sigma,
                    sample_standard_normal(rng) * sigma,
                )
            }
        }
    }

    /// Draw a star position, retrying while it lands within
    /// `min_distance` of an already placed star.
    ///
    /// After `max_placement_attempts` draws the last candidate is kept even
    /// if it is too close: separation is best-effort.
    pub fn place_star<R: Rng + ?Sized>(&self, rng: &mut R, placed: &[Vec3]) -> Vec3 {
        let attempts = self.stars.max_placement_attempts.max(1);
        let mut candidate = self.draw_position(rng);
        for _ in 1..attempts {
            if nearest_distance(candidate, placed) >= self.stars.min_distance {
                return candidate;
            }
            candidate = self.draw_position(rng);
        }
        if nearest_distance(candidate, placed) < self.stars.min_distance {
            warn!(
                attempts,
                min_distance = self.stars.min_distance,
                "star placement exhausted retries, accepting crowded position"
            );
        }
        candidate
    }

    /// Generate one named star positioned away from `placed` stars.
    pub fn generate_star<R: Rng + ?Sized>(&self, rng: &mut R, placed: &[Vec3]) -> Star {
        let s = &self.stars;
        let radius = rng.random_range(s.min_radius..=s.max_radius);
        let temperature = rng.random_range(s.min_temperature..=s.max_temperature);
        let position = self.place_star(rng, placed);
        Star {
            name: naming::star_name(rng),
            radius,
            temperature,
            position,
            color: star_color_from_temperature(temperature),
            light_active: false,
            visibility: Visibility::HIDDEN,
        }
    }

    /// Generate the planets of `star`, without moons.
    ///
    /// With probability `has_planets_chance` the star gets between
    /// `min_count` and `max_count` planets, otherwise none.
    pub fn generate_system<R: Rng + ?Sized>(&self, rng: &mut R, star: &Star) -> Vec<Planet> {
        let p = &self.planets;
        if rng.random::<f32>() >= self.stars.has_planets_chance {
            return Vec::new();
        }
        let count = rng.random_range(p.min_count..=p.max_count) as usize;
        let min_orbit = p.min_orbit.max(star.radius * STAR_CLEARANCE).min(p.max_orbit);

        (0..count)
            .map(|index| {
                let radius = rng.random_range(p.min_radius..=p.max_radius);
                let orbit_radius = rng.random_range(min_orbit..=p.max_orbit);
                let (archetype, color) = random_planet_color(rng, p.color_jitter);
                Planet {
                    name: naming::planet_name(&star.name, index),
                    radius,
                    color,
                    archetype,
                    orbit: Orbit {
                        radius: orbit_radius,
                        tilt: rng.random_range(0.0..=p.max_tilt.max(0.0)),
                        node: 0.0,
                        phase: rng.random_range(0.0..TAU),
                        speed: orbit_speed(p.speed_factor, orbit_radius),
                    },
                    moons: Vec::new(),
                    visibility: Visibility::HIDDEN,
                    orbit_line_visible: false,
                }
            })
            .collect()
    }

    /// Generate moons for a planet of `planet_radius`.
    ///
    /// Orbit radii are redrawn while they fall within
    /// `min_orbit_separation` planet radii of a sibling. A moon whose
    /// draws are all rejected is dropped, so crowded planets end up with
    /// fewer moons than drawn. Names are left empty for the caller.
    pub fn generate_moons<R: Rng + ?Sized>(&self, rng: &mut R, planet_radius: f32) -> Vec<Moon> {
        let m = &self.moons;
        let count = rng.random_range(m.min_count..=m.max_count);
        let separation = m.min_orbit_separation * planet_radius;
        let mut moons: Vec<Moon> = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let mut accepted = None;
            for _ in 0..m.max_orbit_attempts.max(1) {
                let candidate =
                    planet_radius * rng.random_range(m.min_orbit_ratio..=m.max_orbit_ratio);
                let clashes = moons
                    .iter()
                    .any(|existing| (candidate - existing.orbit.radius).abs() < separation);
                if !clashes {
                    accepted = Some(candidate);
                    break;
                }
            }
            let Some(orbit_radius) = accepted else {
                debug!(planet_radius, "dropping moon: no free orbit slot");
                continue;
            };

            moons.push(Moon {
                name: String::new(),
                radius: planet_radius * rng.random_range(m.min_size_ratio..=m.max_size_ratio),
                color: random_moon_color(rng),
                orbit: Orbit {
                    radius: orbit_radius,
                    tilt: rng.random_range(0.0..=m.max_tilt.max(0.0)),
                    node: rng.random_range(0.0..TAU),
                    phase: rng.random_range(0.0..TAU),
                    speed: orbit_speed(m.speed_factor, orbit_radius),
                },
                visibility: Visibility::HIDDEN,
                orbit_line_visible: false,
            });
        }
        moons
    }
}
