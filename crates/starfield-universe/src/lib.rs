//! Procedural universe: stars, their planets, and the planets' moons.
//!
//! [`UniverseBuilder`] validates a [`starfield_config::Config`] and drives
//! [`BodyGenerator`] to populate a [`Universe`] once at startup. After that
//! the tree never changes shape; only orbital phases and per-frame
//! visibility are mutated.

pub mod body;
pub mod builder;
pub mod color;
pub mod error;
pub mod generator;
pub mod naming;

pub use body::{BodyId, BodyKind, BodyRef, Moon, Orbit, Planet, Star, StarSystem, Universe, Visibility};
pub use builder::{BuildReport, UniverseBuilder};
pub use color::{Color, PlanetArchetype, random_moon_color, random_planet_color, star_color_from_temperature};
pub use error::GenerationError;
pub use generator::{BodyGenerator, orbit_speed};
