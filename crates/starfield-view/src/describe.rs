//! Display data for the info panel.
//!
//! Descriptions never fail: missing or non-finite values become `None` and
//! render as `Unknown`.

use std::fmt;

use starfield_config::ScaleConfig;
use starfield_universe::{BodyId, BodyKind, BodyRef, PlanetArchetype, Universe};

/// Kilometres in one light year, the scene's world unit.
pub const KM_PER_LIGHT_YEAR: f64 = 9.460_730_472_580_8e12;

const PLACEHOLDER: &str = "Unknown";

/// Size class of a star, in solar radii.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// Under 2 solar radii.
    Dwarf,
    /// 2 to 10 solar radii.
    MainSequence,
    /// Over 10 solar radii.
    Giant,
    /// Over 100 solar radii.
    Supergiant,
}

impl SizeClass {
    /// Bucket a radius given in solar radii.
    pub fn from_solar_radii(solar_radii: f32) -> Self {
        if solar_radii < 2.0 {
            SizeClass::Dwarf
        } else if solar_radii > 100.0 {
            SizeClass::Supergiant
        } else if solar_radii > 10.0 {
            SizeClass::Giant
        } else {
            SizeClass::MainSequence
        }
    }
}

/// Display classification such as "Red Dwarf" or "Blue Supergiant".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StarClass {
    /// Size bucket.
    pub size: SizeClass,
    /// Human-readable name.
    pub label: &'static str,
}

impl StarClass {
    /// Classify by surface temperature (Kelvin) and radius (solar radii).
    pub fn classify(temperature: f32, solar_radii: f32) -> Self {
        let size = SizeClass::from_solar_radii(solar_radii);
        let t = temperature;
        let label = match size {
            SizeClass::Dwarf => match t {
                t if t < 3500.0 => "Red Dwarf",
                t if t < 5000.0 => "Orange Dwarf",
                t if t < 6000.0 => "Yellow Dwarf",
                t if t < 7500.0 => "White Dwarf",
                t if t < 10000.0 => "Blue-White Dwarf",
                _ => "Blue Dwarf",
            },
            SizeClass::Supergiant => match t {
                t if t < 4500.0 => "Red Supergiant",
                t if t < 6000.0 => "Yellow Supergiant",
                _ => "Blue Supergiant",
            },
            SizeClass::Giant => match t {
                t if t < 4500.0 => "Red Giant",
                t if t < 6000.0 => "Yellow Giant",
                _ => "Blue Giant",
            },
            SizeClass::MainSequence => match t {
                t if t < 3500.0 => "Red Star",
                t if t < 5000.0 => "Orange Star",
                t if t < 6000.0 => "Yellow Star",
                t if t < 7500.0 => "White Star",
                t if t < 10000.0 => "Blue-White Star",
                _ => "Blue Star",
            },
        };
        Self { size, label }
    }
}

/// Kind-specific part of a [`BodyDescription`].
#[derive(Clone, Debug, PartialEq)]
pub enum BodyDetail {
    /// Star data.
    Star {
        /// Classification label.
        class: StarClass,
        /// Rounded surface temperature.
        temperature_k: Option<u32>,
        /// Planets in the system.
        planet_count: usize,
    },
    /// Planet data.
    Planet {
        /// Palette archetype.
        archetype: PlanetArchetype,
        /// Orbit radius in light years.
        orbit_radius: Option<f32>,
        /// Moons of the planet.
        moon_count: usize,
    },
    /// Moon data.
    Moon {
        /// Orbit radius in light years.
        orbit_radius: Option<f32>,
    },
}

/// Flat record shown in the info panel.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescription {
    /// Display name.
    pub name: String,
    /// Body kind.
    pub kind: BodyKind,
    /// Physical radius in kilometres.
    pub radius_km: Option<f64>,
    /// Display color as `0xRRGGBB`.
    pub color_hex: u32,
    /// Kind-specific fields.
    pub detail: BodyDetail,
}

fn finite(v: f32) -> Option<f32> {
    v.is_finite().then_some(v)
}

impl BodyDescription {
    /// Describe a body, or `None` if the id is not in the universe.
    pub fn of(universe: &Universe, id: BodyId, scale: &ScaleConfig) -> Option<Self> {
        let body = universe.body(id)?;
        let name = if body.name().trim().is_empty() {
            PLACEHOLDER.to_string()
        } else {
            body.name().to_string()
        };
        let radius = finite(body.radius()).filter(|r| *r > 0.0);
        let radius_km = radius
            .filter(|_| scale.visual_multiplier > 0.0)
            .map(|r| f64::from(r) / f64::from(scale.visual_multiplier) * KM_PER_LIGHT_YEAR)
            .map(f64::round);

        let detail = match body {
            BodyRef::Star(star) => {
                let solar_radii = match (radius, scale.visual_solar_radius()) {
                    (Some(r), unit) if unit > 0.0 => r / unit,
                    _ => 1.0,
                };
                let temperature = finite(star.temperature);
                BodyDetail::Star {
                    class: StarClass::classify(temperature.unwrap_or(5000.0), solar_radii),
                    temperature_k: temperature.map(|t| t.round().max(0.0) as u32),
                    planet_count: universe.systems().get(id.system()).map_or(0, |s| s.planets.len()),
                }
            }
            BodyRef::Planet(planet) => BodyDetail::Planet {
                archetype: planet.archetype,
                orbit_radius: finite(planet.orbit.radius),
                moon_count: planet.moons.len(),
            },
            BodyRef::Moon(moon) => BodyDetail::Moon {
                orbit_radius: finite(moon.orbit.radius),
            },
        };

        Some(Self {
            name,
            kind: body.kind(),
            radius_km,
            color_hex: body.color().to_hex(),
            detail,
        })
    }
}

struct OrUnknown<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for OrUnknown<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str(PLACEHOLDER),
        }
    }
}

impl fmt::Display for BodyDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), radius {} km, color #{:06x}",
            self.name,
            self.kind.label(),
            OrUnknown(self.radius_km),
            self.color_hex
        )?;
        match &self.detail {
            BodyDetail::Star {
                class,
                temperature_k,
                planet_count,
            } => write!(
                f,
                ", {}, {} K, {} planets",
                class.label,
                OrUnknown(*temperature_k),
                planet_count
            ),
            BodyDetail::Planet {
                archetype,
                orbit_radius,
                moon_count,
            } => write!(
                f,
                ", {}, orbit {} ly, {} moons",
                archetype.label(),
                OrUnknown(orbit_radius.map(|r| format!("{r:.2}"))),
                moon_count
            ),
            BodyDetail::Moon { orbit_radius } => write!(
                f,
                ", orbit {} ly",
                OrUnknown(orbit_radius.map(|r| format!("{r:.2}")))
            ),
        }
    }
}
