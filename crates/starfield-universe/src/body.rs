//! The body tree: [`Universe`] → [`StarSystem`] → [`Planet`] → [`Moon`].
//!
//! Bodies are addressed by [`BodyId`], a tagged variant that carries the
//! path through the tree. The kind of a body is read off the variant, never
//! inferred from nesting depth.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::color::{Color, PlanetArchetype};

/// Which level of the hierarchy a body lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Root of a star system.
    Star,
    /// Orbits a star.
    Planet,
    /// Orbits a planet.
    Moon,
}

impl BodyKind {
    /// Lowercase display label.
    pub fn label(self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
        }
    }
}

/// Stable address of a body inside a [`Universe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyId {
    /// The star of system `system`.
    Star {
        /// System index.
        system: usize,
    },
    /// Planet `planet` of system `system`.
    Planet {
        /// System index.
        system: usize,
        /// Planet index within the system.
        planet: usize,
    },
    /// Moon `moon` of planet `planet` of system `system`.
    Moon {
        /// System index.
        system: usize,
        /// Planet index within the system.
        planet: usize,
        /// Moon index within the planet.
        moon: usize,
    },
}

impl BodyId {
    /// The body's level in the hierarchy.
    pub fn kind(self) -> BodyKind {
        match self {
            BodyId::Star { .. } => BodyKind::Star,
            BodyId::Planet { .. } => BodyKind::Planet,
            BodyId::Moon { .. } => BodyKind::Moon,
        }
    }

    /// Index of the owning star system.
    pub fn system(self) -> usize {
        match self {
            BodyId::Star { system }
            | BodyId::Planet { system, .. }
            | BodyId::Moon { system, .. } => system,
        }
    }

    /// The body this one orbits, if any.
    pub fn parent(self) -> Option<BodyId> {
        match self {
            BodyId::Star { .. } => None,
            BodyId::Planet { system, .. } => Some(BodyId::Star { system }),
            BodyId::Moon { system, planet, .. } => Some(BodyId::Planet { system, planet }),
        }
    }
}

/// Per-frame culling output for one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    /// Whether the renderer should draw the body this frame.
    pub visible: bool,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f32,
}

impl Visibility {
    /// Not drawn.
    pub const HIDDEN: Self = Self {
        visible: false,
        opacity: 0.0,
    };

    /// Create a visibility record, clamping opacity to `[0.0, 1.0]`.
    pub fn new(visible: bool, opacity: f32) -> Self {
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        Self { visible, opacity }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::HIDDEN
    }
}

/// Circular orbit around a parent body.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
    /// Distance from the parent center.
    pub radius: f32,
    /// Inclination of the orbit plane about the X axis, radians.
    pub tilt: f32,
    /// Rotation of the tilted plane about the Y axis, radians.
    pub node: f32,
    /// Current angle along the orbit, kept in `[0, 2π)`.
    pub phase: f32,
    /// Angle advanced per simulation tick.
    pub speed: f32,
}

impl Orbit {
    /// Advance the phase by one tick, wrapping into `[0, 2π)`.
    pub fn advance(&mut self) {
        self.phase = (self.phase + self.speed).rem_euclid(TAU);
    }

    /// Rotation taking the XZ plane onto the orbit plane.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.node) * Quat::from_rotation_x(self.tilt)
    }

    /// Offset of the orbiting body from its parent's center.
    pub fn offset(&self) -> Vec3 {
        let flat = Vec3::new(
            self.radius * self.phase.cos(),
            0.0,
            self.radius * self.phase.sin(),
        );
        self.orientation() * flat
    }
}

/// A star at a fixed world position.
#[derive(Clone, Debug)]
pub struct Star {
    /// Display name.
    pub name: String,
    /// Radius in scene units.
    pub radius: f32,
    /// Surface temperature in Kelvin.
    pub temperature: f32,
    /// World position, fixed at creation.
    pub position: Vec3,
    /// Emissive color.
    pub color: Color,
    /// Whether this star's point light is among the active ones.
    pub light_active: bool,
    /// Culling output for the current frame.
    pub visibility: Visibility,
}

/// A planet on a circular orbit around its star.
#[derive(Clone, Debug)]
pub struct Planet {
    /// Display name.
    pub name: String,
    /// Radius in scene units.
    pub radius: f32,
    /// Surface color.
    pub color: Color,
    /// Palette entry the color was drawn from.
    pub archetype: PlanetArchetype,
    /// Orbit around the star.
    pub orbit: Orbit,
    /// Moons in generation order.
    pub moons: Vec<Moon>,
    /// Culling output for the current frame.
    pub visibility: Visibility,
    /// Whether the orbit line is drawn this frame.
    pub orbit_line_visible: bool,
}

/// A moon on a circular orbit around its planet.
#[derive(Clone, Debug)]
pub struct Moon {
    /// Display name.
    pub name: String,
    /// Radius in scene units.
    pub radius: f32,
    /// Surface color.
    pub color: Color,
    /// Orbit around the planet.
    pub orbit: Orbit,
    /// Culling output for the current frame.
    pub visibility: Visibility,
    /// Whether the orbit line is drawn this frame.
    pub orbit_line_visible: bool,
}

/// A star and the planets orbiting it.
#[derive(Clone, Debug)]
pub struct StarSystem {
    /// The central star.
    pub star: Star,
    /// Planets in generation order.
    pub planets: Vec<Planet>,
}

impl StarSystem {
    /// Total number of moons across all planets.
    pub fn moon_count(&self) -> usize {
        self.planets.iter().map(|p| p.moons.len()).sum()
    }
}

/// Borrowed view of any body.
#[derive(Clone, Copy, Debug)]
pub enum BodyRef<'a> {
    /// A star.
    Star(&'a Star),
    /// A planet.
    Planet(&'a Planet),
    /// A moon.
    Moon(&'a Moon),
}

impl BodyRef<'_> {
    /// The body's level in the hierarchy.
    pub fn kind(&self) -> BodyKind {
        match self {
            BodyRef::Star(_) => BodyKind::Star,
            BodyRef::Planet(_) => BodyKind::Planet,
            BodyRef::Moon(_) => BodyKind::Moon,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            BodyRef::Star(s) => &s.name,
            BodyRef::Planet(p) => &p.name,
            BodyRef::Moon(m) => &m.name,
        }
    }

    /// Radius in scene units.
    pub fn radius(&self) -> f32 {
        match self {
            BodyRef::Star(s) => s.radius,
            BodyRef::Planet(p) => p.radius,
            BodyRef::Moon(m) => m.radius,
        }
    }

    /// Display color.
    pub fn color(&self) -> Color {
        match self {
            BodyRef::Star(s) => s.color,
            BodyRef::Planet(p) => p.color,
            BodyRef::Moon(m) => m.color,
        }
    }

    /// Culling output for the current frame.
    pub fn visibility(&self) -> Visibility {
        match self {
            BodyRef::Star(s) => s.visibility,
            BodyRef::Planet(p) => p.visibility,
            BodyRef::Moon(m) => m.visibility,
        }
    }

    /// Orbit around the parent. Stars have none.
    pub fn orbit(&self) -> Option<&Orbit> {
        match self {
            BodyRef::Star(_) => None,
            BodyRef::Planet(p) => Some(&p.orbit),
            BodyRef::Moon(m) => Some(&m.orbit),
        }
    }

    /// Whether the orbit line is drawn this frame.
    pub fn orbit_line_visible(&self) -> bool {
        match self {
            BodyRef::Star(_) => false,
            BodyRef::Planet(p) => p.orbit_line_visible,
            BodyRef::Moon(m) => m.orbit_line_visible,
        }
    }
}

/// Every generated star system. Owns the whole body tree.
#[derive(Clone, Debug, Default)]
pub struct Universe {
    systems: Vec<StarSystem>,
}

impl Universe {
    /// Wrap an already generated list of systems.
    pub fn new(systems: Vec<StarSystem>) -> Self {
        Self { systems }
    }

    /// All systems in generation order.
    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    /// Mutable access for per-frame state. The slice cannot grow or shrink.
    pub fn systems_mut(&mut self) -> &mut [StarSystem] {
        &mut self.systems
    }

    /// Number of systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if there are no systems.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Total number of bodies of every kind.
    pub fn body_count(&self) -> usize {
        self.systems
            .iter()
            .map(|s| 1 + s.planets.len() + s.moon_count())
            .sum()
    }

    /// Every body id, depth first: star, then each planet followed by its moons.
    pub fn body_ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.systems.iter().enumerate().flat_map(|(system, sys)| {
            std::iter::once(BodyId::Star { system }).chain(sys.planets.iter().enumerate().flat_map(
                move |(planet, p)| {
                    std::iter::once(BodyId::Planet { system, planet }).chain(
                        (0..p.moons.len()).map(move |moon| BodyId::Moon {
                            system,
                            planet,
                            moon,
                        }),
                    )
                },
            ))
        })
    }

    /// Look up a body. Returns `None` for ids outside this universe.
    pub fn body(&self, id: BodyId) -> Option<BodyRef<'_>> {
        match id {
            BodyId::Star { system } => self.systems.get(system).map(|s| BodyRef::Star(&s.star)),
            BodyId::Planet { system, planet } => self
                .planet(system, planet)
                .map(BodyRef::Planet),
            BodyId::Moon {
                system,
                planet,
                moon,
            } => self
                .planet(system, planet)
                .and_then(|p| p.moons.get(moon))
                .map(BodyRef::Moon),
        }
    }

    /// Look up a planet by system and planet index.
    pub fn planet(&self, system: usize, planet: usize) -> Option<&Planet> {
        self.systems.get(system).and_then(|s| s.planets.get(planet))
    }

    /// Current world position of a body.
    pub fn body_position(&self, id: BodyId) -> Option<Vec3> {
        match id {
            BodyId::Star { system } => self.systems.get(system).map(|s| s.star.position),
            BodyId::Planet { system, planet } => {
                let sys = self.systems.get(system)?;
                let p = sys.planets.get(planet)?;
                Some(sys.star.position + p.orbit.offset())
            }
            BodyId::Moon {
                system,
                planet,
                moon,
            } => {
                let planet_pos = self.body_position(BodyId::Planet { system, planet })?;
                let m = self.planet(system, planet)?.moons.get(moon)?;
                Some(planet_pos + m.orbit.offset())
            }
        }
    }

    /// Advance every planet and moon orbit by one tick.
    pub fn advance_orbits(&mut self) {
        for system in &mut self.systems {
            for planet in &mut system.planets {
                planet.orbit.advance();
                for moon in &mut planet.moons {
                    moon.orbit.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit(radius: f32, speed: f32) -> Orbit {
        Orbit {
            radius,
            tilt: 0.0,
            node: 0.0,
            phase: 0.0,
            speed,
        }
    }

    fn sample_universe() -> Universe {
        let moon = Moon {
            name: "m".into(),
            radius: 0.01,
            color: Color::WHITE,
            orbit: orbit(0.1, 0.5),
            visibility: Visibility::HIDDEN,
            orbit_line_visible: false,
        };
        let planet = Planet {
            name: "p".into(),
            radius: 0.03,
            color: Color::WHITE,
            archetype: PlanetArchetype::Icy,
            orbit: orbit(2.0, 0.25),
            moons: vec![moon],
            visibility: Visibility::HIDDEN,
            orbit_line_visible: false,
        };
        let star = Star {
            name: "s".into(),
            radius: 0.2,
            temperature: 5000.0,
            position: Vec3::new(10.0, 0.0, 0.0),
            color: Color::WHITE,
            light_active: false,
            visibility: Visibility::HIDDEN,
        };
        Universe::new(vec![StarSystem {
            star,
            planets: vec![planet],
        }])
    }

    #[test]
    fn test_kind_comes_from_variant() {
        assert_eq!(BodyId::Star { system: 0 }.kind(), BodyKind::Star);
        let moon = BodyId::Moon {
            system: 2,
            planet: 1,
            moon: 0,
        };
        assert_eq!(moon.kind(), BodyKind::Moon);
        assert_eq!(moon.system(), 2);
        assert_eq!(
            moon.parent(),
            Some(BodyId::Planet {
                system: 2,
                planet: 1
            })
        );
    }

    #[test]
    fn test_body_ids_cover_tree() {
        let universe = sample_universe();
        let ids: Vec<_> = universe.body_ids().collect();
        assert_eq!(ids.len(), universe.body_count());
        assert_eq!(ids[0], BodyId::Star { system: 0 });
        assert_eq!(ids[1].kind(), BodyKind::Planet);
        assert_eq!(ids[2].kind(), BodyKind::Moon);
        for id in ids {
            assert_eq!(universe.body(id).unwrap().kind(), id.kind());
        }
    }

    #[test]
    fn test_unknown_id_is_none() {
        let universe = sample_universe();
        assert!(universe.body(BodyId::Star { system: 9 }).is_none());
        assert!(universe.body_position(BodyId::Planet { system: 0, planet: 4 }).is_none());
    }

    #[test]
    fn test_positions_compose() {
        let universe = sample_universe();
        let planet = universe
            .body_position(BodyId::Planet { system: 0, planet: 0 })
            .unwrap();
        assert!((planet - Vec3::new(12.0, 0.0, 0.0)).length() < 1e-5);
        let moon = universe
            .body_position(BodyId::Moon {
                system: 0,
                planet: 0,
                moon: 0,
            })
            .unwrap();
        assert!((moon - Vec3::new(12.1, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_tilted_orbit_keeps_radius() {
        let mut o = orbit(3.0, 0.3);
        o.tilt = 0.4;
        o.node = 1.1;
        for _ in 0..50 {
            o.advance();
            assert!((o.offset().length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_phase_wraps() {
        let mut o = orbit(1.0, 1.0);
        for _ in 0..10_000 {
            o.advance();
            assert!((0.0..TAU).contains(&o.phase));
        }
    }

    #[test]
    fn test_advance_orbits_moves_planets_and_moons() {
        let mut universe = sample_universe();
        universe.advance_orbits();
        let planet = &universe.systems()[0].planets[0];
        assert!((planet.orbit.phase - 0.25).abs() < 1e-6);
        assert!((planet.moons[0].orbit.phase - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_visibility_clamps_opacity() {
        assert_eq!(Visibility::new(true, 1.5).opacity, 1.0);
        assert_eq!(Visibility::new(true, -0.5).opacity, 0.0);
        assert_eq!(Visibility::new(true, f32::NAN).opacity, 0.0);
    }
}
