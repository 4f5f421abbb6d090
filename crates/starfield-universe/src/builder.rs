//! One-shot universe construction.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starfield_config::Config;
use tracing::info;

use crate::body::{StarSystem, Universe};
use crate::error::GenerationError;
use crate::generator::{BodyGenerator, nearest_distance};
use crate::naming;

/// Counts gathered while building, logged once at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Star systems generated.
    pub systems: usize,
    /// Planets across all systems.
    pub planets: usize,
    /// Moons across all planets.
    pub moons: usize,
    /// Stars accepted closer than `min_distance` to a neighbor.
    pub crowded_stars: usize,
}

/// Populates a [`Universe`] from a validated configuration.
///
/// Owns the list of already placed star positions used for spacing, so two
/// builders never share placement state.
#[derive(Clone, Debug)]
pub struct UniverseBuilder {
    generator: BodyGenerator,
    placed: Vec<Vec3>,
    report: BuildReport,
}

impl UniverseBuilder {
    /// Validate `config`. Fails before anything is generated.
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        Ok(Self {
            generator: BodyGenerator::new(config)?,
            placed: Vec::new(),
            report: BuildReport::default(),
        })
    }

    /// Counts from the most recent [`build`](Self::build).
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Generate `system_count` star systems with their planets and moons.
    pub fn build<R: Rng + ?Sized>(&mut self, rng: &mut R, system_count: usize) -> Universe {
        self.placed.clear();
        self.placed.reserve(system_count);
        self.report = BuildReport::default();
        let min_distance = self.generator.star_config().min_distance;

        let mut systems = Vec::with_capacity(system_count);
        for _ in 0..system_count {
            let star = self.generator.generate_star(rng, &self.placed);
            if nearest_distance(star.position, &self.placed) < min_distance {
                self.report.crowded_stars += 1;
            }
            self.placed.push(star.position);

            let mut planets = self.generator.generate_system(rng, &star);
            for planet in &mut planets {
                planet.moons = self.generator.generate_moons(rng, planet.radius);
                for (index, moon) in planet.moons.iter_mut().enumerate() {
                    moon.name = naming::moon_name(&planet.name, index);
                }
                self.report.moons += planet.moons.len();
            }
            self.report.planets += planets.len();
            systems.push(StarSystem { star, planets });
        }
        self.report.systems = systems.len();

        info!(
            systems = self.report.systems,
            planets = self.report.planets,
            moons = self.report.moons,
            crowded_stars = self.report.crowded_stars,
            "universe built"
        );
        Universe::new(systems)
    }

    /// Build `config.stars.count` systems with a ChaCha generator seeded
    /// from `config.debug.seed`, or from entropy when no seed is set.
    pub fn build_from_config(config: &Config) -> Result<Universe, GenerationError> {
        let mut builder = Self::new(config)?;
        let seed = config.debug.seed.unwrap_or_else(rand::random);
        info!(seed, "seeding universe");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(builder.build(&mut rng, config.stars.count as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BodyKind;

    fn two_planets_no_moons() -> Config {
        let mut config = Config::default();
        config.stars.has_planets_chance = 1.0;
        config.planets.min_count = 2;
        config.planets.max_count = 2;
        config.moons.min_count = 0;
        config.moons.max_count = 0;
        config
    }

    #[test]
    fn test_single_system_with_exactly_two_planets() {
        let config = two_planets_no_moons();
        let mut builder = UniverseBuilder::new(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let universe = builder.build(&mut rng, 1);

        assert_eq!(universe.len(), 1);
        let system = &universe.systems()[0];
        assert_eq!(system.planets.len(), 2);
        assert!(system.planets.iter().all(|p| p.moons.is_empty()));
        assert_eq!(builder.report().planets, 2);
        assert_eq!(builder.report().moons, 0);
    }

    #[test]
    fn test_invalid_config_fails_before_build() {
        let mut config = Config::default();
        config.stars.min_radius = 2.0;
        config.stars.max_radius = 1.0;
        assert!(matches!(
            UniverseBuilder::new(&config),
            Err(GenerationError::InvalidRange { field: "stars.radius", .. })
        ));
        assert!(UniverseBuilder::build_from_config(&config).is_err());
    }

    #[test]
    fn test_report_matches_universe() {
        let config = Config::default();
        let mut builder = UniverseBuilder::new(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let universe = builder.build(&mut rng, 40);

        let report = builder.report();
        assert_eq!(report.systems, 40);
        let planets: usize = universe.systems().iter().map(|s| s.planets.len()).sum();
        let moons: usize = universe.systems().iter().map(|s| s.moon_count()).sum();
        assert_eq!(report.planets, planets);
        assert_eq!(report.moons, moons);
        assert_eq!(report.crowded_stars, 0);
        assert_eq!(universe.body_count(), 40 + planets + moons);
    }

    #[test]
    fn test_crowded_space_reports_every_forced_star() {
        let mut config = Config::default();
        config.stars.space_range = 1.0;
        config.stars.min_distance = 10.0;
        config.stars.max_placement_attempts = 3;
        let mut builder = UniverseBuilder::new(&config).unwrap();
        let universe = builder.build(&mut ChaCha8Rng::seed_from_u64(8), 6);
        assert_eq!(universe.len(), 6);
        assert_eq!(builder.report().crowded_stars, 5);
    }

    #[test]
    fn test_moons_named_after_planet() {
        let mut config = Config::default();
        config.stars.has_planets_chance = 1.0;
        config.moons.min_count = 1;
        let mut builder = UniverseBuilder::new(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let universe = builder.build(&mut rng, 5);
        for id in universe.body_ids().filter(|id| id.kind() == BodyKind::Moon) {
            let moon = universe.body(id).unwrap();
            let parent = universe.body(id.parent().unwrap()).unwrap();
            assert!(moon.name().starts_with(parent.name()));
        }
    }

    #[test]
    fn test_seeded_builds_are_reproducible() {
        let mut config = Config::default();
        config.stars.count = 20;
        config.debug.seed = Some(1234);
        let a = UniverseBuilder::build_from_config(&config).unwrap();
        let b = UniverseBuilder::build_from_config(&config).unwrap();
        assert_eq!(a.body_count(), b.body_count());
        for (sa, sb) in a.systems().iter().zip(b.systems()) {
            assert_eq!(sa.star.position, sb.star.position);
            assert_eq!(sa.star.name, sb.star.name);
        }
    }

    #[test]
    fn test_rebuild_resets_placement() {
        let config = Config::default();
        let mut builder = UniverseBuilder::new(&config).unwrap();
        let first = builder.build(&mut ChaCha8Rng::seed_from_u64(5), 10);
        let second = builder.build(&mut ChaCha8Rng::seed_from_u64(5), 10);
        assert_eq!(first.systems()[3].star.position, second.systems()[3].star.position);
    }
}
