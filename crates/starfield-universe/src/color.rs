//! Body colors: a piecewise-linear blackbody ramp for stars and an
//! archetype palette for planets.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Linear RGB color with channels in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color without clamping.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode a `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// Encode as `0xRRGGBB`, clamping each channel first.
    pub fn to_hex(self) -> u32 {
        let c = self.clamped();
        let byte = |v: f32| (v * 255.0).round() as u32;
        (byte(c.r) << 16) | (byte(c.g) << 8) | byte(c.b)
    }

    /// Every channel clamped to `[0.0, 1.0]`. NaN channels become 0.
    pub fn clamped(self) -> Self {
        let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self::new(clamp(self.r), clamp(self.g), clamp(self.b))
    }

    /// Channels as an array, for renderer uniforms.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

/// Anchor points of the temperature ramp, ascending in Kelvin.
///
/// Below the first anchor and above the last the end colors are held.
const TEMPERATURE_RAMP: [(f32, Color); 6] = [
    (1000.0, Color::new(1.0, 0.2, 0.0)),  // deep red
    (3500.0, Color::new(1.0, 0.6, 0.2)),  // orange
    (5000.0, Color::new(1.0, 0.9, 0.7)),  // yellow-white
    (6500.0, Color::new(1.0, 1.0, 1.0)),  // white
    (8000.0, Color::new(0.8, 0.85, 1.0)), // blue-white
    (10000.0, Color::new(0.6, 0.7, 1.0)), // blue
];

/// Map a surface temperature in Kelvin to an approximate star color.
///
/// Pure function: red below 3500 K through orange, yellow-white and white
/// to blue above 8000 K, linearly interpolated inside each band.
pub fn star_color_from_temperature(kelvin: f32) -> Color {
    let (first_t, first_c) = TEMPERATURE_RAMP[0];
    if kelvin.is_nan() || kelvin <= first_t {
        return first_c;
    }
    for pair in TEMPERATURE_RAMP.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if kelvin <= t1 {
            return c0.lerp(c1, (kelvin - t0) / (t1 - t0)).clamped();
        }
    }
    TEMPERATURE_RAMP[TEMPERATURE_RAMP.len() - 1].1
}

/// Broad planet surface types, one palette entry each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetArchetype {
    /// Brown rock.
    Rocky,
    /// Deep water.
    Ocean,
    /// Sand and dust.
    Desert,
    /// Vegetated.
    Forest,
    /// Frozen surface.
    Icy,
    /// Iron-rich red rock.
    RedRocky,
}

impl PlanetArchetype {
    /// Every archetype in palette order.
    pub const ALL: [PlanetArchetype; 6] = [
        PlanetArchetype::Rocky,
        PlanetArchetype::Ocean,
        PlanetArchetype::Desert,
        PlanetArchetype::Forest,
        PlanetArchetype::Icy,
        PlanetArchetype::RedRocky,
    ];

    /// Palette color before jitter.
    pub fn base_color(self) -> Color {
        match self {
            PlanetArchetype::Rocky => Color::from_hex(0x887766),
            PlanetArchetype::Ocean => Color::from_hex(0x445566),
            PlanetArchetype::Desert => Color::from_hex(0xaa8855),
            PlanetArchetype::Forest => Color::from_hex(0x557744),
            PlanetArchetype::Icy => Color::from_hex(0x8888aa),
            PlanetArchetype::RedRocky => Color::from_hex(0x996644),
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PlanetArchetype::Rocky => "Rocky",
            PlanetArchetype::Ocean => "Ocean",
            PlanetArchetype::Desert => "Desert",
            PlanetArchetype::Forest => "Forest",
            PlanetArchetype::Icy => "Icy",
            PlanetArchetype::RedRocky => "Red Rocky",
        }
    }
}

/// Draw a palette archetype uniformly and jitter each channel by up to
/// `±jitter`, clamped to `[0, 1]`.
pub fn random_planet_color<R: Rng + ?Sized>(rng: &mut R, jitter: f32) -> (PlanetArchetype, Color) {
    let archetype = PlanetArchetype::ALL[rng.random_range(0..PlanetArchetype::ALL.len())];
    let base = archetype.base_color();
    let jitter = jitter.abs();
    let mut delta = || {
        if jitter > 0.0 {
            rng.random_range(-jitter..=jitter)
        } else {
            0.0
        }
    };
    let color = Color::new(base.r + delta(), base.g + delta(), base.b + delta()).clamped();
    (archetype, color)
}

/// Grey to light-brown moon tone.
pub fn random_moon_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let base: f32 = rng.random_range(0.5..=0.8);
    Color::new(base, base * 0.95, base * 0.8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn in_unit(c: Color) -> bool {
        [c.r, c.g, c.b].iter().all(|v| (0.0..=1.0).contains(v))
    }

    #[test]
    fn test_star_color_channels_in_range() {
        let mut t = 1000.0;
        while t <= 10_000.0 {
            let c = star_color_from_temperature(t);
            assert!(in_unit(c), "{t} K produced {c:?}");
            t += 50.0;
        }
    }

    #[test]
    fn test_cooler_stars_are_redder() {
        // Walking down from 6500 K: red never drops, blue never rises.
        let mut prev = star_color_from_temperature(6500.0);
        let mut t = 6400.0;
        while t >= 1000.0 {
            let c = star_color_from_temperature(t);
            assert!(c.r >= prev.r, "r decreased at {t} K");
            assert!(c.b <= prev.b, "b increased at {t} K");
            prev = c;
            t -= 100.0;
        }
    }

    #[test]
    fn test_star_color_is_pure() {
        for t in [1200.0, 3499.0, 5000.0, 7777.0, 9999.0] {
            assert_eq!(star_color_from_temperature(t), star_color_from_temperature(t));
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(star_color_from_temperature(6500.0), Color::WHITE);
        assert_eq!(star_color_from_temperature(500.0), TEMPERATURE_RAMP[0].1);
        assert_eq!(star_color_from_temperature(40_000.0), TEMPERATURE_RAMP[5].1);
        let hot = star_color_from_temperature(9000.0);
        assert!(hot.b > hot.r, "hot stars lean blue: {hot:?}");
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Color::from_hex(0x887766).to_hex(), 0x887766);
        assert_eq!(Color::new(2.0, -1.0, 0.5).to_hex(), 0xff0080);
    }

    #[test]
    fn test_planet_colors_clamped_and_near_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let (archetype, color) = random_planet_color(&mut rng, 0.1);
            assert!(in_unit(color));
            let base = archetype.base_color();
            assert!((color.r - base.r).abs() <= 0.1 + 1e-6);
            assert!((color.g - base.g).abs() <= 0.1 + 1e-6);
            assert!((color.b - base.b).abs() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn test_planet_color_without_jitter_is_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (archetype, color) = random_planet_color(&mut rng, 0.0);
        assert_eq!(color, archetype.base_color());
    }

    #[test]
    fn test_every_archetype_drawn() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            seen.insert(random_planet_color(&mut rng, 0.0).0);
        }
        assert_eq!(seen.len(), PlanetArchetype::ALL.len());
    }
}
