//! Configuration structs with sensible defaults and RON persistence.
//!
//! World units are light years. Body radii are exaggerated by
//! [`ScaleConfig::visual_multiplier`] so that stars and planets remain
//! visible at interstellar distances.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Physical-to-visual scale factors.
    pub scale: ScaleConfig,
    /// Camera projection and culling bands.
    pub camera: CameraConfig,
    /// Star system generation.
    pub stars: StarConfig,
    /// Planet generation.
    pub planets: PlanetConfig,
    /// Moon generation, sizes relative to the parent planet.
    pub moons: MoonConfig,
    /// Pointer, focus, and keyboard settings.
    pub controls: ControlsConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Scale factors between physical sizes and scene units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScaleConfig {
    /// Radius of the Sun in light years.
    pub solar_radius: f32,
    /// Radius of the Earth in light years.
    pub earth_radius: f32,
    /// Exaggeration applied to every body radius.
    pub visual_multiplier: f32,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Starting distance from the origin along +Z.
    pub initial_distance: f32,
    /// Distance at which stars start fading out.
    pub fade_start: f32,
    /// Distance at which stars are fully faded.
    pub fade_end: f32,
    /// Bodies closer than this are visible even outside the frustum.
    pub always_visible_range: f32,
    /// Planets are only evaluated for stars closer than this.
    pub planet_visible_range: f32,
    /// Stars closer than this are candidates for an active light.
    pub light_distance: f32,
    /// Maximum number of simultaneously active star lights.
    pub max_active_lights: usize,
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
}

/// How star positions are drawn inside the generation volume.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpatialDistribution {
    /// Uniform inside a cube of side `space_range` centered on the origin.
    #[default]
    Uniform,
    /// Normal distribution per axis with sigma `space_range / 4`.
    Gaussian,
}

/// Star system generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarConfig {
    /// Number of star systems to generate.
    pub count: u32,
    /// Minimum star radius in scene units.
    pub min_radius: f32,
    /// Maximum star radius in scene units.
    pub max_radius: f32,
    /// Minimum surface temperature in Kelvin.
    pub min_temperature: f32,
    /// Maximum surface temperature in Kelvin.
    pub max_temperature: f32,
    /// Side length of the generation volume.
    pub space_range: f32,
    /// Desired minimum distance between two stars.
    pub min_distance: f32,
    /// Probability that a star has any planets.
    pub has_planets_chance: f32,
    /// Placement retries before a too-close candidate is accepted anyway.
    pub max_placement_attempts: u32,
    /// Spatial distribution of star positions.
    pub distribution: SpatialDistribution,
}

/// Planet generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Minimum planet radius in scene units.
    pub min_radius: f32,
    /// Maximum planet radius in scene units.
    pub max_radius: f32,
    /// Closest orbit radius.
    pub min_orbit: f32,
    /// Farthest orbit radius.
    pub max_orbit: f32,
    /// Minimum planet count for a star that has planets.
    pub min_count: u32,
    /// Maximum planet count for a star that has planets.
    pub max_count: u32,
    /// Angular speed numerator: `speed = speed_factor / sqrt(orbit)`.
    pub speed_factor: f32,
    /// Maximum orbit inclination in radians.
    pub max_tilt: f32,
    /// Maximum per-channel color jitter applied to the palette.
    pub color_jitter: f32,
}

/// Moon generation parameters. Sizes and orbits are planet-radius multiples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoonConfig {
    /// Minimum moon radius as a fraction of the planet radius.
    pub min_size_ratio: f32,
    /// Maximum moon radius as a fraction of the planet radius.
    pub max_size_ratio: f32,
    /// Minimum orbit radius in planet radii.
    pub min_orbit_ratio: f32,
    /// Maximum orbit radius in planet radii.
    pub max_orbit_ratio: f32,
    /// Minimum number of moons per planet.
    pub min_count: u32,
    /// Maximum number of moons per planet.
    pub max_count: u32,
    /// Angular speed numerator: `speed = speed_factor / sqrt(orbit)`.
    pub speed_factor: f32,
    /// Maximum orbit inclination in radians.
    pub max_tilt: f32,
    /// Minimum spacing between sibling orbits in planet radii.
    pub min_orbit_separation: f32,
    /// Orbit draws before a moon is dropped.
    pub max_orbit_attempts: u32,
}

/// Pointer, camera focus, and keyboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    /// Pointer travel (pixels) below which a press/release is a click.
    pub drag_threshold_px: f32,
    /// Duration of the camera focus animation in milliseconds.
    pub focus_duration_ms: u32,
    /// Focus distance unit; moon/planet/star use 1x/2x/20x of it.
    pub focus_base_distance: f32,
    /// Closest follow distance as a multiple of the kind's focus distance.
    pub follow_zoom_min_factor: f32,
    /// Farthest follow distance as a multiple of the kind's focus distance.
    pub follow_zoom_max_factor: f32,
    /// Exponential zoom rate per wheel unit.
    pub zoom_rate: f32,
    /// Keybinding overrides (action name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Fixed generation seed. `None` draws a fresh universe every run.
    pub seed: Option<u64>,
    /// Number of frames the headless driver runs.
    pub frames: u32,
}

// --- Default implementations ---

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            solar_radius: 2.0e-7,
            earth_radius: 4.3e-9,
            visual_multiplier: 500_000.0,
        }
    }
}

impl ScaleConfig {
    /// One solar radius in scene units.
    pub fn visual_solar_radius(&self) -> f32 {
        self.solar_radius * self.visual_multiplier
    }

    /// One earth radius in scene units.
    pub fn visual_earth_radius(&self) -> f32 {
        self.earth_radius * self.visual_multiplier
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.01,
            far: 100_000.0,
            initial_distance: 10.0,
            fade_start: 1000.0,
            fade_end: 2000.0,
            always_visible_range: 5.0,
            planet_visible_range: 20.0,
            light_distance: 50.0,
            max_active_lights: 8,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        let solar = ScaleConfig::default().visual_solar_radius();
        Self {
            count: 500,
            min_radius: solar * 0.5,
            max_radius: solar * 5.0,
            min_temperature: 1000.0,
            max_temperature: 10_000.0,
            space_range: 1000.0,
            min_distance: 10.0,
            has_planets_chance: 0.7,
            max_placement_attempts: 100,
            distribution: SpatialDistribution::Uniform,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        let earth = ScaleConfig::default().visual_earth_radius();
        Self {
            min_radius: earth * 5.0,
            max_radius: earth * 20.0,
            min_orbit: 0.5,
            max_orbit: 5.0,
            min_count: 1,
            max_count: 5,
            speed_factor: 0.002,
            max_tilt: std::f32::consts::FRAC_PI_6,
            color_jitter: 0.1,
        }
    }
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            min_size_ratio: 0.2,
            max_size_ratio: 0.5,
            min_orbit_ratio: 3.0,
            max_orbit_ratio: 8.0,
            min_count: 0,
            max_count: 7,
            speed_factor: 0.01,
            max_tilt: std::f32::consts::FRAC_PI_4,
            min_orbit_separation: 3.0,
            max_orbit_attempts: 10,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 3.0,
            focus_duration_ms: 1000,
            focus_base_distance: 0.5,
            follow_zoom_min_factor: 0.2,
            follow_zoom_max_factor: 10.0,
            zoom_rate: 0.1,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
            frames: 600,
        }
    }
}

/// Platform config directory for the viewer, e.g. `~/.config/starfield`.
///
/// Falls back to the working directory when the platform reports none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("starfield"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Load / Save / Reload ---

const CONFIG_FILE: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| ConfigError::Write { path, source }
        };
        std::fs::create_dir_all(config_dir).map_err(write_err(config_dir))?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(write_err(&config_path))
    }

    /// Re-read the file. `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = read_config(&config_dir.join(CONFIG_FILE))?;
        if &new_config == self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(new_config))
    }
}
