//! Configuration system for the starfield viewer.
//!
//! Provides runtime-configurable generation, camera, and control settings
//! that persist to disk as RON files. Supports CLI overrides via clap,
//! hot-reload detection, and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, ControlsConfig, DebugConfig, MoonConfig, PlanetConfig, ScaleConfig,
    SpatialDistribution, StarConfig, default_config_dir,
};
pub use error::ConfigError;
