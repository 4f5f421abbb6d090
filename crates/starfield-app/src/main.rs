//! The binary entry point for the starfield viewer.

use clap::Parser;
use starfield_config::{CliArgs, Config, default_config_dir};
use starfield_universe::UniverseBuilder;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    starfield_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let universe = match UniverseBuilder::build_from_config(&config) {
        Ok(universe) => universe,
        Err(e) => {
            error!("Invalid generation config: {e}");
            std::process::exit(1);
        }
    };

    let summary = starfield_app::run_headless(&config, universe);
    info!(
        frames = summary.frames,
        orbit_ticks = summary.orbit_ticks,
        failed_frames = summary.failed_frames,
        selected = ?summary.selected,
        stars_visible = summary.last_cull.stars_visible,
        planets_visible = summary.last_cull.planets_visible,
        moons_visible = summary.last_cull.moons_visible,
        active_lights = summary.last_cull.active_lights,
        "headless run finished"
    );
}
