//! Command-line argument parsing for the starfield viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Starfield viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "starfield", about = "Procedural starfield viewer")]
pub struct CliArgs {
    /// Number of star systems to generate.
    #[arg(long)]
    pub systems: Option<u32>,

    /// Generation seed for a reproducible universe.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames the headless driver runs.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Viewport width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(n) = args.systems {
            self.stars.count = n;
        }
        if let Some(seed) = args.seed {
            self.debug.seed = Some(seed);
        }
        if let Some(frames) = args.frames {
            self.debug.frames = frames;
        }
        if let Some(w) = args.width {
            self.camera.viewport_width = w;
        }
        if let Some(h) = args.height {
            self.camera.viewport_height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
