//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Seeded tile-map terrain generator")]
pub struct CliArgs {
    /// Map width in tiles.
    #[arg(long)]
    pub width: Option<u32>,

    /// Map height in tiles.
    #[arg(long)]
    pub height: Option<u32>,

    /// Feature size ("zoom"), 5 - 400.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Noise octaves ("detail"), 1 - 6.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Amplitude decay per octave, 0.1 - 1.0.
    #[arg(long)]
    pub persistence: Option<f64>,

    /// Redistribution exponent ("water level"), 0.1 - 4.0.
    #[arg(long)]
    pub exponent: Option<f64>,

    /// Map style: standard, continent, island or coast.
    #[arg(long)]
    pub style: Option<String>,

    /// Map seed.
    #[arg(long, conflicts_with = "randomize_seed")]
    pub seed: Option<String>,

    /// Pick a fresh random seed instead of the configured one.
    #[arg(long)]
    pub randomize_seed: bool,

    /// Print a text preview of the generated map.
    #[arg(long)]
    pub preview: bool,

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
        if let Some(w) = args.width {
            self.map.width = w;
        }
        if let Some(h) = args.height {
            self.map.height = h;
        }
        if let Some(scale) = args.scale {
            self.terrain.scale = scale;
        }
        if let Some(octaves) = args.octaves {
            self.terrain.octaves = octaves;
        }
        if let Some(persistence) = args.persistence {
            self.terrain.persistence = persistence;
        }
        if let Some(exponent) = args.exponent {
            self.terrain.exponent = exponent;
        }
        if let Some(ref style) = args.style {
            self.terrain.style = style.clone();
        }
        if let Some(ref seed) = args.seed {
            self.terrain.seed = seed.clone();
        }
        if args.preview {
            self.debug.preview = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
