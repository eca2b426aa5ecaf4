//! The `strata` binary: generate one map and print a summary.

use std::process::ExitCode;

use clap::Parser;
use strata_app::{AppError, format_summary, load_config, run_generation, terrain_settings};
use strata_config::{CliArgs, Config};
use strata_terrain::SeedValue;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Logging is not up yet, so config failures go straight to stderr.
    let (config_dir, config) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("strata: {e}");
            return ExitCode::FAILURE;
        }
    };

    strata_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );
    tracing::debug!(config_dir = %config_dir.display(), "Configuration loaded");

    match run(&config, args.randomize_seed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, randomize_seed: bool) -> Result<(), AppError> {
    let seed_override = randomize_seed.then(SeedValue::random);
    let settings = terrain_settings(&config.terrain, seed_override)?;

    let map = run_generation(config.map.width, config.map.height, settings)?;
    tracing::info!(
        elapsed_us = map.generation_time_us,
        land = map.grid.land_fraction(),
        "Generation finished"
    );

    print!(
        "{}",
        format_summary(&map.grid, &map.settings, map.generation_time_us)
    );
    if config.debug.preview {
        println!();
        print!("{}", map.grid.ascii_preview(config.debug.preview_columns));
    }
    Ok(())
}
