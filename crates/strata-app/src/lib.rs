//! Command-line front end for the strata terrain generator.
//!
//! Turns the on-disk configuration into generator settings, runs one
//! generation through the regeneration scheduler, and formats a summary.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use strata_config::{CliArgs, Config, ConfigError, TerrainConfig, default_config_dir};
use strata_terrain::{
    Biome, GenerationError, GenerationOutcome, MapStyle, ParseStyleError, RegenerationScheduler,
    SeedValue, TerrainGrid, TerrainSettings,
};

/// Upper bound on how long the binary waits for a generation.
pub const GENERATION_WAIT: Duration = Duration::from_secs(600);

/// Failures surfaced by the binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Style(#[from] ParseStyleError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("generation did not finish within {0:?}")]
    Timeout(Duration),
}

/// Resolve the config directory, load (or create) the config there and
/// apply command-line overrides. Returns the directory with the config.
pub fn load_config(args: &CliArgs) -> Result<(PathBuf, Config), AppError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    Ok((config_dir, config))
}

/// Build generator settings from the configuration surface.
///
/// Values outside the documented ranges are clamped, with a warning per
/// changed field. `seed_override` replaces the configured seed.
pub fn terrain_settings(
    config: &TerrainConfig,
    seed_override: Option<SeedValue>,
) -> Result<TerrainSettings, ParseStyleError> {
    let style: MapStyle = config.style.parse()?;
    let requested = TerrainSettings {
        scale: config.scale,
        octaves: config.octaves,
        persistence: config.persistence,
        exponent: config.exponent,
        style,
        seed: seed_override.unwrap_or_else(|| SeedValue::from(config.seed.as_str())),
    };

    let clamped = requested.clamped();
    warn_if_changed("scale", requested.scale, clamped.scale);
    warn_if_changed("octaves", requested.octaves, clamped.octaves);
    warn_if_changed("persistence", requested.persistence, clamped.persistence);
    warn_if_changed("exponent", requested.exponent, clamped.exponent);
    Ok(clamped)
}

fn warn_if_changed<T: PartialEq + std::fmt::Display>(setting: &str, requested: T, used: T) {
    if requested != used {
        tracing::warn!(setting, %requested, %used, "Setting out of range, clamped");
    }
}

/// A successfully generated map with the settings that produced it.
#[derive(Debug)]
pub struct FinishedMap {
    pub grid: TerrainGrid,
    pub settings: TerrainSettings,
    pub generation_time_us: u64,
}

/// Run one generation through the scheduler and wait for its outcome.
pub fn run_generation(
    width: u32,
    height: u32,
    settings: TerrainSettings,
) -> Result<FinishedMap, AppError> {
    let scheduler = RegenerationScheduler::new(width, height)?;
    let id = scheduler.request(settings)?;
    tracing::info!(id = id.0, width, height, "Generation requested");

    let GenerationOutcome {
        settings,
        result,
        generation_time_us,
        ..
    } = scheduler
        .recv_timeout(GENERATION_WAIT)
        .ok_or(AppError::Timeout(GENERATION_WAIT))?;
    Ok(FinishedMap {
        grid: result?,
        settings,
        generation_time_us,
    })
}

/// Human-readable summary of a generated map.
pub fn format_summary(grid: &TerrainGrid, settings: &TerrainSettings, elapsed_us: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}x{} {} map, seed \"{}\" ({:.1} ms)",
        grid.width(),
        grid.height(),
        settings.style,
        settings.seed,
        elapsed_us as f64 / 1000.0
    );
    let _ = writeln!(
        out,
        "scale {} | octaves {} | persistence {} | exponent {}",
        settings.scale, settings.octaves, settings.persistence, settings.exponent
    );

    let total = grid.len() as f64;
    for (biome, count) in Biome::ALL.iter().zip(grid.histogram()) {
        let _ = writeln!(
            out,
            "  {} {:<9} {:>8} {:>6.2}%",
            biome.glyph(),
            biome.name(),
            count,
            count as f64 / total * 100.0
        );
    }
    let _ = writeln!(out, "land {:.1}%", grid.land_fraction() * 100.0);
    out
}
