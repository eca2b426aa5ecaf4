//! Configuration for the strata map generator.
//!
//! Settings persist to disk as a RON file, fill in missing fields with
//! defaults, and accept command-line overrides via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, MapConfig, TerrainConfig, default_config_dir};
pub use error::ConfigError;
