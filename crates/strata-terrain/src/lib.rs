//! Procedural tile-map generation: seeded fractal noise, map-style shaping,
//! water-level biome classification, and coalescing regeneration.

mod biome;
mod error;
mod grid;
mod heightmap;
mod noise_field;
mod scheduler;
mod seed;
mod settings;
mod shape;

pub use biome::{Biome, HIGHLAND_THRESHOLD, Rgb, WATER_LEVEL, WATER_TIERS, classify};
pub use error::{GenerationError, ParseStyleError};
pub use grid::{TerrainGrid, generate, shaped_elevation};
pub use heightmap::{ElevationParams, ElevationSampler, LACUNARITY};
pub use noise_field::NoiseField;
pub use scheduler::{
    GenerationOutcome, GenerationRequest, RegenerationScheduler, RequestId, SchedulerState,
};
pub use seed::{RANDOM_SEED_LEN, SeedValue, random_seed};
pub use settings::{
    EXPONENT_RANGE, OCTAVES_RANGE, PERSISTENCE_RANGE, SCALE_RANGE, TerrainSettings,
};
pub use shape::{MapStyle, shape};
