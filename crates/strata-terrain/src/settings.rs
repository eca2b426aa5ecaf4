//! Terrain settings: the full input of one generation call.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::heightmap::ElevationParams;
use crate::seed::SeedValue;
use crate::shape::MapStyle;

/// Range exposed for `scale` on the configuration surface.
pub const SCALE_RANGE: RangeInclusive<f64> = 5.0..=400.0;
/// Range exposed for `octaves` on the configuration surface.
pub const OCTAVES_RANGE: RangeInclusive<u32> = 1..=6;
/// Range exposed for `persistence` on the configuration surface.
pub const PERSISTENCE_RANGE: RangeInclusive<f64> = 0.1..=1.0;
/// Range exposed for `exponent` on the configuration surface.
pub const EXPONENT_RANGE: RangeInclusive<f64> = 0.1..=4.0;

/// Everything besides grid dimensions that determines a generated map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Feature size in cells ("zoom").
    pub scale: f64,
    /// Number of noise octaves ("detail").
    pub octaves: u32,
    /// Amplitude decay between octaves.
    pub persistence: f64,
    /// Redistribution exponent ("water level").
    pub exponent: f64,
    /// Large-scale layout.
    pub style: MapStyle,
    /// Map seed.
    pub seed: SeedValue,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            exponent: 1.0,
            style: MapStyle::Standard,
            seed: SeedValue::default(),
        }
    }
}

impl TerrainSettings {
    /// Reject settings that would make the elevation model degenerate.
    ///
    /// Values outside the configuration-surface ranges but otherwise
    /// well-defined are accepted.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid =
            |msg: String| -> Result<(), GenerationError> { Err(GenerationError::InvalidSettings(msg)) };

        if !self.scale.is_finite() || self.scale <= 0.0 {
            return invalid(format!("scale must be positive, got {}", self.scale));
        }
        if self.octaves == 0 {
            return invalid("octaves must be at least 1".to_string());
        }
        if !self.persistence.is_finite() || self.persistence <= 0.0 || self.persistence > 1.0 {
            return invalid(format!(
                "persistence must be in (0, 1], got {}",
                self.persistence
            ));
        }
        if !self.exponent.is_finite() || self.exponent <= 0.0 {
            return invalid(format!("exponent must be positive, got {}", self.exponent));
        }
        Ok(())
    }

    /// Copy of these settings with every numeric field clamped to the
    /// configuration-surface ranges.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let clamp_f = |v: f64, range: &RangeInclusive<f64>, fallback: f64| {
            if v.is_finite() {
                v.clamp(*range.start(), *range.end())
            } else {
                fallback
            }
        };
        Self {
            scale: clamp_f(self.scale, &SCALE_RANGE, defaults.scale),
            octaves: self
                .octaves
                .clamp(*OCTAVES_RANGE.start(), *OCTAVES_RANGE.end()),
            persistence: clamp_f(self.persistence, &PERSISTENCE_RANGE, defaults.persistence),
            exponent: clamp_f(self.exponent, &EXPONENT_RANGE, defaults.exponent),
            style: self.style,
            seed: self.seed.clone(),
        }
    }

    /// Parameters for the fractal elevation model.
    pub fn elevation_params(&self) -> ElevationParams {
        ElevationParams {
            scale: self.scale,
            octaves: self.octaves,
            persistence: self.persistence,
            exponent: self.exponent,
        }
    }
}
