//! Elevation → biome classification using a single water level.
//!
//! Below [`WATER_LEVEL`] the normalized depth is split into five water
//! tiers, from the sandy coast line down to the abyss. Above it the land
//! height is split into two tiers.

use serde::{Deserialize, Serialize};

/// Elevation separating water from land.
pub const WATER_LEVEL: f64 = 0.5;

/// Number of water tiers below [`WATER_LEVEL`].
pub const WATER_TIERS: usize = 5;

/// Land height at which lowland turns into highland.
pub const HIGHLAND_THRESHOLD: f64 = 0.5;

/// An RGB display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pack into `0xRRGGBB`.
    pub fn to_hex(self) -> u32 {
        (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }
}

/// Discrete terrain classification of a single tile.
///
/// Discriminants are stable tile ids: `0..=4` are water tiers ordered from
/// shallowest to deepest, `5..=6` are land tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Biome {
    Coast = 0,
    Shallows = 1,
    Sea = 2,
    DeepSea = 3,
    Abyss = 4,
    Lowland = 5,
    Highland = 6,
}

const WATER: [Biome; WATER_TIERS] = [
    Biome::Coast,
    Biome::Shallows,
    Biome::Sea,
    Biome::DeepSea,
    Biome::Abyss,
];

// Indexed by tile id.
const COLORS: [Rgb; 7] = [
    Rgb(226, 211, 150), // sand
    Rgb(86, 166, 204),
    Rgb(48, 118, 182),
    Rgb(28, 74, 140),
    Rgb(12, 36, 88),
    Rgb(112, 180, 76),
    Rgb(48, 118, 52),
];

impl Biome {
    /// Every biome, ordered by tile id.
    pub const ALL: [Biome; 7] = [
        Biome::Coast,
        Biome::Shallows,
        Biome::Sea,
        Biome::DeepSea,
        Biome::Abyss,
        Biome::Lowland,
        Biome::Highland,
    ];

    /// Stable tile id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a biome by tile id.
    pub fn from_id(id: u8) -> Option<Biome> {
        Biome::ALL.get(id as usize).copied()
    }

    /// Display color used for tiles and the minimap.
    pub fn color(self) -> Rgb {
        COLORS[self as usize]
    }

    /// Whether the tile lies below the water level.
    pub fn is_water(self) -> bool {
        (self as usize) < WATER_TIERS
    }

    /// Water tier index (0 = coast, 4 = abyss), `None` for land.
    pub fn water_tier(self) -> Option<usize> {
        self.is_water().then_some(self as usize)
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Coast => "coast",
            Biome::Shallows => "shallows",
            Biome::Sea => "sea",
            Biome::DeepSea => "deep sea",
            Biome::Abyss => "abyss",
            Biome::Lowland => "lowland",
            Biome::Highland => "highland",
        }
    }

    /// Single-character symbol for text previews.
    pub fn glyph(self) -> char {
        match self {
            Biome::Coast => '.',
            Biome::Shallows => '~',
            Biome::Sea => '-',
            Biome::DeepSea => '=',
            Biome::Abyss => '#',
            Biome::Lowland => '"',
            Biome::Highland => '^',
        }
    }
}

/// Classify a normalized elevation.
///
/// Out-of-range input is clamped to `[0, 1]` first.
pub fn classify(elevation: f64) -> Biome {
    let e = elevation.clamp(0.0, 1.0);

    if e < WATER_LEVEL {
        let depth = 1.0 - e / WATER_LEVEL;
        // depth == 1.0 at e == 0 lands on WATER_TIERS; clamp to the last tier.
        let tier = ((depth * WATER_TIERS as f64) as usize).min(WATER_TIERS - 1);
        WATER[tier]
    } else {
        let land = (e - WATER_LEVEL) / (1.0 - WATER_LEVEL);
        if land < HIGHLAND_THRESHOLD {
            Biome::Lowland
        } else {
            Biome::Highland
        }
    }
}
