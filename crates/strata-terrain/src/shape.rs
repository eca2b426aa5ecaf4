//! Large-scale shape modifiers applied on top of fractal elevation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseStyleError;

/// Overall map layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    /// No shaping; noise alone decides land and water.
    #[default]
    Standard,
    /// Broad landmass with gently falling edges.
    Continent,
    /// Single landmass surrounded by water on every edge.
    Island,
    /// Land on the west side, open water on the east.
    Coast,
}

impl MapStyle {
    /// All styles in declaration order.
    pub const ALL: [MapStyle; 4] = [
        MapStyle::Standard,
        MapStyle::Continent,
        MapStyle::Island,
        MapStyle::Coast,
    ];

    /// Lowercase name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            MapStyle::Standard => "standard",
            MapStyle::Continent => "continent",
            MapStyle::Island => "island",
            MapStyle::Coast => "coast",
        }
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MapStyle::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| ParseStyleError(s.to_string()))
    }
}

/// Shape multiplier in `[0, 1]` for cell `(x, y)` of a `width` x `height` grid.
///
/// Positions are taken at cell centres, so single-row or single-column
/// grids are handled without special cases.
pub fn shape(x: f64, y: f64, width: f64, height: f64, style: MapStyle) -> f64 {
    // Centred coordinates in [-1, 1].
    let nx = (x + 0.5) / width * 2.0 - 1.0;
    let ny = (y + 0.5) / height * 2.0 - 1.0;

    let value = match style {
        MapStyle::Standard => return 1.0,
        MapStyle::Continent => {
            // Corners sit at distance 1.
            let d = libm::sqrt(nx * nx + ny * ny) / std::f64::consts::SQRT_2;
            1.0 - d * d * d
        }
        MapStyle::Island => {
            // Edge midpoints sit at distance 1, so all edges drown.
            let d = libm::sqrt(nx * nx + ny * ny).min(1.0);
            1.0 - d * d
        }
        MapStyle::Coast => {
            let t = (nx + 1.0) * 0.5;
            1.0 - smoothstep(0.3, 1.0, t)
        }
    };

    value.clamp(0.0, 1.0)
}

fn smoothstep(edge0: f64, edge1: f64, t: f64) -> f64 {
    let t = ((t - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 64.0;
    const H: f64 = 48.0;

    #[test]
    fn test_standard_is_identity() {
        for x in 0..64 {
            for y in 0..48 {
                assert_eq!(shape(x as f64, y as f64, W, H, MapStyle::Standard), 1.0);
            }
        }
    }

    #[test]
    fn test_all_styles_within_unit_range() {
        for style in MapStyle::ALL {
            for x in 0..64 {
                for y in 0..48 {
                    let s = shape(x as f64, y as f64, W, H, style);
                    assert!((0.0..=1.0).contains(&s), "{style}: {s} out of range");
                }
            }
        }
    }

    #[test]
    fn test_radial_styles_peak_at_centre() {
        for style in [MapStyle::Continent, MapStyle::Island] {
            let centre = shape(31.5, 23.5, W, H, style);
            let corner = shape(0.0, 0.0, W, H, style);
            assert!(centre > 0.99, "{style} centre should be near full strength");
            assert!(corner < centre, "{style} should decay toward corners");
        }
    }

    #[test]
    fn test_island_is_steeper_than_continent() {
        let edge_mid_cont = shape(0.0, 23.5, W, H, MapStyle::Continent);
        let edge_mid_isle = shape(0.0, 23.5, W, H, MapStyle::Island);
        assert!(edge_mid_isle < edge_mid_cont);
        assert!(edge_mid_isle < 0.05, "Island edges should be almost fully drowned");
        assert!(edge_mid_cont > 0.5, "Continent keeps most of the grid above water");
    }

    #[test]
    fn test_coast_gradient_west_to_east() {
        let west = shape(0.0, 10.0, W, H, MapStyle::Coast);
        let east = shape(63.0, 10.0, W, H, MapStyle::Coast);
        assert_eq!(west, 1.0);
        assert!(east < 0.05);
        let mut prev = west;
        for x in 1..64 {
            let s = shape(x as f64, 10.0, W, H, MapStyle::Coast);
            assert!(s <= prev, "Coast gradient must not increase eastward");
            prev = s;
        }
    }

    #[test]
    fn test_single_cell_grid() {
        for style in MapStyle::ALL {
            let s = shape(0.0, 0.0, 1.0, 1.0, style);
            assert!(s.is_finite());
        }
    }

    #[test]
    fn test_style_parse_and_display() {
        assert_eq!("island".parse::<MapStyle>().unwrap(), MapStyle::Island);
        assert_eq!(" Coast ".parse::<MapStyle>().unwrap(), MapStyle::Coast);
        assert!("volcano".parse::<MapStyle>().is_err());
        for style in MapStyle::ALL {
            assert_eq!(style.to_string().parse::<MapStyle>().unwrap(), style);
        }
    }
}
