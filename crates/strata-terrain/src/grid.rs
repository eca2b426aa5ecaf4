//! Whole-grid generation: tile buffer plus minimap color buffer.

use std::time::Instant;

use rayon::prelude::*;

use crate::biome::{Biome, Rgb, classify};
use crate::error::GenerationError;
use crate::heightmap::ElevationSampler;
use crate::noise_field::NoiseField;
use crate::seed::fnv1a;
use crate::settings::TerrainSettings;
use crate::shape::{MapStyle, shape};

/// A fully generated map.
///
/// Both buffers are row-major with exactly `width * height` entries; the
/// cell `(x, y)` lives at index `y * width + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    tiles: Vec<Biome>,
    colors: Vec<Rgb>,
}

impl TerrainGrid {
    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false` for a successfully generated grid.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Row-major tile buffer.
    pub fn tiles(&self) -> &[Biome] {
        &self.tiles
    }

    /// Row-major minimap color buffer, parallel to [`tiles`](Self::tiles).
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Linear index of `(x, y)`, or `None` if outside the grid.
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Tile at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<Biome> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Cell count per biome, indexed by tile id.
    pub fn histogram(&self) -> [usize; Biome::ALL.len()] {
        let mut counts = [0; Biome::ALL.len()];
        for tile in &self.tiles {
            counts[tile.id() as usize] += 1;
        }
        counts
    }

    /// Fraction of cells above the water level.
    pub fn land_fraction(&self) -> f64 {
        let land = self.tiles.iter().filter(|t| !t.is_water()).count();
        land as f64 / self.tiles.len() as f64
    }

    /// FNV-1a digest over the dimensions and both buffers. Stable across
    /// builds, so digests may be stored and compared later.
    pub fn content_hash(&self) -> u64 {
        let dims = self
            .width
            .to_le_bytes()
            .into_iter()
            .chain(self.height.to_le_bytes());
        let tiles = self.tiles.iter().map(|tile| tile.id());
        let colors = self.colors.iter().flat_map(|&Rgb(r, g, b)| [r, g, b]);
        fnv1a(dims.chain(tiles).chain(colors))
    }

    /// Downsampled text rendering, at most `max_columns` characters wide.
    ///
    /// Rows are sampled at twice the column stride to compensate for the
    /// aspect ratio of terminal cells.
    pub fn ascii_preview(&self, max_columns: u32) -> String {
        let stride = self.width.div_ceil(max_columns.max(1)).max(1);
        let mut out = String::new();
        for y in (0..self.height).step_by(stride as usize * 2) {
            for x in (0..self.width).step_by(stride as usize) {
                if let Some(tile) = self.get(x, y) {
                    out.push(tile.glyph());
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Shaped, clamped elevation of cell `(x, y)`.
///
/// This is the exact value the generator classifies.
pub fn shaped_elevation(
    noise: &NoiseField,
    sampler: &ElevationSampler,
    style: MapStyle,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> f64 {
    let (fx, fy) = (x as f64, y as f64);
    let elevation = sampler.sample(noise, fx, fy);
    let multiplier = shape(fx, fy, width as f64, height as f64, style);
    (elevation * multiplier).clamp(0.0, 1.0)
}

/// Generate a `width` x `height` map from `settings`.
///
/// Validation happens before any work starts; a returned grid is always
/// complete. Identical arguments always produce identical grids.
pub fn generate(
    width: u32,
    height: u32,
    settings: &TerrainSettings,
) -> Result<TerrainGrid, GenerationError> {
    let invalid_dims = GenerationError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid_dims);
    }
    let cells = (width as usize)
        .checked_mul(height as usize)
        .ok_or(invalid_dims)?;
    settings.validate()?;

    let start = Instant::now();
    let noise = NoiseField::new(&settings.seed);
    let sampler = ElevationSampler::new(settings.elevation_params());
    let row_len = width as usize;

    let mut tiles = vec![Biome::Abyss; cells];
    let mut colors = vec![Rgb(0, 0, 0); cells];

    // Rows are independent; each depends only on the shared noise field.
    tiles
        .par_chunks_mut(row_len)
        .zip(colors.par_chunks_mut(row_len))
        .enumerate()
        .for_each(|(y, (tile_row, color_row))| {
            for (x, (tile, color)) in tile_row.iter_mut().zip(color_row.iter_mut()).enumerate() {
                let e = shaped_elevation(
                    &noise,
                    &sampler,
                    settings.style,
                    x as u32,
                    y as u32,
                    width,
                    height,
                );
                let biome = classify(e);
                *tile = biome;
                *color = biome.color();
            }
        });

    tracing::debug!(
        width,
        height,
        octaves = settings.octaves,
        style = %settings.style,
        seed = %settings.seed,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Generated terrain grid"
    );

    Ok(TerrainGrid {
        width,
        height,
        tiles,
        colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedValue;

    fn settings(seed: &str) -> TerrainSettings {
        TerrainSettings {
            scale: 20.0,
            octaves: 4,
            persistence: 0.5,
            exponent: 1.0,
            style: MapStyle::Standard,
            seed: SeedValue::from(seed),
        }
    }

    #[test]
    fn test_buffers_cover_grid() {
        for (w, h) in [(1, 1), (1, 9), (9, 1), (17, 5), (64, 40)] {
            let grid = generate(w, h, &settings("cover")).unwrap();
            assert_eq!(grid.len(), (w * h) as usize);
            assert_eq!(grid.colors().len(), grid.tiles().len());
        }
    }

    #[test]
    fn test_colors_match_tiles() {
        let grid = generate(32, 32, &settings("colors")).unwrap();
        for (tile, color) in grid.tiles().iter().zip(grid.colors()) {
            assert_eq!(tile.color(), *color);
        }
    }

    #[test]
    fn test_row_major_layout_matches_sequential_evaluation() {
        let s = settings("layout");
        let (w, h) = (23, 11);
        let grid = generate(w, h, &s).unwrap();

        let noise = NoiseField::new(&s.seed);
        let sampler = ElevationSampler::new(s.elevation_params());
        for y in 0..h {
            for x in 0..w {
                let expected = classify(shaped_elevation(&noise, &sampler, s.style, x, y, w, h));
                assert_eq!(grid.tiles()[(y * w + x) as usize], expected, "Cell ({x}, {y})");
                assert_eq!(grid.get(x, y), Some(expected));
            }
        }
        assert_eq!(grid.get(w, 0), None);
        assert_eq!(grid.get(0, h), None);
    }

    #[test]
    fn test_same_inputs_identical_grids() {
        let a = generate(48, 30, &settings("same")).unwrap();
        let b = generate(48, 30, &settings("same")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_content_hash_is_pinned() {
        let grid = TerrainGrid {
            width: 2,
            height: 1,
            tiles: vec![Biome::Coast, Biome::Highland],
            colors: vec![Biome::Coast.color(), Biome::Highland.color()],
        };
        assert_eq!(grid.content_hash(), 0x8ce5_aa7b_66da_cbc7);
    }

    #[test]
    fn test_different_seeds_different_grids() {
        let a = generate(48, 30, &settings("one")).unwrap();
        let b = generate(48, 30, &settings("two")).unwrap();
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_shaped_elevation_in_unit_range() {
        let noise = NoiseField::new(&SeedValue::Number(8));
        for style in MapStyle::ALL {
            for exponent in [0.1, 1.0, 4.0] {
                let s = TerrainSettings {
                    exponent,
                    style,
                    octaves: 6,
                    persistence: 1.0,
                    ..settings("range")
                };
                let sampler = ElevationSampler::new(s.elevation_params());
                for y in 0..20 {
                    for x in 0..20 {
                        let e = shaped_elevation(&noise, &sampler, style, x, y, 20, 20);
                        assert!((0.0..=1.0).contains(&e), "{style}: {e} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn test_island_edges_are_water() {
        let s = TerrainSettings {
            style: MapStyle::Island,
            ..settings("island")
        };
        let (w, h) = (40, 40);
        let grid = generate(w, h, &s).unwrap();
        for x in 0..w {
            assert!(grid.get(x, 0).unwrap().is_water());
            assert!(grid.get(x, h - 1).unwrap().is_water());
        }
        for y in 0..h {
            assert!(grid.get(0, y).unwrap().is_water());
            assert!(grid.get(w - 1, y).unwrap().is_water());
        }
    }

    #[test]
    fn test_histogram_sums_to_cell_count() {
        let grid = generate(30, 20, &settings("hist")).unwrap();
        assert_eq!(grid.histogram().iter().sum::<usize>(), 600);
        let land = grid.land_fraction();
        assert!((0.0..=1.0).contains(&land));
    }

    #[test]
    fn test_ascii_preview_dimensions() {
        let grid = generate(80, 40, &settings("ascii")).unwrap();
        let preview = grid.ascii_preview(40);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            generate(0, 5, &settings("x")),
            Err(GenerationError::InvalidDimensions { width: 0, height: 5 })
        );
        assert!(matches!(
            generate(5, 0, &settings("x")),
            Err(GenerationError::InvalidDimensions { .. })
        ));
    }
}
