//! Multi-octave fractal elevation with power-curve redistribution.
//!
//! Composites octaves of a [`NoiseField`], normalizes the sum by the total
//! amplitude, remaps it to `[0, 1]` and raises it to an exponent that acts
//! as the water-level control.

use crate::noise_field::NoiseField;

/// Frequency multiplier between successive octaves.
pub const LACUNARITY: f64 = 2.0;

/// Parameters of the fractal elevation model.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationParams {
    /// Feature size in cells. The first octave samples at `1 / scale`.
    pub scale: f64,
    /// Number of noise octaves to composite (at least 1).
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves, in `(0, 1]`.
    pub persistence: f64,
    /// Redistribution exponent. Values above 1 push elevation toward 0
    /// (more water), values below 1 push it toward 1 (more land).
    pub exponent: f64,
}

impl Default for ElevationParams {
    fn default() -> Self {
        Self {
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            exponent: 1.0,
        }
    }
}

/// Evaluates normalized elevation over a noise field.
#[derive(Clone, Debug)]
pub struct ElevationSampler {
    params: ElevationParams,
    base_frequency: f64,
    max_amplitude: f64,
}

impl ElevationSampler {
    /// Create a sampler. Parameters are expected to be validated already.
    pub fn new(params: ElevationParams) -> Self {
        let mut max_amplitude = 0.0;
        let mut amp = 1.0;
        for _ in 0..params.octaves.max(1) {
            max_amplitude += amp;
            amp *= params.persistence;
        }
        Self {
            base_frequency: 1.0 / params.scale,
            max_amplitude,
            params,
        }
    }

    /// Normalized fractal value in `[0, 1]` before redistribution.
    pub fn raw(&self, noise: &NoiseField, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.base_frequency;
        let mut amplitude = 1.0;

        for _ in 0..self.params.octaves.max(1) {
            total += noise.sample(x * frequency, y * frequency) * amplitude;
            frequency *= LACUNARITY;
            amplitude *= self.params.persistence;
        }

        // The first octave always has amplitude 1, so the divisor is >= 1.
        let normalized = total / self.max_amplitude;
        ((normalized + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Redistributed elevation in `[0, 1]`.
    pub fn sample(&self, noise: &NoiseField, x: f64, y: f64) -> f64 {
        libm::pow(self.raw(noise, x, y), self.params.exponent)
    }

    /// Sum of all octave amplitudes (geometric series).
    pub fn max_amplitude(&self) -> f64 {
        self.max_amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedValue;

    const EPSILON: f64 = 1e-12;

    fn field(seed: u64) -> NoiseField {
        NoiseField::new(&SeedValue::Number(seed))
    }

    #[test]
    fn test_determinism_same_seed_same_coord() {
        let sampler = ElevationSampler::new(ElevationParams::default());
        let a = field(42);
        let b = field(42);
        let h1 = sampler.sample(&a, 100.0, 200.0);
        let h2 = sampler.sample(&b, 100.0, 200.0);
        assert_eq!(h1, h2, "Same seed + same coord must produce identical elevation");
    }

    #[test]
    fn test_elevation_within_unit_range() {
        let noise = field(3);
        for exponent in [0.1, 0.5, 1.0, 2.5, 4.0] {
            let sampler = ElevationSampler::new(ElevationParams {
                exponent,
                octaves: 6,
                persistence: 1.0,
                ..Default::default()
            });
            for x in 0..60 {
                for y in 0..60 {
                    let e = sampler.sample(&noise, x as f64 * 3.0, y as f64 * 3.0);
                    assert!((0.0..=1.0).contains(&e), "Elevation {e} out of range");
                }
            }
        }
    }

    #[test]
    fn test_single_octave_matches_raw_noise() {
        let noise = field(11);
        let scale = 10.0;
        let sampler = ElevationSampler::new(ElevationParams {
            scale,
            octaves: 1,
            persistence: 0.5,
            exponent: 1.0,
        });
        for i in 0..100 {
            let (x, y) = (i as f64, (i * 7 % 13) as f64);
            let expected = (noise.sample(x / scale, y / scale) + 1.0) / 2.0;
            let got = sampler.sample(&noise, x, y);
            assert!(
                (got - expected).abs() < EPSILON,
                "octaves=1 should equal normalized raw noise: {got} vs {expected}"
            );
        }
    }

    #[test]
    fn test_exponent_redistributes() {
        let noise = field(5);
        let base = ElevationSampler::new(ElevationParams::default());
        let steep = ElevationSampler::new(ElevationParams {
            exponent: 3.0,
            ..Default::default()
        });
        let flat = ElevationSampler::new(ElevationParams {
            exponent: 0.3,
            ..Default::default()
        });
        for i in 0..200 {
            let (x, y) = (i as f64 * 1.7, i as f64 * 0.9);
            let e = base.sample(&noise, x, y);
            assert!(steep.sample(&noise, x, y) <= e + EPSILON);
            assert!(flat.sample(&noise, x, y) + EPSILON >= e);
        }
    }

    #[test]
    fn test_max_amplitude_calculation() {
        let sampler = ElevationSampler::new(ElevationParams {
            persistence: 0.5,
            octaves: 4,
            ..Default::default()
        });
        assert!((sampler.max_amplitude() - 1.875).abs() < EPSILON);
    }

    #[test]
    fn test_more_octaves_adds_detail() {
        let noise = field(7);
        let one = ElevationSampler::new(ElevationParams {
            octaves: 1,
            ..Default::default()
        });
        let six = ElevationSampler::new(ElevationParams {
            octaves: 6,
            persistence: 0.8,
            ..Default::default()
        });
        let step = 0.5;
        let (mut d1, mut d6) = (0.0, 0.0);
        for i in 0..1000 {
            let x = i as f64 * step;
            d1 += (one.sample(&noise, x + step, 0.0) - one.sample(&noise, x, 0.0)).abs();
            d6 += (six.sample(&noise, x + step, 0.0) - six.sample(&noise, x, 0.0)).abs();
        }
        assert!(
            d6 > d1,
            "6 octaves should carry more high-frequency detail than 1: {d1} vs {d6}"
        );
    }
}
