//! Seeded fractal density sampling
//!
//! One pre-configured OpenSimplex2 instance per octave, each offset from the
//! base seed, so a (config, seed) pair always reproduces the same field.

use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::core::config::NoiseConfig;

/// Deterministic density sampler over world coordinates.
///
/// Holds no mutable state after construction; sampling is safe to call from
/// any context.
pub struct NoiseSampler {
    octaves: Vec<FastNoiseLite>,
    scale: f32,
    persistence: f32,
    gravity_bias: f32,
}

impl NoiseSampler {
    pub fn new(config: &NoiseConfig, seed: u32) -> Self {
        let octaves = (0..config.octave_count)
            .map(|i| Self::create_noise(seed.wrapping_add(i)))
            .collect();
        NoiseSampler {
            octaves,
            scale: config.scale,
            persistence: config.persistence,
            gravity_bias: config.gravity_bias,
        }
    }

    fn create_noise(seed: u32) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        noise
    }

    /// Density in [0, 1] at a world position. Values below the configured
    /// iso level read as air, at or above as solid.
    pub fn sample(&self, x: f32, y: f32, z: f32, world_height: f32) -> f32 {
        let mut total = 0.0;
        let mut max_amplitude = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for noise in &self.octaves {
            let fx = x * self.scale * frequency;
            let fy = y * self.scale * frequency;
            let fz = z * self.scale * frequency;

            // Average of the three axis planes stands in for true 3D noise
            // at a fraction of the cost.
            let n = (noise.get_noise_2d(fx, fy)
                + noise.get_noise_2d(fy, fz)
                + noise.get_noise_2d(fx, fz))
                / 3.0;

            total += n * amplitude;
            max_amplitude += amplitude;
            frequency *= 2.0;
            amplitude *= self.persistence;
        }

        let normalized = (total / max_amplitude + 1.0) * 0.5;

        // Vertical bias: solid ceilings toward the top of the world, open
        // floors toward the bottom.
        let bias = (y / world_height - 0.5) * 2.0 * self.gravity_bias;
        (normalized + bias).clamp(0.0, 1.0)
    }
}
