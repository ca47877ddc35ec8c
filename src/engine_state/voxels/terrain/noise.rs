//! Seeded Perlin sampling used by terrain generation.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use crate::engine_state::voxels::voxel_data::CHUNK_WIDTH;

/// Keeps samples off the integer lattice, where Perlin noise is always zero.
const LATTICE_NUDGE: f64 = 0.1;

/// Deterministic 2D and 3D noise derived from a world seed.
#[derive(Clone, Debug)]
pub struct TerrainNoise {
    perlin: Perlin,
}

impl TerrainNoise {
    /// Creates the noise source for a seed.
    pub fn new(seed: u32) -> Self {
        TerrainNoise {
            perlin: Perlin::new(seed),
        }
    }

    /// Samples 2D noise for a world column, in `[-1, 1]`.
    ///
    /// Coordinates are measured in chunk widths before `scale` is applied, so a
    /// scale of 1.0 gives roughly one feature per chunk.
    pub fn get_2d(&self, x: f32, z: f32, offset: f32, scale: f32) -> f32 {
        let sample = |v: f32| {
            (v as f64 + LATTICE_NUDGE) / CHUNK_WIDTH as f64 * scale as f64 + offset as f64
        };
        let value = self.perlin.get([sample(x), sample(z)]);
        value.clamp(-1.0, 1.0) as f32
    }

    /// Samples 3D noise at a world position, remapped to `[0, 1]`, and
    /// reports whether it exceeds `threshold`.
    pub fn get_3d(&self, position: Point3<f32>, offset: f32, scale: f32, threshold: f32) -> bool {
        let sample = |v: f32| (v as f64 + LATTICE_NUDGE) * scale as f64 + offset as f64;
        let value = self
            .perlin
            .get([sample(position.x), sample(position.y), sample(position.z)]);
        let normalized = ((value.clamp(-1.0, 1.0) + 1.0) * 0.5) as f32;
        normalized > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_samples() {
        let a = TerrainNoise::new(42);
        let b = TerrainNoise::new(42);
        let mut rng = fastrand::Rng::with_seed(7);

        for _ in 0..256 {
            let x = rng.f32() * 512.0;
            let z = rng.f32() * 512.0;
            assert_eq!(a.get_2d(x, z, 0.0, 0.25), b.get_2d(x, z, 0.0, 0.25));

            let p = Point3::new(x, rng.f32() * 128.0, z);
            assert_eq!(a.get_3d(p, 43.0, 0.1, 0.55), b.get_3d(p, 43.0, 0.1, 0.55));
        }
    }

    #[test]
    fn samples_stay_in_range() {
        let noise = TerrainNoise::new(3);
        for x in 0..64 {
            for z in 0..64 {
                let value = noise.get_2d(x as f32 * 3.7, z as f32 * 5.1, 0.0, 1.0);
                assert!((-1.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn thresholds_outside_the_range_are_constant() {
        let noise = TerrainNoise::new(9);
        let p = Point3::new(12.0, 30.0, 7.0);

        assert!(noise.get_3d(p, 0.0, 0.1, -0.01));
        assert!(!noise.get_3d(p, 0.0, 0.1, 1.0));
    }
}
