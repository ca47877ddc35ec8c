//! # Terrain Module
//!
//! Decides which block occupies every voxel of the world. Generation is a pure
//! function of the seed, the biome and the voxel position, which lets chunks be
//! built in any order (or in parallel) and lets the mesher re-derive a
//! neighbouring chunk's border voxels without that chunk existing.
//!
//! ## Column Layout
//!
//! For each column the terrain height is
//! `floor(terrain_height * noise2d(x, z)) + solid_ground_height`, and from the
//! bottom up the column holds:
//!
//! * bedrock at `y == 0`
//! * stone (possibly replaced by lodes) up to four blocks below the surface
//! * dirt for the next three blocks
//! * grass at the terrain height
//! * air above

use cgmath::Point3;
use log::debug;

use self::noise::TerrainNoise;
use super::block::{BlockId, AIR, BEDROCK, DIRT, GRASS, STONE};
use super::voxel_data::{CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::config::BiomeConfig;

pub mod noise;

/// Depth, below the surface block, at which stone begins.
const SUBSURFACE_DEPTH: i32 = 4;

/// Anything that can answer "which block is at this world position".
///
/// Chunks are populated from a `VoxelSource`, and consult it again for faces on
/// the chunk border whose neighbour lies in another chunk.
pub trait VoxelSource {
    /// Returns the block id at a world-space voxel position.
    /// Positions outside the world are air.
    fn get_voxel(&self, position: Point3<i32>) -> BlockId;
}

/// Seeded terrain generator for a bounded world.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    seed: u32,
    noise: TerrainNoise,
    biome: BiomeConfig,
    world_size_in_voxels: i32,
}

impl TerrainGenerator {
    /// Creates a generator for a world `world_size_in_chunks` chunks across.
    pub fn new(seed: u32, biome: BiomeConfig, world_size_in_chunks: i32) -> Self {
        debug!(
            "Terrain generator for biome `{}` with seed {} ({} lodes)",
            biome.name,
            seed,
            biome.lodes.len()
        );
        TerrainGenerator {
            seed,
            noise: TerrainNoise::new(seed),
            biome,
            world_size_in_voxels: world_size_in_chunks * CHUNK_WIDTH as i32,
        }
    }

    /// The seed all noise is derived from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The biome driving generation.
    pub fn biome(&self) -> &BiomeConfig {
        &self.biome
    }

    /// World extent in voxels along x and z.
    pub fn world_size_in_voxels(&self) -> i32 {
        self.world_size_in_voxels
    }

    /// Whether a voxel position lies inside the world:
    /// `0 <= x, z < world size` and `0 <= y < chunk height`.
    pub fn is_voxel_in_world(&self, position: Point3<i32>) -> bool {
        (0..self.world_size_in_voxels).contains(&position.x)
            && (0..CHUNK_HEIGHT as i32).contains(&position.y)
            && (0..self.world_size_in_voxels).contains(&position.z)
    }

    /// Height of the surface block in the column at `(x, z)`.
    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        let noise = self
            .noise
            .get_2d(x as f32, z as f32, 0.0, self.biome.terrain_scale);
        (self.biome.terrain_height * noise).floor() as i32 + self.biome.solid_ground_height
    }

    /// Computes the block at a world-space voxel position.
    pub fn get_voxel(&self, position: Point3<i32>) -> BlockId {
        if !self.is_voxel_in_world(position) {
            return AIR;
        }

        let y = position.y;
        if y == 0 {
            return BEDROCK;
        }

        let terrain_height = self.terrain_height(position.x, position.z);

        if y == terrain_height {
            GRASS
        } else if y < terrain_height && y > terrain_height - SUBSURFACE_DEPTH {
            DIRT
        } else if y > terrain_height {
            AIR
        } else {
            self.apply_lodes(position, STONE)
        }
    }

    /// Runs the biome's lode rules over a stone voxel. Every matching rule
    /// overwrites the result, so the last match wins.
    fn apply_lodes(&self, position: Point3<i32>, base: BlockId) -> BlockId {
        let sample_position = Point3::new(position.x as f32, position.y as f32, position.z as f32);
        let mut block = base;

        for lode in &self.biome.lodes {
            if position.y > lode.min_height
                && position.y < lode.max_height
                && self
                    .noise
                    .get_3d(sample_position, lode.noise_offset, lode.scale, lode.threshold)
            {
                block = lode.block_id;
            }
        }

        block
    }
}

impl VoxelSource for TerrainGenerator {
    fn get_voxel(&self, position: Point3<i32>) -> BlockId {
        TerrainGenerator::get_voxel(self, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LodeRule;
    use crate::engine_state::voxels::block::SAND;

    const WORLD_SIZE_IN_CHUNKS: i32 = 4;

    fn lode(name: &str, block_id: BlockId, threshold: f32) -> LodeRule {
        LodeRule {
            name: name.to_string(),
            block_id,
            min_height: 0,
            max_height: 64,
            scale: 0.1,
            threshold,
            noise_offset: 0.0,
        }
    }

    #[test]
    fn flat_biome_column() {
        let generator = TerrainGenerator::new(42, BiomeConfig::flat(4), WORLD_SIZE_IN_CHUNKS);

        assert_eq!(generator.get_voxel(Point3::new(5, 0, 5)), BEDROCK);
        for y in 1..=3 {
            assert_eq!(generator.get_voxel(Point3::new(5, y, 5)), DIRT, "y = {y}");
        }
        assert_eq!(generator.get_voxel(Point3::new(5, 4, 5)), GRASS);
        assert_eq!(generator.get_voxel(Point3::new(5, 5, 5)), AIR);
    }

    #[test]
    fn stone_below_the_dirt_layer() {
        let generator = TerrainGenerator::new(1, BiomeConfig::flat(10), WORLD_SIZE_IN_CHUNKS);

        assert_eq!(generator.get_voxel(Point3::new(3, 6, 3)), STONE);
        assert_eq!(generator.get_voxel(Point3::new(3, 7, 3)), DIRT);
        assert_eq!(generator.get_voxel(Point3::new(3, 10, 3)), GRASS);
    }

    #[test]
    fn bedrock_everywhere_at_the_bottom() {
        let generator = TerrainGenerator::new(99, BiomeConfig::default(), WORLD_SIZE_IN_CHUNKS);
        let size = generator.world_size_in_voxels();

        for x in (0..size).step_by(5) {
            for z in (0..size).step_by(5) {
                assert_eq!(generator.get_voxel(Point3::new(x, 0, z)), BEDROCK);
            }
        }
    }

    #[test]
    fn outside_the_world_is_air() {
        let generator = TerrainGenerator::new(42, BiomeConfig::flat(4), WORLD_SIZE_IN_CHUNKS);
        let size = generator.world_size_in_voxels();

        assert_eq!(generator.get_voxel(Point3::new(-1, 0, 5)), AIR);
        assert_eq!(generator.get_voxel(Point3::new(5, 0, -1)), AIR);
        assert_eq!(generator.get_voxel(Point3::new(size, 0, 5)), AIR);
        assert_eq!(generator.get_voxel(Point3::new(5, 0, size)), AIR);
        assert_eq!(generator.get_voxel(Point3::new(5, -1, 5)), AIR);
        assert_eq!(generator.get_voxel(Point3::new(5, CHUNK_HEIGHT as i32, 5)), AIR);
        assert_eq!(generator.get_voxel(Point3::new(size - 1, 0, size - 1)), BEDROCK);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = TerrainGenerator::new(1234, BiomeConfig::default(), WORLD_SIZE_IN_CHUNKS);
        let b = TerrainGenerator::new(1234, BiomeConfig::default(), WORLD_SIZE_IN_CHUNKS);
        let mut rng = fastrand::Rng::with_seed(1234);

        for _ in 0..2_000 {
            let position = Point3::new(
                rng.i32(0..a.world_size_in_voxels()),
                rng.i32(0..CHUNK_HEIGHT as i32),
                rng.i32(0..a.world_size_in_voxels()),
            );
            let first = a.get_voxel(position);
            assert_eq!(first, a.get_voxel(position));
            assert_eq!(first, b.get_voxel(position));
        }
    }

    #[test]
    fn default_biome_golden_values() {
        let generator = TerrainGenerator::new(1234, BiomeConfig::default(), WORLD_SIZE_IN_CHUNKS);
        assert_eq!(generator.seed(), 1234);

        assert_eq!(generator.terrain_height(5, 7), 39);
        assert_eq!(generator.terrain_height(60, 60), 34);
        assert_eq!(generator.terrain_height(41, 12), 67);

        let expected = [
            ((5, 39, 7), GRASS),
            ((5, 40, 7), AIR),
            ((5, 37, 7), DIRT),
            ((5, 13, 7), AIR),
            ((60, 4, 60), STONE),
            ((60, 15, 60), AIR),
            ((60, 28, 60), DIRT),
            ((41, 67, 12), GRASS),
            ((41, 31, 12), SAND),
            ((41, 56, 12), SAND),
        ];
        for ((x, y, z), block) in expected {
            assert_eq!(generator.get_voxel(Point3::new(x, y, z)), block, "({x}, {y}, {z})");
        }
    }

    #[test]
    fn last_matching_lode_wins() {
        let mut biome = BiomeConfig::flat(40);
        biome.lodes = vec![lode("Sand", 4, -1.0), lode("Dirt", DIRT, -1.0)];
        let generator = TerrainGenerator::new(5, biome, WORLD_SIZE_IN_CHUNKS);

        assert_eq!(generator.get_voxel(Point3::new(8, 20, 8)), DIRT);
    }

    #[test]
    fn lodes_respect_their_height_band() {
        let mut biome = BiomeConfig::flat(40);
        let mut sand = lode("Sand", 4, -1.0);
        sand.min_height = 10;
        sand.max_height = 20;
        biome.lodes = vec![sand];
        let generator = TerrainGenerator::new(5, biome, WORLD_SIZE_IN_CHUNKS);

        assert_eq!(generator.get_voxel(Point3::new(8, 10, 8)), STONE);
        assert_eq!(generator.get_voxel(Point3::new(8, 11, 8)), 4);
        assert_eq!(generator.get_voxel(Point3::new(8, 19, 8)), 4);
        assert_eq!(generator.get_voxel(Point3::new(8, 20, 8)), STONE);
    }

    #[test]
    fn lodes_never_touch_surface_layers() {
        let mut biome = BiomeConfig::flat(8);
        biome.lodes = vec![lode("Caves", AIR, -1.0)];
        let generator = TerrainGenerator::new(5, biome, WORLD_SIZE_IN_CHUNKS);

        assert_eq!(generator.get_voxel(Point3::new(2, 0, 2)), BEDROCK);
        assert_eq!(generator.get_voxel(Point3::new(2, 4, 2)), AIR);
        assert_eq!(generator.get_voxel(Point3::new(2, 5, 2)), DIRT);
        assert_eq!(generator.get_voxel(Point3::new(2, 8, 2)), GRASS);
    }

    #[test]
    fn hilly_terrain_varies_but_stays_in_bounds() {
        let generator = TerrainGenerator::new(8, BiomeConfig::default(), WORLD_SIZE_IN_CHUNKS);
        let biome = generator.biome().clone();
        let size = generator.world_size_in_voxels();
        let mut heights = Vec::new();

        for x in (0..size).step_by(3) {
            for z in (0..size).step_by(3) {
                let height = generator.terrain_height(x, z);
                assert!(height >= biome.solid_ground_height - biome.terrain_height as i32 - 1);
                assert!(height <= biome.solid_ground_height + biome.terrain_height as i32);
                heights.push(height);
            }
        }

        let min = heights.iter().min().unwrap();
        let max = heights.iter().max().unwrap();
        assert!(max > min);
    }
}
