//! # Configuration
//!
//! World configuration: seed, world extent, view distance, worker count, the
//! biome driving terrain generation and the block registry. Configs are JSON
//! documents; every field is optional and falls back to the stock values.
//!
//! ```json
//! {
//!     "seed": 42,
//!     "view_distance_in_chunks": 6,
//!     "biome": { "terrain_height": 20.0, "solid_ground_height": 30 }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::voxels::block::{
    BlockId, BlockRegistry, AIR, BEDROCK, DIRT, GRASS, SAND, STONE,
};
use crate::engine_state::voxels::voxel_data::{
    CHUNK_WIDTH, VIEW_DISTANCE_IN_CHUNKS, WORLD_SIZE_IN_CHUNKS,
};

/// Errors raised while loading or validating a [`WorldConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for a `WorldConfig`.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// The registry has no block types.
    #[error("block registry is empty")]
    EmptyRegistry,
    /// Block id 0 is solid.
    #[error("block id 0 must be a non-solid air block, found solid block `{0}`")]
    AirNotFirst(String),
    /// More block types than a `BlockId` can address.
    #[error("block registry holds {0} block types, more than a block id can address")]
    TooManyBlocks(usize),
    /// A face texture index lies outside the atlas.
    #[error("block `{block}` face {face} uses texture {texture}, outside the texture atlas")]
    TextureOutOfAtlas {
        /// Name of the offending block type.
        block: String,
        /// Face index in `BlockSide` order.
        face: usize,
        /// The out-of-range tile index.
        texture: u32,
    },
    /// The generator or a lode refers to a block id with no definition.
    #[error("block id {id} used by {context} is not registered")]
    UnregisteredBlock {
        /// The missing id.
        id: BlockId,
        /// What referred to it.
        context: String,
    },
    /// The world has no chunks, or more than voxel and chunk indices can address.
    #[error("world size must be between one and 46340 chunks, got {0}")]
    InvalidWorldSize(i32),
    /// The view window is empty.
    #[error("view distance must be at least one chunk, got {0}")]
    InvalidViewDistance(i32),
}

/// An ore placement rule. Inside its height band, stone is replaced by
/// `block_id` wherever the 3D noise sample exceeds `threshold`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LodeRule {
    /// Name used in logs and validation errors.
    pub name: String,
    /// Block placed where the rule matches.
    pub block_id: BlockId,
    /// Lowest y (exclusive) the rule applies to.
    pub min_height: i32,
    /// Highest y (exclusive) the rule applies to.
    pub max_height: i32,
    /// Frequency of the 3D noise.
    pub scale: f32,
    /// Noise samples (in `[0, 1]`) above this value place the block.
    pub threshold: f32,
    /// Offset into noise space, so rules with equal scale still differ.
    pub noise_offset: f32,
}

/// Parameters of the terrain shape and ore placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// Name used in logs.
    pub name: String,
    /// Amplitude applied to the 2D height noise.
    pub terrain_height: f32,
    /// Frequency of the 2D height noise.
    pub terrain_scale: f32,
    /// Height added to every column; the terrain height when the noise is zero.
    pub solid_ground_height: i32,
    /// Ore rules, evaluated in order. Later matches overwrite earlier ones.
    pub lodes: Vec<LodeRule>,
}

impl BiomeConfig {
    /// A biome without height variation or lodes: grass at
    /// `solid_ground_height`, dirt below it, stone further down.
    pub fn flat(solid_ground_height: i32) -> Self {
        BiomeConfig {
            name: "Flat".to_string(),
            terrain_height: 0.0,
            terrain_scale: 0.25,
            solid_ground_height,
            lodes: Vec::new(),
        }
    }
}

impl Default for BiomeConfig {
    fn default() -> Self {
        BiomeConfig {
            name: "Default".to_string(),
            terrain_height: 42.0,
            terrain_scale: 0.25,
            solid_ground_height: 42,
            lodes: vec![
                LodeRule {
                    name: "Dirt".to_string(),
                    block_id: DIRT,
                    min_height: 1,
                    max_height: 255,
                    scale: 0.1,
                    threshold: 0.5,
                    noise_offset: 0.0,
                },
                LodeRule {
                    name: "Sand".to_string(),
                    block_id: SAND,
                    min_height: 30,
                    max_height: 60,
                    scale: 0.2,
                    threshold: 0.6,
                    noise_offset: 500.0,
                },
                LodeRule {
                    name: "Caves".to_string(),
                    block_id: AIR,
                    min_height: 5,
                    max_height: 60,
                    scale: 0.1,
                    threshold: 0.55,
                    noise_offset: 43.0,
                },
            ],
        }
    }
}

/// Everything needed to build a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for all terrain noise.
    pub seed: u32,
    /// Number of chunks along each horizontal axis.
    pub world_size_in_chunks: i32,
    /// Radius, in chunks, of the square window kept generated and active.
    pub view_distance_in_chunks: i32,
    /// Threads used to build chunks. `0` builds them on the calling thread.
    pub worker_threads: usize,
    /// Terrain shape and ore placement.
    pub biome: BiomeConfig,
    /// Block definitions, indexed by block id.
    pub blocks: BlockRegistry,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0,
            world_size_in_chunks: WORLD_SIZE_IN_CHUNKS,
            view_distance_in_chunks: VIEW_DISTANCE_IN_CHUNKS,
            worker_threads: 0,
            biome: BiomeConfig::default(),
            blocks: BlockRegistry::default(),
        }
    }
}

impl WorldConfig {
    /// Loads and validates a config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: WorldConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// World extent in voxels along each horizontal axis.
    pub fn world_size_in_voxels(&self) -> i32 {
        self.world_size_in_chunks * CHUNK_WIDTH as i32
    }

    /// Checks that the config can drive a world: valid sizes, a valid
    /// registry, and a registered block for every id the generator can emit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.world_size_in_chunks;
        let addressable = size
            .checked_mul(CHUNK_WIDTH as i32)
            .and(size.checked_mul(size))
            .is_some();
        if size < 1 || !addressable {
            return Err(ConfigError::InvalidWorldSize(self.world_size_in_chunks));
        }
        if self.view_distance_in_chunks < 1 {
            return Err(ConfigError::InvalidViewDistance(self.view_distance_in_chunks));
        }

        self.blocks.validate()?;

        let generator_blocks = [
            (BEDROCK, "bedrock layer"),
            (STONE, "base terrain"),
            (DIRT, "subsurface terrain"),
            (GRASS, "surface terrain"),
        ];
        for (id, context) in generator_blocks {
            if !self.blocks.contains(id) {
                return Err(ConfigError::UnregisteredBlock {
                    id,
                    context: context.to_string(),
                });
            }
        }

        for lode in &self.biome.lodes {
            if !self.blocks.contains(lode.block_id) {
                return Err(ConfigError::UnregisteredBlock {
                    id: lode.block_id,
                    context: format!("lode `{}`", lode.name),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn default_config_is_valid() {
        let config = WorldConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.world_size_in_chunks, 32);
        assert_eq!(config.view_distance_in_chunks, 10);
        assert_eq!(config.world_size_in_voxels(), 512);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = WorldConfig::from_json_str(
            r#"{ "seed": 42, "biome": { "terrain_height": 0.0, "solid_ground_height": 4 } }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.view_distance_in_chunks, VIEW_DISTANCE_IN_CHUNKS);
        assert_eq!(config.biome.solid_ground_height, 4);
        assert_eq!(config.biome.terrain_scale, BiomeConfig::default().terrain_scale);
        assert_eq!(config.biome.lodes.len(), 3);
        assert_eq!(config.blocks, BlockRegistry::default());
    }

    #[test]
    fn lode_with_unknown_block_is_rejected() {
        let mut config = WorldConfig::default();
        config.biome.lodes.push(LodeRule {
            name: "Diamonds".to_string(),
            block_id: 77,
            min_height: 1,
            max_height: 12,
            scale: 0.3,
            threshold: 0.8,
            noise_offset: 12.0,
        });

        match config.validate() {
            Err(ConfigError::UnregisteredBlock { id, context }) => {
                assert_eq!(id, 77);
                assert_eq!(context, "lode `Diamonds`");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn registry_missing_generator_blocks_is_rejected() {
        let mut config = WorldConfig::default();
        config.biome = BiomeConfig::flat(4);
        config.blocks = BlockRegistry::new(vec![
            BlockType::uniform("Air", false, 0),
            BlockType::uniform("Bedrock", true, 9),
        ]);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnregisteredBlock { id: STONE, .. })
        ));
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        let mut config = WorldConfig::default();
        config.world_size_in_chunks = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWorldSize(0))));

        let mut config = WorldConfig::default();
        config.view_distance_in_chunks = -3;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidViewDistance(-3))));
    }

    #[test]
    fn oversized_worlds_are_rejected() {
        let mut config = WorldConfig::default();

        // Too many chunk slots for an i32 index.
        config.world_size_in_chunks = 50_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorldSize(50_000))
        ));

        // Too many voxels along an axis.
        config.world_size_in_chunks = i32::MAX / 8;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorldSize(_))
        ));

        // Largest world whose chunk grid is addressable.
        config.world_size_in_chunks = 46_340;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unbounded_view_distance_is_accepted() {
        let mut config = WorldConfig::default();
        config.view_distance_in_chunks = i32::MAX;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            WorldConfig::from_json_str("{ \"seed\": "),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            WorldConfig::load("/definitely/not/here/world.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
