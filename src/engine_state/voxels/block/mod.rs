//! # Block Module
//!
//! This module provides the block-related data for the voxel world: block ids,
//! block type definitions, face ordering, and the registry that maps one to
//! the other.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use block_type::BlockType;

use super::voxel_data::TEXTURE_ATLAS_TILE_COUNT;
use crate::config::ConfigError;

pub mod block_side;
pub mod block_type;

/// Identifier of a block kind, an index into the [`BlockRegistry`].
/// `0` is always air.
pub type BlockId = u8;

/// Empty space.
pub const AIR: BlockId = 0;
/// Unbreakable floor placed at `y == 0`.
pub const BEDROCK: BlockId = 1;
/// Base block below the subsurface layer.
pub const STONE: BlockId = 2;
/// Surface block placed at the terrain height.
pub const GRASS: BlockId = 3;
/// Sand pockets placed by the default biome's lodes.
pub const SAND: BlockId = 4;
/// Subsurface block between the surface and stone.
pub const DIRT: BlockId = 5;

/// Ordered list of block definitions, indexed by [`BlockId`].
///
/// Lookups with an id that has no definition indicate a mismatch between the
/// terrain generator and the registry. [`BlockRegistry::block`] and indexing
/// treat that as a broken invariant and panic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockRegistry {
    blocks: Vec<BlockType>,
}

impl BlockRegistry {
    /// Creates a registry from an ordered list of block types.
    /// The position of each entry is its [`BlockId`].
    pub fn new(blocks: Vec<BlockType>) -> Self {
        BlockRegistry { blocks }
    }

    /// Looks up a block type, returning `None` for unregistered ids.
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    /// Looks up a block type.
    ///
    /// # Panics
    /// Panics if `id` is not registered.
    pub fn block(&self, id: BlockId) -> &BlockType {
        match self.get(id) {
            Some(block_type) => block_type,
            None => panic!(
                "block id {} is not registered ({} block types known)",
                id,
                self.blocks.len()
            ),
        }
    }

    /// Whether the block with the given id occludes neighbouring faces.
    ///
    /// # Panics
    /// Panics if `id` is not registered.
    #[inline]
    pub fn is_solid(&self, id: BlockId) -> bool {
        self.block(id).is_solid
    }

    /// Whether `id` has a definition.
    pub fn contains(&self, id: BlockId) -> bool {
        (id as usize) < self.blocks.len()
    }

    /// Number of registered block types.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the registry has no block types at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over `(id, block type)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockType)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(id, block_type)| (id as BlockId, block_type))
    }

    /// Checks the registry's own invariants: it is non-empty, fits in the
    /// [`BlockId`] range, id 0 is non-solid, and every face texture is a
    /// valid atlas tile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(air) = self.blocks.first() else {
            return Err(ConfigError::EmptyRegistry);
        };
        if air.is_solid {
            return Err(ConfigError::AirNotFirst(air.name.clone()));
        }
        if self.blocks.len() > BlockId::MAX as usize + 1 {
            return Err(ConfigError::TooManyBlocks(self.blocks.len()));
        }

        for block_type in &self.blocks {
            for (face, texture) in block_type.face_textures.iter().enumerate() {
                if *texture >= TEXTURE_ATLAS_TILE_COUNT {
                    return Err(ConfigError::TextureOutOfAtlas {
                        block: block_type.name.clone(),
                        face,
                        texture: *texture,
                    });
                }
            }
        }

        Ok(())
    }
}

impl Index<BlockId> for BlockRegistry {
    type Output = BlockType;

    fn index(&self, id: BlockId) -> &BlockType {
        self.block(id)
    }
}

impl Default for BlockRegistry {
    /// The stock block set used by the default biome.
    ///
    /// Atlas tiles: 0 stone, 1 dirt, 2 grass side, 7 grass top, 9 bedrock, 10 sand.
    fn default() -> Self {
        BlockRegistry::new(vec![
            BlockType::uniform("Air", false, 0),
            BlockType::uniform("Bedrock", true, 9),
            BlockType::uniform("Stone", true, 0),
            BlockType::with_faces("Grass", true, [2, 2, 7, 1, 2, 2]),
            BlockType::uniform("Sand", true, 10),
            BlockType::uniform("Dirt", true, 1),
        ])
    }
}
