//! # Block Type Module
//!
//! This module defines the data describing one kind of block: its name, whether
//! it occludes neighbouring faces, and which atlas tile each of its faces uses.

use serde::{Deserialize, Serialize};

use super::block_side::BlockSide;

/// Definition of a single block kind in the [`BlockRegistry`](super::BlockRegistry).
///
/// Block types are plain data so that a registry can be authored in a config
/// file. Face textures are linear indices into the texture atlas, stored in
/// [`BlockSide`] order: back, front, top, bottom, left, right.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockType {
    /// Human readable name, used in logs and validation errors.
    pub name: String,

    /// Whether the block is opaque. Faces adjacent to a solid block are culled.
    pub is_solid: bool,

    /// Atlas tile index for each face, in [`BlockSide`] order.
    pub face_textures: [u32; 6],
}

impl BlockType {
    /// Creates a block type that uses the same atlas tile on every face.
    pub fn uniform(name: &str, is_solid: bool, texture: u32) -> Self {
        BlockType {
            name: name.to_string(),
            is_solid,
            face_textures: [texture; 6],
        }
    }

    /// Creates a block type with a distinct tile for each face.
    pub fn with_faces(name: &str, is_solid: bool, face_textures: [u32; 6]) -> Self {
        BlockType {
            name: name.to_string(),
            is_solid,
            face_textures,
        }
    }

    /// Gets the atlas tile index for one face of the block.
    pub fn texture_id(&self, side: BlockSide) -> u32 {
        self.face_textures[side as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_id_follows_face_order() {
        let grass = BlockType::with_faces("Grass", true, [2, 3, 7, 1, 4, 5]);

        assert_eq!(grass.texture_id(BlockSide::BACK), 2);
        assert_eq!(grass.texture_id(BlockSide::FRONT), 3);
        assert_eq!(grass.texture_id(BlockSide::TOP), 7);
        assert_eq!(grass.texture_id(BlockSide::BOTTOM), 1);
        assert_eq!(grass.texture_id(BlockSide::LEFT), 4);
        assert_eq!(grass.texture_id(BlockSide::RIGHT), 5);
    }
}
