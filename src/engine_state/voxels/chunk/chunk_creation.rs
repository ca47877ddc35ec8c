//! # Chunk Creation Module
//!
//! This module provides a builder that fills a chunk's voxel grid one block at a
//! time while keeping the dense block array and the solidity bit vector in step.
//!
//! Blocks are pushed in storage order (`x`, then `y`, then `z` innermost), so the
//! n-th pushed block lands at index n of both arrays.

use bitvec::vec::BitVec;
use cgmath::Point3;

use crate::engine_state::rendering::meshing::ChunkMesh;
use crate::engine_state::voxels::block::BlockId;
use crate::engine_state::voxels::voxel_data::{CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH};

use super::{Chunk, ChunkCoord};

/// A builder for populating a chunk's voxel grid.
///
/// This struct maintains the relationship between:
/// 1. The dense block id array (`blocks`)
/// 2. The bit vector tracking solid blocks (`solid_array`)
pub struct ChunkCreationIterator {
    /// The chunk coordinate of the chunk being created
    coord: ChunkCoord,
    /// Block ids pushed so far, in storage order
    blocks: Vec<BlockId>,
    /// One bit per pushed block: whether it is solid
    solid_array: BitVec,
    /// Local position the next pushed block will occupy
    local_x: usize,
    local_y: usize,
    local_z: usize,
}

impl ChunkCreationIterator {
    /// Creates a new builder for the chunk at `coord`.
    pub fn new(coord: ChunkCoord) -> Self {
        ChunkCreationIterator {
            coord,
            blocks: Vec::with_capacity(CHUNK_VOLUME),
            solid_array: BitVec::with_capacity(CHUNK_VOLUME),
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// Local position the next pushed block will occupy, or `None` once the
    /// grid is full.
    pub fn next_position(&self) -> Option<Point3<usize>> {
        if self.is_complete() {
            return None;
        }
        Some(Point3::new(self.local_x, self.local_y, self.local_z))
    }

    /// Whether every voxel of the chunk has been pushed.
    pub fn is_complete(&self) -> bool {
        self.blocks.len() == CHUNK_VOLUME
    }

    /// Adds a block at the current position and advances the position.
    ///
    /// # Panics
    /// Panics if the grid is already full.
    pub fn push_block(&mut self, block_id: BlockId, is_solid: bool) {
        assert!(!self.is_complete(), "chunk {} is already fully populated", self.coord);

        self.blocks.push(block_id);
        self.solid_array.push(is_solid);

        // Move to the next position
        self.local_z += 1;

        // Handle end of row (Z boundary)
        if self.local_z == CHUNK_WIDTH {
            self.local_z = 0;
            self.local_y += 1;

            // Handle end of column (Y boundary)
            if self.local_y == CHUNK_HEIGHT {
                self.local_y = 0;
                self.local_x += 1;
            }
        }
    }

    /// Finalizes the grid and returns an active chunk with an empty mesh.
    ///
    /// # Panics
    /// Panics if the grid has not been fully populated.
    pub fn return_chunk(self) -> Chunk {
        assert!(
            self.is_complete(),
            "chunk {} populated with {} of {} blocks",
            self.coord,
            self.blocks.len(),
            CHUNK_VOLUME
        );

        Chunk {
            coord: self.coord,
            blocks: self.blocks,
            solid_array: self.solid_array,
            mesh: ChunkMesh::new(),
            is_active: true,
        }
    }
}
