//! # Chunk Iteration Module
//!
//! This module provides an iterator over the solid blocks of a chunk. It walks
//! the set bits of the chunk's `solid_array`, so air is skipped without reading
//! the block array at all.

use bitvec::order::Lsb0;
use bitvec::slice::IterOnes;
use cgmath::Point3;

use crate::engine_state::voxels::block::BlockId;

use super::Chunk;

/// An iterator over all solid blocks in a chunk, in storage order.
///
/// Yields each block's local position together with its id.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Indices of the set bits in the chunk's solid array
    solid_offsets: IterOnes<'a, usize, Lsb0>,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given chunk.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            solid_offsets: chunk_ref.solid_array.iter_ones(),
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.solid_offsets.next()?;
        Some((Chunk::position_of(offset), self.chunk_ref.blocks[offset]))
    }
}
