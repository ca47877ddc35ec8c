//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask`, which builds one chunk (voxels
//! and mesh) on a worker thread. The streaming pass publishes one task per
//! newly needed chunk coordinate and collects the finished chunks in a
//! [`GeneratedChunks`] batch before inserting them into the world.

use std::sync::Arc;

use log::debug;

use crate::engine_state::task_management::task::{Task, TaskResult};
use crate::engine_state::voxels::block::BlockRegistry;
use crate::engine_state::voxels::chunk::{Chunk, ChunkCoord};
use crate::engine_state::voxels::terrain::TerrainGenerator;

/// Chunks finished by workers and not yet inserted into the world.
pub type GeneratedChunks = Vec<Chunk>;

/// A task that generates a chunk off the world's thread.
///
/// The terrain generator and block registry are immutable, so workers share
/// them through `Arc`s and no locking is needed.
pub struct ChunkGenerationTask {
    /// Answers every voxel query while populating and meshing
    generator: Arc<TerrainGenerator>,
    /// Block solidity and face textures
    registry: Arc<BlockRegistry>,
    /// The position of the chunk to generate (in chunk coordinates)
    coord: ChunkCoord,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `generator` - Shared terrain generator
    /// * `registry` - Shared block registry
    /// * `coord` - The chunk coordinates where the chunk should be generated
    pub fn new(
        generator: Arc<TerrainGenerator>,
        registry: Arc<BlockRegistry>,
        coord: ChunkCoord,
    ) -> Self {
        ChunkGenerationTask {
            generator,
            registry,
            coord,
        }
    }
}

impl Task<GeneratedChunks> for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult<GeneratedChunks> + Send> {
        let chunk = Chunk::new(self.coord, self.generator.as_ref(), &self.registry);
        debug!(
            "Worker generated chunk {} ({} quads)",
            self.coord,
            chunk.mesh().quad_count()
        );

        Box::new(ChunkGenerationTaskResult { chunk })
    }
}

/// The result of a chunk generation task: the finished chunk.
pub struct ChunkGenerationTaskResult {
    chunk: Chunk,
}

impl TaskResult<GeneratedChunks> for ChunkGenerationTaskResult {
    fn handle_result(
        self: Box<Self>,
        generated: &mut GeneratedChunks,
    ) -> Vec<Box<dyn Task<GeneratedChunks> + Send>> {
        generated.push(self.chunk);
        Vec::new()
    }
}
