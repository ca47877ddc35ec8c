//! # Voxel Engine Core
//!
//! This module contains the voxel world: what a voxel is, how terrain decides
//! which voxel goes where, how voxels are grouped into chunks and meshed, and
//! how chunks are streamed in and out around a moving viewpoint.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block ids, block types and the registry that maps one to the other
//! * **Terrain**: The seeded, deterministic generator answering "which block is at this position"
//! * **Chunk**: A `16 x 128 x 16` column of voxels plus the mesh of its exposed faces
//! * **World**: The chunk grid, the active set and the streaming passes that maintain them
//! * **Tasks**: Chunk generation on the worker pool
//! * **Voxel data**: The cube geometry and atlas tables shared by all of the above
//!
//! ## Data Flow
//!
//! 1. The world decides which chunk coordinates the view window needs
//! 2. Missing chunks are populated from the terrain generator and meshed
//! 3. Chunks entering or leaving the window are shown or hidden
//! 4. A [`StreamingReport`](world::StreamingReport) tells the renderer what changed
//!
//! ## Thread Safety
//!
//! The terrain generator and the block registry are immutable once the world is
//! created, so chunk workers share them freely. Only the world's own thread
//! mutates the chunk grid and the active set.

pub mod block;
pub mod chunk;
pub mod tasks;
pub mod terrain;
pub mod voxel_data;
pub mod world;
