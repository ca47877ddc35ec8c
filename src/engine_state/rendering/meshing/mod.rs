//! Mesh generation for voxel rendering.
//!
//! This module converts chunk voxel data into renderer-friendly buffers using
//! per-face culling: a block face is emitted only when the neighbouring voxel
//! in that direction is not solid.
//!
//! # Architecture
//! - [`ChunkMesh`]: Vertex, triangle and UV buffers for one chunk
//! - [`texture_uv_origin`]: Maps a linear atlas tile index to its UV rectangle
//!
//! The culling pass itself lives on [`Chunk`](crate::Chunk), which owns the
//! voxel grid it walks.

mod mesh;

pub use mesh::{texture_uv_origin, ChunkMesh};
