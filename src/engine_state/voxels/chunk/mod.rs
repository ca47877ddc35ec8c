//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a `16 x 128 x 16` column of voxels
//! together with the mesh of its exposed faces.
//!
//! ## Storage
//!
//! Every chunk keeps two parallel views of its voxels:
//! - `blocks`: one block id per voxel, dense, indexed by [`Chunk::index`]
//! - `solid_array`: a bit vector (1 bit per voxel) mirroring the solidity of `blocks`
//!
//! The bit vector answers the mesher's neighbour checks without touching the
//! block registry, and lets the mesher walk solid voxels only (see
//! [`ChunkBlockIterator`](chunk_iteration::ChunkBlockIterator)).
//!
//! ## Meshing
//!
//! For every solid voxel and every face, the face is emitted unless the
//! neighbouring voxel is solid. Neighbours inside the chunk are read from the
//! chunk itself; neighbours in another chunk are re-derived from the
//! [`VoxelSource`] the chunk was built from, so a chunk never needs its
//! neighbours to exist. Positions outside the world are air, which exposes the
//! outer faces of the world's edge chunks.

use std::fmt;

use bitvec::prelude::BitVec;
use cgmath::{Point3, Vector3};
use log::trace;

use chunk_creation::ChunkCreationIterator;
use chunk_iteration::ChunkBlockIterator;

use super::block::block_side::BlockSide;
use super::block::{BlockId, BlockRegistry};
use super::terrain::VoxelSource;
use super::voxel_data::{CHUNK_HEIGHT, CHUNK_SLICE_SIZE, CHUNK_WIDTH};
use crate::engine_state::rendering::meshing::ChunkMesh;

mod chunk_creation;
pub mod chunk_iteration;

/// Horizontal position of a chunk, in chunks.
///
/// The chunk at `(x, z)` covers world voxels `x*16 .. x*16+16` and
/// `z*16 .. z*16+16` over the full world height.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk index along the world X axis
    pub x: i32,
    /// Chunk index along the world Z axis
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// Returns the coordinate of the chunk containing a world-space position.
    pub fn from_world_position(position: Point3<f32>) -> Self {
        let width = CHUNK_WIDTH as f32;
        ChunkCoord {
            x: (position.x / width).floor() as i32,
            z: (position.z / width).floor() as i32,
        }
    }

    /// World-space voxel position of the chunk's minimum corner.
    pub fn world_origin(&self) -> Point3<i32> {
        let width = CHUNK_WIDTH as i32;
        Point3::new(self.x * width, 0, self.z * width)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A column of voxels and the mesh of its visible faces.
///
/// Chunks are built once and never regenerated. Deactivating a chunk only
/// clears its `is_active` flag; its voxels and mesh stay in memory so the chunk
/// can be shown again without rebuilding.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates.
    coord: ChunkCoord,

    /// One block id per voxel, laid out by [`Chunk::index`].
    blocks: Vec<BlockId>,

    /// A bit vector where each bit represents whether the corresponding block is solid (1) or air (0).
    ///
    /// Shares its layout with `blocks`.
    solid_array: BitVec,

    /// Exposed faces of the solid voxels, in chunk-local coordinates.
    mesh: ChunkMesh,

    /// Whether the chunk is inside the current view window.
    is_active: bool,
}

impl Chunk {
    /// Builds the chunk at `coord`: populates every voxel from `source`, then
    /// meshes the solid ones.
    ///
    /// # Arguments
    /// * `coord` - The chunk coordinates of the new chunk
    /// * `source` - Provides the block id of every world voxel
    /// * `registry` - Resolves block ids to solidity and face textures
    ///
    /// # Returns
    /// An active chunk with its mesh built.
    ///
    /// # Panics
    /// Panics if `source` yields a block id missing from `registry`.
    pub fn new<S: VoxelSource + ?Sized>(
        coord: ChunkCoord,
        source: &S,
        registry: &BlockRegistry,
    ) -> Self {
        let mut chunk = Self::populate(coord, source, registry);
        chunk.mesh = chunk.create_mesh_data(source, registry);

        trace!(
            "Built chunk {} with {} quads",
            chunk.coord,
            chunk.mesh.quad_count()
        );
        chunk
    }

    /// Fills the voxel grid from `source` in storage order.
    fn populate<S: VoxelSource + ?Sized>(
        coord: ChunkCoord,
        source: &S,
        registry: &BlockRegistry,
    ) -> Self {
        let origin = coord.world_origin();
        let mut cci = ChunkCreationIterator::new(coord);

        while let Some(local) = cci.next_position() {
            let world_position =
                origin + Vector3::new(local.x as i32, local.y as i32, local.z as i32);
            let block_id = source.get_voxel(world_position);
            cci.push_block(block_id, registry.block(block_id).is_solid);
        }

        cci.return_chunk()
    }

    /// Returns the flat storage index of a chunk-local position.
    ///
    /// Layout is `x` outermost, then `y`, then `z`.
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        x * CHUNK_SLICE_SIZE + y * CHUNK_WIDTH + z
    }

    /// Inverse of [`Chunk::index`].
    pub fn position_of(index: usize) -> Point3<usize> {
        let x = index / CHUNK_SLICE_SIZE;
        let rest = index % CHUNK_SLICE_SIZE;
        Point3::new(x, rest / CHUNK_WIDTH, rest % CHUNK_WIDTH)
    }

    /// Whether a chunk-local position lies inside the chunk.
    pub fn is_voxel_in_chunk(local: Point3<i32>) -> bool {
        let width = CHUNK_WIDTH as i32;
        let height = CHUNK_HEIGHT as i32;
        (0..width).contains(&local.x)
            && (0..height).contains(&local.y)
            && (0..width).contains(&local.z)
    }

    /// Returns the block id at a chunk-local position, or `None` outside the chunk.
    pub fn block_at(&self, local: Point3<i32>) -> Option<BlockId> {
        if !Self::is_voxel_in_chunk(local) {
            return None;
        }
        Some(self.blocks[Self::index(local.x as usize, local.y as usize, local.z as usize)])
    }

    /// Whether the voxel at a chunk-local position is solid.
    ///
    /// Positions outside the chunk are resolved through `source`, which treats
    /// positions outside the world as air.
    fn check_voxel<S: VoxelSource + ?Sized>(
        &self,
        local: Point3<i32>,
        source: &S,
        registry: &BlockRegistry,
    ) -> bool {
        if Self::is_voxel_in_chunk(local) {
            return self.solid_array[Self::index(local.x as usize, local.y as usize, local.z as usize)];
        }

        let world_position = self.coord.world_origin() + Vector3::new(local.x, local.y, local.z);
        registry.block(source.get_voxel(world_position)).is_solid
    }

    /// Builds the mesh of every exposed face of the chunk's solid voxels.
    fn create_mesh_data<S: VoxelSource + ?Sized>(
        &self,
        source: &S,
        registry: &BlockRegistry,
    ) -> ChunkMesh {
        let mut mesh = ChunkMesh::new();

        for (position, block_id) in ChunkBlockIterator::new(self) {
            let block_type = registry.block(block_id);
            let local = Point3::new(position.x as i32, position.y as i32, position.z as i32);
            let offset = Vector3::new(position.x as f32, position.y as f32, position.z as f32);

            for side in BlockSide::all() {
                if !self.check_voxel(local + side.face_check(), source, registry) {
                    mesh.add_face(offset, side, block_type.texture_id(side));
                }
            }
        }

        mesh
    }

    /// The chunk's coordinate.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// World-space voxel position of the chunk's minimum corner; where a
    /// renderer places the chunk's mesh.
    pub fn world_origin(&self) -> Point3<i32> {
        self.coord.world_origin()
    }

    /// The chunk's mesh, in chunk-local coordinates.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Number of solid voxels in the chunk.
    pub fn solid_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// Whether the chunk is currently shown.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Shows or hides the chunk.
    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}
