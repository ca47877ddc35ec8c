//! Mesh data structures for voxel chunks.
//!
//! A [`ChunkMesh`] holds the three parallel buffers a renderer needs: vertex
//! positions, triangle indices into those positions, and one atlas UV per
//! vertex.

use cgmath::{Point3, Vector2, Vector3};

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::voxel_data::{
    NORMALIZED_BLOCK_TEXTURE_SIZE, QUAD_TRIANGLES, QUAD_UVS, TEXTURE_ATLAS_SIZE_IN_BLOCKS,
    VOXEL_VERTS,
};

/// Geometry of one chunk, in chunk-local coordinates.
///
/// Each exposed block face is one independent quad: four vertices, four UVs
/// and six indices. Quads are never merged across neighbouring voxels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions
    vertices: Vec<Point3<f32>>,
    /// Three indices into `vertices` per triangle
    triangles: Vec<u32>,
    /// Atlas UV for each vertex
    uvs: Vec<Vector2<f32>>,
    /// Index the next emitted vertex will occupy
    vertex_index: u32,
}

impl ChunkMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        ChunkMesh::default()
    }

    /// Appends one quad for `side` of the voxel whose minimum corner sits at
    /// `position`, textured with atlas tile `texture_id`.
    pub fn add_face(&mut self, position: Vector3<f32>, side: BlockSide, texture_id: u32) {
        for corner in side.corners() {
            let [x, y, z] = VOXEL_VERTS[corner];
            self.vertices.push(Point3::new(x, y, z) + position);
        }

        let origin = texture_uv_origin(texture_id);
        for [u, v] in QUAD_UVS {
            self.uvs.push(Vector2::new(
                origin.x + u * NORMALIZED_BLOCK_TEXTURE_SIZE,
                origin.y + v * NORMALIZED_BLOCK_TEXTURE_SIZE,
            ));
        }

        let base = self.vertex_index;
        self.triangles
            .extend(QUAD_TRIANGLES.iter().map(|offset| base + offset));
        self.vertex_index += 4;
    }

    /// Vertex positions, four per quad.
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Triangle indices into [`vertices`](Self::vertices), six per quad.
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// Atlas UVs, parallel to [`vertices`](Self::vertices).
    pub fn uvs(&self) -> &[Vector2<f32>] {
        &self.uvs
    }

    /// Number of faces in the mesh.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Interleaves positions and UVs into a single vertex buffer.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .zip(&self.uvs)
            .map(|(position, uv)| Vertex::new(*position, *uv))
            .collect()
    }
}

/// Bottom-left UV of an atlas tile.
///
/// Tiles are numbered row by row from the top-left of the atlas, while UV space
/// grows upwards, so the row is flipped.
pub fn texture_uv_origin(texture_id: u32) -> Vector2<f32> {
    let row = texture_id / TEXTURE_ATLAS_SIZE_IN_BLOCKS;
    let column = texture_id - row * TEXTURE_ATLAS_SIZE_IN_BLOCKS;

    let u = column as f32 * NORMALIZED_BLOCK_TEXTURE_SIZE;
    let v = 1.0 - row as f32 * NORMALIZED_BLOCK_TEXTURE_SIZE - NORMALIZED_BLOCK_TEXTURE_SIZE;
    Vector2::new(u, v)
}
