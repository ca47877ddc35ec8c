//! # Voxel Data
//!
//! Static lookup tables describing a unit cube and the texture atlas layout.
//! Everything here is compile-time data; the chunk mesher indexes these tables
//! by face (see [`BlockSide`](super::block::block_side::BlockSide) for the order).

/// Width and depth of a chunk in voxels.
pub const CHUNK_WIDTH: usize = 16;
/// Height of a chunk in voxels. Chunks span the full world height.
pub const CHUNK_HEIGHT: usize = 128;
/// Number of voxels in one horizontal row of a chunk column (`CHUNK_HEIGHT * CHUNK_WIDTH`).
pub const CHUNK_SLICE_SIZE: usize = CHUNK_HEIGHT * CHUNK_WIDTH;
/// Total number of voxels in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_SLICE_SIZE;

/// Default world size, in chunks along each horizontal axis.
pub const WORLD_SIZE_IN_CHUNKS: i32 = 32;
/// Default view distance, in chunks.
pub const VIEW_DISTANCE_IN_CHUNKS: i32 = 10;

/// Number of tiles along one side of the square texture atlas.
pub const TEXTURE_ATLAS_SIZE_IN_BLOCKS: u32 = 4;
/// Total number of tiles in the texture atlas.
pub const TEXTURE_ATLAS_TILE_COUNT: u32 = TEXTURE_ATLAS_SIZE_IN_BLOCKS * TEXTURE_ATLAS_SIZE_IN_BLOCKS;
/// Side length of one atlas tile in normalized UV space.
pub const NORMALIZED_BLOCK_TEXTURE_SIZE: f32 = 1.0 / TEXTURE_ATLAS_SIZE_IN_BLOCKS as f32;

/// The eight corners of a unit cube.
pub const VOXEL_VERTS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Corner indices (into [`VOXEL_VERTS`]) of each face's quad.
///
/// The four corners are ordered so that [`QUAD_TRIANGLES`] produces two
/// outward-facing triangles.
pub const VOXEL_TRIS: [[usize; 4]; 6] = [
    [0, 3, 1, 2], // back
    [5, 6, 4, 7], // front
    [3, 7, 2, 6], // top
    [1, 5, 0, 4], // bottom
    [4, 7, 0, 3], // left
    [1, 2, 5, 6], // right
];

/// Offset to the neighbouring voxel that covers each face.
pub const FACE_CHECKS: [[i32; 3]; 6] = [
    [0, 0, -1],
    [0, 0, 1],
    [0, 1, 0],
    [0, -1, 0],
    [-1, 0, 0],
    [1, 0, 0],
];

/// Triangle winding for one quad, relative to its first vertex.
pub const QUAD_TRIANGLES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// UV corner offsets (in tile units) matching the vertex order of [`VOXEL_TRIS`].
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_checks_point_away_from_their_quads() {
        for (face, check) in FACE_CHECKS.iter().enumerate() {
            let axis = check.iter().position(|c| *c != 0).unwrap();
            let expected = if check[axis] > 0 { 1.0 } else { 0.0 };
            for corner in VOXEL_TRIS[face] {
                assert_eq!(VOXEL_VERTS[corner][axis], expected, "face {face}");
            }
        }
    }

    #[test]
    fn chunk_volume_matches_dimensions() {
        assert_eq!(CHUNK_VOLUME, 16 * 128 * 16);
        assert_eq!(TEXTURE_ATLAS_TILE_COUNT, 16);
    }
}
