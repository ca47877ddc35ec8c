//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and ties each face to its
//! entry in the voxel data tables.

use cgmath::Vector3;

use crate::engine_state::voxels::voxel_data::{FACE_CHECKS, VOXEL_TRIS};

/// Represents the six possible faces of a voxel block.
///
/// The discriminants index the face tables in
/// [`voxel_data`](crate::engine_state::voxels::voxel_data) and the per-face
/// texture array of a block type.
///
/// The order is: [BACK, FRONT, TOP, BOTTOM, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The back face (facing negative Z)
    BACK = 0,

    /// The front face (facing positive Z)
    FRONT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in table order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::BACK,
            BlockSide::FRONT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Offset from a voxel to the neighbour that covers this face.
    pub fn face_check(self) -> Vector3<i32> {
        let [x, y, z] = FACE_CHECKS[self as usize];
        Vector3::new(x, y, z)
    }

    /// Indices of the cube corners forming this face's quad.
    pub fn corners(self) -> [usize; 4] {
        VOXEL_TRIS[self as usize]
    }
}
