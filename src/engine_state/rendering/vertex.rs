//! Vertex data structures for handing chunk meshes to a renderer.
//!
//! This module defines the interleaved vertex format a GPU backend can upload
//! directly with `bytemuck::cast_slice`.

use cgmath::{Point3, Vector2};

/// A vertex of a chunk mesh.
///
/// Represents a single corner of a block face with its texture coordinates.
/// Positions are local to the chunk; the renderer places the chunk at its
/// world origin.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 20 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// UV texture coordinates into the atlas (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex from a chunk-local position and atlas UV.
    pub fn new(position: Point3<f32>, uv: Vector2<f32>) -> Self {
        Vertex {
            position: [position.x, position.y, position.z],
            tex_coords: [uv.x, uv.y],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_cast_to_tightly_packed_floats() {
        let vertices = [
            Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector2::new(0.25, 0.75)),
            Vertex::new(Point3::new(4.0, 5.0, 6.0), Vector2::new(0.5, 1.0)),
        ];

        assert_eq!(std::mem::size_of::<Vertex>(), 20);

        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.25, 0.75, 4.0, 5.0, 6.0, 0.5, 1.0]);
    }
}
