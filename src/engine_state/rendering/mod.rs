//! Render binding for the voxel engine.
//!
//! The engine does not talk to a graphics API. It produces, per chunk, a flat
//! vertex list, a triangle index list and a parallel UV list; a rendering layer
//! turns those into GPU meshes, computes normals, binds the atlas material and
//! places each mesh at its chunk's world origin.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
