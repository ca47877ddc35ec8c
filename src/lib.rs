#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel terrain: a bounded world of `16 x 128 x 16` chunks filled by
//! a seeded noise generator, meshed by per-face culling, and streamed in and out
//! around a moving viewpoint.
//!
//! ## Key Modules
//!
//! * `config` - World configuration, loading and validation
//! * `engine_state` - The world, chunks, terrain, mesh data and the worker pool
//!
//! ## Architecture
//!
//! The crate stops at the render binding. For every chunk it produces plain
//! vertex / triangle / UV buffers (see [`ChunkMesh`]) plus a
//! [`StreamingReport`] per streaming pass saying which chunks were generated,
//! shown or hidden. Uploading meshes, materials and the scene graph belong to
//! whatever renders them.
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Point3;
//! use voxel_world::{World, WorldConfig};
//!
//! let mut world = World::new(WorldConfig::default()).unwrap();
//! world.start();
//!
//! // Once per tick:
//! let viewpoint = Point3::new(260.0, 130.0, 300.0);
//! if let Some(report) = world.update(viewpoint) {
//!     for coord in &report.generated {
//!         let mesh = world.chunk(*coord).unwrap().mesh();
//!         // upload mesh.vertices(), mesh.triangles(), mesh.uvs()
//!     }
//! }
//! ```

use std::time::Duration;

use log::info;

pub mod config;
mod engine_state;

pub use config::{BiomeConfig, ConfigError, LodeRule, WorldConfig};
pub use engine_state::rendering::meshing::{texture_uv_origin, ChunkMesh};
pub use engine_state::rendering::Vertex;
pub use engine_state::task_management::task::{Task, TaskResult};
pub use engine_state::task_management::{TaskError, TaskManager};
pub use engine_state::voxels::block::block_side::BlockSide;
pub use engine_state::voxels::block::block_type::BlockType;
pub use engine_state::voxels::block::{
    BlockId, BlockRegistry, AIR, BEDROCK, DIRT, GRASS, SAND, STONE,
};
pub use engine_state::voxels::chunk::{Chunk, ChunkCoord};
pub use engine_state::voxels::terrain::noise::TerrainNoise;
pub use engine_state::voxels::terrain::{TerrainGenerator, VoxelSource};
pub use engine_state::voxels::voxel_data::{
    CHUNK_HEIGHT, CHUNK_WIDTH, TEXTURE_ATLAS_SIZE_IN_BLOCKS, VIEW_DISTANCE_IN_CHUNKS,
    WORLD_SIZE_IN_CHUNKS,
};
pub use engine_state::voxels::world::{StreamingReport, World};
pub use engine_state::{EngineState, DEFAULT_VELOCITY};

/// Ticks simulated by [`run`]: ten seconds at 60 Hz.
pub const DEMO_TICKS: u32 = 600;

/// Tick length used by [`run`].
pub const DEMO_TICK: Duration = Duration::from_micros(16_667);

/// Headless demo: initialises logging, builds the world from the JSON config
/// named by the first command line argument (or the defaults), then flies the
/// viewpoint across it for [`DEMO_TICKS`] ticks.
///
/// Set `RUST_LOG=info` to see each streaming pass.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading world config from {}", path);
            WorldConfig::load(path)?
        }
        None => WorldConfig::default(),
    };

    let mut engine_state = EngineState::new(config)?;
    let initial = engine_state.start();

    let mut passes = 0;
    let mut generated = initial.generated.len();
    for _ in 0..DEMO_TICKS {
        if let Some(report) = engine_state.tick(DEMO_TICK) {
            passes += 1;
            generated += report.generated.len();
        }
    }

    let world = engine_state.world();
    let quads: usize = world.chunks().map(|chunk| chunk.mesh().quad_count()).sum();
    info!(
        "Demo finished at ({:.1}, {:.1}, {:.1}) after {} streaming passes: {} chunks generated, {} active, {} quads",
        engine_state.viewpoint().x,
        engine_state.viewpoint().y,
        engine_state.viewpoint().z,
        passes,
        generated,
        world.active_chunks().len(),
        quads
    );

    Ok(())
}
