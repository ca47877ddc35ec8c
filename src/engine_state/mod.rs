//! # Engine State Module
//!
//! The core engine module: the voxel world, the mesh data handed to a renderer,
//! and the worker pool chunks can be built on.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the world and the viewpoint, and advances both once per tick
//! * `rendering` - Chunk mesh buffers and the vertex format for GPU upload
//! * `task_management` - Worker threads for chunk generation
//! * `voxels` - Blocks, chunks, terrain generation and the streaming world
//!
//! ## Tick Flow
//!
//! Each tick the viewpoint moves by `velocity * dt`, then its position is handed
//! to [`World::update`], which runs a streaming pass only when the viewpoint
//! crosses into another chunk.

use std::time::Duration;

use cgmath::{Point3, Vector3};
use log::debug;

use crate::config::{ConfigError, WorldConfig};
use voxels::world::{StreamingReport, World};

pub mod rendering;
pub mod task_management;
pub mod voxels;

/// Default viewpoint velocity, in voxels per second.
pub const DEFAULT_VELOCITY: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 5.0,
};

/// The world together with a viewpoint moving through it at constant velocity.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use voxel_world::{EngineState, WorldConfig};
///
/// let mut engine_state = EngineState::new(WorldConfig::default()).unwrap();
/// engine_state.start();
/// if let Some(report) = engine_state.tick(Duration::from_millis(16)) {
///     println!("{} chunks generated", report.generated.len());
/// }
/// ```
pub struct EngineState {
    world: World,
    viewpoint: Point3<f32>,
    velocity: Vector3<f32>,
}

impl EngineState {
    /// Creates the world from `config`. The viewpoint starts at the spawn
    /// position, moving at [`DEFAULT_VELOCITY`].
    ///
    /// # Errors
    /// Returns the config's validation error.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        let viewpoint = world.spawn_position();

        Ok(EngineState {
            world,
            viewpoint,
            velocity: DEFAULT_VELOCITY,
        })
    }

    /// Runs the world's initial load and places the viewpoint at spawn.
    pub fn start(&mut self) -> StreamingReport {
        let report = self.world.start();
        self.viewpoint = self.world.spawn_position();
        report
    }

    /// Advances the viewpoint by `dt` and feeds it to the world.
    ///
    /// # Returns
    /// The streaming report if the viewpoint changed chunk.
    pub fn tick(&mut self, dt: Duration) -> Option<StreamingReport> {
        self.viewpoint += self.velocity * dt.as_secs_f32();

        let report = self.world.update(self.viewpoint);
        if let Some(report) = &report {
            debug!(
                "Viewpoint at ({:.1}, {:.1}, {:.1}) entered chunk {}, {} chunks active",
                self.viewpoint.x,
                self.viewpoint.y,
                self.viewpoint.z,
                self.world.player_chunk_coord(),
                self.world.active_chunks().len()
            );
        }
        report
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current viewpoint position.
    pub fn viewpoint(&self) -> Point3<f32> {
        self.viewpoint
    }

    /// Moves the viewpoint without advancing time. Takes effect on the next tick.
    pub fn set_viewpoint(&mut self, viewpoint: Point3<f32>) {
        self.viewpoint = viewpoint;
    }

    /// Current viewpoint velocity, in voxels per second.
    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    /// Changes the viewpoint velocity.
    pub fn set_velocity(&mut self, velocity: Vector3<f32>) {
        self.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BiomeConfig;
    use crate::engine_state::voxels::chunk::ChunkCoord;

    fn engine_state() -> EngineState {
        let config = WorldConfig {
            seed: 1,
            world_size_in_chunks: 6,
            view_distance_in_chunks: 2,
            biome: BiomeConfig::flat(3),
            ..WorldConfig::default()
        };
        let mut engine_state = EngineState::new(config).unwrap();
        engine_state.start();
        engine_state
    }

    #[test]
    fn ticks_inside_a_chunk_are_no_ops() {
        let mut engine_state = engine_state();
        let start = engine_state.viewpoint();

        // Spawn is at z = 48.0; one second moves it to z = 53.0, still chunk 3.
        for _ in 0..60 {
            assert!(engine_state.tick(Duration::from_secs_f32(1.0 / 60.0)).is_none());
        }

        assert!((engine_state.viewpoint().z - (start.z + 5.0)).abs() < 1e-3);
        assert_eq!(engine_state.viewpoint().x, start.x);
    }

    #[test]
    fn crossing_a_chunk_border_streams_once() {
        let mut engine_state = engine_state();
        engine_state.set_velocity(Vector3::new(0.0, 0.0, 16.0));

        let report = engine_state.tick(Duration::from_secs(1)).unwrap();
        assert_eq!(engine_state.world().player_chunk_coord(), ChunkCoord::new(3, 4));
        assert_eq!(report.deactivated.len(), 4);
        assert!(engine_state.tick(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn set_viewpoint_takes_effect_on_the_next_tick() {
        let mut engine_state = engine_state();
        engine_state.set_velocity(Vector3::new(0.0, 0.0, 0.0));
        engine_state.set_viewpoint(Point3::new(1.0, 130.0, 1.0));

        assert_eq!(engine_state.world().player_chunk_coord(), ChunkCoord::new(3, 3));
        let report = engine_state.tick(Duration::from_millis(10)).unwrap();

        assert_eq!(engine_state.viewpoint(), Point3::new(1.0, 130.0, 1.0));
        assert_eq!(engine_state.world().player_chunk_coord(), ChunkCoord::new(0, 0));
        assert_eq!(report.generated.len(), 3);
    }
}
