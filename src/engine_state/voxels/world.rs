//! # World Module
//!
//! This module provides the `World` struct, the single owner of the chunk grid
//! and of the set of active (visible) chunks.
//!
//! ## Chunk Lifecycle
//!
//! Every chunk coordinate moves through
//! `NonExistent -> Generated+Active -> Generated+Inactive <-> Generated+Active`.
//! Chunks are never destroyed: leaving the view window only hides them, and
//! coming back shows the same chunk again without rebuilding it.
//!
//! ## Streaming
//!
//! The window of wanted chunks is the square
//! `[c.x - d, c.x + d) x [c.z - d, c.z + d)` around the viewpoint's chunk `c`,
//! where `d` is the view distance, clipped to the world. [`World::update`] is
//! called once per tick and only runs a reconciliation pass when the viewpoint
//! has crossed into another chunk. A pass:
//!
//! 1. snapshots the active set
//! 2. generates or reactivates every chunk in the window, striking each from the snapshot
//! 3. deactivates whatever is left in the snapshot
//!
//! Every chunk the pass needs is fully built before the pass returns, either on
//! the calling thread or on the worker pool when `worker_threads > 0`. Only the
//! world thread ever mutates the grid or the active set.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use cgmath::Point3;
use log::{debug, info, trace, warn};

use crate::config::{ConfigError, WorldConfig};
use crate::engine_state::task_management::TaskManager;
use crate::engine_state::voxels::block::{BlockId, BlockRegistry};
use crate::engine_state::voxels::chunk::{Chunk, ChunkCoord};
use crate::engine_state::voxels::tasks::chunk_generation_task::{
    ChunkGenerationTask, GeneratedChunks,
};
use crate::engine_state::voxels::terrain::{TerrainGenerator, VoxelSource};
use crate::engine_state::voxels::voxel_data::{CHUNK_HEIGHT, CHUNK_WIDTH};

/// What a reconciliation pass changed, for the rendering layer.
///
/// `generated` and `activated` are in scan order (x outer, z inner);
/// `deactivated` is sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingReport {
    /// Chunks built during the pass. They are active and their meshes need uploading.
    pub generated: Vec<ChunkCoord>,
    /// Previously hidden chunks shown again.
    pub activated: Vec<ChunkCoord>,
    /// Chunks that left the view window and were hidden.
    pub deactivated: Vec<ChunkCoord>,
}

impl StreamingReport {
    /// Whether the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.generated.is_empty() && self.activated.is_empty() && self.deactivated.is_empty()
    }
}

/// A bounded voxel world streamed around a moving viewpoint.
pub struct World {
    /// Answers every voxel query. Shared with chunk workers.
    generator: Arc<TerrainGenerator>,
    /// Block definitions. Shared with chunk workers.
    registry: Arc<BlockRegistry>,
    world_size_in_chunks: i32,
    view_distance_in_chunks: i32,
    /// One slot per chunk coordinate, indexed by [`World::chunk_index`].
    chunks: Vec<Option<Chunk>>,
    /// Coordinates of the chunks currently shown.
    active_chunks: HashSet<ChunkCoord>,
    /// Chunk the viewpoint was last seen in.
    player_chunk_coord: ChunkCoord,
    /// Chunk the last reconciliation pass was centered on.
    player_last_chunk_coord: Option<ChunkCoord>,
    spawn_position: Point3<f32>,
    /// Worker pool; `None` builds chunks on the calling thread.
    task_manager: Option<TaskManager<GeneratedChunks>>,
}

impl World {
    /// Creates an empty world from a config.
    ///
    /// No chunk is generated until [`World::start`] or the first pass.
    ///
    /// # Errors
    /// Returns the first problem [`WorldConfig::validate`] finds.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let world_size_in_chunks = config.world_size_in_chunks;
        let world_size_in_voxels = config.world_size_in_voxels();
        let generator = TerrainGenerator::new(config.seed, config.biome, world_size_in_chunks);

        let side = world_size_in_chunks as usize;
        let slot_count = side * side;
        let mut chunks = Vec::with_capacity(slot_count);
        chunks.resize_with(slot_count, || None);

        let spawn_position = Point3::new(
            (world_size_in_voxels / 2) as f32,
            CHUNK_HEIGHT as f32 + 2.0,
            (world_size_in_voxels / 2) as f32,
        );

        let task_manager = match config.worker_threads {
            0 => None,
            workers => Some(TaskManager::new(workers)),
        };

        info!(
            "Created world: {0}x{0} chunks, view distance {1}, seed {2}",
            world_size_in_chunks, config.view_distance_in_chunks, config.seed
        );

        Ok(World {
            generator: Arc::new(generator),
            registry: Arc::new(config.blocks),
            world_size_in_chunks,
            view_distance_in_chunks: config.view_distance_in_chunks,
            chunks,
            active_chunks: HashSet::new(),
            player_chunk_coord: ChunkCoord::from_world_position(spawn_position),
            player_last_chunk_coord: None,
            spawn_position,
            task_manager,
        })
    }

    /// Performs the initial load: generates and activates every chunk in the
    /// view window around the world's center chunk.
    ///
    /// # Returns
    /// The report of the initial pass. The viewpoint should then be placed at
    /// [`World::spawn_position`].
    pub fn start(&mut self) -> StreamingReport {
        let center = ChunkCoord::new(self.world_size_in_chunks / 2, self.world_size_in_chunks / 2);
        let report = self.reconcile(center);

        self.player_chunk_coord = ChunkCoord::from_world_position(self.spawn_position);
        self.player_last_chunk_coord = Some(self.player_chunk_coord);

        info!(
            "Initial load around chunk {}: {} chunks generated, spawning at ({}, {}, {})",
            center,
            report.generated.len(),
            self.spawn_position.x,
            self.spawn_position.y,
            self.spawn_position.z
        );
        report
    }

    /// Per-tick entry point: runs a reconciliation pass only if `viewpoint` is
    /// in a different chunk than at the last pass.
    ///
    /// # Returns
    /// `None` when the viewpoint has not changed chunk, otherwise the pass's report.
    pub fn update(&mut self, viewpoint: Point3<f32>) -> Option<StreamingReport> {
        self.player_chunk_coord = ChunkCoord::from_world_position(viewpoint);

        if self.player_last_chunk_coord == Some(self.player_chunk_coord) {
            trace!("Viewpoint still in chunk {}", self.player_chunk_coord);
            return None;
        }

        Some(self.check_view_distance(viewpoint))
    }

    /// Runs a reconciliation pass around `viewpoint` unconditionally.
    pub fn check_view_distance(&mut self, viewpoint: Point3<f32>) -> StreamingReport {
        let coord = ChunkCoord::from_world_position(viewpoint);
        self.player_chunk_coord = coord;

        let report = self.reconcile(coord);
        self.player_last_chunk_coord = Some(coord);

        info!(
            "Streaming pass around chunk {}: {} generated, {} activated, {} deactivated",
            coord,
            report.generated.len(),
            report.activated.len(),
            report.deactivated.len()
        );
        report
    }

    /// Brings the active set in line with the view window around `center`.
    fn reconcile(&mut self, center: ChunkCoord) -> StreamingReport {
        let mut previously_active = self.active_chunks.clone();
        let mut report = StreamingReport::default();
        let (xs, zs) = self.view_window(center);

        for x in xs {
            for z in zs.clone() {
                let coord = ChunkCoord::new(x, z);

                match self.chunk_mut(coord) {
                    None => report.generated.push(coord),
                    Some(chunk) if !chunk.is_active() => {
                        chunk.set_active(true);
                        report.activated.push(coord);
                    }
                    Some(_) => {}
                }

                self.active_chunks.insert(coord);
                previously_active.remove(&coord);
            }
        }

        self.generate_chunks(&report.generated);

        let mut deactivated: Vec<ChunkCoord> = previously_active.into_iter().collect();
        deactivated.sort_unstable();
        for coord in &deactivated {
            if let Some(chunk) = self.chunk_mut(*coord) {
                chunk.set_active(false);
            }
            self.active_chunks.remove(coord);
        }
        report.deactivated = deactivated;

        report
    }

    /// Chunk ranges along x and z of the view window around `center`, clipped
    /// to the world. Empty when the window misses the world entirely.
    fn view_window(&self, center: ChunkCoord) -> (Range<i32>, Range<i32>) {
        let view_distance = self.view_distance_in_chunks;
        let clip = |c: i32| {
            let lo = c.saturating_sub(view_distance).max(0);
            let hi = c
                .saturating_add(view_distance)
                .min(self.world_size_in_chunks);
            lo..hi.max(lo)
        };
        (clip(center.x), clip(center.z))
    }

    /// Builds and stores every chunk in `coords`, on the worker pool if there
    /// is one. Chunks the pool fails to return are built on this thread.
    fn generate_chunks(&mut self, coords: &[ChunkCoord]) {
        if coords.is_empty() {
            return;
        }

        let mut generated = GeneratedChunks::with_capacity(coords.len());
        let mut pool_failed = false;

        if let Some(task_manager) = self.task_manager.as_mut() {
            for &coord in coords {
                task_manager.publish_task(Box::new(ChunkGenerationTask::new(
                    self.generator.clone(),
                    self.registry.clone(),
                    coord,
                )));
            }

            if let Err(err) = task_manager.wait_for_all(&mut generated) {
                warn!("Chunk worker pool failed ({}), building chunks inline from now on", err);
                pool_failed = true;
            }
        }

        if pool_failed {
            self.task_manager = None;
        }

        for chunk in generated {
            self.insert_chunk(chunk);
        }

        for &coord in coords {
            if self.chunk(coord).is_none() {
                let chunk = Chunk::new(coord, self.generator.as_ref(), &self.registry);
                debug!(
                    "Generated chunk {} ({} quads)",
                    coord,
                    chunk.mesh().quad_count()
                );
                self.insert_chunk(chunk);
            }
        }
    }

    fn insert_chunk(&mut self, chunk: Chunk) {
        if let Some(index) = self.chunk_index(chunk.coord()) {
            self.chunks[index] = Some(chunk);
        }
    }

    /// Slot of a chunk coordinate in the grid, or `None` outside the world.
    fn chunk_index(&self, coord: ChunkCoord) -> Option<usize> {
        if !self.is_chunk_in_world(coord) {
            return None;
        }
        let side = self.world_size_in_chunks as usize;
        Some(coord.x as usize * side + coord.z as usize)
    }

    /// Whether a chunk coordinate lies inside the world:
    /// `0 <= x, z < world size in chunks`.
    pub fn is_chunk_in_world(&self, coord: ChunkCoord) -> bool {
        (0..self.world_size_in_chunks).contains(&coord.x)
            && (0..self.world_size_in_chunks).contains(&coord.z)
    }

    /// Whether a voxel position lies inside the world.
    pub fn is_voxel_in_world(&self, position: Point3<i32>) -> bool {
        self.generator.is_voxel_in_world(position)
    }

    /// The generated chunk at `coord`, if any.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunk_index(coord)
            .and_then(|index| self.chunks[index].as_ref())
    }

    fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        let index = self.chunk_index(coord)?;
        self.chunks[index].as_mut()
    }

    /// The generated chunk containing a world-space position, if any.
    pub fn chunk_from_position(&self, position: Point3<f32>) -> Option<&Chunk> {
        self.chunk(ChunkCoord::from_world_position(position))
    }

    /// Every generated chunk, active or not.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().flatten()
    }

    /// Coordinates of the active chunks, sorted.
    pub fn active_chunks(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.active_chunks.iter().copied().collect();
        coords.sort_unstable();
        coords
    }

    /// Whether the chunk at `coord` is currently shown.
    pub fn is_chunk_active(&self, coord: ChunkCoord) -> bool {
        self.active_chunks.contains(&coord)
    }

    /// Block id at a world-space voxel position, straight from the terrain
    /// generator. Positions outside the world are air.
    pub fn get_voxel(&self, position: Point3<i32>) -> BlockId {
        self.generator.get_voxel(position)
    }

    /// Whether the voxel containing `position` is solid, according to the
    /// generated chunk holding it.
    ///
    /// Returns `false` outside the world and where no chunk has been generated yet.
    pub fn check_for_voxel(&self, position: Point3<f32>) -> bool {
        let voxel = Point3::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            position.z.floor() as i32,
        );
        if !self.is_voxel_in_world(voxel) {
            return false;
        }

        let Some(chunk) = self.chunk_from_position(position) else {
            return false;
        };

        let origin = chunk.world_origin();
        let local = Point3::new(voxel.x - origin.x, voxel.y, voxel.z - origin.z);
        chunk
            .block_at(local)
            .is_some_and(|block_id| self.registry.block(block_id).is_solid)
    }

    /// Where the viewpoint is placed after the initial load.
    pub fn spawn_position(&self) -> Point3<f32> {
        self.spawn_position
    }

    /// Chunk the viewpoint was in at the last update.
    pub fn player_chunk_coord(&self) -> ChunkCoord {
        self.player_chunk_coord
    }

    /// The block registry.
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// The terrain generator.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// World extent in chunks along x and z.
    pub fn world_size_in_chunks(&self) -> i32 {
        self.world_size_in_chunks
    }

    /// World extent in voxels along x and z.
    pub fn world_size_in_voxels(&self) -> i32 {
        self.world_size_in_chunks * CHUNK_WIDTH as i32
    }

    /// View distance in chunks.
    pub fn view_distance_in_chunks(&self) -> i32 {
        self.view_distance_in_chunks
    }
}

impl VoxelSource for World {
    fn get_voxel(&self, position: Point3<i32>) -> BlockId {
        World::get_voxel(self, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BiomeConfig;
    use crate::engine_state::voxels::block::{AIR, BEDROCK, GRASS};

    fn flat_config(world_size_in_chunks: i32) -> WorldConfig {
        WorldConfig {
            seed: 42,
            world_size_in_chunks,
            view_distance_in_chunks: 2,
            biome: BiomeConfig::flat(4),
            ..WorldConfig::default()
        }
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let config = WorldConfig {
            view_distance_in_chunks: 0,
            ..flat_config(6)
        };
        assert!(matches!(
            World::new(config),
            Err(ConfigError::InvalidViewDistance(0))
        ));
    }

    #[test]
    fn nothing_exists_before_start() {
        let world = World::new(flat_config(6)).unwrap();

        assert_eq!(world.chunks().count(), 0);
        assert!(world.active_chunks().is_empty());
        assert!(!world.check_for_voxel(Point3::new(50.0, 2.0, 50.0)));
        // Point queries do not need chunks.
        assert_eq!(world.get_voxel(Point3::new(50, 4, 50)), GRASS);
    }

    #[test]
    fn start_loads_the_window_around_the_center() {
        let mut world = World::new(flat_config(8)).unwrap();
        let report = world.start();

        let expected: Vec<ChunkCoord> = (2..6)
            .flat_map(|x| (2..6).map(move |z| ChunkCoord::new(x, z)))
            .collect();
        assert_eq!(report.generated, expected);
        assert!(report.activated.is_empty());
        assert!(report.deactivated.is_empty());
        assert_eq!(world.active_chunks(), expected);
        assert!(world.chunks().all(Chunk::is_active));
    }

    #[test]
    fn spawn_is_above_the_world_center() {
        let mut world = World::new(flat_config(8)).unwrap();
        world.start();

        assert_eq!(world.spawn_position(), Point3::new(64.0, 130.0, 64.0));
        assert_eq!(world.player_chunk_coord(), ChunkCoord::new(4, 4));
        assert!(world.update(world.spawn_position()).is_none());
    }

    #[test]
    fn far_away_viewpoints_hide_everything() {
        let mut world = World::new(flat_config(6)).unwrap();
        world.start();
        let spawn = world.spawn_position();
        let initial = world.active_chunks();
        assert_eq!(initial.len(), 16);

        let report = world.update(Point3::new(1.0e12, 130.0, 1.0e12)).unwrap();
        assert!(report.generated.is_empty());
        assert_eq!(report.deactivated, initial);
        assert!(world.active_chunks().is_empty());

        let report = world.update(Point3::new(-1.0e12, 130.0, -1.0e12)).unwrap();
        assert!(report.is_empty());

        let report = world.update(spawn).unwrap();
        assert_eq!(report.activated, initial);

        let report = world
            .update(Point3::new(f32::INFINITY, 130.0, f32::NEG_INFINITY))
            .unwrap();
        assert_eq!(report.deactivated, initial);
        assert!(world.active_chunks().is_empty());
        assert_eq!(world.chunks().count(), 16);
    }

    #[test]
    fn huge_view_distance_covers_the_whole_world() {
        let config = WorldConfig {
            view_distance_in_chunks: i32::MAX,
            ..flat_config(4)
        };
        let mut world = World::new(config).unwrap();

        assert_eq!(world.start().generated.len(), 16);
        let report = world.update(Point3::new(1.0e12, 130.0, 1.0e12)).unwrap();
        assert!(report.is_empty());
        assert_eq!(world.active_chunks().len(), 16);
    }

    #[test]
    fn chunk_bounds_are_half_open() {
        let world = World::new(flat_config(6)).unwrap();

        assert!(world.is_chunk_in_world(ChunkCoord::new(0, 0)));
        assert!(world.is_chunk_in_world(ChunkCoord::new(5, 5)));
        assert!(!world.is_chunk_in_world(ChunkCoord::new(6, 0)));
        assert!(!world.is_chunk_in_world(ChunkCoord::new(0, -1)));
    }

    #[test]
    fn check_for_voxel_reads_generated_chunks() {
        let mut world = World::new(flat_config(8)).unwrap();
        world.start();

        assert!(world.check_for_voxel(Point3::new(64.5, 0.5, 64.5)));
        assert!(world.check_for_voxel(Point3::new(40.0, 4.9, 70.2)));
        assert!(!world.check_for_voxel(Point3::new(40.0, 5.0, 70.2)));
        assert!(!world.check_for_voxel(Point3::new(64.0, -1.0, 64.0)));
        assert!(!world.check_for_voxel(Point3::new(64.0, 500.0, 64.0)));

        // Solid terrain, but chunk (0, 0) is outside the initial window.
        assert_eq!(world.get_voxel(Point3::new(1, 0, 1)), BEDROCK);
        assert!(!world.check_for_voxel(Point3::new(1.5, 0.5, 1.5)));
    }

    #[test]
    fn world_answers_voxel_queries_like_its_generator() {
        let world = World::new(flat_config(6)).unwrap();
        let source: &dyn VoxelSource = &world;

        for position in [
            Point3::new(0, 0, 0),
            Point3::new(17, 3, 90),
            Point3::new(95, 4, 95),
            Point3::new(96, 4, 95),
            Point3::new(10, 100, 10),
        ] {
            assert_eq!(source.get_voxel(position), world.generator().get_voxel(position));
        }
        assert_eq!(source.get_voxel(Point3::new(-1, 2, 3)), AIR);
    }
}
