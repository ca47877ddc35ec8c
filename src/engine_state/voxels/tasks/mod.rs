//! # Voxel Task System
//!
//! Tasks related to voxel world generation. They run on the
//! [`TaskManager`](crate::engine_state::task_management::TaskManager) worker
//! pool when the world is configured with worker threads.

pub mod chunk_generation_task;
