//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system,
//! which provides a framework for executing work on background threads.
//!
//! ## Core Components
//! - `Task`: Represents a unit of work that can be executed on a worker thread
//! - `TaskResult`: Represents the result of a completed task
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the owning thread with
//!    mutable access to the manager's context
//! 5. The result can spawn follow-up tasks
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred between threads
//! - `TaskResult` must be `Send` to be transferred back to the owning thread
//! - Anything a task shares with other tasks must be immutable (e.g. behind an `Arc`)

/// A unit of work that can be executed on a worker thread.
///
/// Tasks should own all the data they need. `C` is the context their results
/// are applied to once they are back on the owning thread.
pub trait Task<C>: Send {
    /// Processes the task and returns a result.
    ///
    /// Runs on a worker thread.
    ///
    /// # Returns
    /// A boxed `TaskResult` that will be handled on the owning thread.
    fn process(&self) -> Box<dyn TaskResult<C> + Send>;
}

/// The result of processing a `Task`.
pub trait TaskResult<C>: Send {
    /// Handles the result of a completed task on the owning thread.
    ///
    /// # Arguments
    /// * `context` - The state the result is applied to
    ///
    /// # Returns
    /// Follow-up tasks to schedule (can be empty).
    fn handle_result(self: Box<Self>, context: &mut C) -> Vec<Box<dyn Task<C> + Send>>;
}
