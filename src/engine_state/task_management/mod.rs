//! # Task Management System
//!
//! This module provides a small worker pool for executing CPU-bound work across
//! multiple threads.
//!
//! ## Architecture Overview
//!
//! The task management system consists of several key components:
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work that can be executed on a worker thread
//! - `TaskResult`: The result of a completed task, which can spawn additional tasks
//! - `TaskChannel`: Communication channel between the owning thread and one worker
//!
//! Each worker is a `std::thread` with a dedicated pair of mpsc channels. Tasks
//! are dealt out round-robin, at most [`MAX_TASKS_IN_FLIGHT`] per worker; the rest
//! wait in a FIFO queue.
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. Workers process tasks and return results
//! 4. Results are handled on the owning thread in `process_completed_tasks()` or
//!    `wait_for_all()`
//! 5. Results can spawn new tasks
//! 6. The cycle continues until all work is complete
//!
//! ## Example Usage
//! ```ignore
//! let mut task_manager = TaskManager::new(num_workers);
//!
//! // Publish a task for background processing
//! task_manager.publish_task(Box::new(MyTask::new(...)));
//!
//! // Either poll from a loop...
//! task_manager.process_completed_tasks(&mut context);
//! task_manager.process_queued_tasks();
//!
//! // ...or block until everything published so far has been handled.
//! task_manager.wait_for_all(&mut context)?;
//! ```

pub mod task;

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{info, warn};
use thiserror::Error;

use task::{Task, TaskResult};

/// Errors reported by the worker pool.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A worker hung up while tasks were still outstanding, usually because a
    /// task panicked on it.
    #[error("worker {channel} disconnected with {in_flight} task(s) in flight")]
    WorkerDisconnected {
        /// Index of the worker channel
        channel: usize,
        /// Tasks that will never come back
        in_flight: usize,
    },
    /// Tasks are queued but there is no worker to run them.
    #[error("{queued} task(s) queued with no worker to run them")]
    NoWorkers {
        /// Tasks left in the queue
        queued: usize,
    },
}

/// A communication channel between the owning thread and a worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks to the worker
/// - `result_receiver`: Receives task results from the worker
/// - `num_tasks_in_flight`: Tracks number of tasks currently being processed
/// - `_worker`: Handle to the worker thread
///
/// Dropping the channel drops `task_sender`, which ends the worker's receive loop.
pub struct TaskChannel<C> {
    task_sender: Sender<Box<dyn Task<C> + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult<C> + Send>>,
    num_tasks_in_flight: usize,
    _worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// The `TaskManager` is responsible for:
/// - Creating worker threads
/// - Distributing tasks across available workers
/// - Collecting results and applying them to a context of type `C`
/// - Queuing tasks while all workers are busy
pub struct TaskManager<C> {
    channels: Vec<TaskChannel<C>>,
    queued_tasks: VecDeque<Box<dyn Task<C> + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
///
/// Keeping this at 1 leaves every other task in the shared queue, so a worker
/// that finishes early picks up the next one instead of waiting behind a
/// backlog of its own.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl<C: 'static> TaskManager<C> {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// # Arguments
    /// * `num_workers` - Number of worker threads to create
    ///
    /// # Panics
    /// Panics if the underlying thread creation fails.
    pub fn new(num_workers: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        info!(
            "Starting {} chunk worker(s), available parallelism: {:?}",
            num_workers,
            thread::available_parallelism()
        );

        for _ in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task<C> + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult<C> + Send>>();

            let worker = thread::spawn(move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            });

            channels.push(TaskChannel {
                task_sender: task_tx,
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                _worker: worker,
            });
        }

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.channels.len()
    }

    /// Whether no task is queued or in flight.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty()
            && self
                .channels
                .iter()
                .all(|channel| channel.num_tasks_in_flight == 0)
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was successfully sent to the worker
    /// - `Err(task)` if the send failed (worker disconnected), handing the task back
    fn try_send_task(
        &mut self,
        task: Box<dyn Task<C> + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task<C> + Send>> {
        match self.channels[channel_idx].task_sender.send(task) {
            Ok(_) => {
                self.channels[channel_idx].num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => Err(task.0),
        }
    }

    /// Finds an available worker channel, round-robin from the last used one.
    ///
    /// # Returns
    /// - `Some(usize)` index of a channel below `MAX_TASKS_IN_FLIGHT`
    /// - `None` if all channels are busy or there are no channels
    fn find_available_channel(&self) -> Option<usize> {
        let count = self.channels.len();
        (0..count)
            .map(|step| (self.current_channel + step) % count)
            .find(|&idx| self.channels[idx].num_tasks_in_flight < MAX_TASKS_IN_FLIGHT)
    }

    /// Publishes a new task for execution.
    ///
    /// The task is sent to a worker right away if one is free, and queued otherwise.
    ///
    /// # Returns
    /// - `true` if the task was immediately scheduled on a worker
    /// - `false` if the task was queued
    pub fn publish_task(&mut self, task: Box<dyn Task<C> + Send>) -> bool {
        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    warn!("Worker {} refused a task, queuing it", channel_idx);
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Sends queued tasks to free workers, oldest first, until either the queue
    /// is empty or every worker is busy.
    pub fn process_queued_tasks(&mut self) {
        while !self.queued_tasks.is_empty() {
            let Some(channel_idx) = self.find_available_channel() else {
                // No available channels, keep tasks queued
                return;
            };
            let Some(task) = self.queued_tasks.pop_front() else {
                return;
            };

            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => {
                    // Channel is disconnected, put task back and stop processing
                    self.queued_tasks.push_front(task);
                    return;
                }
            }
        }
    }

    /// Handles every result that has already arrived, without blocking.
    ///
    /// Follow-up tasks returned by the results are published.
    pub fn process_completed_tasks(&mut self, context: &mut C) {
        let mut tasks_to_queue = Vec::new();
        for channel in &mut self.channels {
            while let Ok(result) = channel.result_receiver.try_recv() {
                channel.num_tasks_in_flight -= 1;
                tasks_to_queue.extend(result.handle_result(context));
            }
        }

        for task in tasks_to_queue {
            self.publish_task(task);
        }
    }

    /// Blocks until every published task (and every follow-up task) has been
    /// processed and its result handled.
    ///
    /// # Errors
    /// Returns an error if a worker disconnects with work outstanding, or if
    /// tasks are queued and there are no workers at all. The manager should be
    /// discarded after an error.
    pub fn wait_for_all(&mut self, context: &mut C) -> Result<(), TaskError> {
        loop {
            self.process_queued_tasks();

            if self.is_idle() {
                return Ok(());
            }
            if self.channels.is_empty() {
                return Err(TaskError::NoWorkers {
                    queued: self.queued_tasks.len(),
                });
            }

            let mut tasks_to_queue = Vec::new();
            for (idx, channel) in self.channels.iter_mut().enumerate() {
                if channel.num_tasks_in_flight == 0 {
                    continue;
                }
                match channel.result_receiver.recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        tasks_to_queue.extend(result.handle_result(context));
                    }
                    Err(_) => {
                        return Err(TaskError::WorkerDisconnected {
                            channel: idx,
                            in_flight: channel.num_tasks_in_flight,
                        });
                    }
                }
            }

            for task in tasks_to_queue {
                self.publish_task(task);
            }
        }
    }
}
