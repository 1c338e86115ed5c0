// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{PendingTask, Task, TaskState, Timestep};
use crate::error::AssetError;
use std::collections::VecDeque;
use std::time::Duration;

/// An ordered queue of background tasks, drained from the main thread.
///
/// Call [`TaskWorker::update`] once per frame. Tasks are polled in submission
/// order; completed tasks are finalized and dropped, pending ones stay queued
/// for the next frame. There is no reordering and no cancellation.
#[derive(Default)]
pub struct TaskWorker {
    queue: VecDeque<Box<dyn PendingTask>>,
    elapsed: Duration,
    finalized_total: u64,
    faulted_total: u64,
}

impl TaskWorker {
    /// Creates an empty worker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-launched task to the queue.
    pub fn add_task(&mut self, task: impl PendingTask + 'static) {
        log::trace!("Queued background task '{}'.", task.label());
        self.queue.push_back(Box::new(task));
    }

    /// Launches `work` in the background and queues its main-thread `finalize`.
    pub fn spawn<R, W, F>(
        &mut self,
        label: impl Into<String>,
        work: W,
        finalize: F,
    ) -> Result<(), AssetError>
    where
        R: Send + 'static,
        W: FnOnce() -> R + Send + 'static,
        F: FnOnce(R) + 'static,
    {
        let task = Task::spawn(label, work, finalize)?;
        self.add_task(task);
        Ok(())
    }

    /// Polls every queued task once, without blocking.
    ///
    /// Returns the number of tasks that left the queue this frame.
    pub fn update(&mut self, ts: Timestep) -> usize {
        self.elapsed += ts.duration();
        if self.queue.is_empty() {
            return 0;
        }

        let before = self.queue.len();
        let elapsed = self.elapsed;
        let mut finalized = 0;
        let mut faulted = 0;

        self.queue.retain_mut(|task| match task.poll() {
            TaskState::Pending => true,
            TaskState::Finalized => {
                log::debug!(
                    "Finalized background task '{}' at {:.3}s.",
                    task.label(),
                    elapsed.as_secs_f32()
                );
                finalized += 1;
                false
            }
            TaskState::Faulted => {
                faulted += 1;
                false
            }
        });

        self.finalized_total += finalized;
        self.faulted_total += faulted;
        before - self.queue.len()
    }

    /// Number of tasks still waiting for their background work.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when no task is in flight.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total time fed to [`TaskWorker::update`].
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of tasks finalized since creation.
    pub fn finalized_total(&self) -> u64 {
        self.finalized_total
    }

    /// Number of tasks whose background thread died since creation.
    pub fn faulted_total(&self) -> u64 {
        self.faulted_total
    }
}

impl std::fmt::Debug for TaskWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskWorker")
            .field("pending", &self.queue.len())
            .field("elapsed", &self.elapsed)
            .finish()
    }
}
