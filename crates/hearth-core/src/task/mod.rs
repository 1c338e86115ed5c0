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

//! The bridge between background decode work and main-thread finalization.
//!
//! Some imports (font face parsing, for instance) are too expensive to run on
//! the main thread, but their result has to be integrated on it because that
//! is where the graphics context and the asset cache live. A [`Task`] launches
//! the work on its own thread at construction time and carries a strongly
//! typed finalize closure. A [`TaskWorker`] owns the queue and is polled once
//! per frame.
//!
//! The handoff is one-shot: exactly one background thread produces a result
//! and exactly one main-thread poll consumes it. Finalize closures are not
//! `Send`, so neither tasks nor the worker can leave the main thread.

mod worker;

pub use worker::TaskWorker;

use crate::error::AssetError;
use std::thread;
use std::time::Duration;

/// Time elapsed since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestep(Duration);

impl Timestep {
    /// Wraps a frame duration.
    pub const fn new(delta: Duration) -> Self {
        Self(delta)
    }

    /// Builds a timestep from seconds. Negative values clamp to zero.
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Duration::from_secs_f32(seconds.max(0.0)))
    }

    /// The frame duration.
    pub const fn duration(self) -> Duration {
        self.0
    }

    /// The frame duration in seconds.
    pub fn seconds(self) -> f32 {
        self.0.as_secs_f32()
    }

    /// The frame duration in milliseconds.
    pub fn millis(self) -> f32 {
        self.0.as_secs_f32() * 1000.0
    }
}

impl From<Duration> for Timestep {
    fn from(delta: Duration) -> Self {
        Self(delta)
    }
}

/// Outcome of a single non-blocking poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// The background work has not produced a result yet.
    Pending,
    /// The result was received and finalized into its destination.
    Finalized,
    /// The background thread ended without producing a result (it panicked).
    /// Nothing was finalized.
    Faulted,
}

impl TaskState {
    /// Returns `true` for any state the task will never leave.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, TaskState::Pending)
    }
}

/// An in-flight unit of work as seen by the [`TaskWorker`] queue.
pub trait PendingTask {
    /// A human-readable label used in logs.
    fn label(&self) -> &str;

    /// Checks for a result without blocking and finalizes it if present.
    ///
    /// Once a terminal state has been returned, later polls return the same
    /// state and do nothing.
    fn poll(&mut self) -> TaskState;

    /// The state reached by the last poll, without polling.
    fn state(&self) -> TaskState;

    /// Polls once; returns `true` only on the poll that leaves
    /// [`TaskState::Pending`], and `false` before and after it.
    fn execute(&mut self) -> bool {
        if self.state().is_terminal() {
            return false;
        }
        self.poll().is_terminal()
    }
}

/// A background computation paired with the main-thread step that consumes it.
///
/// The work closure runs on a dedicated thread spawned by [`Task::spawn`]. The
/// finalize closure captures the destination slot and runs on whichever thread
/// polls the task, which is always the main thread in practice since a `Task`
/// is not `Send`.
pub struct Task<R: Send + 'static> {
    label: String,
    receiver: flume::Receiver<R>,
    finalize: Option<Box<dyn FnOnce(R)>>,
    state: TaskState,
}

impl<R: Send + 'static> Task<R> {
    /// Launches `work` on a new background thread.
    ///
    /// `finalize` receives the result on the first poll after `work` returns.
    ///
    /// # Errors
    /// Returns [`AssetError::TaskSpawn`] if the thread could not be created.
    pub fn spawn<W, F>(label: impl Into<String>, work: W, finalize: F) -> Result<Self, AssetError>
    where
        W: FnOnce() -> R + Send + 'static,
        F: FnOnce(R) + 'static,
    {
        let label = label.into();
        let (sender, receiver) = flume::bounded(1);

        thread::Builder::new()
            .name(format!("asset-task:{label}"))
            .spawn(move || {
                // The receiver is gone if the task was dropped before completion.
                let _ = sender.send(work());
            })
            .map_err(|source| AssetError::TaskSpawn {
                label: label.clone(),
                source,
            })?;

        log::trace!("Spawned background task '{label}'.");

        Ok(Self {
            label,
            receiver,
            finalize: Some(Box::new(finalize)),
            state: TaskState::Pending,
        })
    }
}

impl<R: Send + 'static> PendingTask for Task<R> {
    fn label(&self) -> &str {
        &self.label
    }

    fn state(&self) -> TaskState {
        self.state
    }

    fn poll(&mut self) -> TaskState {
        if self.state.is_terminal() {
            return self.state;
        }

        match self.receiver.try_recv() {
            Ok(result) => {
                if let Some(finalize) = self.finalize.take() {
                    finalize(result);
                }
                self.state = TaskState::Finalized;
            }
            Err(flume::TryRecvError::Empty) => {}
            Err(flume::TryRecvError::Disconnected) => {
                log::error!(
                    "Background task '{}' ended without a result; its destination is left untouched.",
                    self.label
                );
                self.finalize = None;
                self.state = TaskState::Faulted;
            }
        }

        self.state
    }
}

impl<R: Send + 'static> std::fmt::Debug for Task<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("label", &self.label)
            .field("state", &self.state)
            .finish()
    }
}
