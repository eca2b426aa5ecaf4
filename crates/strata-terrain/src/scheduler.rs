//! Coalescing regeneration on a background worker.
//!
//! At most one generation runs at a time. Requests that arrive while a
//! generation is in flight overwrite a single pending slot, so a burst of
//! settings changes costs at most one extra generation and the newest
//! settings always win. In-flight work is never cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::error::GenerationError;
use crate::grid::{TerrainGrid, generate};
use crate::settings::TerrainSettings;

/// Capacity of the completed-outcome channel.
const RESULT_CAPACITY: usize = 16;

/// Identifies one call to [`RegenerationScheduler::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// A request to regenerate the map with new settings.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// Request identifier, increasing in submission order.
    pub id: RequestId,
    /// Settings to generate with.
    pub settings: TerrainSettings,
}

/// Result of one executed generation.
#[derive(Debug)]
pub struct GenerationOutcome {
    /// The request that was executed.
    pub id: RequestId,
    /// The settings it was executed with.
    pub settings: TerrainSettings,
    /// The generated grid, or the failure that prevented it.
    pub result: Result<TerrainGrid, GenerationError>,
    /// Generation time in microseconds.
    pub generation_time_us: u64,
}

/// Scheduler state machine.
///
/// `Idle --request--> Busy`, `Busy --request--> Busy` (replacing the
/// pending slot), `Busy --completion--> Idle` when nothing is pending,
/// otherwise `Busy --completion--> Busy` with the pending request started.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SchedulerState {
    #[default]
    Idle,
    Busy {
        pending: Option<GenerationRequest>,
    },
}

impl SchedulerState {
    /// Feed a new request. Returns the request to start now, if any.
    pub fn on_request(&mut self, request: GenerationRequest) -> Option<GenerationRequest> {
        match self {
            SchedulerState::Idle => {
                *self = SchedulerState::Busy { pending: None };
                Some(request)
            }
            SchedulerState::Busy { pending } => {
                let new_id = request.id;
                if let Some(superseded) = pending.replace(request) {
                    tracing::debug!(
                        superseded = superseded.id.0,
                        by = new_id.0,
                        "Pending regeneration superseded"
                    );
                }
                None
            }
        }
    }

    /// Signal that the running generation finished. Returns the pending
    /// request to start next, if any.
    pub fn on_completion(&mut self) -> Option<GenerationRequest> {
        match self {
            SchedulerState::Idle => None,
            SchedulerState::Busy { pending } => {
                let next = pending.take();
                if next.is_none() {
                    *self = SchedulerState::Idle;
                }
                next
            }
        }
    }

    /// Returns `true` while a generation is running.
    pub fn is_busy(&self) -> bool {
        matches!(self, SchedulerState::Busy { .. })
    }

    /// Returns `true` if a request is waiting for the running generation.
    pub fn has_pending(&self) -> bool {
        matches!(self, SchedulerState::Busy { pending: Some(_) })
    }
}

/// Runs map generations for a fixed grid size on one worker thread,
/// coalescing overlapping requests.
pub struct RegenerationScheduler {
    state: Arc<Mutex<SchedulerState>>,
    job_sender: Sender<GenerationRequest>,
    result_receiver: Receiver<GenerationOutcome>,
    next_id: AtomicU64,
    started: Arc<AtomicU64>,
}

impl RegenerationScheduler {
    /// Create a scheduler that runs [`generate`] for a `width` x `height` grid.
    pub fn new(width: u32, height: u32) -> Result<Self, GenerationError> {
        Self::with_generator(width, height, generate)
    }

    /// Create a scheduler around a custom generation function.
    pub fn with_generator<F>(width: u32, height: u32, generate_fn: F) -> Result<Self, GenerationError>
    where
        F: Fn(u32, u32, &TerrainSettings) -> Result<TerrainGrid, GenerationError> + Send + 'static,
    {
        if width == 0 || height == 0 {
            return Err(GenerationError::InvalidDimensions { width, height });
        }

        // Only the Idle -> Busy transition sends a job, so one slot suffices.
        let (job_sender, job_receiver) = bounded::<GenerationRequest>(1);
        let (result_sender, result_receiver) = bounded::<GenerationOutcome>(RESULT_CAPACITY);
        let state = Arc::new(Mutex::new(SchedulerState::Idle));
        let started = Arc::new(AtomicU64::new(0));

        let worker_state = Arc::clone(&state);
        let worker_started = Arc::clone(&started);
        std::thread::Builder::new()
            .name("terrain-regen-worker".into())
            .spawn(move || {
                while let Ok(request) = job_receiver.recv() {
                    let mut current = Some(request);
                    while let Some(request) = current.take() {
                        worker_started.fetch_add(1, Ordering::Relaxed);
                        tracing::debug!(id = request.id.0, "Regeneration started");

                        let start = Instant::now();
                        let result = generate_fn(width, height, &request.settings);
                        let elapsed = start.elapsed().as_micros() as u64;

                        if let Err(err) = &result {
                            tracing::warn!(id = request.id.0, %err, "Regeneration failed");
                        }

                        // The receiver may be gone if the scheduler was dropped.
                        let _ = result_sender.send(GenerationOutcome {
                            id: request.id,
                            settings: request.settings,
                            result,
                            generation_time_us: elapsed,
                        });

                        current = lock(&worker_state).on_completion();
                    }
                }
            })
            .expect("Failed to spawn terrain regeneration worker thread");

        Ok(Self {
            state,
            job_sender,
            result_receiver,
            next_id: AtomicU64::new(0),
            started,
        })
    }

    /// Request a regeneration with `settings`.
    ///
    /// Invalid settings are rejected here, before the scheduler state
    /// changes. Otherwise the request either starts immediately or replaces
    /// the pending slot behind the running generation.
    pub fn request(&self, settings: TerrainSettings) -> Result<RequestId, GenerationError> {
        settings.validate()?;

        // Allocate the id under the state lock: pending order follows id order.
        let (id, to_start) = {
            let mut state = lock(&self.state);
            let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
            (id, state.on_request(GenerationRequest { id, settings }))
        };

        if let Some(job) = to_start {
            // The worker outlives every sender, so this only fails during teardown.
            let _ = self.job_sender.send(job);
        }
        Ok(id)
    }

    /// Drain all completed outcomes without blocking.
    pub fn drain_results(&self) -> Vec<GenerationOutcome> {
        self.result_receiver.try_iter().collect()
    }

    /// Wait up to `timeout` for the next completed outcome.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<GenerationOutcome> {
        self.result_receiver.recv_timeout(timeout).ok()
    }

    /// Returns `true` while a generation is running.
    pub fn is_busy(&self) -> bool {
        lock(&self.state).is_busy()
    }

    /// Returns `true` if a request is waiting behind the running generation.
    pub fn has_pending(&self) -> bool {
        lock(&self.state).has_pending()
    }

    /// Number of generations the worker has started so far.
    pub fn generations_started(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }
}

fn lock(state: &Mutex<SchedulerState>) -> MutexGuard<'_, SchedulerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
