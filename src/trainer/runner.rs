//! Training controller and evaluation loop

use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::events::{EventHandler, StepCallback, StepOutcome, StepResult};
use super::state::{TrainerPhase, TrainerSnapshot, TrainerState};
use crate::capture::{EventCapture, KeyDownCallback, SubscriptionHandle};
use crate::combo::{ComboSequence, ComboStep, KeyId, MatchStatus, StepMatcher};
use crate::config::ComboConfig;
use crate::{Result, TrainerError};

/// State plus the condition variable that signals changes to it
///
/// Notified on every recorded key-down, on stop, and when a run finishes.
struct Shared {
    state: Mutex<TrainerState>,
    changed: Condvar,
}

impl Shared {
    fn on_key_down(&self, key: KeyId, timestamp: Instant) {
        let mut state = self.state.lock();
        log::debug!("Key down: {}", key);
        if state.record_press(key, timestamp) {
            self.changed.notify_all();
        }
    }
}

/// Drives a combo sequence against a key-down source
///
/// Owns the training state; the capture callback and the evaluation thread
/// only reach it through the shared lock.
pub struct TrainerController {
    /// Steps to train; snapshotted at start so a run never sees edits
    sequence: ComboSequence,
    shared: Arc<Shared>,
    /// Listeners for step results
    events: Arc<Mutex<EventHandler>>,
    capture: Arc<dyn EventCapture>,
    subscription: Option<SubscriptionHandle>,
    /// Evaluation thread handle
    worker: Option<JoinHandle<()>>,
}

impl TrainerController {
    /// Create a controller with an empty sequence
    pub fn new(capture: Arc<dyn EventCapture>) -> Self {
        Self::with_sequence(capture, ComboSequence::new())
    }

    /// Create a controller for an existing sequence
    pub fn with_sequence(capture: Arc<dyn EventCapture>, sequence: ComboSequence) -> Self {
        Self {
            sequence,
            shared: Arc::new(Shared {
                state: Mutex::new(TrainerState::default()),
                changed: Condvar::new(),
            }),
            events: Arc::new(Mutex::new(EventHandler::new())),
            capture,
            subscription: None,
            worker: None,
        }
    }

    /// Create a controller for a combo loaded from configuration
    pub fn from_config(capture: Arc<dyn EventCapture>, config: &ComboConfig) -> Result<Self> {
        Ok(Self::with_sequence(capture, config.to_sequence()?))
    }

    /// Append a step to the sequence
    pub fn add_step<I, K>(&mut self, keys: I, max_delay: Duration, simultaneous: bool) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyId>,
    {
        if self.is_running() {
            return Err(TrainerError::AlreadyRunning);
        }
        self.sequence.add_step(keys, max_delay, simultaneous)?;
        Ok(())
    }

    pub fn sequence(&self) -> &ComboSequence {
        &self.sequence
    }

    /// Register a listener for step results
    ///
    /// Listeners run on the evaluation thread and should return quickly.
    pub fn on_step_result(&self, callback: StepCallback) {
        self.events.lock().on_step_result(callback);
    }

    /// Check if a run is active
    pub fn is_running(&self) -> bool {
        self.shared.state.lock().active
    }

    pub fn phase(&self) -> TrainerPhase {
        self.shared.state.lock().phase
    }

    pub fn snapshot(&self) -> TrainerSnapshot {
        self.shared.state.lock().snapshot()
    }

    /// Start training from the first step
    pub fn start_training(&mut self) -> Result<()> {
        if self.sequence.is_empty() {
            return Err(TrainerError::EmptySequence);
        }
        if self.is_running() {
            return Err(TrainerError::AlreadyRunning);
        }

        // A completed run still holds its thread handle and subscription.
        self.release_run();

        {
            let mut state = self.shared.state.lock();
            *state = TrainerState::new(Arc::new(self.sequence.clone()));
            state.begin_run();
        }

        let shared = Arc::clone(&self.shared);
        let callback: KeyDownCallback = Arc::new(move |key, timestamp| shared.on_key_down(key, timestamp));
        self.subscription = Some(self.capture.subscribe(callback));

        let shared = Arc::clone(&self.shared);
        let events = Arc::clone(&self.events);
        let spawned = thread::Builder::new()
            .name("combo-trainer".to_string())
            .spawn(move || run_training_loop(shared, events));

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                log::info!("Training started ({} steps)", self.sequence.len());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to spawn evaluation thread: {}", e);
                self.shared.state.lock().finish(TrainerPhase::Idle);
                self.release_run();
                Err(e.into())
            }
        }
    }

    /// Stop training and wait for the evaluation thread to exit
    ///
    /// Safe to call when idle or after the run completed.
    pub fn stop_training(&mut self) {
        let was_running = self.worker.is_some();
        {
            let mut state = self.shared.state.lock();
            state.active = false;
            self.shared.changed.notify_all();
        }

        self.release_run();
        self.shared.state.lock().finish(TrainerPhase::Idle);

        if was_running {
            log::info!("Training stopped");
        }
    }

    /// Block until the run leaves `Running` or `timeout` elapses
    pub fn wait_for_completion(&self, timeout: Duration) -> TrainerPhase {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        while state.phase == TrainerPhase::Running {
            if self.shared.changed.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.phase
    }

    /// Join the evaluation thread, then drop the capture subscription
    fn release_run(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::error!("Evaluation thread panicked");
            }
        }
        if let Some(subscription) = self.subscription.take() {
            self.capture.unsubscribe(subscription);
        }
    }
}

impl Drop for TrainerController {
    fn drop(&mut self) {
        self.stop_training();
    }
}

fn run_training_loop(shared: Arc<Shared>, events: Arc<Mutex<EventHandler>>) {
    let sequence = Arc::clone(&shared.state.lock().sequence);
    log::debug!("Evaluation thread started");

    loop {
        let result = {
            let mut state = shared.state.lock();
            let step = match sequence.get(state.current_step) {
                Some(step) if state.active => step,
                Some(_) => {
                    finish_run(&shared, &mut state, TrainerPhase::Stopped);
                    return;
                }
                None => {
                    finish_run(&shared, &mut state, TrainerPhase::Completed);
                    return;
                }
            };

            match run_attempt(&shared.changed, &mut state, step) {
                Some(result) => result,
                None => {
                    finish_run(&shared, &mut state, TrainerPhase::Stopped);
                    return;
                }
            }
        };

        match result.outcome {
            StepOutcome::Success => log::info!("{}", result),
            StepOutcome::Timeout => log::warn!("{}", result),
        }
        events.lock().emit(&result);
    }
}

fn finish_run(shared: &Shared, state: &mut TrainerState, phase: TrainerPhase) {
    state.finish(phase);
    shared.changed.notify_all();
    match phase {
        TrainerPhase::Completed => log::info!("Combo completed ({} steps)", state.current_step),
        _ => log::debug!("Evaluation thread exiting ({:?})", phase),
    }
}

/// Run one attempt at `step`, returning `None` if the run was stopped
///
/// The lock is released only while waiting, so every key-down recorded by
/// the capture callback is seen by the next evaluation.
fn run_attempt(
    changed: &Condvar,
    state: &mut MutexGuard<'_, TrainerState>,
    step: &ComboStep,
) -> Option<StepResult> {
    let step_start = Instant::now();
    state.begin_attempt(step_start);
    let matcher = StepMatcher::new(step, step_start);
    let expected_keys: Vec<KeyId> = step.required_keys().iter().cloned().collect();

    loop {
        if !state.active {
            return None;
        }

        match matcher.evaluate(state.last_press(), Instant::now()) {
            MatchStatus::Matched { elapsed } => {
                let result = StepResult {
                    step_index: state.current_step,
                    attempt: state.attempt,
                    outcome: StepOutcome::Success,
                    elapsed,
                    expected_keys,
                    captured_events: state.captured_since(step_start),
                };
                state.advance();
                return Some(result);
            }
            MatchStatus::TimedOut => {
                let result = StepResult {
                    step_index: state.current_step,
                    attempt: state.attempt,
                    outcome: StepOutcome::Timeout,
                    elapsed: step.max_delay(),
                    expected_keys,
                    captured_events: state.captured_since(step_start),
                };
                log::debug!(
                    "Resetting step {} input since attempt start ({} events discarded)",
                    state.current_step + 1,
                    result.captured_events.len()
                );
                state.reset_since(step_start);
                return Some(result);
            }
            MatchStatus::Pending => {
                changed.wait_until(state, matcher.deadline());
            }
        }
    }
}
