//! Trainer state types

use std::sync::Arc;
use std::time::Instant;

use super::events::{captured_keys, CapturedKey};
use crate::combo::{ComboSequence, EventLog, KeyEvent, KeyId, LastPressTimes};

/// Lifecycle phase of a training run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainerPhase {
    /// No run in progress
    #[default]
    Idle,
    /// Evaluating steps
    Running,
    /// Every step succeeded
    Completed,
    /// Stop was requested mid-run
    Stopped,
}

/// Point-in-time view of the trainer for status displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerSnapshot {
    pub phase: TrainerPhase,
    /// Index of the step being trained; equals `total_steps` once completed
    pub current_step: usize,
    pub total_steps: usize,
    /// One-based attempt number for the current step, 0 before it starts
    pub attempt: u32,
    /// Start of the current attempt, `None` between attempts
    pub step_started_at: Option<Instant>,
    /// Number of key events held in the log
    pub captured_events: usize,
}

/// State shared between the capture callback and the evaluation loop
#[derive(Debug, Clone, Default)]
pub struct TrainerState {
    pub sequence: Arc<ComboSequence>,
    pub current_step: usize,
    pub active: bool,
    pub phase: TrainerPhase,
    pub attempt: u32,
    pub step_started_at: Option<Instant>,
    log: EventLog,
    last_press: LastPressTimes,
}

impl TrainerState {
    /// Fresh state for a run over `sequence`
    pub fn new(sequence: Arc<ComboSequence>) -> Self {
        Self {
            sequence,
            ..Self::default()
        }
    }

    /// Mark the run active and clear anything left from a previous run
    pub fn begin_run(&mut self) {
        self.active = true;
        self.phase = TrainerPhase::Running;
        self.current_step = 0;
        self.attempt = 0;
        self.step_started_at = None;
        self.log.clear();
        self.last_press.clear();
    }

    /// Record a key-down. Ignored unless the run is active.
    pub fn record_press(&mut self, key: KeyId, timestamp: Instant) -> bool {
        if !self.active {
            return false;
        }
        self.last_press.record(key.clone(), timestamp);
        self.log.append(KeyEvent::new(key, timestamp));
        true
    }

    /// Start a new attempt at the current step
    pub fn begin_attempt(&mut self, now: Instant) {
        self.attempt += 1;
        self.step_started_at = Some(now);
    }

    /// Move to the next step after a success
    pub fn advance(&mut self) {
        self.current_step += 1;
        self.attempt = 0;
        self.step_started_at = None;
    }

    /// Discard every event and press at or after `cutoff`
    pub fn reset_since(&mut self, cutoff: Instant) {
        self.log.truncate_from(cutoff);
        self.last_press.remove_from(cutoff);
        self.step_started_at = None;
    }

    /// Finish the run with the given phase
    pub fn finish(&mut self, phase: TrainerPhase) {
        self.active = false;
        self.phase = phase;
        self.step_started_at = None;
    }

    pub fn is_completed(&self) -> bool {
        self.current_step == self.sequence.len()
    }

    pub fn last_press(&self) -> &LastPressTimes {
        &self.last_press
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Captured keys since `start` with inter-arrival delays
    pub fn captured_since(&self, start: Instant) -> Vec<CapturedKey> {
        captured_keys(self.log.snapshot_since(start))
    }

    pub fn snapshot(&self) -> TrainerSnapshot {
        TrainerSnapshot {
            phase: self.phase,
            current_step: self.current_step,
            total_steps: self.sequence.len(),
            attempt: self.attempt,
            step_started_at: self.step_started_at,
            captured_events: self.log.len(),
        }
    }
}
