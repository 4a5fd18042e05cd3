//! Training session
//!
//! This module contains the main types for running a training session:
//! - `TrainerController` - Owns the state and drives the evaluation thread
//! - `TrainerState` - State shared with the capture callback
//! - `StepResult` - Reports emitted when a step resolves

mod events;
mod runner;
mod state;

pub use events::{captured_keys, CapturedKey, EventHandler, StepCallback, StepOutcome, StepResult};
pub use runner::TrainerController;
pub use state::{TrainerPhase, TrainerSnapshot, TrainerState};
