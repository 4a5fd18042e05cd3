//! Combo Trainer
//!
//! Trains timed key sequences ("combos"). Each step names one or more keys,
//! a time window, and whether the keys must be pressed together. Key-downs
//! arrive asynchronously from an [`EventCapture`] source; a background thread
//! evaluates the current step against them and reports a [`StepResult`] every
//! time a step succeeds or times out. Timed-out steps are retried until they
//! succeed or training is stopped.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use combo_trainer::{ManualCapture, TrainerController};
//!
//! # fn main() -> combo_trainer::Result<()> {
//! let capture = Arc::new(ManualCapture::new());
//! let mut trainer = TrainerController::new(capture.clone());
//! trainer.add_step(["a"], Duration::from_millis(500), false)?;
//! trainer.add_step(["i", "o"], Duration::from_millis(500), true)?;
//! trainer.on_step_result(Box::new(|result| println!("{}", result)));
//!
//! trainer.start_training()?;
//! // Forward key-downs from the platform hook:
//! capture.press("a");
//! trainer.stop_training();
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod combo;
pub mod config;
mod error;
pub mod trainer;

// Re-export commonly used types
pub use capture::{EventCapture, KeyDownCallback, ManualCapture, SubscriptionHandle};
pub use combo::{
    ComboSequence, ComboStep, EventLog, KeyEvent, KeyId, LastPressTimes, MatchStatus, StepMatcher,
    SIMULTANEITY_TOLERANCE,
};
pub use config::{ComboConfig, ConfigError, StepConfig};
pub use error::{Result, TrainerError};
pub use trainer::{
    CapturedKey, StepOutcome, StepResult, TrainerController, TrainerPhase, TrainerSnapshot,
};
