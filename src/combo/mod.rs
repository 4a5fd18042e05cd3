//! Combo definitions and step matching
//!
//! - `ComboSequence` / `ComboStep` - what the trainee must press
//! - `EventLog` / `LastPressTimes` - what the trainee did press
//! - `StepMatcher` - decides whether one step is satisfied

mod event_log;
mod key;
mod matcher;
mod presses;
mod sequence;

pub use event_log::EventLog;
pub use key::{KeyEvent, KeyId};
pub use matcher::{MatchStatus, StepMatcher, SIMULTANEITY_TOLERANCE};
pub use presses::LastPressTimes;
pub use sequence::{ComboSequence, ComboStep};
