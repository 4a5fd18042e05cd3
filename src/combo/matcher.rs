//! Step evaluation
//!
//! Decides whether the presses captured since a step started satisfy it,
//! and whether the step's deadline has passed.

use std::time::{Duration, Instant};

use super::presses::LastPressTimes;
use super::sequence::ComboStep;

/// Maximum spread between press timestamps for a chord to count as one press
pub const SIMULTANEITY_TOLERANCE: Duration = Duration::from_millis(100);

/// Result of evaluating a step at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// Matched before the deadline
    Matched {
        /// Time from step start to the press that completed the step
        elapsed: Duration,
    },
    /// Deadline reached without a match
    TimedOut,
    /// Neither matched nor expired yet
    Pending,
}

/// Evaluates one step against captured presses
pub struct StepMatcher<'a> {
    step: &'a ComboStep,
    step_start: Instant,
}

impl<'a> StepMatcher<'a> {
    /// Create a matcher for `step` starting at `step_start`
    pub fn new(step: &'a ComboStep, step_start: Instant) -> Self {
        Self { step, step_start }
    }

    pub fn step_start(&self) -> Instant {
        self.step_start
    }

    /// Instant at which the step is judged a timeout
    pub fn deadline(&self) -> Instant {
        self.step_start + self.step.max_delay()
    }

    /// Evaluate the step as of `now`
    pub fn evaluate(&self, presses: &LastPressTimes, now: Instant) -> MatchStatus {
        let deadline = self.deadline();
        if let Some(matched_at) = self.match_time(presses) {
            if matched_at < deadline {
                return MatchStatus::Matched {
                    elapsed: matched_at.duration_since(self.step_start),
                };
            }
        }

        if now >= deadline {
            MatchStatus::TimedOut
        } else {
            MatchStatus::Pending
        }
    }

    /// Instant at which the step became satisfied, ignoring the deadline
    ///
    /// A chord completes at its latest press. Any other step completes at
    /// the earliest press of any required key.
    pub fn match_time(&self, presses: &LastPressTimes) -> Option<Instant> {
        let pressed: Vec<Instant> = self
            .step
            .required_keys()
            .iter()
            .filter_map(|key| presses.pressed_since(key, self.step_start))
            .collect();

        if self.step.is_simultaneous() {
            if pressed.len() != self.step.required_keys().len() {
                return None;
            }
            let first = pressed.iter().min()?;
            let last = pressed.iter().max()?;
            if last.duration_since(*first) <= SIMULTANEITY_TOLERANCE {
                Some(*last)
            } else {
                None
            }
        } else {
            // Any single required key satisfies a non-chord step.
            pressed.into_iter().min()
        }
    }
}
