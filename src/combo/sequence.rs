//! Combo step definitions

use std::collections::BTreeSet;
use std::time::Duration;

use super::key::KeyId;
use crate::{Result, TrainerError};

/// One step of a combo: which keys, how long the trainee has, and whether
/// the keys form a chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboStep {
    required_keys: BTreeSet<KeyId>,
    max_delay: Duration,
    simultaneous: bool,
}

impl ComboStep {
    /// Create a validated step
    ///
    /// Fails if `keys` is empty or `max_delay` is zero.
    pub fn new<I, K>(keys: I, max_delay: Duration, simultaneous: bool) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyId>,
    {
        let required_keys: BTreeSet<KeyId> = keys.into_iter().map(Into::into).collect();
        if required_keys.is_empty() {
            return Err(TrainerError::InvalidStepDefinition(
                "step requires at least one key".to_string(),
            ));
        }
        if max_delay.is_zero() {
            return Err(TrainerError::InvalidStepDefinition(
                "max delay must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            required_keys,
            max_delay,
            simultaneous,
        })
    }

    pub fn required_keys(&self) -> &BTreeSet<KeyId> {
        &self.required_keys
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn is_simultaneous(&self) -> bool {
        self.simultaneous
    }
}

/// Ordered list of combo steps, evaluated strictly in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboSequence {
    steps: Vec<ComboStep>,
}

impl ComboSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a step
    pub fn add_step<I, K>(&mut self, keys: I, max_delay: Duration, simultaneous: bool) -> Result<&mut Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyId>,
    {
        let step = ComboStep::new(keys, max_delay, simultaneous)?;
        self.steps.push(step);
        Ok(self)
    }

    /// Append an already validated step
    pub fn push(&mut self, step: ComboStep) {
        self.steps.push(step);
    }

    pub fn get(&self, index: usize) -> Option<&ComboStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComboStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a ComboSequence {
    type Item = &'a ComboStep;
    type IntoIter = std::slice::Iter<'a, ComboStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
