//! Combo definition files
//!
//! Combos can be written in TOML and turned into a [`ComboSequence`]:
//!
//! ```toml
//! name = "Rising slash"
//!
//! [[steps]]
//! keys = ["a"]
//! max_delay = 0.5
//!
//! [[steps]]
//! keys = ["i", "o"]
//! max_delay = 0.5
//! simultaneous = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::combo::{ComboSequence, ComboStep, KeyId};
use crate::{Result, TrainerError};

/// Errors loading a combo definition
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A combo as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComboConfig {
    /// Display name of the combo
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// One step as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    /// Keys for this step (e.g. `["a"]` or `["ctrl", "c"]`)
    pub keys: Vec<KeyId>,
    /// Time allowed for the step, in seconds
    pub max_delay: f64,
    /// Whether the keys must be pressed together
    #[serde(default)]
    pub simultaneous: bool,
}

impl StepConfig {
    /// Validate into a combo step
    pub fn to_step(&self) -> Result<ComboStep> {
        let max_delay = Duration::try_from_secs_f64(self.max_delay).map_err(|_| {
            TrainerError::InvalidStepDefinition(format!(
                "max delay must be a positive number of seconds, got {}",
                self.max_delay
            ))
        })?;
        ComboStep::new(self.keys.iter(), max_delay, self.simultaneous)
    }
}

impl ComboConfig {
    /// Parse a combo definition from a TOML string
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a combo definition from a TOML file
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Build the sequence, rejecting the first malformed step
    pub fn to_sequence(&self) -> Result<ComboSequence> {
        let mut sequence = ComboSequence::new();
        for (i, step) in self.steps.iter().enumerate() {
            let step = step.to_step().map_err(|e| match e {
                TrainerError::InvalidStepDefinition(msg) => {
                    TrainerError::InvalidStepDefinition(format!("step {}: {}", i + 1, msg))
                }
                other => other,
            })?;
            sequence.push(step);
        }
        log::debug!(
            "Loaded combo '{}' with {} steps",
            self.name.as_deref().unwrap_or("unnamed"),
            sequence.len()
        );
        Ok(sequence)
    }
}
