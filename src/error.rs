//! Error types for the combo trainer

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for trainer operations
pub type Result<T> = std::result::Result<T, TrainerError>;

/// Errors returned by the builder and lifecycle APIs
///
/// A step timeout is not an error: it is reported as a
/// [`StepOutcome::Timeout`](crate::StepOutcome::Timeout) and retried.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// Training was started before any step was added
    #[error("no combo steps defined")]
    EmptySequence,

    /// A step was rejected before insertion
    #[error("invalid step definition: {0}")]
    InvalidStepDefinition(String),

    /// The operation is not allowed while a run is active
    #[error("training already running")]
    AlreadyRunning,

    /// The evaluation thread could not be spawned
    #[error("failed to spawn evaluation thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// A combo definition file could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}
