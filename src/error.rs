//! Error types for Rankwalk

use thiserror::Error;

/// Errors surfaced by the rankwalk library.
///
/// Malformed edges and empty graphs are not errors: projection skips the
/// former and the latter converge immediately.
#[derive(Error, Debug)]
pub enum RankError {
    /// Damping factor outside the open interval (0, 1)
    #[error("Invalid damping factor {0}: must lie strictly between 0 and 1")]
    InvalidDampingFactor(f64),

    /// Convergence threshold that is not a positive number
    #[error("Invalid convergence threshold {0}: must be greater than 0")]
    InvalidTolerance(f64),

    /// Iteration cap of zero
    #[error("Invalid iteration cap {0}: must be greater than 0")]
    InvalidMaxIterations(usize),

    #[error("Unknown speed '{0}' (expected slow, normal or fast)")]
    UnknownSpeed(String),

    #[error("Unknown preset graph '{0}'")]
    UnknownPreset(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RankError {
    /// Whether this error reports a bad run configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RankError::InvalidDampingFactor(_)
                | RankError::InvalidTolerance(_)
                | RankError::InvalidMaxIterations(_)
                | RankError::UnknownSpeed(_)
        )
    }
}

pub type RankResult<T> = Result<T, RankError>;
