use thiserror::Error;

/// Errors raised while building distributions, class sets or prediction arrays.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("invalid parameter for {family}: {reason}")]
    InvalidParameter {
        family: &'static str,
        reason: String,
    },

    #[error("invalid probabilities: {0}")]
    InvalidProbabilities(String),

    #[error("invalid class set: {0}")]
    InvalidClassSet(String),

    #[error("unknown class label '{0}'")]
    UnknownClass(String),

    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("class set mismatch at position {0}")]
    ClassSetMismatch(usize),
}

impl DistributionError {
    pub(crate) fn parameter<R: Into<String>>(family: &'static str, reason: R) -> Self {
        DistributionError::InvalidParameter {
            family,
            reason: reason.into(),
        }
    }
}
