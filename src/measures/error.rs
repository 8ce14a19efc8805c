use crate::core::distributions::DistributionFamily;
use crate::core::error::DistributionError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("{measure} does not support {family} predictions; supported families: {supported}")]
    UnsupportedDistributionFamily {
        measure: &'static str,
        family: DistributionFamily,
        supported: String,
    },

    #[error("invalid parameter for {measure}: {reason}")]
    InvalidParameter {
        measure: &'static str,
        reason: String,
    },

    #[error("degenerate input for {measure}: {reason}")]
    DegenerateInput {
        measure: &'static str,
        reason: String,
    },

    #[error("{measure} does not accept missing values ({count} found); filter invalid rows first")]
    MissingValues { measure: &'static str, count: usize },

    #[error("{measure} does not support weights")]
    WeightsUnsupported { measure: &'static str },

    #[error("invalid weight {weight} at position {index}; weights must be finite and >= 0")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("length mismatch: {what} has {found} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("observation {observation} at position {index} is not an outcome of a {family} prediction")]
    TargetMismatch {
        index: usize,
        family: DistributionFamily,
        observation: String,
    },

    #[error("the {family} prediction at position {index} has a non-finite density at {observation}")]
    NonFiniteDensity {
        index: usize,
        family: DistributionFamily,
        observation: String,
    },

    #[error("{measure} requires exactly two classes, found {found}")]
    NotBinary { measure: &'static str, found: usize },

    #[error("{measure} is computed over the whole array and has no per-observation value")]
    NotDecomposable { measure: &'static str },

    #[error(transparent)]
    Distribution(#[from] DistributionError),
}
