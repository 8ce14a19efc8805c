use crate::core::observations::Observation;
use crate::core::predictions::Predictions;
use crate::measures::MeasureError;

/// Inputs left after dropping the positions where a prediction or observation is
/// missing, with the original index of every kept row.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRows {
    pub predictions: Predictions,
    pub observations: Vec<Observation>,
    pub weights: Option<Vec<f64>>,
    pub kept: Vec<usize>,
}

impl ValidRows {
    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}

/// Drops every position where either side is missing.
///
/// Required before AUC, which rejects missing entries; optional for the mean-based
/// measures, which exclude them on their own.
pub fn skip_invalid(
    predictions: &Predictions,
    observations: &[Observation],
    weights: Option<&[f64]>,
) -> Result<ValidRows, MeasureError> {
    let n = predictions.len();
    if observations.len() != n {
        return Err(MeasureError::LengthMismatch {
            what: "observations",
            expected: n,
            found: observations.len(),
        });
    }
    if let Some(w) = weights {
        if w.len() != n {
            return Err(MeasureError::LengthMismatch {
                what: "weights",
                expected: n,
                found: w.len(),
            });
        }
    }

    let keep: Vec<bool> = observations
        .iter()
        .enumerate()
        .map(|(i, y)| !predictions.is_missing(i) && !y.is_missing())
        .collect();
    let kept: Vec<usize> = keep
        .iter()
        .enumerate()
        .filter_map(|(i, k)| k.then_some(i))
        .collect();

    tracing::debug!(total = n, kept = kept.len(), "filtered invalid rows");

    Ok(ValidRows {
        predictions: predictions.select(&keep),
        observations: kept.iter().map(|&i| observations[i]).collect(),
        weights: weights.map(|w| kept.iter().map(|&i| w[i]).collect()),
        kept,
    })
}
