//! Per-observation scoring kernels and the whole-array AUC.
//!
//! Each rule has a per-observation form working on any [`Distribution`] and a bulk
//! form working on the probability matrix of a [`FiniteArray`]. Both forms share
//! the same scalar kernels, so they agree up to the order in which row norms are
//! summed.

pub mod auc;
pub mod brier_score;
pub mod log_score;
pub mod spherical_score;

use crate::core::distributions::Distribution;
use crate::core::observations::Observation;
use crate::core::predictions::FiniteArray;
use crate::measures::Measure;

pub use auc::auc_from_scores;

/// Per-observation value of a mean-based measure, `None` when missing.
///
/// AUC has no per-observation value and always yields `None`.
pub(crate) fn score(measure: &Measure, d: &Distribution, y: &Observation) -> Option<f64> {
    match *measure {
        Measure::LogScore(p) => log_score::log_score(d, y, p.tol),
        Measure::LogLoss(p) => log_score::log_score(d, y, p.tol).map(|s| -s),
        Measure::BrierScore => brier_score::brier_score(d, y),
        Measure::BrierLoss => brier_score::brier_score(d, y).map(|s| -s),
        Measure::SphericalScore(p) => spherical_score::spherical_score(d, y, p.alpha),
        Measure::Auc => None,
    }
}

/// Bulk per-observation values over a finite array.
pub(crate) fn score_bulk(
    measure: &Measure,
    preds: &FiniteArray,
    ys: &[Observation],
) -> Vec<Option<f64>> {
    let negate = |v: Vec<Option<f64>>| -> Vec<Option<f64>> {
        v.into_iter().map(|s| s.map(|s| -s)).collect()
    };
    match *measure {
        Measure::LogScore(p) => log_score::log_score_bulk(preds, ys, p.tol),
        Measure::LogLoss(p) => negate(log_score::log_score_bulk(preds, ys, p.tol)),
        Measure::BrierScore => brier_score::brier_score_bulk(preds, ys),
        Measure::BrierLoss => negate(brier_score::brier_score_bulk(preds, ys)),
        Measure::SphericalScore(p) => spherical_score::spherical_score_bulk(preds, ys, p.alpha),
        Measure::Auc => vec![None; ys.len()],
    }
}
