use crate::core::observations::Observation;
use crate::core::predictions::Predictions;
use crate::evaluation::{Estimator, MeanEstimator, Measurement};
use crate::measures::scoring_rules;
use crate::measures::validation::{FamilyRegistry, Validator};
use crate::measures::{Measure, MeasureError, MeasureKind};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which scoring loop an [`Evaluator`] runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EvaluationPath {
    /// Bulk for finite arrays, per-observation otherwise.
    #[default]
    Auto,
    /// One distribution at a time, for every prediction type.
    PerObservation,
    /// Vectorized over the probability matrix; falls back to per-observation for
    /// generic predictions.
    Bulk,
}

/// Batch evaluation of measures over prediction and observation arrays.
///
/// Every call validates its inputs once, scores each position, then reduces
/// sequentially in index order. Missing positions are excluded from the mean and
/// from the weighting.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    validator: Validator<'r>,
    path: EvaluationPath,
}

impl Evaluator<'static> {
    pub fn standard() -> Self {
        Self::new(FamilyRegistry::standard())
    }
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r FamilyRegistry) -> Self {
        Self {
            validator: Validator::new(registry),
            path: EvaluationPath::Auto,
        }
    }

    pub fn with_path(mut self, path: EvaluationPath) -> Self {
        self.path = path;
        self
    }

    pub fn path(&self) -> EvaluationPath {
        self.path
    }

    pub fn validator(&self) -> &Validator<'r> {
        &self.validator
    }

    /// Mean score (or AUC) over all non-missing positions.
    pub fn call(
        &self,
        measure: &Measure,
        predictions: &Predictions,
        observations: &[Observation],
    ) -> Result<f64, MeasureError> {
        self.aggregate(measure, predictions, observations, None)
    }

    /// Mean of `score[i] * weights[i]` over the non-missing positions.
    pub fn call_weighted(
        &self,
        measure: &Measure,
        predictions: &Predictions,
        observations: &[Observation],
        weights: &[f64],
    ) -> Result<f64, MeasureError> {
        self.aggregate(measure, predictions, observations, Some(weights))
    }

    /// Unreduced per-observation values, `None` where either side is missing.
    pub fn measurements(
        &self,
        measure: &Measure,
        predictions: &Predictions,
        observations: &[Observation],
    ) -> Result<Vec<Option<f64>>, MeasureError> {
        if measure.kind() == MeasureKind::Auc {
            return Err(MeasureError::NotDecomposable {
                measure: measure.name(),
            });
        }
        self.validator.validate(measure, predictions, observations, None)?;
        Ok(self.values(measure, predictions, observations))
    }

    /// Evaluates several measures on the same inputs, stopping at the first error.
    pub fn evaluate(
        &self,
        measures: &[Measure],
        predictions: &Predictions,
        observations: &[Observation],
        weights: Option<&[f64]>,
    ) -> Result<Vec<Measurement>, MeasureError> {
        measures
            .iter()
            .map(|m| {
                self.aggregate(m, predictions, observations, weights)
                    .map(|v| Measurement::from_measure(m, v))
            })
            .collect()
    }

    fn aggregate(
        &self,
        measure: &Measure,
        predictions: &Predictions,
        observations: &[Observation],
        weights: Option<&[f64]>,
    ) -> Result<f64, MeasureError> {
        self.validator
            .validate(measure, predictions, observations, weights)?;

        if measure.kind() == MeasureKind::Auc {
            tracing::debug!(measure = measure.name(), n = predictions.len(), "evaluating AUC");
            return scoring_rules::auc::auc(predictions, observations);
        }

        let values = self.values(measure, predictions, observations);
        weighted_mean::<MeanEstimator>(measure, &values, weights)
    }

    fn resolve_path(&self, predictions: &Predictions) -> EvaluationPath {
        match (self.path, predictions) {
            (EvaluationPath::PerObservation, _) | (_, Predictions::Generic(_)) => {
                EvaluationPath::PerObservation
            }
            (_, Predictions::Finite(_)) => EvaluationPath::Bulk,
        }
    }

    fn values(
        &self,
        measure: &Measure,
        predictions: &Predictions,
        observations: &[Observation],
    ) -> Vec<Option<f64>> {
        let path = self.resolve_path(predictions);
        tracing::debug!(
            measure = measure.name(),
            n = predictions.len(),
            path = %path,
            "scoring observations"
        );
        match (path, predictions) {
            (EvaluationPath::Bulk, Predictions::Finite(a)) => {
                scoring_rules::score_bulk(measure, a, observations)
            }
            _ => observations
                .iter()
                .enumerate()
                .map(|(i, y)| {
                    predictions
                        .get(i)
                        .and_then(|d| scoring_rules::score(measure, &d, y))
                })
                .collect(),
        }
    }
}

/// Arithmetic mean of `v * w` over the present values.
fn weighted_mean<E: Estimator + Default>(
    measure: &Measure,
    values: &[Option<f64>],
    weights: Option<&[f64]>,
) -> Result<f64, MeasureError> {
    let mut estimator = E::default();
    for (i, v) in values.iter().enumerate() {
        if let Some(v) = v {
            let w = weights.map_or(1.0, |w| w[i]);
            estimator.add(v * w);
        }
    }
    if estimator.count() == 0 {
        return Err(MeasureError::DegenerateInput {
            measure: measure.name(),
            reason: "no non-missing observations to average".to_string(),
        });
    }
    Ok(estimator.estimation())
}

/// [`Evaluator::call`] with the standard family registry.
pub fn call(
    measure: &Measure,
    predictions: &Predictions,
    observations: &[Observation],
) -> Result<f64, MeasureError> {
    Evaluator::standard().call(measure, predictions, observations)
}

/// [`Evaluator::call_weighted`] with the standard family registry.
pub fn call_weighted(
    measure: &Measure,
    predictions: &Predictions,
    observations: &[Observation],
    weights: &[f64],
) -> Result<f64, MeasureError> {
    Evaluator::standard().call_weighted(measure, predictions, observations, weights)
}
