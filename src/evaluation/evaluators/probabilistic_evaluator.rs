use crate::core::distributions::{ClassSetRef, Distribution, DistributionFamily};
use crate::core::error::DistributionError;
use crate::core::observations::Observation;
use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};
use crate::measures::scoring_rules::{self, auc_from_scores};
use crate::measures::validation::{FamilyRegistry, Validator};
use crate::measures::{Measure, MeasureError, MeasureKind};

const POSITIVE: usize = 1;

/// Online evaluator over a fixed list of measures.
///
/// Mean-based measures accumulate `score * weight` in one estimator each. AUC keeps
/// the positive-class probability and label of every pair and is reported once
/// both classes have been observed; it is unweighted.
///
/// A pair is validated against every measure before any state changes, so a
/// rejected pair leaves the evaluator untouched.
pub struct ProbabilisticEvaluator<'r, E: Estimator + Default> {
    validator: Validator<'r>,
    measures: Vec<Measure>,
    estimators: Vec<E>,
    auc_scores: Vec<f64>,
    auc_labels: Vec<bool>,
    auc_classes: Option<ClassSetRef>,
    seen: usize,
}

impl<E: Estimator + Default> ProbabilisticEvaluator<'static, E> {
    pub fn new(measures: Vec<Measure>) -> Self {
        Self::with_registry(FamilyRegistry::standard(), measures)
    }
}

impl<'r, E: Estimator + Default> ProbabilisticEvaluator<'r, E> {
    pub fn with_registry(registry: &'r FamilyRegistry, measures: Vec<Measure>) -> Self {
        let estimators = measures.iter().map(|_| E::default()).collect();
        Self {
            validator: Validator::new(registry),
            measures,
            estimators,
            auc_scores: Vec::new(),
            auc_labels: Vec::new(),
            auc_classes: None,
            seen: 0,
        }
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// Pairs fed so far, including skipped ones.
    pub fn seen(&self) -> usize {
        self.seen
    }

    fn tracks_auc(&self) -> bool {
        self.measures.iter().any(|m| m.kind() == MeasureKind::Auc)
    }

    /// Positive-class probability and label of a binary pair.
    fn auc_entry(&self, d: &Distribution, y: &Observation) -> Result<(f64, bool), MeasureError> {
        let auc = Measure::Auc;
        let Distribution::Finite(f) = d else {
            return Err(MeasureError::UnsupportedDistributionFamily {
                measure: auc.name(),
                family: d.family(),
                supported: self.validator.registry().describe(MeasureKind::Auc),
            });
        };
        if !f.classes().is_binary() {
            return Err(MeasureError::NotBinary {
                measure: auc.name(),
                found: f.classes().len(),
            });
        }
        if let Some(classes) = &self.auc_classes {
            if !f.shares_classes_with(classes) {
                return Err(DistributionError::ClassSetMismatch(self.seen).into());
            }
        }
        let label = match *y {
            Observation::Class(c) if c < 2 => c == POSITIVE,
            _ => {
                return Err(MeasureError::TargetMismatch {
                    index: self.seen,
                    family: DistributionFamily::Finite,
                    observation: format!("{y:?}"),
                });
            }
        };
        let score = f.pdf(POSITIVE).unwrap_or(f64::NAN);
        Ok((score, label))
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for ProbabilisticEvaluator<'_, E> {
    fn reset(&mut self) {
        self.estimators = self.measures.iter().map(|_| E::default()).collect();
        self.auc_scores.clear();
        self.auc_labels.clear();
        self.auc_classes = None;
        self.seen = 0;
    }

    fn add_result(
        &mut self,
        prediction: Option<&Distribution>,
        observation: &Observation,
        weight: f64,
    ) -> Result<(), MeasureError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(MeasureError::InvalidWeight {
                index: self.seen,
                weight,
            });
        }
        let Some(d) = prediction.filter(|_| !observation.is_missing()) else {
            self.seen += 1;
            return Ok(());
        };

        for m in self.measures.iter().filter(|m| m.kind() != MeasureKind::Auc) {
            self.validator.validate_single(m, Some(d), observation)?;
        }
        let auc_entry = if self.tracks_auc() {
            Some(self.auc_entry(d, observation)?)
        } else {
            None
        };

        for (m, est) in self.measures.iter().zip(self.estimators.iter_mut()) {
            if let Some(v) = scoring_rules::score(m, d, observation) {
                est.add(v * weight);
            }
        }
        if let Some((score, label)) = auc_entry {
            if let Distribution::Finite(f) = d {
                self.auc_classes.get_or_insert_with(|| f.class_set().clone());
            }
            self.auc_scores.push(score);
            self.auc_labels.push(label);
        }
        self.seen += 1;
        Ok(())
    }

    fn performance(&self) -> Vec<Measurement> {
        let mut out = Vec::with_capacity(self.measures.len());
        for (m, est) in self.measures.iter().zip(&self.estimators) {
            let value = if m.kind() == MeasureKind::Auc {
                let has_both = self.auc_labels.iter().any(|l| *l) && self.auc_labels.iter().any(|l| !*l);
                if !has_both {
                    continue;
                }
                match auc_from_scores(&self.auc_scores, &self.auc_labels) {
                    Ok(v) => v,
                    Err(_) => continue,
                }
            } else {
                if est.count() == 0 {
                    continue;
                }
                est.estimation()
            };
            out.push(Measurement::from_measure(m, value));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distributions::{ContinuousDistribution, FiniteDistribution};
    use crate::core::predictions::Predictions;
    use crate::evaluation::{MeanEstimator, PerformanceEvaluatorExt, call, call_weighted};
    use crate::testing::fixtures;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn evaluator(measures: Vec<Measure>) -> ProbabilisticEvaluator<'static, MeanEstimator> {
        ProbabilisticEvaluator::new(measures)
    }

    #[test]
    fn online_matches_batch() {
        let (preds, ys) = fixtures::synthetic_binary(300, 5);
        let ms = vec![
            Measure::auc(),
            Measure::log_loss(),
            Measure::brier_score(),
            Measure::spherical_score(),
        ];
        let mut ev = evaluator(ms.clone());
        for (i, y) in ys.iter().enumerate() {
            let d = preds.get(i).unwrap();
            ev.add_result(Some(&*d), y, 1.0).unwrap();
        }
        assert_eq!(ev.seen(), 300);
        for m in &ms {
            let online = ev.metric(m.name()).unwrap();
            let batch = call(m, &preds, &ys).unwrap();
            assert!(approx_eq(online, batch, 1e-12), "{}: {online} vs {batch}", m.name());
        }
    }

    #[test]
    fn weights_follow_batch_semantics() {
        let (preds, ys) = fixtures::synthetic_binary(50, 9);
        let weights: Vec<f64> = (0..50).map(|i| (i % 4) as f64 * 0.5).collect();
        let mut ev = evaluator(vec![Measure::brier_loss()]);
        for (i, y) in ys.iter().enumerate() {
            let d = preds.get(i).unwrap();
            ev.add_result(Some(&*d), y, weights[i]).unwrap();
        }
        let batch = call_weighted(&Measure::brier_loss(), &preds, &ys, &weights).unwrap();
        assert!(approx_eq(ev.metric("BrierLoss").unwrap(), batch, 1e-12));
    }

    #[test]
    fn auc_waits_for_both_classes() {
        let classes = fixtures::binary_classes();
        let mut ev = evaluator(vec![Measure::auc(), Measure::log_score()]);
        let d: Distribution = FiniteDistribution::binary(classes.clone(), 0.9).unwrap().into();
        ev.add_result(Some(&d), &Observation::Class(1), 1.0).unwrap();
        assert_eq!(ev.metric("AreaUnderCurve"), None);
        assert!(ev.metric("LogScore").is_some());

        let d: Distribution = FiniteDistribution::binary(classes, 0.2).unwrap().into();
        ev.add_result(Some(&d), &Observation::Class(0), 1.0).unwrap();
        assert_eq!(ev.metric("AreaUnderCurve"), Some(1.0));

        ev.reset();
        assert!(ev.performance().is_empty());
        assert_eq!(ev.seen(), 0);
    }

    #[test]
    fn missing_pairs_are_skipped() {
        let mut ev = evaluator(vec![Measure::log_loss()]);
        let d: Distribution = ContinuousDistribution::normal(0.0, 1.0).unwrap().into();
        ev.add_result(None, &Observation::Real(1.0), 1.0).unwrap();
        ev.add_result(Some(&d), &Observation::Missing, 1.0).unwrap();
        assert_eq!(ev.seen(), 2);
        assert!(ev.performance().is_empty());
    }

    #[test]
    fn rejected_pairs_leave_state_untouched() {
        let mut ev = evaluator(vec![Measure::brier_score(), Measure::auc()]);
        let d: Distribution = ContinuousDistribution::normal(0.0, 1.0).unwrap().into();
        assert!(matches!(
            ev.add_result(Some(&d), &Observation::Real(0.0), 1.0),
            Err(MeasureError::UnsupportedDistributionFamily { .. })
        ));
        assert!(matches!(
            ev.add_result(Some(&d), &Observation::Real(0.0), -1.0),
            Err(MeasureError::InvalidWeight { .. })
        ));
        assert_eq!(ev.seen(), 0);
        assert!(ev.performance().is_empty());
    }

    #[test]
    fn auc_rejects_a_second_class_set() {
        let mut ev = evaluator(vec![Measure::auc()]);
        let first: Distribution =
            FiniteDistribution::binary(fixtures::binary_classes(), 0.4).unwrap().into();
        ev.add_result(Some(&first), &Observation::Class(0), 1.0).unwrap();

        let other = crate::core::distributions::ClassSet::shared(["x", "y"]).unwrap();
        let second: Distribution = FiniteDistribution::binary(other, 0.4).unwrap().into();
        assert!(matches!(
            ev.add_result(Some(&second), &Observation::Class(1), 1.0),
            Err(MeasureError::Distribution(DistributionError::ClassSetMismatch(1)))
        ));
    }

    #[test]
    fn predictions_fixture_is_finite() {
        let (preds, _) = fixtures::synthetic_binary(5, 0);
        assert!(matches!(preds, Predictions::Finite(_)));
    }
}
