use crate::core::distributions::{Distribution, DistributionFamily};
use crate::core::error::DistributionError;
use crate::core::observations::{Observation, TargetKind};
use crate::core::predictions::{FiniteArray, Predictions};
use crate::measures::validation::FamilyRegistry;
use crate::measures::{Measure, MeasureError, MeasureKind};

/// Checks a measure against its inputs before any score is computed.
///
/// One pass over the inputs per evaluation call; the scoring loops that follow
/// assume every check here has passed.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r FamilyRegistry,
}

impl Validator<'static> {
    pub fn standard() -> Self {
        Self::new(FamilyRegistry::standard())
    }
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r FamilyRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r FamilyRegistry {
        self.registry
    }

    pub fn validate(
        &self,
        measure: &Measure,
        predictions: &Predictions,
        observations: &[Observation],
        weights: Option<&[f64]>,
    ) -> Result<(), MeasureError> {
        measure.check_parameters()?;

        let n = predictions.len();
        if observations.len() != n {
            return Err(MeasureError::LengthMismatch {
                what: "observations",
                expected: n,
                found: observations.len(),
            });
        }
        if let Some(w) = weights {
            self.check_weights(measure, w, n)?;
        }

        match predictions {
            Predictions::Finite(a) => self.check_finite_array(measure, a, observations)?,
            Predictions::Generic(v) => {
                for (i, (d, y)) in v.iter().zip(observations).enumerate() {
                    if let Some(d) = d {
                        self.check_pair(measure, i, d, y)?;
                    }
                }
            }
        }

        if measure.kind() == MeasureKind::Auc {
            self.check_auc(measure, predictions, observations)?;
        }
        Ok(())
    }

    /// Checks for a single prediction/observation pair.
    pub fn validate_single(
        &self,
        measure: &Measure,
        prediction: Option<&Distribution>,
        observation: &Observation,
    ) -> Result<(), MeasureError> {
        measure.check_parameters()?;
        if measure.kind() == MeasureKind::Auc {
            return Err(MeasureError::NotDecomposable {
                measure: measure.name(),
            });
        }
        if let Some(d) = prediction {
            self.check_pair(measure, 0, d, observation)?;
        }
        Ok(())
    }

    fn check_family(&self, measure: &Measure, family: DistributionFamily) -> Result<(), MeasureError> {
        if self.registry.accepts(measure.kind(), family) {
            return Ok(());
        }
        tracing::warn!(
            measure = measure.name(),
            family = %family,
            "rejected unsupported distribution family"
        );
        Err(MeasureError::UnsupportedDistributionFamily {
            measure: measure.name(),
            family,
            supported: self.registry.describe(measure.kind()),
        })
    }

    fn check_pair(
        &self,
        measure: &Measure,
        index: usize,
        d: &Distribution,
        y: &Observation,
    ) -> Result<(), MeasureError> {
        let family = d.family();
        self.check_family(measure, family)?;

        if let Measure::SphericalScore(p) = measure {
            if p.alpha != 2.0 && d.target_kind() != TargetKind::Finite {
                return Err(MeasureError::InvalidParameter {
                    measure: measure.name(),
                    reason: format!(
                        "alpha must equal 2 for non-finite targets ({family} prediction), got {}",
                        p.alpha
                    ),
                });
            }
        }

        if measure.kind().uses_squared_l2_norm() && d.target_kind() != TargetKind::Finite {
            match d.squared_l2_norm() {
                Some(v) if v.is_finite() => {}
                Some(_) => {
                    return Err(MeasureError::InvalidParameter {
                        measure: measure.name(),
                        reason: format!(
                            "the {family} prediction at position {index} is not square-integrable"
                        ),
                    });
                }
                None => {
                    return Err(MeasureError::UnsupportedDistributionFamily {
                        measure: measure.name(),
                        family,
                        supported: self.registry.describe(measure.kind()),
                    });
                }
            }
        }

        if y.is_missing() {
            return Ok(());
        }
        if !d.accepts(y) {
            return Err(MeasureError::TargetMismatch {
                index,
                family,
                observation: format!("{y:?}"),
            });
        }
        // densities with a pole (shape or dof below 1) are infinite at the boundary
        if d.pdf(y).is_some_and(|p| !p.is_finite()) {
            return Err(MeasureError::NonFiniteDensity {
                index,
                family,
                observation: format!("{y:?}"),
            });
        }
        Ok(())
    }

    fn check_finite_array(
        &self,
        measure: &Measure,
        a: &FiniteArray,
        ys: &[Observation],
    ) -> Result<(), MeasureError> {
        if a.missing_count() < a.len() {
            self.check_family(measure, DistributionFamily::Finite)?;
        }
        let k = a.classes().len();
        for (i, y) in ys.iter().enumerate() {
            if a.is_missing(i) || y.is_missing() {
                continue;
            }
            if !matches!(y, Observation::Class(c) if *c < k) {
                return Err(MeasureError::TargetMismatch {
                    index: i,
                    family: DistributionFamily::Finite,
                    observation: format!("{y:?}"),
                });
            }
        }
        Ok(())
    }

    fn check_weights(&self, measure: &Measure, w: &[f64], n: usize) -> Result<(), MeasureError> {
        if !measure.supports_weights() {
            return Err(MeasureError::WeightsUnsupported {
                measure: measure.name(),
            });
        }
        if w.len() != n {
            return Err(MeasureError::LengthMismatch {
                what: "weights",
                expected: n,
                found: w.len(),
            });
        }
        if let Some((index, &weight)) = w
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(MeasureError::InvalidWeight { index, weight });
        }
        Ok(())
    }

    fn check_auc(
        &self,
        measure: &Measure,
        predictions: &Predictions,
        ys: &[Observation],
    ) -> Result<(), MeasureError> {
        let missing = (0..predictions.len())
            .filter(|&i| predictions.is_missing(i) || ys[i].is_missing())
            .count();
        if missing > 0 {
            return Err(MeasureError::MissingValues {
                measure: measure.name(),
                count: missing,
            });
        }

        let classes = match predictions {
            Predictions::Finite(a) => a.class_set(),
            Predictions::Generic(v) => {
                let mut first = None;
                for (i, d) in v.iter().enumerate() {
                    let Some(Distribution::Finite(f)) = d else {
                        continue;
                    };
                    match first {
                        None => first = Some(f.class_set()),
                        Some(c) if !f.shares_classes_with(c) => {
                            return Err(DistributionError::ClassSetMismatch(i).into());
                        }
                        Some(_) => {}
                    }
                }
                match first {
                    Some(c) => c,
                    None => return Ok(()),
                }
            }
        };
        if !classes.is_binary() {
            return Err(MeasureError::NotBinary {
                measure: measure.name(),
                found: classes.len(),
            });
        }
        Ok(())
    }
}
