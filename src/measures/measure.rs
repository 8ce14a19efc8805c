use crate::core::distributions::Distribution;
use crate::core::observations::Observation;
use crate::measures::metadata::{self, MeasureTraits, Orientation};
use crate::measures::parameters::{LogParameters, SphericalParameters};
use crate::measures::scoring_rules;
use crate::measures::validation::Validator;
use crate::measures::MeasureError;
use anyhow::Result as AnyResult;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// A scoring rule together with its parameters.
///
/// Measures are immutable values: build one (usually from an alias), then reuse it
/// across any number of evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(MeasureKind))]
#[strum_discriminants(derive(Hash, EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum Measure {
    #[strum_discriminants(strum(
        message = "AUC",
        detailed_message = "Area under the ROC curve of binary probabilistic predictions (Mann-Whitney U)."
    ))]
    Auc,
    #[strum_discriminants(strum(
        message = "Log score",
        detailed_message = "log(clamp(p(y), tol, 1 - tol)) for masses, log(max(p(y), tol)) for densities; higher is better."
    ))]
    LogScore(LogParameters),
    #[strum_discriminants(strum(
        message = "Log loss",
        detailed_message = "Negated log score (cross entropy); masses are clamped to [tol, 1 - tol], densities only below at tol; lower is better."
    ))]
    LogLoss(LogParameters),
    #[strum_discriminants(strum(
        message = "Brier score",
        detailed_message = "2 p(y) - ||p||^2 (minus 1 for finite targets); higher is better."
    ))]
    BrierScore,
    #[strum_discriminants(strum(
        message = "Brier loss",
        detailed_message = "Negated Brier score; lower is better."
    ))]
    BrierLoss,
    #[strum_discriminants(strum(
        message = "Spherical score",
        detailed_message = "(p(y) / ||p||_alpha)^(alpha - 1); higher is better."
    ))]
    SphericalScore(SphericalParameters),
}

impl MeasureKind {
    pub fn traits(self) -> &'static MeasureTraits {
        match self {
            MeasureKind::Auc => &metadata::AUC,
            MeasureKind::LogScore => &metadata::LOG_SCORE,
            MeasureKind::LogLoss => &metadata::LOG_LOSS,
            MeasureKind::BrierScore => &metadata::BRIER_SCORE,
            MeasureKind::BrierLoss => &metadata::BRIER_LOSS,
            MeasureKind::SphericalScore => &metadata::SPHERICAL_SCORE,
        }
    }

    /// Measures using the squared L2 norm of the predicted density.
    pub fn uses_squared_l2_norm(self) -> bool {
        matches!(
            self,
            MeasureKind::BrierScore | MeasureKind::BrierLoss | MeasureKind::SphericalScore
        )
    }

    /// The measure with default parameters.
    pub fn default_measure(self) -> Measure {
        match self {
            MeasureKind::Auc => Measure::Auc,
            MeasureKind::LogScore => Measure::LogScore(LogParameters::default()),
            MeasureKind::LogLoss => Measure::LogLoss(LogParameters::default()),
            MeasureKind::BrierScore => Measure::BrierScore,
            MeasureKind::BrierLoss => Measure::BrierLoss,
            MeasureKind::SphericalScore => Measure::SphericalScore(SphericalParameters::default()),
        }
    }
}

impl Measure {
    pub fn auc() -> Self {
        Measure::Auc
    }

    /// Log score with `tol = f64::EPSILON`.
    pub fn log_score() -> Self {
        Measure::LogScore(LogParameters::default())
    }

    /// Log score clamping probabilities to `[tol, 1 - tol]`; `tol` must lie in `(0, 0.5)`.
    pub fn log_score_with_tol(tol: f64) -> Result<Self, MeasureError> {
        let m = Measure::LogScore(LogParameters { tol });
        m.check_parameters()?;
        Ok(m)
    }

    pub fn log_loss() -> Self {
        Measure::LogLoss(LogParameters::default())
    }

    pub fn log_loss_with_tol(tol: f64) -> Result<Self, MeasureError> {
        let m = Measure::LogLoss(LogParameters { tol });
        m.check_parameters()?;
        Ok(m)
    }

    pub fn brier_score() -> Self {
        Measure::BrierScore
    }

    pub fn brier_loss() -> Self {
        Measure::BrierLoss
    }

    /// Spherical score with `alpha = 2`.
    pub fn spherical_score() -> Self {
        Measure::SphericalScore(SphericalParameters::default())
    }

    /// `alpha` must be finite and `> 1`; values other than 2 only apply to finite targets.
    pub fn spherical_score_with_alpha(alpha: f64) -> Result<Self, MeasureError> {
        let m = Measure::SphericalScore(SphericalParameters { alpha });
        m.check_parameters()?;
        Ok(m)
    }

    #[inline]
    pub fn kind(&self) -> MeasureKind {
        MeasureKind::from(self)
    }

    #[inline]
    pub fn traits(&self) -> &'static MeasureTraits {
        self.kind().traits()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.traits().name
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.traits().orientation
    }

    #[inline]
    pub fn supports_weights(&self) -> bool {
        self.traits().supports_weights
    }

    /// Range checks on `tol` and `alpha`.
    pub fn check_parameters(&self) -> Result<(), MeasureError> {
        match *self {
            Measure::LogScore(LogParameters { tol }) | Measure::LogLoss(LogParameters { tol }) => {
                if !(tol > 0.0 && tol < 0.5) {
                    return Err(MeasureError::InvalidParameter {
                        measure: self.name(),
                        reason: format!("tol must lie in (0, 0.5), got {tol}"),
                    });
                }
            }
            Measure::SphericalScore(SphericalParameters { alpha }) => {
                if !(alpha.is_finite() && alpha > 1.0) {
                    return Err(MeasureError::InvalidParameter {
                        measure: self.name(),
                        reason: format!("alpha must be finite and > 1, got {alpha}"),
                    });
                }
            }
            Measure::Auc | Measure::BrierScore | Measure::BrierLoss => {}
        }
        Ok(())
    }

    /// Score of one prediction against one observation.
    ///
    /// `Ok(None)` when either side is missing. The pair is validated against the
    /// standard family registry first, so unsupported families and parameter errors
    /// are reported rather than scored.
    pub fn single(
        &self,
        prediction: Option<&Distribution>,
        observation: &Observation,
    ) -> Result<Option<f64>, MeasureError> {
        Validator::standard().validate_single(self, prediction, observation)?;
        let Some(d) = prediction else {
            return Ok(None);
        };
        Ok(scoring_rules::score(self, d, observation))
    }

    /// JSON schema of the tagged measure configuration.
    pub fn schema() -> Schema {
        schema_for!(Measure)
    }

    /// Default `params` JSON of a kind (`null` for parameterless measures).
    pub fn default_params(kind: MeasureKind) -> Value {
        match kind.default_measure() {
            Measure::LogScore(p) | Measure::LogLoss(p) => json!({ "tol": p.tol }),
            Measure::SphericalScore(p) => json!({ "alpha": p.alpha }),
            Measure::Auc | Measure::BrierScore | Measure::BrierLoss => Value::Null,
        }
    }

    /// Builds a measure from its kind and `params`, checking parameter ranges.
    pub fn from_parts(kind: MeasureKind, params: Value) -> AnyResult<Self> {
        let key: &'static str = kind.into();
        let v = if params.is_null() {
            json!({ "type": key })
        } else {
            json!({ "type": key, "params": params })
        };
        let m: Measure = serde_json::from_value(v)?;
        m.check_parameters()?;
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distributions::{
        ClassSet, ContinuousDistribution, CountDistribution, FiniteDistribution,
    };
    use strum::{EnumMessage, IntoEnumIterator};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn binary(p_pos: f64) -> Distribution {
        let classes = ClassSet::shared(["A", "B"]).unwrap();
        FiniteDistribution::binary(classes, p_pos).unwrap().into()
    }

    #[test]
    fn log_score_on_binary_distribution() {
        let d = binary(0.8);
        let m = Measure::log_score();
        let neg = m.single(Some(&d), &Observation::Class(0)).unwrap().unwrap();
        let pos = m.single(Some(&d), &Observation::Class(1)).unwrap().unwrap();
        assert!(approx_eq(neg, 0.2f64.ln(), 1e-12));
        assert!(approx_eq(pos, 0.8f64.ln(), 1e-12));
    }

    #[test]
    fn losses_negate_scores() {
        let preds = [
            binary(0.3),
            ContinuousDistribution::normal(1.0, 2.0).unwrap().into(),
            CountDistribution::poisson(3.0).unwrap().into(),
        ];
        let ys = [Observation::Class(1), Observation::Real(0.2), Observation::Count(4)];
        for (d, y) in preds.iter().zip(&ys) {
            let ls = Measure::log_score().single(Some(d), y).unwrap().unwrap();
            let ll = Measure::log_loss().single(Some(d), y).unwrap().unwrap();
            assert_eq!(ll, -ls);
            let bs = Measure::brier_score().single(Some(d), y).unwrap().unwrap();
            let bl = Measure::brier_loss().single(Some(d), y).unwrap().unwrap();
            assert_eq!(bl, -bs);
        }
    }

    #[test]
    fn missing_inputs_yield_missing_scores() {
        let d = binary(0.5);
        for m in MeasureKind::iter()
            .filter(|k| *k != MeasureKind::Auc)
            .map(MeasureKind::default_measure)
        {
            assert_eq!(m.single(None, &Observation::Class(0)).unwrap(), None);
            assert_eq!(m.single(Some(&d), &Observation::Missing).unwrap(), None);
        }
    }

    #[test]
    fn auc_has_no_single_value() {
        let d = binary(0.5);
        assert!(matches!(
            Measure::auc().single(Some(&d), &Observation::Class(0)),
            Err(MeasureError::NotDecomposable { .. })
        ));
    }

    #[test]
    fn parameter_ranges() {
        assert!(Measure::log_loss_with_tol(1e-12).is_ok());
        assert!(Measure::log_loss_with_tol(0.0).is_err());
        assert!(Measure::log_score_with_tol(0.5).is_err());
        assert!(Measure::log_score_with_tol(f64::NAN).is_err());
        assert!(Measure::spherical_score_with_alpha(3.0).is_ok());
        assert!(matches!(
            Measure::spherical_score_with_alpha(1.0),
            Err(MeasureError::InvalidParameter {
                measure: "SphericalScore",
                ..
            })
        ));
    }

    #[test]
    fn static_metadata() {
        assert_eq!(Measure::log_loss().orientation(), Orientation::Loss);
        assert_eq!(Measure::brier_score().orientation(), Orientation::Score);
        assert!(!Measure::auc().supports_weights());
        assert!(Measure::spherical_score().supports_weights());
        assert_eq!(MeasureKind::LogLoss.to_string(), "log-loss");
        assert_eq!(MeasureKind::Auc.get_message(), Some("AUC"));
        for kind in [MeasureKind::LogScore, MeasureKind::LogLoss] {
            let text = kind.get_detailed_message().unwrap_or_default();
            assert!(text.contains("densities"), "{text}");
        }
        assert!(MeasureKind::BrierLoss.uses_squared_l2_norm());
        assert!(!MeasureKind::LogLoss.uses_squared_l2_norm());
        for kind in MeasureKind::iter() {
            assert!(kind.get_detailed_message().is_some());
            assert!(!kind.traits().aliases.is_empty());
        }
    }

    #[test]
    fn tagged_serialization() {
        let v = serde_json::to_value(Measure::log_loss_with_tol(1e-9).unwrap()).unwrap();
        assert_eq!(v.get("type").and_then(Value::as_str), Some("log-loss"));
        assert_eq!(v["params"]["tol"].as_f64(), Some(1e-9));

        let auc: Measure = serde_json::from_value(json!({ "type": "auc" })).unwrap();
        assert_eq!(auc, Measure::Auc);
    }

    #[test]
    fn from_parts_applies_defaults_and_ranges() {
        for kind in MeasureKind::iter() {
            let m = Measure::from_parts(kind, Measure::default_params(kind)).unwrap();
            assert_eq!(m, kind.default_measure());
        }
        let m = Measure::from_parts(MeasureKind::SphericalScore, json!({})).unwrap();
        assert_eq!(m, Measure::spherical_score());
        assert!(Measure::from_parts(MeasureKind::LogScore, json!({ "tol": 0.7 })).is_err());
    }

    #[test]
    fn schema_lists_every_kind() {
        let schema = serde_json::to_string(&Measure::schema()).unwrap();
        for kind in MeasureKind::iter() {
            let key: &'static str = kind.into();
            assert!(schema.contains(key), "schema misses {key}");
        }
    }
}
