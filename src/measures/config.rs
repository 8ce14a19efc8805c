use crate::measures::Measure;
use anyhow::{Context, Result, anyhow};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

/// One configured measure: an alias string or a tagged object.
///
/// ```json
/// ["log_loss", {"type": "spherical-score", "params": {"alpha": 3.0}}]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MeasureSpec {
    Alias(String),
    Full(Measure),
}

impl MeasureSpec {
    pub fn resolve(&self) -> Result<Measure> {
        match self {
            MeasureSpec::Alias(alias) => {
                Measure::from_alias(alias).ok_or_else(|| anyhow!("unknown measure alias '{alias}'"))
            }
            MeasureSpec::Full(m) => {
                m.check_parameters()
                    .with_context(|| format!("invalid parameters for {}", m.name()))?;
                Ok(*m)
            }
        }
    }
}

impl From<Measure> for MeasureSpec {
    fn from(m: Measure) -> Self {
        MeasureSpec::Full(m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeasureConfig {
    #[serde(default)]
    #[schemars(
        title = "Measures",
        description = "Scoring rules to evaluate, by alias or as {\"type\", \"params\"} objects."
    )]
    pub measures: Vec<MeasureSpec>,
}

impl MeasureConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse measure configuration")
    }

    /// Resolves every entry, failing on the first invalid one.
    pub fn resolve(&self) -> Result<Vec<Measure>> {
        self.measures
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.resolve().with_context(|| format!("measure #{i}")))
            .collect()
    }

    pub fn schema() -> Schema {
        schema_for!(MeasureConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_aliases_and_tagged_objects() {
        let cfg = MeasureConfig::from_json(
            r#"{"measures": [
                "auc",
                "cross_entropy",
                {"type": "log-score", "params": {"tol": 1e-9}},
                {"type": "spherical-score", "params": {"alpha": 3.0}},
                {"type": "brier-loss"}
            ]}"#,
        )
        .unwrap();
        let ms = cfg.resolve().unwrap();
        assert_eq!(
            ms,
            vec![
                Measure::auc(),
                Measure::log_loss(),
                Measure::log_score_with_tol(1e-9).unwrap(),
                Measure::spherical_score_with_alpha(3.0).unwrap(),
                Measure::brier_loss(),
            ]
        );
    }

    #[test]
    fn empty_config_is_allowed() {
        let cfg = MeasureConfig::from_json("{}").unwrap();
        assert!(cfg.resolve().unwrap().is_empty());
    }

    #[test]
    fn errors_carry_context() {
        let cfg = MeasureConfig::from_json(r#"{"measures": ["auc", "hinge"]}"#).unwrap();
        let err = format!("{:#}", cfg.resolve().unwrap_err());
        assert!(err.contains("measure #1"), "{err}");
        assert!(err.contains("hinge"), "{err}");

        let cfg = MeasureConfig::from_json(
            r#"{"measures": [{"type": "log-loss", "params": {"tol": 0.9}}]}"#,
        )
        .unwrap();
        let err = format!("{:#}", cfg.resolve().unwrap_err());
        assert!(err.contains("tol must lie in"), "{err}");

        assert!(MeasureConfig::from_json("[").is_err());
    }

    #[test]
    fn schema_describes_measures() {
        let schema = serde_json::to_string(&MeasureConfig::schema()).unwrap();
        assert!(schema.contains("measures"));
        assert!(schema.contains("spherical-score"));
    }
}
