use crate::core::observations::TargetKind;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Whether larger values are better (`Score`) or worse (`Loss`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    Score,
    Loss,
}

/// How per-observation values become one number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AggregationKind {
    /// Per-observation scores, optionally weighted, then the arithmetic mean.
    Mean,
    /// A single statistic over the whole array (no per-observation decomposition).
    WholeArray,
}

/// Static description of a measure, consumed by registries and dispatch layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureTraits {
    pub name: &'static str,
    pub human_name: &'static str,
    pub aliases: &'static [&'static str],
    pub orientation: Orientation,
    pub supports_weights: bool,
    pub aggregation: AggregationKind,
    pub target_kinds: &'static [TargetKind],
}

const ALL_TARGETS: &[TargetKind] = &[TargetKind::Finite, TargetKind::Count, TargetKind::Continuous];

pub(crate) const AUC: MeasureTraits = MeasureTraits {
    name: "AreaUnderCurve",
    human_name: "area under the receiver operating characteristic",
    aliases: &["auc", "area_under_curve"],
    orientation: Orientation::Score,
    supports_weights: false,
    aggregation: AggregationKind::WholeArray,
    target_kinds: &[TargetKind::Finite],
};

pub(crate) const LOG_SCORE: MeasureTraits = MeasureTraits {
    name: "LogScore",
    human_name: "log score",
    aliases: &["log_score"],
    orientation: Orientation::Score,
    supports_weights: true,
    aggregation: AggregationKind::Mean,
    target_kinds: ALL_TARGETS,
};

pub(crate) const LOG_LOSS: MeasureTraits = MeasureTraits {
    name: "LogLoss",
    human_name: "log loss",
    aliases: &["log_loss", "cross_entropy"],
    orientation: Orientation::Loss,
    supports_weights: true,
    aggregation: AggregationKind::Mean,
    target_kinds: ALL_TARGETS,
};

pub(crate) const BRIER_SCORE: MeasureTraits = MeasureTraits {
    name: "BrierScore",
    human_name: "Brier score",
    aliases: &["brier_score", "quadratic_score"],
    orientation: Orientation::Score,
    supports_weights: true,
    aggregation: AggregationKind::Mean,
    target_kinds: ALL_TARGETS,
};

pub(crate) const BRIER_LOSS: MeasureTraits = MeasureTraits {
    name: "BrierLoss",
    human_name: "Brier loss",
    aliases: &["brier_loss", "quadratic_loss"],
    orientation: Orientation::Loss,
    supports_weights: true,
    aggregation: AggregationKind::Mean,
    target_kinds: ALL_TARGETS,
};

pub(crate) const SPHERICAL_SCORE: MeasureTraits = MeasureTraits {
    name: "SphericalScore",
    human_name: "spherical score",
    aliases: &["spherical_score"],
    orientation: Orientation::Score,
    supports_weights: true,
    aggregation: AggregationKind::Mean,
    target_kinds: ALL_TARGETS,
};
