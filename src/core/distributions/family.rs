use crate::core::observations::TargetKind;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Tag naming the law a predicted distribution belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DistributionFamily {
    Finite,
    // continuous
    ChiSquared,
    Gamma,
    Beta,
    Chi,
    Cauchy,
    Normal,
    Uniform,
    Logistic,
    Exponential,
    LogNormal,
    Laplace,
    // count
    Poisson,
    DiscreteUniform,
    DiscreteNonParametric,
    Geometric,
}

impl DistributionFamily {
    pub fn target_kind(self) -> TargetKind {
        use DistributionFamily::*;
        match self {
            Finite => TargetKind::Finite,
            Poisson | DiscreteUniform | DiscreteNonParametric | Geometric => TargetKind::Count,
            ChiSquared | Gamma | Beta | Chi | Cauchy | Normal | Uniform | Logistic
            | Exponential | LogNormal | Laplace => TargetKind::Continuous,
        }
    }

    /// Families whose squared L2 norm has a closed form (or exact series).
    pub fn has_squared_l2_norm(self) -> bool {
        use DistributionFamily::*;
        !matches!(self, LogNormal | Laplace | Geometric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn kebab_case_names() {
        assert_eq!(DistributionFamily::ChiSquared.to_string(), "chi-squared");
        assert_eq!(
            DistributionFamily::from_str("discrete-non-parametric").unwrap(),
            DistributionFamily::DiscreteNonParametric
        );
    }

    #[test]
    fn every_family_has_a_target_kind() {
        let counts = DistributionFamily::iter()
            .filter(|f| f.target_kind() == TargetKind::Count)
            .count();
        assert_eq!(counts, 4);
        assert_eq!(DistributionFamily::Finite.target_kind(), TargetKind::Finite);
        assert!(!DistributionFamily::Laplace.has_squared_l2_norm());
        assert!(DistributionFamily::Cauchy.has_squared_l2_norm());
    }
}
