use crate::core::distributions::{
    ClassSet, ContinuousDistribution, CountDistribution, DistributionFamily, FiniteDistribution,
};
use crate::core::observations::{Observation, TargetKind};

/// A predicted distribution for one observation.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    Finite(FiniteDistribution),
    Continuous(ContinuousDistribution),
    Count(CountDistribution),
}

impl Distribution {
    pub fn family(&self) -> DistributionFamily {
        match self {
            Distribution::Finite(_) => DistributionFamily::Finite,
            Distribution::Continuous(d) => d.family(),
            Distribution::Count(d) => d.family(),
        }
    }

    #[inline]
    pub fn target_kind(&self) -> TargetKind {
        self.family().target_kind()
    }

    /// Ordered class set of a finite distribution.
    pub fn classes(&self) -> Option<&ClassSet> {
        match self {
            Distribution::Finite(d) => Some(d.classes()),
            _ => None,
        }
    }

    /// Mass or density at `y`.
    ///
    /// `None` when `y` is missing or cannot be an outcome of this distribution
    /// (a class index out of range, or a class label for a numeric law).
    pub fn pdf(&self, y: &Observation) -> Option<f64> {
        if y.is_missing() {
            return None;
        }
        match (self, *y) {
            (Distribution::Finite(d), Observation::Class(i)) => d.pdf(i),
            (Distribution::Continuous(d), y) => y.value().map(|x| d.pdf(x)),
            (Distribution::Count(d), Observation::Count(k)) => Some(d.pdf(k as f64)),
            _ => None,
        }
    }

    /// `Σ p²` (finite, count) or `∫ p² dx` (continuous); `None` when the law has no
    /// exact form.
    pub fn squared_l2_norm(&self) -> Option<f64> {
        match self {
            Distribution::Finite(d) => Some(d.squared_l2_norm()),
            Distribution::Continuous(d) => d.squared_l2_norm(),
            Distribution::Count(d) => d.squared_l2_norm(),
        }
    }

    /// Whether `y` is a legal outcome type for this distribution.
    pub fn accepts(&self, y: &Observation) -> bool {
        match (self, y) {
            (Distribution::Finite(d), Observation::Class(i)) => *i < d.classes().len(),
            (Distribution::Continuous(_), Observation::Real(_) | Observation::Count(_)) => true,
            (Distribution::Count(_), Observation::Count(_)) => true,
            _ => false,
        }
    }
}

impl From<FiniteDistribution> for Distribution {
    fn from(d: FiniteDistribution) -> Self {
        Distribution::Finite(d)
    }
}

impl From<ContinuousDistribution> for Distribution {
    fn from(d: ContinuousDistribution) -> Self {
        Distribution::Continuous(d)
    }
}

impl From<CountDistribution> for Distribution {
    fn from(d: CountDistribution) -> Self {
        Distribution::Count(d)
    }
}
