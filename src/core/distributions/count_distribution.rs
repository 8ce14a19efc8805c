use crate::core::distributions::DistributionFamily;
use crate::core::distributions::finite_distribution::PROBABILITY_SUM_TOLERANCE;
use crate::core::error::DistributionError;
use crate::utils::math::{ln_gamma, poisson_squared_l2, xlogy};

#[derive(Debug, Clone, PartialEq)]
enum CountLaw {
    Poisson { rate: f64 },
    DiscreteUniform { lower: i64, upper: i64 },
    /// `support` is sorted ascending and has no duplicates.
    DiscreteNonParametric { support: Vec<i64>, probs: Vec<f64> },
    Geometric { p: f64 },
}

/// Parametric laws over the integers.
#[derive(Debug, Clone, PartialEq)]
pub struct CountDistribution {
    law: CountLaw,
}

/// `upper - lower + 1` without overflowing at the ends of `i64`.
#[inline]
fn support_size(lower: i64, upper: i64) -> f64 {
    (i128::from(upper) - i128::from(lower) + 1) as f64
}

#[inline]
fn as_integer(k: f64) -> Option<i64> {
    if k.is_finite() && k.fract() == 0.0 {
        Some(k as i64)
    } else {
        None
    }
}

impl CountDistribution {
    pub fn poisson(rate: f64) -> Result<Self, DistributionError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(DistributionError::parameter(
                "poisson",
                format!("rate must be finite and >= 0, got {rate}"),
            ));
        }
        Ok(Self {
            law: CountLaw::Poisson { rate },
        })
    }

    /// Uniform mass on `lower..=upper`.
    pub fn discrete_uniform(lower: i64, upper: i64) -> Result<Self, DistributionError> {
        if upper < lower {
            return Err(DistributionError::parameter(
                "discrete-uniform",
                format!("upper ({upper}) must be >= lower ({lower})"),
            ));
        }
        Ok(Self {
            law: CountLaw::DiscreteUniform { lower, upper },
        })
    }

    /// Arbitrary mass function on a finite integer support.
    pub fn discrete_non_parametric(
        support: Vec<i64>,
        probs: Vec<f64>,
    ) -> Result<Self, DistributionError> {
        const FAMILY: &str = "discrete-non-parametric";
        if support.is_empty() || support.len() != probs.len() {
            return Err(DistributionError::parameter(
                FAMILY,
                format!(
                    "support ({}) and probabilities ({}) must be non-empty and equally long",
                    support.len(),
                    probs.len()
                ),
            ));
        }
        if probs.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(DistributionError::InvalidProbabilities(
                "probabilities must be finite and non-negative".into(),
            ));
        }
        let total: f64 = probs.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(DistributionError::InvalidProbabilities(format!(
                "probabilities sum to {total}, not 1"
            )));
        }

        let mut pairs: Vec<(i64, f64)> = support.into_iter().zip(probs).collect();
        pairs.sort_by_key(|(k, _)| *k);
        if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(DistributionError::parameter(
                FAMILY,
                "support values must be unique",
            ));
        }
        let (support, probs) = pairs.into_iter().unzip();
        Ok(Self {
            law: CountLaw::DiscreteNonParametric { support, probs },
        })
    }

    /// Number of failures before the first success, success probability `p`.
    pub fn geometric(p: f64) -> Result<Self, DistributionError> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(DistributionError::parameter(
                "geometric",
                format!("p must lie in (0, 1], got {p}"),
            ));
        }
        Ok(Self {
            law: CountLaw::Geometric { p },
        })
    }

    pub fn family(&self) -> DistributionFamily {
        match self.law {
            CountLaw::Poisson { .. } => DistributionFamily::Poisson,
            CountLaw::DiscreteUniform { .. } => DistributionFamily::DiscreteUniform,
            CountLaw::DiscreteNonParametric { .. } => DistributionFamily::DiscreteNonParametric,
            CountLaw::Geometric { .. } => DistributionFamily::Geometric,
        }
    }

    /// Probability mass at `k`; zero off the integer support.
    pub fn pdf(&self, k: f64) -> f64 {
        let Some(k) = as_integer(k) else {
            return 0.0;
        };
        match &self.law {
            CountLaw::Poisson { rate } => {
                if k < 0 {
                    0.0
                } else if *rate == 0.0 {
                    if k == 0 { 1.0 } else { 0.0 }
                } else {
                    let kf = k as f64;
                    (xlogy(kf, *rate) - rate - ln_gamma(kf + 1.0)).exp()
                }
            }
            CountLaw::DiscreteUniform { lower, upper } => {
                if (*lower..=*upper).contains(&k) {
                    1.0 / support_size(*lower, *upper)
                } else {
                    0.0
                }
            }
            CountLaw::DiscreteNonParametric { support, probs } => support
                .binary_search(&k)
                .map(|i| probs[i])
                .unwrap_or(0.0),
            CountLaw::Geometric { p } => {
                if k < 0 {
                    0.0
                } else {
                    p * (1.0 - p).powf(k as f64)
                }
            }
        }
    }

    /// `Σ_k p(k)²`, `None` for laws without an exact form.
    pub fn squared_l2_norm(&self) -> Option<f64> {
        match &self.law {
            CountLaw::Poisson { rate } => Some(poisson_squared_l2(*rate)),
            CountLaw::DiscreteUniform { lower, upper } => Some(1.0 / support_size(*lower, *upper)),
            CountLaw::DiscreteNonParametric { probs, .. } => {
                Some(probs.iter().map(|p| p * p).sum())
            }
            CountLaw::Geometric { .. } => None,
        }
    }
}
