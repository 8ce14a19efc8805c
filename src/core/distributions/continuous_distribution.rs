//! Parametric laws over the real line.
//!
//! Every law exposes its density and, where the density is square-integrable in
//! closed form, `∫ p(x)² dx`. Laws are built through validating constructors, so
//! parameters are always finite and in range.

use crate::core::distributions::DistributionFamily;
use crate::core::error::DistributionError;
use crate::utils::math::{ln_beta, ln_gamma, normal_density, xlogy};
use std::f64::consts::{LN_2, PI};

#[derive(Debug, Clone, Copy, PartialEq)]
enum ContinuousLaw {
    ChiSquared { dof: f64 },
    Gamma { shape: f64, scale: f64 },
    Beta { alpha: f64, beta: f64 },
    Chi { dof: f64 },
    Cauchy { location: f64, scale: f64 },
    Normal { mean: f64, std_dev: f64 },
    Uniform { lower: f64, upper: f64 },
    Logistic { location: f64, scale: f64 },
    Exponential { scale: f64 },
    LogNormal { mu: f64, sigma: f64 },
    Laplace { location: f64, scale: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousDistribution {
    law: ContinuousLaw,
}

fn positive(family: &'static str, name: &str, v: f64) -> Result<f64, DistributionError> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(DistributionError::parameter(
            family,
            format!("{name} must be finite and > 0, got {v}"),
        ))
    }
}

fn finite(family: &'static str, name: &str, v: f64) -> Result<f64, DistributionError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DistributionError::parameter(
            family,
            format!("{name} must be finite, got {v}"),
        ))
    }
}

impl ContinuousDistribution {
    pub fn chi_squared(dof: f64) -> Result<Self, DistributionError> {
        let dof = positive("chi-squared", "dof", dof)?;
        Ok(Self {
            law: ContinuousLaw::ChiSquared { dof },
        })
    }

    /// Gamma law with shape `k` and scale `θ` (mean `kθ`).
    pub fn gamma(shape: f64, scale: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::Gamma {
                shape: positive("gamma", "shape", shape)?,
                scale: positive("gamma", "scale", scale)?,
            },
        })
    }

    pub fn beta(alpha: f64, beta: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::Beta {
                alpha: positive("beta", "alpha", alpha)?,
                beta: positive("beta", "beta", beta)?,
            },
        })
    }

    pub fn chi(dof: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::Chi {
                dof: positive("chi", "dof", dof)?,
            },
        })
    }

    pub fn cauchy(location: f64, scale: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::Cauchy {
                location: finite("cauchy", "location", location)?,
                scale: positive("cauchy", "scale", scale)?,
            },
        })
    }

    pub fn normal(mean: f64, std_dev: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::Normal {
                mean: finite("normal", "mean", mean)?,
                std_dev: positive("normal", "std_dev", std_dev)?,
            },
        })
    }

    pub fn uniform(lower: f64, upper: f64) -> Result<Self, DistributionError> {
        let lower = finite("uniform", "lower", lower)?;
        let upper = finite("uniform", "upper", upper)?;
        if upper <= lower {
            return Err(DistributionError::parameter(
                "uniform",
                format!("upper ({upper}) must exceed lower ({lower})"),
            ));
        }
        Ok(Self {
            law: ContinuousLaw::Uniform { lower, upper },
        })
    }

    pub fn logistic(location: f64, scale: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::Logistic {
                location: finite("logistic", "location", location)?,
                scale: positive("logistic", "scale", scale)?,
            },
        })
    }

    /// Exponential law with scale `θ` (mean `θ`, rate `1/θ`).
    pub fn exponential(scale: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::Exponential {
                scale: positive("exponential", "scale", scale)?,
            },
        })
    }

    pub fn log_normal(mu: f64, sigma: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::LogNormal {
                mu: finite("log-normal", "mu", mu)?,
                sigma: positive("log-normal", "sigma", sigma)?,
            },
        })
    }

    pub fn laplace(location: f64, scale: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            law: ContinuousLaw::Laplace {
                location: finite("laplace", "location", location)?,
                scale: positive("laplace", "scale", scale)?,
            },
        })
    }

    pub fn family(&self) -> DistributionFamily {
        match self.law {
            ContinuousLaw::ChiSquared { .. } => DistributionFamily::ChiSquared,
            ContinuousLaw::Gamma { .. } => DistributionFamily::Gamma,
            ContinuousLaw::Beta { .. } => DistributionFamily::Beta,
            ContinuousLaw::Chi { .. } => DistributionFamily::Chi,
            ContinuousLaw::Cauchy { .. } => DistributionFamily::Cauchy,
            ContinuousLaw::Normal { .. } => DistributionFamily::Normal,
            ContinuousLaw::Uniform { .. } => DistributionFamily::Uniform,
            ContinuousLaw::Logistic { .. } => DistributionFamily::Logistic,
            ContinuousLaw::Exponential { .. } => DistributionFamily::Exponential,
            ContinuousLaw::LogNormal { .. } => DistributionFamily::LogNormal,
            ContinuousLaw::Laplace { .. } => DistributionFamily::Laplace,
        }
    }

    /// Density at `x`. May be `+∞` at a boundary pole (e.g. Gamma with shape < 1 at 0).
    pub fn pdf(&self, x: f64) -> f64 {
        match self.law {
            ContinuousLaw::ChiSquared { dof } => gamma_pdf(x, 0.5 * dof, 2.0),
            ContinuousLaw::Gamma { shape, scale } => gamma_pdf(x, shape, scale),
            ContinuousLaw::Beta { alpha, beta } => {
                if !(0.0..=1.0).contains(&x) {
                    return 0.0;
                }
                (xlogy(alpha - 1.0, x) + xlogy(beta - 1.0, 1.0 - x) - ln_beta(alpha, beta)).exp()
            }
            ContinuousLaw::Chi { dof } => {
                if x < 0.0 {
                    return 0.0;
                }
                (xlogy(dof - 1.0, x) - 0.5 * x * x - (0.5 * dof - 1.0) * LN_2
                    - ln_gamma(0.5 * dof))
                .exp()
            }
            ContinuousLaw::Cauchy { location, scale } => {
                let z = (x - location) / scale;
                1.0 / (PI * scale * (1.0 + z * z))
            }
            ContinuousLaw::Normal { mean, std_dev } => normal_density((x - mean) / std_dev) / std_dev,
            ContinuousLaw::Uniform { lower, upper } => {
                if (lower..=upper).contains(&x) {
                    1.0 / (upper - lower)
                } else {
                    0.0
                }
            }
            ContinuousLaw::Logistic { location, scale } => {
                let e = (-((x - location) / scale).abs()).exp();
                e / (scale * (1.0 + e) * (1.0 + e))
            }
            ContinuousLaw::Exponential { scale } => {
                if x < 0.0 {
                    0.0
                } else {
                    (-x / scale).exp() / scale
                }
            }
            ContinuousLaw::LogNormal { mu, sigma } => {
                if x <= 0.0 {
                    return 0.0;
                }
                normal_density((x.ln() - mu) / sigma) / (x * sigma)
            }
            ContinuousLaw::Laplace { location, scale } => {
                (-(x - location).abs() / scale).exp() / (2.0 * scale)
            }
        }
    }

    /// `∫ p(x)² dx`, `None` for laws without a closed form.
    ///
    /// The integral diverges (`+∞`) for Gamma/ChiSquared with shape ≤ ½, Chi with
    /// dof ≤ ½ and Beta with either parameter ≤ ½.
    pub fn squared_l2_norm(&self) -> Option<f64> {
        let v = match self.law {
            ContinuousLaw::ChiSquared { dof } => gamma_squared_l2(0.5 * dof, 2.0),
            ContinuousLaw::Gamma { shape, scale } => gamma_squared_l2(shape, scale),
            ContinuousLaw::Beta { alpha, beta } => {
                if alpha <= 0.5 || beta <= 0.5 {
                    f64::INFINITY
                } else {
                    (ln_beta(2.0 * alpha - 1.0, 2.0 * beta - 1.0) - 2.0 * ln_beta(alpha, beta))
                        .exp()
                }
            }
            ContinuousLaw::Chi { dof } => {
                if dof <= 0.5 {
                    f64::INFINITY
                } else {
                    (ln_gamma(dof - 0.5) - (dof - 1.0) * LN_2 - 2.0 * ln_gamma(0.5 * dof)).exp()
                }
            }
            ContinuousLaw::Cauchy { scale, .. } => 1.0 / (2.0 * PI * scale),
            ContinuousLaw::Normal { std_dev, .. } => 1.0 / (2.0 * std_dev * PI.sqrt()),
            ContinuousLaw::Uniform { lower, upper } => 1.0 / (upper - lower),
            ContinuousLaw::Logistic { scale, .. } => 1.0 / (6.0 * scale),
            ContinuousLaw::Exponential { scale } => 1.0 / (2.0 * scale),
            ContinuousLaw::LogNormal { .. } | ContinuousLaw::Laplace { .. } => return None,
        };
        Some(v)
    }
}

fn gamma_pdf(x: f64, shape: f64, scale: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    (xlogy(shape - 1.0, x) - x / scale - ln_gamma(shape) - shape * scale.ln()).exp()
}

// Γ(2k−1) / (Γ(k)² 2^(2k−1) θ)
fn gamma_squared_l2(shape: f64, scale: f64) -> f64 {
    if shape <= 0.5 {
        return f64::INFINITY;
    }
    let m = 2.0 * shape - 1.0;
    (ln_gamma(m) - 2.0 * ln_gamma(shape) - m * LN_2 - scale.ln()).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps * b.abs().max(1.0)
    }

    // Trapezoid rule on [lo, hi]; fine enough for smooth densities in tests.
    fn integrate<F: Fn(f64) -> f64>(f: F, lo: f64, hi: f64, n: usize) -> f64 {
        let h = (hi - lo) / n as f64;
        let mut s = 0.5 * (f(lo) + f(hi));
        for i in 1..n {
            s += f(lo + i as f64 * h);
        }
        s * h
    }

    fn all_with_norms() -> Vec<(ContinuousDistribution, f64, f64)> {
        vec![
            (ContinuousDistribution::normal(1.0, 0.7).unwrap(), -10.0, 12.0),
            (ContinuousDistribution::uniform(-1.0, 3.0).unwrap(), -1.0, 3.0),
            (ContinuousDistribution::logistic(0.5, 1.3).unwrap(), -60.0, 60.0),
            (ContinuousDistribution::exponential(2.0).unwrap(), 0.0, 80.0),
            (ContinuousDistribution::gamma(2.5, 1.5).unwrap(), 0.0, 80.0),
            (ContinuousDistribution::chi_squared(4.0).unwrap(), 0.0, 120.0),
            (ContinuousDistribution::chi(3.0).unwrap(), 0.0, 20.0),
            (ContinuousDistribution::beta(2.0, 3.5).unwrap(), 0.0, 1.0),
        ]
    }

    #[test]
    fn densities_integrate_to_one() {
        for (d, lo, hi) in all_with_norms() {
            let mass = integrate(|x| d.pdf(x), lo, hi, 200_000);
            assert!(approx_eq(mass, 1.0, 1e-4), "{:?}: mass {mass}", d.family());
        }
    }

    #[test]
    fn closed_form_squared_norms_match_quadrature() {
        for (d, lo, hi) in all_with_norms() {
            let numeric = integrate(|x| d.pdf(x).powi(2), lo, hi, 200_000);
            let closed = d.squared_l2_norm().unwrap();
            assert!(
                approx_eq(closed, numeric, 1e-4),
                "{:?}: closed {closed} vs numeric {numeric}",
                d.family()
            );
        }
    }

    #[test]
    fn cauchy_squared_norm() {
        let d = ContinuousDistribution::cauchy(0.0, 2.0).unwrap();
        assert!(approx_eq(d.squared_l2_norm().unwrap(), 1.0 / (4.0 * PI), 1e-12));
        assert!(approx_eq(d.pdf(0.0), 1.0 / (2.0 * PI), 1e-12));
    }

    #[test]
    fn normal_pdf_at_mean() {
        let d = ContinuousDistribution::normal(0.0, 1.0).unwrap();
        assert!(approx_eq(d.pdf(0.0), 0.398_942_280_401_432_7, 1e-12));
    }

    #[test]
    fn boundary_behaviour() {
        let e = ContinuousDistribution::exponential(1.0).unwrap();
        assert_eq!(e.pdf(-0.1), 0.0);
        assert!(approx_eq(e.pdf(0.0), 1.0, 1e-12));

        let g = ContinuousDistribution::gamma(0.5, 1.0).unwrap();
        assert!(g.pdf(0.0).is_infinite());
        assert_eq!(g.squared_l2_norm(), Some(f64::INFINITY));

        let b = ContinuousDistribution::beta(1.0, 1.0).unwrap();
        assert!(approx_eq(b.pdf(0.0), 1.0, 1e-12));
        assert_eq!(b.pdf(1.5), 0.0);
        assert!(approx_eq(b.squared_l2_norm().unwrap(), 1.0, 1e-12));

        let c = ContinuousDistribution::chi(1.0).unwrap();
        assert!(approx_eq(c.pdf(0.0), (2.0 / PI).sqrt(), 1e-12));
        assert!(approx_eq(c.squared_l2_norm().unwrap(), 1.0 / PI.sqrt(), 1e-12));
    }

    #[test]
    fn laws_without_closed_form_norm() {
        let ln = ContinuousDistribution::log_normal(0.0, 1.0).unwrap();
        let la = ContinuousDistribution::laplace(0.0, 1.0).unwrap();
        assert_eq!(ln.squared_l2_norm(), None);
        assert_eq!(la.squared_l2_norm(), None);
        assert_eq!(ln.pdf(0.0), 0.0);
        assert!(approx_eq(la.pdf(0.0), 0.5, 1e-12));
    }

    #[test]
    fn constructors_validate() {
        assert!(ContinuousDistribution::normal(0.0, 0.0).is_err());
        assert!(ContinuousDistribution::normal(f64::NAN, 1.0).is_err());
        assert!(ContinuousDistribution::uniform(2.0, 2.0).is_err());
        assert!(ContinuousDistribution::gamma(-1.0, 1.0).is_err());
        assert!(matches!(
            ContinuousDistribution::exponential(f64::INFINITY),
            Err(DistributionError::InvalidParameter {
                family: "exponential",
                ..
            })
        ));
    }
}
