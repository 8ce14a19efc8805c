use crate::core::distributions::Distribution;
use crate::core::observations::Observation;
use crate::core::predictions::FiniteArray;
use ndarray::{ArrayView1, Axis};

/// `‖p‖_α = (Σ_c p(c)^α)^(1/α)`.
#[inline]
pub fn alpha_norm(probs: ArrayView1<'_, f64>, alpha: f64) -> f64 {
    if alpha == 2.0 {
        probs.dot(&probs).sqrt()
    } else {
        probs.iter().map(|p| p.powf(alpha)).sum::<f64>().powf(alpha.recip())
    }
}

/// `(p(y) / ‖p‖_α)^(α − 1)`.
#[inline]
pub fn spherical_finite(p: f64, norm: f64, alpha: f64) -> f64 {
    let r = p / norm;
    if alpha == 2.0 { r } else { r.powf(alpha - 1.0) }
}

/// `p(y) / sqrt(∫ p²)`.
#[inline]
pub fn spherical_parametric(p: f64, squared_norm: f64) -> f64 {
    p / squared_norm.sqrt()
}

/// Parametric laws are scored with `alpha = 2` regardless of `alpha`; callers reject
/// other values before scoring.
pub fn spherical_score(d: &Distribution, y: &Observation, alpha: f64) -> Option<f64> {
    let p = d.pdf(y)?;
    match d {
        Distribution::Finite(f) => {
            Some(spherical_finite(p, alpha_norm(f.probabilities(), alpha), alpha))
        }
        Distribution::Continuous(_) | Distribution::Count(_) => {
            Some(spherical_parametric(p, d.squared_l2_norm()?))
        }
    }
}

pub fn spherical_score_bulk(preds: &FiniteArray, ys: &[Observation], alpha: f64) -> Vec<Option<f64>> {
    let probs = preds.probabilities();
    let norms = probs.map_axis(Axis(1), |row| alpha_norm(row, alpha));
    ys.iter()
        .enumerate()
        .map(|(i, y)| {
            if preds.is_missing(i) {
                return None;
            }
            let c = y.class_index()?;
            Some(spherical_finite(probs[[i, c]], norms[i], alpha))
        })
        .collect()
}
