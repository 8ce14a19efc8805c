use crate::core::distributions::Distribution;
use crate::core::observations::Observation;
use crate::core::predictions::FiniteArray;
use ndarray::Axis;

/// `2 p(y) − Σ_c p(c)² − 1`; lies in `[−2, 0]`.
#[inline]
pub fn brier_finite(p: f64, squared_norm: f64) -> f64 {
    2.0 * p - squared_norm - 1.0
}

/// `2 p(y) − ∫ p²` for count and continuous laws.
#[inline]
pub fn brier_parametric(p: f64, squared_norm: f64) -> f64 {
    2.0 * p - squared_norm
}

pub fn brier_score(d: &Distribution, y: &Observation) -> Option<f64> {
    let p = d.pdf(y)?;
    let squared_norm = d.squared_l2_norm()?;
    Some(match d {
        Distribution::Finite(_) => brier_finite(p, squared_norm),
        Distribution::Continuous(_) | Distribution::Count(_) => brier_parametric(p, squared_norm),
    })
}

pub fn brier_score_bulk(preds: &FiniteArray, ys: &[Observation]) -> Vec<Option<f64>> {
    let probs = preds.probabilities();
    let squared_norms = probs.map_axis(Axis(1), |row| row.dot(&row));
    ys.iter()
        .enumerate()
        .map(|(i, y)| {
            if preds.is_missing(i) {
                return None;
            }
            let c = y.class_index()?;
            Some(brier_finite(probs[[i, c]], squared_norms[i]))
        })
        .collect()
}
