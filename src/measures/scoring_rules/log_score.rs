use crate::core::distributions::Distribution;
use crate::core::observations::Observation;
use crate::core::predictions::FiniteArray;

/// `ln(clamp(p, tol, 1 - tol))` for a probability mass.
#[inline]
pub fn log_score_mass(p: f64, tol: f64) -> f64 {
    p.clamp(tol, 1.0 - tol).ln()
}

/// `ln(max(p, tol))` for a density, which may legitimately exceed 1.
#[inline]
pub fn log_score_density(p: f64, tol: f64) -> f64 {
    p.max(tol).ln()
}

pub fn log_score(d: &Distribution, y: &Observation, tol: f64) -> Option<f64> {
    let p = d.pdf(y)?;
    Some(match d {
        Distribution::Continuous(_) => log_score_density(p, tol),
        Distribution::Finite(_) | Distribution::Count(_) => log_score_mass(p, tol),
    })
}

/// Log scores of a whole finite array in one pass over the observed column of
/// each row.
pub fn log_score_bulk(preds: &FiniteArray, ys: &[Observation], tol: f64) -> Vec<Option<f64>> {
    let probs = preds.probabilities();
    ys.iter()
        .enumerate()
        .map(|(i, y)| {
            if preds.is_missing(i) {
                return None;
            }
            let c = y.class_index()?;
            Some(log_score_mass(probs[[i, c]], tol))
        })
        .collect()
}
