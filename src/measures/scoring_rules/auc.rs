//! Area under the ROC curve via the Mann–Whitney U statistic.
//!
//! With `R_pos` the sum of the (tie-averaged) ranks of the positive observations
//! among all `n` scores, `U = R_pos − n_pos (n_pos + 1) / 2` and
//! `AUC = U / (n_pos · n_neg)`.

use crate::core::distributions::Distribution;
use crate::core::observations::Observation;
use crate::core::predictions::Predictions;
use crate::measures::MeasureError;
use crate::measures::metadata;
use crate::utils::math::tied_ranks;

/// AUC of `scores` (probability of the positive class) against `positive` labels.
///
/// Fails with [`MeasureError::DegenerateInput`] when either class is absent.
pub fn auc_from_scores(scores: &[f64], positive: &[bool]) -> Result<f64, MeasureError> {
    if scores.len() != positive.len() {
        return Err(MeasureError::LengthMismatch {
            what: "labels",
            expected: scores.len(),
            found: positive.len(),
        });
    }
    let n_pos = positive.iter().filter(|p| **p).count();
    let n_neg = positive.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        tracing::warn!(n_pos, n_neg, "AUC undefined without both classes");
        return Err(MeasureError::DegenerateInput {
            measure: metadata::AUC.name,
            reason: format!(
                "need both positive and negative observations (positives: {n_pos}, negatives: {n_neg})"
            ),
        });
    }

    let ranks = tied_ranks(scores);
    let rank_sum_pos: f64 = ranks
        .iter()
        .zip(positive)
        .filter(|(_, p)| **p)
        .map(|(r, _)| *r)
        .sum();

    let n_pos = n_pos as f64;
    let u = rank_sum_pos - 0.5 * n_pos * (n_pos + 1.0);
    Ok(u / (n_pos * n_neg as f64))
}

/// AUC over validated binary predictions. The positive class is the second one.
pub(crate) fn auc(predictions: &Predictions, ys: &[Observation]) -> Result<f64, MeasureError> {
    const POSITIVE: usize = 1;
    let scores: Vec<f64> = match predictions {
        Predictions::Finite(a) => a
            .pdf_column(POSITIVE)
            .map(|c| c.to_vec())
            .unwrap_or_default(),
        Predictions::Generic(v) => v
            .iter()
            .map(|d| match d {
                Some(Distribution::Finite(f)) => f.pdf(POSITIVE).unwrap_or(f64::NAN),
                _ => f64::NAN,
            })
            .collect(),
    };
    let positive: Vec<bool> = ys
        .iter()
        .map(|y| y.class_index() == Some(POSITIVE))
        .collect();
    auc_from_scores(&scores, &positive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distributions::ClassSet;
    use crate::core::predictions::FiniteArray;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn hand_computed_u_statistic() {
        // ranks: 0.1→1, 0.35→2, 0.4→3, 0.8→4; R_pos = 2 + 4 = 6; U = 6 − 3 = 3
        let scores = [0.1, 0.4, 0.35, 0.8];
        let positive = [false, false, true, true];
        assert!(approx_eq(auc_from_scores(&scores, &positive).unwrap(), 0.75, 1e-15));
    }

    #[test]
    fn perfect_separation_is_one() {
        let scores = [0.1, 0.2, 0.3, 0.7, 0.8, 0.9];
        let positive = [false, false, false, true, true, true];
        assert_eq!(auc_from_scores(&scores, &positive).unwrap(), 1.0);
        let flipped: Vec<bool> = positive.iter().map(|p| !p).collect();
        assert_eq!(auc_from_scores(&scores, &flipped).unwrap(), 0.0);
    }

    #[test]
    fn constant_scores_give_one_half() {
        let scores = [0.5; 6];
        let positive = [true, false, true, false, false, true];
        assert!(approx_eq(auc_from_scores(&scores, &positive).unwrap(), 0.5, 1e-15));
    }

    #[test]
    fn symmetric_balanced_data_gives_one_half() {
        // each score is used once by a positive and once by a negative observation
        let mut rng = StdRng::seed_from_u64(7);
        let mut scores = Vec::new();
        let mut positive = Vec::new();
        for _ in 0..500 {
            let s: f64 = rng.random();
            scores.extend([s, s]);
            positive.extend([true, false]);
        }
        assert!(approx_eq(auc_from_scores(&scores, &positive).unwrap(), 0.5, 1e-12));
    }

    #[test]
    fn invariant_under_monotone_transform() {
        let mut rng = StdRng::seed_from_u64(11);
        let scores: Vec<f64> = (0..200).map(|_| rng.random()).collect();
        let positive: Vec<bool> = scores
            .iter()
            .map(|s| rng.random::<f64>() < *s)
            .collect();
        let a = auc_from_scores(&scores, &positive).unwrap();
        let transformed: Vec<f64> = scores.iter().map(|s| (3.0 * s).exp() - 7.0).collect();
        let b = auc_from_scores(&transformed, &positive).unwrap();
        assert!(approx_eq(a, b, 1e-12));
    }

    #[test]
    fn degenerate_labels_are_reported() {
        let err = auc_from_scores(&[0.2, 0.9], &[true, true]).unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateInput { .. }));
        assert!(auc_from_scores(&[], &[]).is_err());
        assert!(matches!(
            auc_from_scores(&[0.2], &[true, false]),
            Err(MeasureError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn finite_and_generic_predictions_agree() {
        let classes = ClassSet::shared(["neg", "pos"]).unwrap();
        let p = [0.1, 0.4, 0.35, 0.8];
        let arr = FiniteArray::binary(classes, &p).unwrap();
        let ys = [
            Observation::Class(0),
            Observation::Class(0),
            Observation::Class(1),
            Observation::Class(1),
        ];
        let generic = Predictions::Generic(
            (0..4)
                .map(|i| arr.distribution(i).map(Distribution::Finite))
                .collect(),
        );
        let a = auc(&Predictions::Finite(arr), &ys).unwrap();
        let b = auc(&generic, &ys).unwrap();
        assert!(approx_eq(a, 0.75, 1e-15));
        assert_eq!(a, b);
    }
}
