use crate::core::distributions::finite_distribution::check_probabilities;
use crate::core::distributions::{ClassSet, ClassSetRef, FiniteDistribution};
use crate::core::error::DistributionError;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// Predictions that are all finite distributions over one shared class set.
///
/// Stored as an `n × k` probability matrix (row `i` is the pmf of observation `i`)
/// plus a missing mask. Missing rows hold zeros and are never read as probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteArray {
    classes: ClassSetRef,
    probs: Array2<f64>,
    missing: Vec<bool>,
}

impl FiniteArray {
    pub fn new(classes: ClassSetRef, probs: Array2<f64>) -> Result<Self, DistributionError> {
        let n = probs.nrows();
        Self::with_missing(classes, probs, vec![false; n])
    }

    /// `missing[i] == true` marks row `i` as a missing prediction.
    pub fn with_missing(
        classes: ClassSetRef,
        mut probs: Array2<f64>,
        missing: Vec<bool>,
    ) -> Result<Self, DistributionError> {
        if missing.len() != probs.nrows() {
            return Err(DistributionError::ShapeMismatch {
                expected: probs.nrows(),
                found: missing.len(),
            });
        }
        if probs.ncols() != classes.len() {
            return Err(DistributionError::ShapeMismatch {
                expected: classes.len(),
                found: probs.ncols(),
            });
        }
        for (mut row, &m) in probs.axis_iter_mut(Axis(0)).zip(&missing) {
            if m {
                row.fill(0.0);
            } else {
                check_probabilities(row.view(), classes.len())?;
            }
        }
        Ok(Self {
            classes,
            probs,
            missing,
        })
    }

    /// Binary predictions from the probability of the positive (second) class.
    pub fn binary(classes: ClassSetRef, p_positive: &[f64]) -> Result<Self, DistributionError> {
        if !classes.is_binary() {
            return Err(DistributionError::ShapeMismatch {
                expected: 2,
                found: classes.len(),
            });
        }
        let probs = Array2::from_shape_fn((p_positive.len(), 2), |(i, j)| {
            if j == 1 { p_positive[i] } else { 1.0 - p_positive[i] }
        });
        Self::new(classes, probs)
    }

    /// Collects per-observation distributions; every present one must share the
    /// class set `classes`.
    pub fn from_distributions<I>(classes: ClassSetRef, dists: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = Option<FiniteDistribution>>,
    {
        let dists: Vec<Option<FiniteDistribution>> = dists.into_iter().collect();
        let k = classes.len();
        let mut probs = Array2::zeros((dists.len(), k));
        let mut missing = vec![false; dists.len()];
        for (i, d) in dists.iter().enumerate() {
            match d {
                Some(d) => {
                    if !d.shares_classes_with(&classes) {
                        return Err(DistributionError::ClassSetMismatch(i));
                    }
                    probs.row_mut(i).assign(&d.probabilities());
                }
                None => missing[i] = true,
            }
        }
        Ok(Self {
            classes,
            probs,
            missing,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.probs.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    pub fn class_set(&self) -> &ClassSetRef {
        &self.classes
    }

    #[inline]
    pub fn is_missing(&self, i: usize) -> bool {
        self.missing[i]
    }

    pub fn missing_count(&self) -> usize {
        self.missing.iter().filter(|m| **m).count()
    }

    /// Bulk accessor: probability of every class for every observation.
    pub fn probabilities(&self) -> ArrayView2<'_, f64> {
        self.probs.view()
    }

    /// Probability of `class` for every observation (zeros on missing rows).
    pub fn pdf_column(&self, class: usize) -> Option<ArrayView1<'_, f64>> {
        (class < self.classes.len()).then(|| self.probs.column(class))
    }

    pub fn row(&self, i: usize) -> Option<ArrayView1<'_, f64>> {
        (i < self.len() && !self.missing[i]).then(|| self.probs.row(i))
    }

    /// Materializes the distribution at position `i`.
    pub fn distribution(&self, i: usize) -> Option<FiniteDistribution> {
        self.row(i).map(|row| {
            FiniteDistribution::from_parts_unchecked(self.classes.clone(), row.to_owned())
        })
    }

    /// Keeps the rows whose `keep` flag is set.
    pub fn select(&self, keep: &[bool]) -> Self {
        let idx: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(i, k)| k.then_some(i))
            .collect();
        Self {
            classes: self.classes.clone(),
            probs: self.probs.select(Axis(0), &idx),
            missing: idx.iter().map(|&i| self.missing[i]).collect(),
        }
    }
}
