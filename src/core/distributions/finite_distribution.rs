use crate::core::distributions::{ClassSet, ClassSetRef};
use crate::core::error::DistributionError;
use ndarray::{Array1, ArrayView1};
use std::sync::Arc;

/// Tolerance on `|Σp − 1|` accepted for a probability vector.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Probability mass over a fixed, ordered class set.
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteDistribution {
    classes: ClassSetRef,
    probs: Array1<f64>,
}

impl FiniteDistribution {
    pub fn new<P>(classes: ClassSetRef, probs: P) -> Result<Self, DistributionError>
    where
        P: Into<Array1<f64>>,
    {
        let probs = probs.into();
        check_probabilities(probs.view(), classes.len())?;
        Ok(Self { classes, probs })
    }

    /// Binary distribution putting mass `p_positive` on the second class.
    pub fn binary(classes: ClassSetRef, p_positive: f64) -> Result<Self, DistributionError> {
        if !classes.is_binary() {
            return Err(DistributionError::ShapeMismatch {
                expected: 2,
                found: classes.len(),
            });
        }
        Self::new(classes, vec![1.0 - p_positive, p_positive])
    }

    /// Point mass at `class`.
    pub fn point_mass(classes: ClassSetRef, class: usize) -> Result<Self, DistributionError> {
        if class >= classes.len() {
            return Err(DistributionError::ShapeMismatch {
                expected: classes.len(),
                found: class + 1,
            });
        }
        let mut probs = Array1::zeros(classes.len());
        probs[class] = 1.0;
        Ok(Self { classes, probs })
    }

    pub(crate) fn from_parts_unchecked(classes: ClassSetRef, probs: Array1<f64>) -> Self {
        Self { classes, probs }
    }

    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    pub fn class_set(&self) -> &ClassSetRef {
        &self.classes
    }

    pub fn shares_classes_with(&self, other: &ClassSetRef) -> bool {
        Arc::ptr_eq(&self.classes, other) || *self.classes == **other
    }

    /// Probability of every class, in class order.
    pub fn probabilities(&self) -> ArrayView1<'_, f64> {
        self.probs.view()
    }

    /// Probability of the class at `index`, `None` when out of range.
    #[inline]
    pub fn pdf(&self, index: usize) -> Option<f64> {
        self.probs.get(index).copied()
    }

    pub fn pdf_label(&self, label: &str) -> Option<f64> {
        self.classes.index_of(label).and_then(|i| self.pdf(i))
    }

    /// `Σ_c p(c)²`.
    pub fn squared_l2_norm(&self) -> f64 {
        self.probs.dot(&self.probs)
    }
}

pub(crate) fn check_probabilities(
    probs: ArrayView1<'_, f64>,
    num_classes: usize,
) -> Result<(), DistributionError> {
    if probs.len() != num_classes {
        return Err(DistributionError::ShapeMismatch {
            expected: num_classes,
            found: probs.len(),
        });
    }
    if let Some(p) = probs.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(DistributionError::InvalidProbabilities(format!(
            "probability {p} is not a finite non-negative number"
        )));
    }
    let total = probs.sum();
    if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(DistributionError::InvalidProbabilities(format!(
            "probabilities sum to {total}, not 1"
        )));
    }
    Ok(())
}
