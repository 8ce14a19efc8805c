use crate::core::distributions::{Distribution, DistributionFamily};
use crate::core::predictions::FiniteArray;
use std::borrow::Cow;

/// An ordered sequence of predicted distributions, one per observation.
#[derive(Debug, Clone, PartialEq)]
pub enum Predictions {
    /// Finite distributions over one shared class set, stored as a matrix.
    Finite(FiniteArray),
    /// Any mix of distributions; `None` marks a missing prediction.
    Generic(Vec<Option<Distribution>>),
}

impl Predictions {
    pub fn len(&self) -> usize {
        match self {
            Predictions::Finite(a) => a.len(),
            Predictions::Generic(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, i: usize) -> bool {
        match self {
            Predictions::Finite(a) => a.is_missing(i),
            Predictions::Generic(v) => v[i].is_none(),
        }
    }

    /// Prediction at `i`. Borrowed for generic arrays, materialized for finite ones.
    pub fn get(&self, i: usize) -> Option<Cow<'_, Distribution>> {
        match self {
            Predictions::Finite(a) => a.distribution(i).map(|d| Cow::Owned(d.into())),
            Predictions::Generic(v) => v.get(i).and_then(Option::as_ref).map(Cow::Borrowed),
        }
    }

    /// Families of the non-missing predictions, with their positions.
    pub fn families(&self) -> Box<dyn Iterator<Item = (usize, DistributionFamily)> + '_> {
        match self {
            Predictions::Finite(a) => Box::new(
                (0..a.len())
                    .filter(|&i| !a.is_missing(i))
                    .map(|i| (i, DistributionFamily::Finite)),
            ),
            Predictions::Generic(v) => Box::new(
                v.iter()
                    .enumerate()
                    .filter_map(|(i, d)| d.as_ref().map(|d| (i, d.family()))),
            ),
        }
    }

    pub fn as_finite(&self) -> Option<&FiniteArray> {
        match self {
            Predictions::Finite(a) => Some(a),
            Predictions::Generic(_) => None,
        }
    }

    /// Keeps the positions whose `keep` flag is set.
    pub fn select(&self, keep: &[bool]) -> Self {
        match self {
            Predictions::Finite(a) => Predictions::Finite(a.select(keep)),
            Predictions::Generic(v) => Predictions::Generic(
                v.iter()
                    .zip(keep)
                    .filter(|(_, k)| **k)
                    .map(|(d, _)| d.clone())
                    .collect(),
            ),
        }
    }
}

impl From<FiniteArray> for Predictions {
    fn from(a: FiniteArray) -> Self {
        Predictions::Finite(a)
    }
}

impl From<Vec<Option<Distribution>>> for Predictions {
    fn from(v: Vec<Option<Distribution>>) -> Self {
        Predictions::Generic(v)
    }
}

impl From<Vec<Distribution>> for Predictions {
    fn from(v: Vec<Distribution>) -> Self {
        Predictions::Generic(v.into_iter().map(Some).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distributions::{ClassSet, ContinuousDistribution, CountDistribution};

    #[test]
    fn generic_predictions_report_families() {
        let preds: Predictions = vec![
            Some(ContinuousDistribution::normal(0.0, 1.0).unwrap().into()),
            None,
            Some(CountDistribution::poisson(2.0).unwrap().into()),
        ]
        .into();
        assert_eq!(preds.len(), 3);
        assert!(preds.is_missing(1));
        let fams: Vec<_> = preds.families().collect();
        assert_eq!(
            fams,
            vec![
                (0, DistributionFamily::Normal),
                (2, DistributionFamily::Poisson)
            ]
        );
        assert!(matches!(preds.get(0), Some(Cow::Borrowed(_))));
        assert!(preds.get(1).is_none());
        assert!(preds.as_finite().is_none());
    }

    #[test]
    fn finite_predictions_materialize_rows() {
        let classes = ClassSet::shared(["n", "p"]).unwrap();
        let preds: Predictions = FiniteArray::binary(classes, &[0.3, 0.6]).unwrap().into();
        let d = preds.get(1).unwrap();
        assert_eq!(d.family(), DistributionFamily::Finite);
        assert_eq!(d.classes().unwrap().label(1), Some("p"));
        assert_eq!(preds.families().count(), 2);

        let sub = preds.select(&[false, true]);
        assert_eq!(sub.len(), 1);
    }
}
