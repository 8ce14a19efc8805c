use crate::core::distributions::ClassSet;
use crate::core::error::DistributionError;
use crate::core::observations::TargetKind;

/// A single ground-truth value.
///
/// Categorical levels are stored as their position in the class ordering of the
/// predictions they are scored against. `Real(NaN)` is treated as missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    Class(usize),
    Count(i64),
    Real(f64),
    Missing,
}

impl Observation {
    /// Resolves `label` against `classes`.
    pub fn class(classes: &ClassSet, label: &str) -> Result<Self, DistributionError> {
        classes
            .index_of(label)
            .map(Observation::Class)
            .ok_or_else(|| DistributionError::UnknownClass(label.to_string()))
    }

    /// Resolves a sequence of labels; `None` entries become `Missing`.
    pub fn classes<'a, I>(classes: &ClassSet, labels: I) -> Result<Vec<Self>, DistributionError>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        labels
            .into_iter()
            .map(|l| match l {
                Some(l) => Observation::class(classes, l),
                None => Ok(Observation::Missing),
            })
            .collect()
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        match self {
            Observation::Missing => true,
            Observation::Real(x) => x.is_nan(),
            _ => false,
        }
    }

    pub fn target_kind(&self) -> Option<TargetKind> {
        match self {
            _ if self.is_missing() => None,
            Observation::Class(_) => Some(TargetKind::Finite),
            Observation::Count(_) => Some(TargetKind::Count),
            Observation::Real(_) => Some(TargetKind::Continuous),
            Observation::Missing => None,
        }
    }

    /// Numeric value for count and continuous targets.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match *self {
            Observation::Count(k) => Some(k as f64),
            Observation::Real(x) if !x.is_nan() => Some(x),
            _ => None,
        }
    }

    #[inline]
    pub fn class_index(&self) -> Option<usize> {
        match *self {
            Observation::Class(i) => Some(i),
            _ => None,
        }
    }
}

impl From<f64> for Observation {
    fn from(x: f64) -> Self {
        Observation::Real(x)
    }
}

impl From<i64> for Observation {
    fn from(k: i64) -> Self {
        Observation::Count(k)
    }
}

impl<T: Into<Observation>> From<Option<T>> for Observation {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Observation::Missing)
    }
}
