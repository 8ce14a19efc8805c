use crate::measures::{Measure, Orientation};

/// Summarized scalar value of one measure.
///
/// `name` is the measure's display name, e.g. `"LogLoss"` or `"AreaUnderCurve"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
    pub orientation: Orientation,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64, orientation: Orientation) -> Self {
        Self {
            name: name.into(),
            value,
            orientation,
        }
    }

    #[inline]
    pub fn from_measure(measure: &Measure, value: f64) -> Self {
        Self::new(measure.name(), value, measure.orientation())
    }

    /// Whether `self` is at least as good as `other` under this orientation.
    pub fn is_at_least_as_good_as(&self, other: &Measurement) -> bool {
        match self.orientation {
            Orientation::Score => self.value >= other.value,
            Orientation::Loss => self.value <= other.value,
        }
    }
}
