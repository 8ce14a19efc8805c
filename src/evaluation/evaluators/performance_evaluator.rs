use crate::core::distributions::Distribution;
use crate::core::observations::Observation;
use crate::evaluation::Measurement;
use crate::measures::MeasureError;
use std::collections::HashMap;

/// Online evaluator of probabilistic predictions.
///
/// A `PerformanceEvaluator` consumes one prediction/observation pair at a time and
/// exposes aggregated values via [`performance`](PerformanceEvaluator::performance).
pub trait PerformanceEvaluator {
    /// Clears accumulated state; the configured measures stay.
    fn reset(&mut self);

    /// Feeds one pair with its weight.
    ///
    /// Pairs with a missing side are counted as seen but contribute nothing.
    fn add_result(
        &mut self,
        prediction: Option<&Distribution>,
        observation: &Observation,
        weight: f64,
    ) -> Result<(), MeasureError>;

    /// Returns a snapshot of current values.
    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    /// Returns (name, Some(value)|None) for each requested measure, preserving order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ms = self.performance();
        let map: HashMap<_, _> = ms.into_iter().map(|m| (m.name, m.value)).collect();
        names
            .into_iter()
            .map(|n| (n.to_string(), map.get(n).copied()))
            .collect()
    }
}
