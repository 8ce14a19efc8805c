/// Online scalar estimator (e.g., streaming mean).
///
/// Implementations accept values incrementally via [`add`](Estimator::add) and
/// expose the current estimate via [`estimation`](Estimator::estimation).
pub trait Estimator {
    /// Incorporates a new value. NaN values are ignored.
    fn add(&mut self, v: f64);

    /// Returns the current estimate, NaN before any value was added.
    fn estimation(&self) -> f64;

    /// Number of values incorporated so far.
    fn count(&self) -> usize;
}
