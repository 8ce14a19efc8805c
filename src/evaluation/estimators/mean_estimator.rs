use crate::evaluation::estimators::Estimator;

/// Streaming mean estimator: `mean = sum / len`, summed in insertion order.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanEstimator {
    len: usize,
    sum: f64,
}

impl Estimator for MeanEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.len += 1;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.len > 0 {
            self.sum / self.len as f64
        } else {
            f64::NAN
        }
    }

    #[inline]
    fn count(&self) -> usize {
        self.len
    }
}
