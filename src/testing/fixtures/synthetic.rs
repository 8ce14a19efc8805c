use crate::core::distributions::{ContinuousDistribution, Distribution};
use crate::core::observations::Observation;
use crate::core::predictions::{FiniteArray, Predictions};
use crate::testing::fixtures::binary_classes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `n` binary predictions whose positive-class probability leans towards the
/// true label. Labels alternate, so both classes occur whenever `n >= 2`.
pub fn synthetic_binary(n: usize, seed: u64) -> (Predictions, Vec<Observation>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut p_pos = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let positive = i % 2 == 1;
        let lean: f64 = if positive { 0.15 } else { -0.15 };
        let p = (0.5 + lean + rng.random_range(-0.3..0.3)).clamp(0.01, 0.99);
        p_pos.push(p);
        ys.push(Observation::Class(usize::from(positive)));
    }
    let preds = FiniteArray::binary(binary_classes(), &p_pos).expect("probabilities in (0, 1)");
    (preds.into(), ys)
}

/// `n` normal predictions and real observations drawn near their means.
pub fn synthetic_normal(n: usize, seed: u64) -> (Predictions, Vec<Observation>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut preds = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for _ in 0..n {
        let mean = rng.random_range(-5.0..5.0);
        let std_dev = rng.random_range(0.5..2.0);
        let d: Distribution = ContinuousDistribution::normal(mean, std_dev)
            .expect("valid normal parameters")
            .into();
        preds.push(d);
        ys.push(Observation::Real(mean + rng.random_range(-1.0..1.0)));
    }
    (preds.into(), ys)
}
