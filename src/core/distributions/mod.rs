mod class_set;
mod continuous_distribution;
mod count_distribution;
mod distribution;
mod family;
pub(crate) mod finite_distribution;

pub use class_set::{ClassSet, ClassSetRef};
pub use continuous_distribution::ContinuousDistribution;
pub use count_distribution::CountDistribution;
pub use distribution::Distribution;
pub use family::DistributionFamily;
pub use finite_distribution::{FiniteDistribution, PROBABILITY_SUM_TOLERANCE};
