pub mod distributions;
pub mod error;
pub mod observations;
pub mod predictions;

pub use error::DistributionError;
