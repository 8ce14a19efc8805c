mod finite_array;
mod predictions;

pub use finite_array::FiniteArray;
pub use predictions::Predictions;
