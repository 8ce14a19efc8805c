pub mod aliases;
pub mod config;
pub mod error;
pub mod measure;
pub mod metadata;
pub mod parameters;
pub mod scoring_rules;
pub mod validation;

pub use aliases::ALIASES;
pub use config::{MeasureConfig, MeasureSpec};
pub use error::MeasureError;
pub use measure::{Measure, MeasureKind};
pub use metadata::{AggregationKind, MeasureTraits, Orientation};
pub use parameters::{LogParameters, SphericalParameters};
pub use validation::{FamilyRegistry, Validator};
