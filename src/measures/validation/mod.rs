mod family_registry;
mod validator;

pub use family_registry::{FamilyRegistry, L2_CONTINUOUS_FAMILIES, L2_COUNT_FAMILIES};
pub use validator::Validator;
