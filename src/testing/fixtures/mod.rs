mod class_sets;
mod synthetic;

pub use class_sets::{binary_classes, classes};
pub use synthetic::{synthetic_binary, synthetic_normal};
