use crate::core::distributions::{ClassSet, ClassSetRef};

/// `["A", "B"]`, positive class `"B"`.
pub fn binary_classes() -> ClassSetRef {
    classes(&["A", "B"])
}

pub fn classes(labels: &[&str]) -> ClassSetRef {
    ClassSet::shared(labels.iter().copied()).expect("fixture labels are distinct")
}
