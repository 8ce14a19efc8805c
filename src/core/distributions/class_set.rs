use crate::core::error::DistributionError;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed, totally ordered set of class labels.
///
/// The ordering is the order of construction and never changes. For binary
/// problems the second class is the positive one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSet {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

pub type ClassSetRef = Arc<ClassSet>;

impl ClassSet {
    pub fn new<I, S>(labels: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(DistributionError::InvalidClassSet(
                "a class set needs at least one label".into(),
            ));
        }
        let mut index = HashMap::with_capacity(labels.len());
        for (i, l) in labels.iter().enumerate() {
            if index.insert(l.clone(), i).is_some() {
                return Err(DistributionError::InvalidClassSet(format!(
                    "duplicate label '{l}'"
                )));
            }
        }
        Ok(Self { labels, index })
    }

    /// Convenience constructor returning a shareable handle.
    pub fn shared<I, S>(labels: I) -> Result<ClassSetRef, DistributionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels).map(Arc::new)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn is_binary(&self) -> bool {
        self.labels.len() == 2
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Index of the positive class of a binary class set.
    pub fn positive(&self) -> Option<usize> {
        if self.is_binary() { Some(1) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_construction_order() {
        let c = ClassSet::new(["b", "a", "c"]).unwrap();
        assert_eq!(c.labels(), &["b", "a", "c"]);
        assert_eq!(c.index_of("a"), Some(1));
        assert_eq!(c.label(2), Some("c"));
        assert_eq!(c.label(3), None);
        assert_eq!(c.positive(), None);
    }

    #[test]
    fn positive_is_second_class() {
        let c = ClassSet::new(["neg", "pos"]).unwrap();
        assert!(c.is_binary());
        assert_eq!(c.positive(), Some(1));
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        assert!(ClassSet::new(Vec::<String>::new()).is_err());
        assert!(matches!(
            ClassSet::new(["x", "y", "x"]),
            Err(DistributionError::InvalidClassSet(_))
        ));
    }
}
