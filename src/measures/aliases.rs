use crate::measures::Measure;

/// Alias strings and the constructors they resolve to, with default parameters.
pub static ALIASES: &[(&str, fn() -> Measure)] = &[
    ("auc", Measure::auc),
    ("area_under_curve", Measure::auc),
    ("log_score", Measure::log_score),
    ("log_loss", Measure::log_loss),
    ("cross_entropy", Measure::log_loss),
    ("brier_score", Measure::brier_score),
    ("quadratic_score", Measure::brier_score),
    ("brier_loss", Measure::brier_loss),
    ("quadratic_loss", Measure::brier_loss),
    ("spherical_score", Measure::spherical_score),
];

impl Measure {
    /// Resolves an alias such as `"log_loss"` or `"Cross-Entropy"`.
    ///
    /// Matching ignores case and treats `-` as `_`.
    pub fn from_alias(alias: &str) -> Option<Measure> {
        let key = alias.trim().to_ascii_lowercase().replace('-', "_");
        ALIASES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, build)| build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::MeasureKind;
    use strum::IntoEnumIterator;

    #[test]
    fn aliases_resolve_with_default_parameters() {
        assert_eq!(Measure::from_alias("auc"), Some(Measure::Auc));
        assert_eq!(Measure::from_alias("Cross-Entropy"), Some(Measure::log_loss()));
        assert_eq!(Measure::from_alias(" quadratic_loss "), Some(Measure::brier_loss()));
        assert_eq!(Measure::from_alias("hinge"), None);
    }

    #[test]
    fn table_agrees_with_measure_metadata() {
        for (alias, build) in ALIASES {
            assert!(build().traits().aliases.contains(alias), "{alias}");
        }
        for kind in MeasureKind::iter() {
            for alias in kind.traits().aliases {
                let m = Measure::from_alias(alias).unwrap();
                assert_eq!(m.kind(), kind);
                assert_eq!(m, kind.default_measure());
            }
        }
    }
}
