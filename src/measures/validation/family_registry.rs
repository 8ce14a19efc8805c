use crate::core::distributions::DistributionFamily;
use crate::measures::MeasureKind;
use std::collections::HashMap;
use std::sync::OnceLock;
use strum::IntoEnumIterator;

/// Continuous families with an exact squared L2 norm.
pub const L2_CONTINUOUS_FAMILIES: [DistributionFamily; 9] = [
    DistributionFamily::ChiSquared,
    DistributionFamily::Gamma,
    DistributionFamily::Beta,
    DistributionFamily::Chi,
    DistributionFamily::Cauchy,
    DistributionFamily::Normal,
    DistributionFamily::Uniform,
    DistributionFamily::Logistic,
    DistributionFamily::Exponential,
];

/// Count families with an exact squared L2 norm.
pub const L2_COUNT_FAMILIES: [DistributionFamily; 3] = [
    DistributionFamily::Poisson,
    DistributionFamily::DiscreteUniform,
    DistributionFamily::DiscreteNonParametric,
];

/// Which distribution families each measure accepts.
///
/// The standard registry is built once per process; validators and evaluators hold
/// a reference to whichever registry they were given.
#[derive(Debug, Clone, Default)]
pub struct FamilyRegistry {
    accepted: HashMap<MeasureKind, Vec<DistributionFamily>>,
}

impl FamilyRegistry {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (MeasureKind, Vec<DistributionFamily>)>,
    {
        Self {
            accepted: entries.into_iter().collect(),
        }
    }

    pub fn standard() -> &'static FamilyRegistry {
        static STANDARD: OnceLock<FamilyRegistry> = OnceLock::new();
        STANDARD.get_or_init(Self::build_standard)
    }

    fn build_standard() -> Self {
        let l2: Vec<DistributionFamily> = std::iter::once(DistributionFamily::Finite)
            .chain(L2_CONTINUOUS_FAMILIES)
            .chain(L2_COUNT_FAMILIES)
            .collect();
        let all: Vec<DistributionFamily> = DistributionFamily::iter().collect();

        Self::new(MeasureKind::iter().map(|kind| {
            let families = match kind {
                MeasureKind::Auc => vec![DistributionFamily::Finite],
                MeasureKind::LogScore | MeasureKind::LogLoss => all.clone(),
                MeasureKind::BrierScore | MeasureKind::BrierLoss | MeasureKind::SphericalScore => {
                    l2.clone()
                }
            };
            (kind, families)
        }))
    }

    pub fn accepted(&self, kind: MeasureKind) -> &[DistributionFamily] {
        self.accepted.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn accepts(&self, kind: MeasureKind, family: DistributionFamily) -> bool {
        self.accepted(kind).contains(&family)
    }

    /// Comma-separated list of accepted families, for error messages.
    pub fn describe(&self, kind: MeasureKind) -> String {
        let names: Vec<&'static str> = self
            .accepted(kind)
            .iter()
            .map(|f| <&'static str>::from(*f))
            .collect();
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    }
}
