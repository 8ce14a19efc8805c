mod observation;
mod target_kind;

pub use observation::Observation;
pub use target_kind::TargetKind;
