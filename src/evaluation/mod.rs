mod estimators;
mod evaluators;
mod filter;
mod measurement;

pub use estimators::{Estimator, MeanEstimator};
pub use evaluators::{
    EvaluationPath, Evaluator, PerformanceEvaluator, PerformanceEvaluatorExt,
    ProbabilisticEvaluator, call, call_weighted,
};
pub use filter::{ValidRows, skip_invalid};
pub use measurement::Measurement;
