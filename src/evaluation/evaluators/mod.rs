mod evaluator;
mod performance_evaluator;
mod probabilistic_evaluator;

pub use evaluator::{EvaluationPath, Evaluator, call, call_weighted};
pub use performance_evaluator::{PerformanceEvaluator, PerformanceEvaluatorExt};
pub use probabilistic_evaluator::ProbabilisticEvaluator;
