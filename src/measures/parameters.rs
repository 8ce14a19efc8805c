use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_tol() -> f64 {
    f64::EPSILON
}

fn default_alpha() -> f64 {
    2.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LogParameters {
    #[serde(default = "default_tol")]
    #[schemars(
        title = "Tolerance",
        description = "Probabilities are clamped to [tol, 1 - tol] before taking the log.",
        default = "default_tol",
        range(min = 0.0, max = 0.5)
    )]
    pub tol: f64,
}

impl Default for LogParameters {
    fn default() -> Self {
        Self { tol: default_tol() }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SphericalParameters {
    #[serde(default = "default_alpha")]
    #[schemars(
        title = "Alpha",
        description = "Norm exponent. Must be 2 unless the target is finite.",
        default = "default_alpha",
        range(min = 1.0)
    )]
    pub alpha: f64,
}

impl Default for SphericalParameters {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
        }
    }
}
