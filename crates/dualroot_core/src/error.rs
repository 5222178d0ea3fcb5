use thiserror::Error;

/// Recoverable failures surfaced by the checked entry points.
///
/// The iteration loops themselves never raise: numeric trouble such as a
/// vanishing derivative shows up as NaN or infinity in the result.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RootError {
    #[error("Bisection requires two distinct bounds")]
    IdenticalBounds,
    #[error("Bounds must be finite, got [{lower}, {upper}]")]
    NonFiniteBound { lower: f64, upper: f64 },
    #[error("No sign change between f({lower}) and f({upper})")]
    NotBracketed { lower: f64, upper: f64 },
    #[error("Failed to converge after {iterations} iterations (|f(x)| = {residual})")]
    FailedToConverge { iterations: usize, residual: f64 },
    #[error("Unknown sample function \"{0}\"")]
    UnknownSample(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}
