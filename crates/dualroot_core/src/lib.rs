//! The `dualroot_core` crate provides dual-number forward-mode automatic
//! differentiation and a pair of scalar root finders built on it.
//! Every routine is generic over `Scalar`, so the same function can be
//! evaluated on plain floats (`f32`, `f64`) or on `Dual` numbers.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `Differentiable` (a function and its derivative).
//! - **Autodiff**: the `Dual<T>` type and its elementary-function rules.
//! - **Bisection**: fixed-iteration dichotomy and its iteration sizing.
//! - **Newton**: Newton's method with a hand-written or a dual-number derivative.

pub mod autodiff;
pub mod bisection;
pub mod error;
pub mod newton;
pub mod samples;
pub mod traits;

pub use autodiff::{derivative, Dual};
pub use bisection::{bisect, bisection_iterations, try_bisect, BisectionResult, BisectionSettings};
pub use error::RootError;
pub use newton::{newton, newton_dual, NewtonResult, NewtonSettings, Termination};
pub use traits::{Differentiable, Scalar};
