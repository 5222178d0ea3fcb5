//! WASM bridge for `dualroot_core`: runs the root finders on the named sample
//! functions and hands serialized reports back to JavaScript.

mod roots;
mod samples;

pub use roots::{bisect_sample, newton_sample, BisectionReport, DerivativeMode, NewtonReport};
pub use samples::{evaluate_sample, sample_names};
