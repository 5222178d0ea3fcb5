//! Bisection (dichotomy) on a bracketing interval.
//!
//! The plain entry points run a fixed number of halvings with no early exit
//! and trust the caller that `f` changes sign across the interval.
//! [`try_bisect`] checks that precondition first.

use crate::error::RootError;
use crate::traits::{lit, Scalar};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisectionSettings {
    pub iterations: usize,
}

impl BisectionSettings {
    pub const DEFAULT_ITERATIONS: usize = 50;

    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    /// Sizes the iteration count so that halving `[lower, upper]` reaches
    /// `precision`.
    pub fn for_precision(lower: f64, upper: f64, precision: f64) -> Result<Self, RootError> {
        if !(precision > 0.0) || !precision.is_finite() {
            return Err(RootError::InvalidSettings(format!(
                "precision must be positive and finite, got {precision}"
            )));
        }
        if !lower.is_finite() || !upper.is_finite() {
            return Err(RootError::NonFiniteBound { lower, upper });
        }
        let ratio = (upper - lower).abs() / precision;
        if !ratio.is_finite() {
            return Err(RootError::InvalidSettings(format!(
                "precision {precision} is too small for [{lower}, {upper}]"
            )));
        }
        Ok(Self::new(bisection_iterations(lower, upper, precision)))
    }
}

impl Default for BisectionSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITERATIONS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BisectionResult<T> {
    /// Midpoint of the final bracket.
    pub root: T,
    pub lower: T,
    pub upper: T,
    pub iterations: usize,
}

impl<T: Scalar> BisectionResult<T> {
    pub fn width(&self) -> T {
        self.upper - self.lower
    }
}

/// Minimum number of halvings for the interval to shrink to `precision`:
/// `ceil(log2((upper - lower) / precision))`, or zero if it already has.
pub fn bisection_iterations<T: Scalar>(lower: T, upper: T, precision: T) -> usize {
    let ratio = (upper - lower).abs() / precision;
    if !(ratio > T::one()) {
        return 0;
    }
    ratio.log2().ceil().to_usize().unwrap_or(usize::MAX)
}

/// Runs `iterations` halvings of `[lower, upper]` and returns the midpoint of
/// the final bracket. The result is within `(upper - lower) / 2^(iterations + 1)`
/// of a root when `f(lower)` and `f(upper)` have opposite signs; otherwise it
/// is meaningless.
pub fn bisect<T, F>(f: F, lower: T, upper: T, iterations: usize) -> T
where
    T: Scalar,
    F: Fn(T) -> T,
{
    bisect_with(f, lower, upper, BisectionSettings::new(iterations)).root
}

/// Same as [`bisect`], keeping the final bracket.
pub fn bisect_with<T, F>(
    f: F,
    lower: T,
    upper: T,
    settings: BisectionSettings,
) -> BisectionResult<T>
where
    T: Scalar,
    F: Fn(T) -> T,
{
    let half = lit::<T>(0.5);
    let mut lower = lower;
    let mut upper = upper;
    let mut f_lower = f(lower);

    for i in 0..settings.iterations {
        let mid = (lower + upper) * half;
        let f_mid = f(mid);
        if f_lower * f_mid < T::zero() {
            upper = mid;
        } else {
            lower = mid;
            f_lower = f_mid;
        }
        trace!("bisection step {}: [{:?}, {:?}]", i + 1, lower, upper);
    }

    let root = (lower + upper) * half;
    debug!(
        "bisection finished after {} iterations at {:?}",
        settings.iterations, root
    );
    BisectionResult {
        root,
        lower,
        upper,
        iterations: settings.iterations,
    }
}

/// Checked bisection: bounds may come in either order, must be distinct and
/// finite, and `f` must change sign between them. An endpoint that is an exact
/// root is returned without iterating.
pub fn try_bisect<T, F>(
    f: F,
    lower: T,
    upper: T,
    settings: BisectionSettings,
) -> Result<BisectionResult<T>, RootError>
where
    T: Scalar,
    F: Fn(T) -> T,
{
    let as_f64 = |v: T| v.to_f64().unwrap_or(f64::NAN);

    if !lower.is_finite() || !upper.is_finite() {
        return Err(RootError::NonFiniteBound {
            lower: as_f64(lower),
            upper: as_f64(upper),
        });
    }
    if lower == upper {
        return Err(RootError::IdenticalBounds);
    }
    let (lower, upper) = if lower > upper {
        (upper, lower)
    } else {
        (lower, upper)
    };

    let f_lower = f(lower);
    let f_upper = f(upper);
    for endpoint in [(lower, f_lower), (upper, f_upper)] {
        if endpoint.1.is_zero() {
            return Ok(BisectionResult {
                root: endpoint.0,
                lower: endpoint.0,
                upper: endpoint.0,
                iterations: 0,
            });
        }
    }
    if !(f_lower * f_upper < T::zero()) {
        return Err(RootError::NotBracketed {
            lower: as_f64(lower),
            upper: as_f64(upper),
        });
    }

    Ok(bisect_with(f, lower, upper, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn f(x: f64) -> f64 {
        x.cos() - 2.0 * x
    }

    // Root of cos(x) = 2x.
    const ROOT: f64 = 0.450_183_611_294_873_6;

    fn assert_err_contains<T: std::fmt::Debug>(result: Result<T, RootError>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn iteration_count_for_requested_precision() {
        assert_eq!(bisection_iterations(-PI, PI, 1e-7), 26);
        assert_eq!(bisection_iterations(0.0, 1.0, 0.25), 2);
        assert_eq!(bisection_iterations(0.0, 1.0, 0.3), 2);
    }

    #[test]
    fn iteration_count_is_zero_for_narrow_interval() {
        assert_eq!(bisection_iterations(0.0, 1e-9, 1e-7), 0);
        assert_eq!(bisection_iterations(0.0, 1.0, 1.0), 0);
    }

    #[test]
    fn bisection_finds_root_of_cos_minus_two_x() {
        let root = bisect(f, -PI, PI, 40);
        assert!(f(root).abs() < 1e-6);

        let n = bisection_iterations(-PI, PI, 1e-7);
        let root = bisect(f, -PI, PI, n);
        assert!(f(root).abs() < 1e-6);
    }

    #[test]
    fn error_is_bounded_by_halved_interval() {
        for n in [0usize, 1, 5, 10, 20, 30] {
            let root = bisect(f, -PI, PI, n);
            let bound = 2.0 * PI / 2f64.powi(n as i32 + 1);
            assert!(
                (root - ROOT).abs() <= bound + 1e-15,
                "n = {n}: |{root} - {ROOT}| > {bound}"
            );
        }
    }

    #[test]
    fn zero_iterations_returns_midpoint() {
        assert_eq!(bisect(f, -1.0, 3.0, 0), 1.0);
    }

    #[test]
    fn bracket_keeps_the_root() {
        let result = bisect_with(f, -PI, PI, BisectionSettings::new(20));
        assert!(result.lower <= ROOT && ROOT <= result.upper);
        assert!((result.width() - 2.0 * PI / 2f64.powi(20)).abs() < 1e-12);
        assert_eq!(result.iterations, 20);
    }

    #[test]
    fn bisection_is_generic_over_scalar() {
        let root = bisect(|x: f32| x * x - 2.0, 0.0f32, 2.0, 30);
        assert!((root - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn settings_from_precision() {
        let settings = BisectionSettings::for_precision(-PI, PI, 1e-7).expect("valid settings");
        assert_eq!(settings.iterations, 26);
        assert_eq!(BisectionSettings::default().iterations, 50);

        assert_err_contains(BisectionSettings::for_precision(0.0, 1.0, 0.0), "precision");
        assert_err_contains(
            BisectionSettings::for_precision(0.0, f64::INFINITY, 1e-3),
            "finite",
        );
    }

    #[test]
    fn settings_reject_precision_that_overflows_the_ratio() {
        assert_err_contains(
            BisectionSettings::for_precision(-PI, PI, 1e-310),
            "too small",
        );
        assert_err_contains(
            BisectionSettings::for_precision(-1e300, 1e300, 1e-300),
            "too small",
        );

        let settings = BisectionSettings::for_precision(-PI, PI, 1e-300).expect("finite ratio");
        assert!(settings.iterations < 1100);
    }

    #[test]
    fn checked_bisection_accepts_swapped_bounds() {
        let result = try_bisect(f, PI, -PI, BisectionSettings::new(40)).expect("bracketed");
        assert!(f(result.root).abs() < 1e-6);
        assert!(result.lower < result.upper);
    }

    #[test]
    fn checked_bisection_returns_exact_endpoint_root() {
        let result = try_bisect(|x: f64| x, 0.0, 1.0, BisectionSettings::default()).expect("root");
        assert_eq!(result.root, 0.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn checked_bisection_rejects_bad_input() {
        let settings = BisectionSettings::default();
        assert_eq!(
            try_bisect(f, 1.0, 1.0, settings).unwrap_err(),
            RootError::IdenticalBounds
        );
        assert_eq!(
            try_bisect(|x: f64| x * x + 1.0, -1.0, 1.0, settings).unwrap_err(),
            RootError::NotBracketed {
                lower: -1.0,
                upper: 1.0
            }
        );
        assert_err_contains(try_bisect(f, f64::NAN, 1.0, settings), "finite");
        assert_err_contains(try_bisect(|x: f64| x * x + 1.0, -1.0, 1.0, settings), "sign change");
    }
}
