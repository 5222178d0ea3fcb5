//! Bisection and Newton runners over the sample functions.

use anyhow::{anyhow, Context, Result};
use dualroot_core::autodiff::Dual;
use dualroot_core::bisection::{try_bisect, BisectionSettings};
use dualroot_core::newton::{newton, newton_dual, NewtonSettings};
use dualroot_core::samples::SampleFunction;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::to_value;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

/// Where Newton's method gets its derivative from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivativeMode {
    /// The sample's hand-written derivative.
    Scalar,
    /// The dual part of the sample evaluated on dual numbers.
    Dual,
}

impl FromStr for DerivativeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scalar" => Ok(Self::Scalar),
            "dual" => Ok(Self::Dual),
            other => Err(anyhow!("Unknown derivative mode \"{other}\".")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BisectionReport {
    pub sample: SampleFunction,
    pub requested_precision: f64,
    pub suggested_iterations: usize,
    pub root: f64,
    /// f(root)
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewtonReport {
    pub sample: SampleFunction,
    pub mode: DerivativeMode,
    pub initial_guess: f64,
    pub threshold: f64,
    pub root: f64,
    /// f(root)
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

#[wasm_bindgen]
pub fn bisect_sample(
    sample: &str,
    lower: f64,
    upper: f64,
    precision: f64,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let report = run_bisection(sample, lower, upper, precision)
        .map_err(|e| JsValue::from_str(&format!("Bisection failed: {e:#}")))?;
    to_value(&report).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen]
pub fn newton_sample(
    sample: &str,
    initial_guess: f64,
    threshold: f64,
    max_iterations: u32,
    mode: &str,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let report = run_newton(sample, initial_guess, threshold, max_iterations, mode)
        .map_err(|e| JsValue::from_str(&format!("Newton failed: {e:#}")))?;
    to_value(&report).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

pub(crate) fn run_bisection(
    name: &str,
    lower: f64,
    upper: f64,
    precision: f64,
) -> Result<BisectionReport> {
    let sample: SampleFunction = name.parse()?;
    let settings = BisectionSettings::for_precision(lower, upper, precision)
        .context("Failed to size the bisection.")?;
    let result = try_bisect(|x: f64| sample.eval(x), lower, upper, settings)
        .with_context(|| format!("Failed to bisect {sample} on [{lower}, {upper}]."))?;

    Ok(BisectionReport {
        sample,
        requested_precision: precision,
        suggested_iterations: settings.iterations,
        root: result.root,
        value: sample.eval(result.root),
        lower: result.lower,
        upper: result.upper,
    })
}

pub(crate) fn run_newton(
    name: &str,
    initial_guess: f64,
    threshold: f64,
    max_iterations: u32,
    mode: &str,
) -> Result<NewtonReport> {
    let sample: SampleFunction = name.parse()?;
    let mode: DerivativeMode = mode.parse()?;
    let settings = NewtonSettings {
        threshold,
        max_iterations: max_iterations as usize,
    };
    settings.validate()?;

    let result = match mode {
        DerivativeMode::Scalar => newton(
            |x: f64| sample.eval(x),
            |x: f64| sample.derivative(x),
            initial_guess,
            settings,
        ),
        DerivativeMode::Dual => newton_dual(
            |x: Dual<f64>| sample.eval(x),
            Dual::variable(initial_guess),
            settings,
        ),
    };

    Ok(NewtonReport {
        sample,
        mode,
        initial_guess,
        threshold,
        root: result.root,
        value: sample.eval(result.root),
        iterations: result.iterations,
        converged: result.is_converged(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_err_contains<T: std::fmt::Debug>(result: Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err:#}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn bisection_report_matches_requested_precision() {
        let report = run_bisection("cos_minus_two_x", -PI, PI, 1e-7).expect("bisection");
        assert_eq!(report.suggested_iterations, 26);
        assert!(report.value.abs() < 1e-6);
        assert!(report.upper - report.lower <= 1e-7);
    }

    #[test]
    fn bisection_reports_missing_sign_change() {
        assert_err_contains(
            run_bisection("shifted_logistic", 0.0, 5.0, 1e-7),
            "No sign change",
        );
    }

    #[test]
    fn bisection_rejects_bad_precision() {
        assert_err_contains(
            run_bisection("cos_minus_two_x", -1.0, 1.0, -1.0),
            "Failed to size the bisection",
        );
        assert_err_contains(
            run_bisection("cos_minus_two_x", -PI, PI, 1e-310),
            "too small",
        );
    }

    #[test]
    fn newton_modes_agree() {
        let scalar = run_newton("shifted_logistic", 0.0, 1e-7, 20, "scalar").expect("scalar");
        let dual = run_newton("shifted_logistic", 0.0, 1e-7, 20, "dual").expect("dual");

        assert!(scalar.converged && dual.converged);
        assert!((scalar.root - dual.root).abs() < 1e-6);
        assert_eq!(dual.mode, DerivativeMode::Dual);
    }

    #[test]
    fn newton_reports_exhaustion_without_failing() {
        let report = run_newton("cos_minus_two_x", 2.0, 1e-7, 0, "dual").expect("report");
        assert!(!report.converged);
        assert_eq!(report.iterations, 0);
        assert_eq!(report.root, 2.0);
    }

    #[test]
    fn newton_rejects_bad_input() {
        assert_err_contains(run_newton("cos_minus_two_x", 2.0, 1e-7, 20, "secant"), "mode");
        assert_err_contains(run_newton("cos_minus_two_x", 2.0, -1.0, 20, "dual"), "threshold");
        assert_err_contains(run_newton("sinc", 2.0, 1e-7, 20, "dual"), "sinc");
    }
}
