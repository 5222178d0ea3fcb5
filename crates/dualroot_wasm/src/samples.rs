//! Sample catalogue and point evaluation.

use anyhow::Result;
use dualroot_core::autodiff::{derivative, Dual};
use dualroot_core::samples::SampleFunction;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn sample_names() -> Vec<String> {
    SampleFunction::ALL
        .iter()
        .map(|sample| sample.name().to_string())
        .collect()
}

/// Returns `[f(x), f'(x)]`, the derivative taken with dual numbers.
#[wasm_bindgen]
pub fn evaluate_sample(name: &str, x: f64) -> Result<Vec<f64>, JsValue> {
    console_error_panic_hook::set_once();
    let (value, slope) = run_evaluation(name, x)
        .map_err(|e| JsValue::from_str(&format!("Evaluation failed: {e:#}")))?;
    Ok(vec![value, slope])
}

pub(crate) fn run_evaluation(name: &str, x: f64) -> Result<(f64, f64)> {
    let sample: SampleFunction = name.parse()?;
    Ok(derivative(|v: Dual<f64>| sample.eval(v), x))
}
