//! Demonstration functions, written once over [`Scalar`] so they evaluate on
//! plain floats and on dual numbers alike.

use crate::error::RootError;
use crate::traits::{lit, Differentiable, Scalar};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// `cos(x) - 2x`, single root near `0.4502`.
pub fn cos_minus_two_x<T: Scalar>(x: T) -> T {
    x.cos() - lit::<T>(2.0) * x
}

pub fn cos_minus_two_x_derivative<T: Scalar>(x: T) -> T {
    -x.sin() - lit::<T>(2.0)
}

/// `(e^x - 1) / (e^x + 1) + 3/4`, i.e. `tanh(x/2) + 3/4`, single root at
/// `2 atanh(-3/4)`.
pub fn shifted_logistic<T: Scalar>(x: T) -> T {
    let e = x.exp();
    (e - T::one()) / (e + T::one()) + lit::<T>(0.75)
}

pub fn shifted_logistic_derivative<T: Scalar>(x: T) -> T {
    let e = x.exp();
    let denom = e + T::one();
    lit::<T>(2.0) * e / (denom * denom)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFunction {
    CosMinusTwoX,
    ShiftedLogistic,
}

impl SampleFunction {
    pub const ALL: [SampleFunction; 2] = [Self::CosMinusTwoX, Self::ShiftedLogistic];

    pub fn name(self) -> &'static str {
        match self {
            Self::CosMinusTwoX => "cos_minus_two_x",
            Self::ShiftedLogistic => "shifted_logistic",
        }
    }

    pub fn eval<T: Scalar>(self, x: T) -> T {
        match self {
            Self::CosMinusTwoX => cos_minus_two_x(x),
            Self::ShiftedLogistic => shifted_logistic(x),
        }
    }

    /// Hand-written derivative.
    pub fn derivative<T: Scalar>(self, x: T) -> T {
        match self {
            Self::CosMinusTwoX => cos_minus_two_x_derivative(x),
            Self::ShiftedLogistic => shifted_logistic_derivative(x),
        }
    }

    /// An interval on which the function changes sign.
    pub fn bracket(self) -> (f64, f64) {
        match self {
            Self::CosMinusTwoX => (-PI, PI),
            Self::ShiftedLogistic => (-5.0, 5.0),
        }
    }

    pub fn initial_guess(self) -> f64 {
        match self {
            Self::CosMinusTwoX => 2.0,
            Self::ShiftedLogistic => 0.0,
        }
    }
}

impl<T: Scalar> Differentiable<T> for SampleFunction {
    fn eval(&self, x: T) -> T {
        SampleFunction::eval(*self, x)
    }

    fn derivative(&self, x: T) -> T {
        SampleFunction::derivative(*self, x)
    }
}

impl fmt::Display for SampleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleFunction {
    type Err = RootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sample| sample.name() == s)
            .ok_or_else(|| RootError::UnknownSample(s.to_string()))
    }
}
