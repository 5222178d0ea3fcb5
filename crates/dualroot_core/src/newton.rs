//! Newton's method for scalar roots.
//!
//! Two flavours share one loop: [`newton`] takes a hand-written derivative,
//! [`newton_dual`] evaluates the function once per step on a dual number and
//! reads the derivative off the dual part.
//!
//! Iteration counting: `iterations` is the number of updates applied. The
//! loop checks `|f(x)| <= threshold` before checking the cap, so with
//! `max_iterations == 0` the initial estimate comes back untouched with
//! `iterations == 0`. A vanishing derivative is not guarded against; the
//! estimate turns non-finite and the loop runs to the cap.

use crate::autodiff::{derivative, Dual};
use crate::error::RootError;
use crate::traits::{lit, Differentiable, Scalar};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonSettings {
    pub threshold: f64,
    pub max_iterations: usize,
}

impl NewtonSettings {
    pub fn validate(&self) -> Result<(), RootError> {
        if !(self.threshold >= 0.0) || !self.threshold.is_finite() {
            return Err(RootError::InvalidSettings(format!(
                "threshold must be finite and non-negative, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            threshold: 1e-7,
            max_iterations: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// `|f(root)| <= threshold`.
    Converged,
    /// The iteration cap was reached first; `root` is the last estimate.
    MaxIterations,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewtonResult<T> {
    pub root: T,
    /// `|f(root)|`
    pub residual: T,
    pub iterations: usize,
    pub status: Termination,
}

impl<T: Scalar> NewtonResult<T> {
    pub fn is_converged(&self) -> bool {
        self.status == Termination::Converged
    }

    /// Turns an exhausted run into [`RootError::FailedToConverge`].
    pub fn into_result(self) -> Result<Self, RootError> {
        match self.status {
            Termination::Converged => Ok(self),
            Termination::MaxIterations => Err(RootError::FailedToConverge {
                iterations: self.iterations,
                residual: self.residual.to_f64().unwrap_or(f64::NAN),
            }),
        }
    }
}

/// A function paired with a derivative supplied by the caller.
pub struct WithDerivative<F, D> {
    pub function: F,
    pub derivative: D,
}

impl<T, F, D> Differentiable<T> for WithDerivative<F, D>
where
    T: Scalar,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    fn eval(&self, x: T) -> T {
        (self.function)(x)
    }

    fn derivative(&self, x: T) -> T {
        (self.derivative)(x)
    }
}

/// A function written over dual numbers; its derivative comes for free.
pub struct AutoDerivative<F>(pub F);

impl<T, F> Differentiable<T> for AutoDerivative<F>
where
    T: Scalar,
    F: Fn(Dual<T>) -> Dual<T>,
{
    fn eval(&self, x: T) -> T {
        (self.0)(Dual::constant(x)).real()
    }

    fn derivative(&self, x: T) -> T {
        (self.0)(Dual::variable(x)).dual()
    }

    fn eval_with_derivative(&self, x: T) -> (T, T) {
        derivative(&self.0, x)
    }
}

/// Newton iteration `x <- x - f(x) / f'(x)` on any [`Differentiable`].
pub fn solve<T, F>(function: &F, initial_guess: T, settings: NewtonSettings) -> NewtonResult<T>
where
    T: Scalar,
    F: Differentiable<T> + ?Sized,
{
    let threshold = lit::<T>(settings.threshold);
    let mut x = initial_guess;
    let mut iterations = 0usize;

    loop {
        let (fx, dfx) = function.eval_with_derivative(x);
        let residual = fx.abs();

        let status = if residual <= threshold {
            Some(Termination::Converged)
        } else if iterations >= settings.max_iterations {
            Some(Termination::MaxIterations)
        } else {
            None
        };
        if let Some(status) = status {
            debug!(
                "newton stopped ({:?}) after {} iterations at {:?}, |f| = {:?}",
                status, iterations, x, residual
            );
            return NewtonResult {
                root: x,
                residual,
                iterations,
                status,
            };
        }

        x = x - fx / dfx;
        iterations += 1;
        trace!("newton step {}: x = {:?}, f'(x) = {:?}", iterations, x, dfx);
    }
}

/// Newton's method with a hand-written derivative `df`.
pub fn newton<T, F, D>(f: F, df: D, initial_guess: T, settings: NewtonSettings) -> NewtonResult<T>
where
    T: Scalar,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    let function = WithDerivative {
        function: f,
        derivative: df,
    };
    solve(&function, initial_guess, settings)
}

/// Newton's method on a function written over dual numbers.
///
/// Only the real part of `initial_guess` is used: the estimate is re-seeded
/// as the variable of differentiation (dual part `1`) before every
/// evaluation, and the update `x.real -= y.real / y.dual` consumes the
/// result as a scalar correction.
pub fn newton_dual<T, F>(f: F, initial_guess: Dual<T>, settings: NewtonSettings) -> NewtonResult<T>
where
    T: Scalar,
    F: Fn(Dual<T>) -> Dual<T>,
{
    solve(&AutoDerivative(f), initial_guess.real(), settings)
}
