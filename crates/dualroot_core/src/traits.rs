use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars by the root finders and the
/// sample functions. Plain floats and [`Dual`](crate::autodiff::Dual) numbers
/// both qualify, which is what lets a single generic function be evaluated
/// either way.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A real function of one variable together with its derivative.
pub trait Differentiable<T: Scalar> {
    /// Evaluates the function at a point
    fn eval(&self, x: T) -> T;

    /// Evaluates the derivative of the function at a point
    fn derivative(&self, x: T) -> T;

    /// Evaluates both the function and its derivative at a point
    fn eval_with_derivative(&self, x: T) -> (T, T) {
        (self.eval(x), self.derivative(x))
    }
}

/// Lifts an `f64` literal into `T`.
///
/// Every `Scalar` in this crate converts from `f64`; a type that refuses
/// yields NaN rather than panicking.
#[inline]
pub fn lit<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autodiff::Dual;

    struct Parabola;

    impl Differentiable<f64> for Parabola {
        fn eval(&self, x: f64) -> f64 {
            x * x - 4.0
        }

        fn derivative(&self, x: f64) -> f64 {
            2.0 * x
        }
    }

    #[test]
    fn lit_lifts_into_floats_and_duals() {
        assert_eq!(lit::<f64>(0.75), 0.75);
        assert_eq!(lit::<f32>(0.5), 0.5f32);

        let d: Dual<f64> = lit(3.0);
        assert_eq!(d.real(), 3.0);
        assert_eq!(d.dual(), 0.0);
    }

    #[test]
    fn eval_with_derivative_defaults_to_both_parts() {
        assert_eq!(Parabola.eval_with_derivative(3.0), (5.0, 6.0));
    }
}
