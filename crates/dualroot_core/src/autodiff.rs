use crate::traits::{lit, Scalar};
use num_traits::{Float, FromPrimitive, Num, NumCast, One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

/// Dual number for forward-mode AD.
///
/// `real` carries the value of an expression and `dual` its first derivative
/// with respect to whichever input was seeded with a unit dual part.
/// `(r, 0)` is a constant, `(r, 1)` is the identity function at `r`.
///
/// No domain checks are made: dividing by a dual with a zero real part, or
/// taking `ln`/`sqrt` of a non-positive real part, yields IEEE infinities or
/// NaN exactly as the underlying scalar operations do.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dual<T> {
    real: T,
    dual: T,
}

impl<T: Scalar> Dual<T> {
    pub fn new(real: T, dual: T) -> Self {
        Self { real, dual }
    }

    /// A constant: derivative zero.
    pub fn constant(value: T) -> Self {
        Self::new(value, T::zero())
    }

    /// The variable of differentiation evaluated at `value`.
    pub fn variable(value: T) -> Self {
        Self::new(value, T::one())
    }

    pub fn real(&self) -> T {
        self.real
    }

    pub fn dual(&self) -> T {
        self.dual
    }

    pub fn real_mut(&mut self) -> &mut T {
        &mut self.real
    }

    pub fn dual_mut(&mut self) -> &mut T {
        &mut self.dual
    }

    pub fn set_real(&mut self, real: T) {
        self.real = real;
    }

    pub fn set_dual(&mut self, dual: T) {
        self.dual = dual;
    }

    /// Applies the chain rule for an elementary function with value `value`
    /// and slope `slope` at `self.real`.
    #[inline]
    fn chain(self, value: T, slope: T) -> Self {
        Self::new(value, self.dual * slope)
    }

    pub fn sin(self) -> Self {
        self.chain(self.real.sin(), self.real.cos())
    }

    pub fn cos(self) -> Self {
        self.chain(self.real.cos(), -self.real.sin())
    }

    pub fn tan(self) -> Self {
        let c = self.real.cos();
        Self::new(self.real.tan(), self.dual / (c * c))
    }

    pub fn exp(self) -> Self {
        let e = self.real.exp();
        self.chain(e, e)
    }

    /// Natural logarithm.
    pub fn ln(self) -> Self {
        Self::new(self.real.ln(), self.dual / self.real)
    }

    /// Absolute value. The sign of zero (either zero) is taken as `+1`, so the
    /// derivative at the kink is the right-hand one.
    pub fn abs(self) -> Self {
        let dual = if self.real >= T::zero() {
            self.dual
        } else {
            -self.dual
        };
        Self::new(self.real.abs(), dual)
    }

    /// Raises to a constant scalar exponent.
    pub fn pow(self, n: T) -> Self {
        Self::new(
            self.real.powf(n),
            n * self.dual * self.real.powf(n - T::one()),
        )
    }

    pub fn sqrt(self) -> Self {
        let s = self.real.sqrt();
        Self::new(s, self.dual / (s + s))
    }
}

/// Evaluates `f` at `x` seeded as the variable of differentiation and returns
/// `(f(x), f'(x))`.
pub fn derivative<T, F>(f: F, x: T) -> (T, T)
where
    T: Scalar,
    F: Fn(Dual<T>) -> Dual<T>,
{
    let y = f(Dual::variable(x));
    (y.real, y.dual)
}

impl<T: Scalar> From<T> for Dual<T> {
    fn from(value: T) -> Self {
        Self::constant(value)
    }
}

impl<T: fmt::Display> fmt::Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.real, self.dual)
    }
}

// Ordered by the real part. Duals that share a real part but differ in the
// dual part are unordered, keeping `partial_cmp` consistent with `==`.
impl<T: Scalar> PartialOrd for Dual<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.real.partial_cmp(&other.real)? {
            Ordering::Equal if self.dual != other.dual => None,
            ordering => Some(ordering),
        }
    }
}

impl<T: Scalar> Zero for Dual<T> {
    fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }
    fn is_zero(&self) -> bool {
        self.real.is_zero() && self.dual.is_zero()
    }
}

impl<T: Scalar> One for Dual<T> {
    fn one() -> Self {
        Self::constant(T::one())
    }
}

impl<T: Scalar> Add for Dual<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.real + rhs.real, self.dual + rhs.dual)
    }
}

impl<T: Scalar> Sub for Dual<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.real - rhs.real, self.dual - rhs.dual)
    }
}

impl<T: Scalar> Mul for Dual<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.real * rhs.real,
            self.dual * rhs.real + self.real * rhs.dual,
        )
    }
}

impl<T: Scalar> Div for Dual<T> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.real * rhs.real;
        Self::new(
            self.real / rhs.real,
            (self.dual * rhs.real - self.real * rhs.dual) / denom,
        )
    }
}

impl<T: Scalar> Rem for Dual<T> {
    type Output = Self;
    fn rem(self, rhs: Self) -> Self {
        // a mod b = a - trunc(a / b) * b, with trunc locally constant.
        let q = (self.real / rhs.real).trunc();
        Self::new(self.real % rhs.real, self.dual - q * rhs.dual)
    }
}

impl<T: Scalar> Neg for Dual<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.real, -self.dual)
    }
}

// Scalar right-hand sides. The scalar is a constant, so these act
// component-wise.

impl<T: Scalar> Add<T> for Dual<T> {
    type Output = Self;
    fn add(self, rhs: T) -> Self {
        Self::new(self.real + rhs, self.dual)
    }
}

impl<T: Scalar> Sub<T> for Dual<T> {
    type Output = Self;
    fn sub(self, rhs: T) -> Self {
        Self::new(self.real - rhs, self.dual)
    }
}

impl<T: Scalar> Mul<T> for Dual<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.real * rhs, self.dual * rhs)
    }
}

impl<T: Scalar> Div<T> for Dual<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        Self::new(self.real / rhs, self.dual / rhs)
    }
}

macro_rules! impl_assign_ops {
    ($($trait:ident::$method:ident => $op:tt),* $(,)?) => {
        $(
            impl<T: Scalar> $trait for Dual<T> {
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }

            impl<T: Scalar> $trait<T> for Dual<T> {
                fn $method(&mut self, rhs: T) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

impl_assign_ops!(
    AddAssign::add_assign => +,
    SubAssign::sub_assign => -,
    MulAssign::mul_assign => *,
    DivAssign::div_assign => /,
);

impl<T: Scalar> RemAssign for Dual<T> {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

// Scalar left-hand sides can't be written generically (orphan rule), so they
// are spelled out for the primitive floats.
macro_rules! impl_scalar_lhs_ops {
    ($($t:ty),*) => {
        $(
            impl Add<Dual<$t>> for $t {
                type Output = Dual<$t>;
                fn add(self, rhs: Dual<$t>) -> Dual<$t> {
                    Dual::new(self + rhs.real, rhs.dual)
                }
            }

            impl Sub<Dual<$t>> for $t {
                type Output = Dual<$t>;
                fn sub(self, rhs: Dual<$t>) -> Dual<$t> {
                    Dual::new(self - rhs.real, -rhs.dual)
                }
            }

            impl Mul<Dual<$t>> for $t {
                type Output = Dual<$t>;
                fn mul(self, rhs: Dual<$t>) -> Dual<$t> {
                    rhs * self
                }
            }

            impl Div<Dual<$t>> for $t {
                type Output = Dual<$t>;
                fn div(self, rhs: Dual<$t>) -> Dual<$t> {
                    Dual::constant(self) / rhs
                }
            }
        )*
    };
}

impl_scalar_lhs_ops!(f32, f64);

impl<T: Scalar> Num for Dual<T> {
    type FromStrRadixErr = T::FromStrRadixErr;
    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        T::from_str_radix(str, radix).map(Self::constant)
    }
}

impl<T: Scalar> ToPrimitive for Dual<T> {
    fn to_i64(&self) -> Option<i64> {
        self.real.to_i64()
    }
    fn to_u64(&self) -> Option<u64> {
        self.real.to_u64()
    }
    fn to_f64(&self) -> Option<f64> {
        self.real.to_f64()
    }
}

impl<T: Scalar> FromPrimitive for Dual<T> {
    fn from_i64(n: i64) -> Option<Self> {
        T::from_i64(n).map(Self::constant)
    }
    fn from_u64(n: u64) -> Option<Self> {
        T::from_u64(n).map(Self::constant)
    }
    fn from_f64(n: f64) -> Option<Self> {
        T::from_f64(n).map(Self::constant)
    }
}

impl<T: Scalar> NumCast for Dual<T> {
    fn from<N: ToPrimitive>(n: N) -> Option<Self> {
        <T as NumCast>::from(n).map(Self::constant)
    }
}

// Lets any `Scalar`-generic routine run on dual numbers. Piecewise-constant
// functions have a zero derivative; `max`, `min` and `abs_sub` look at the
// real part only.
impl<T: Scalar> Float for Dual<T> {
    fn nan() -> Self {
        Self::constant(T::nan())
    }
    fn infinity() -> Self {
        Self::constant(T::infinity())
    }
    fn neg_infinity() -> Self {
        Self::constant(T::neg_infinity())
    }
    fn neg_zero() -> Self {
        Self::new(T::neg_zero(), T::neg_zero())
    }
    fn min_value() -> Self {
        Self::constant(T::min_value())
    }
    fn min_positive_value() -> Self {
        Self::constant(T::min_positive_value())
    }
    fn epsilon() -> Self {
        Self::constant(T::epsilon())
    }
    fn max_value() -> Self {
        Self::constant(T::max_value())
    }
    fn is_nan(self) -> bool {
        self.real.is_nan()
    }
    fn is_infinite(self) -> bool {
        self.real.is_infinite()
    }
    fn is_finite(self) -> bool {
        self.real.is_finite()
    }
    fn is_normal(self) -> bool {
        self.real.is_normal()
    }
    fn classify(self) -> std::num::FpCategory {
        self.real.classify()
    }
    fn floor(self) -> Self {
        Self::constant(self.real.floor())
    }
    fn ceil(self) -> Self {
        Self::constant(self.real.ceil())
    }
    fn round(self) -> Self {
        Self::constant(self.real.round())
    }
    fn trunc(self) -> Self {
        Self::constant(self.real.trunc())
    }
    fn fract(self) -> Self {
        Self::new(self.real.fract(), self.dual)
    }
    fn abs(self) -> Self {
        Dual::abs(self)
    }
    fn signum(self) -> Self {
        Self::constant(self.real.signum())
    }
    fn is_sign_positive(self) -> bool {
        self.real.is_sign_positive()
    }
    fn is_sign_negative(self) -> bool {
        self.real.is_sign_negative()
    }
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }
    fn recip(self) -> Self {
        let r = self.real.recip();
        Self::new(r, -self.dual * r * r)
    }

    fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::one();
        }
        let n_t = T::from_i32(n).unwrap_or_else(T::nan);
        Self::new(
            self.real.powi(n),
            n_t * self.real.powi(n.saturating_sub(1)) * self.dual,
        )
    }

    fn powf(self, n: Self) -> Self {
        if n.dual.is_zero() {
            return self.pow(n.real);
        }
        // x^y = exp(y * ln(x))
        let v = self.real.powf(n.real);
        Self::new(
            v,
            v * (n.dual * self.real.ln() + n.real * self.dual / self.real),
        )
    }

    fn sqrt(self) -> Self {
        Dual::sqrt(self)
    }

    fn exp(self) -> Self {
        Dual::exp(self)
    }

    fn exp2(self) -> Self {
        let v = self.real.exp2();
        let ln2 = (T::one() + T::one()).ln();
        self.chain(v, v * ln2)
    }
    fn ln(self) -> Self {
        Dual::ln(self)
    }
    fn log(self, base: Self) -> Self {
        Dual::ln(self) / Dual::ln(base)
    }
    fn log2(self) -> Self {
        let ln2 = (T::one() + T::one()).ln();
        Self::new(self.real.log2(), self.dual / (self.real * ln2))
    }
    fn log10(self) -> Self {
        let ln10 = lit::<T>(10.0).ln();
        Self::new(self.real.log10(), self.dual / (self.real * ln10))
    }

    fn to_degrees(self) -> Self {
        Self::new(self.real.to_degrees(), self.dual.to_degrees())
    }
    fn to_radians(self) -> Self {
        Self::new(self.real.to_radians(), self.dual.to_radians())
    }

    fn max(self, other: Self) -> Self {
        if other.real.is_nan() || self.real > other.real {
            self
        } else {
            other
        }
    }
    fn min(self, other: Self) -> Self {
        if other.real.is_nan() || self.real < other.real {
            self
        } else {
            other
        }
    }

    fn abs_sub(self, other: Self) -> Self {
        if self.real <= other.real {
            Self::zero()
        } else {
            self - other
        }
    }

    fn cbrt(self) -> Self {
        let c = self.real.cbrt();
        Self::new(c, self.dual / (lit::<T>(3.0) * c * c))
    }
    fn hypot(self, other: Self) -> Self {
        let h = self.real.hypot(other.real);
        Self::new(h, (self.real * self.dual + other.real * other.dual) / h)
    }

    fn sin(self) -> Self {
        Dual::sin(self)
    }
    fn cos(self) -> Self {
        Dual::cos(self)
    }
    fn tan(self) -> Self {
        Dual::tan(self)
    }
    fn asin(self) -> Self {
        let slope = (T::one() - self.real * self.real).sqrt().recip();
        self.chain(self.real.asin(), slope)
    }
    fn acos(self) -> Self {
        let slope = -(T::one() - self.real * self.real).sqrt().recip();
        self.chain(self.real.acos(), slope)
    }
    fn atan(self) -> Self {
        let slope = (T::one() + self.real * self.real).recip();
        self.chain(self.real.atan(), slope)
    }
    fn atan2(self, other: Self) -> Self {
        // self is y, other is x.
        let denom = other.real * other.real + self.real * self.real;
        Self::new(
            self.real.atan2(other.real),
            (other.real * self.dual - self.real * other.dual) / denom,
        )
    }
    fn sin_cos(self) -> (Self, Self) {
        let (s, c) = self.real.sin_cos();
        (self.chain(s, c), self.chain(c, -s))
    }

    fn exp_m1(self) -> Self {
        self.chain(self.real.exp_m1(), self.real.exp())
    }
    fn ln_1p(self) -> Self {
        Self::new(self.real.ln_1p(), self.dual / (T::one() + self.real))
    }
    fn sinh(self) -> Self {
        self.chain(self.real.sinh(), self.real.cosh())
    }
    fn cosh(self) -> Self {
        self.chain(self.real.cosh(), self.real.sinh())
    }
    fn tanh(self) -> Self {
        let t = self.real.tanh();
        self.chain(t, T::one() - t * t)
    }
    fn asinh(self) -> Self {
        let slope = (self.real * self.real + T::one()).sqrt().recip();
        self.chain(self.real.asinh(), slope)
    }
    fn acosh(self) -> Self {
        let slope = (self.real * self.real - T::one()).sqrt().recip();
        self.chain(self.real.acosh(), slope)
    }
    fn atanh(self) -> Self {
        let slope = (T::one() - self.real * self.real).recip();
        self.chain(self.real.atanh(), slope)
    }

    fn integer_decode(self) -> (u64, i16, i8) {
        self.real.integer_decode()
    }
}
