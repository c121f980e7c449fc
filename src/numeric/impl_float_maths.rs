// Element-wise methods for arrays

use num_complex::Complex;
use num_traits::{Float, FloatConst, Signed};

use crate::error::NdResult;
use crate::func;
use crate::{Array, Element};

macro_rules! unary_ops {
    ($($(#[$meta:meta])* fn $id:ident)+) => {
        $($(#[$meta])*
        #[must_use = "method returns a new array and does not mutate the original value"]
        pub fn $id(&self) -> Array<A> {
            self.map(A::$id)
        })+
    };
}

macro_rules! binary_ops {
    ($($(#[$meta:meta])* fn $id:ident)+) => {
        $($(#[$meta])*
        ///
        /// **Errors** with `ShapeMismatch` if the shapes do not broadcast.
        pub fn $id(&self, rhs: &Array<A>) -> NdResult<Array<A>> {
            func::apply2(self, rhs, A::$id)
        })+
    };
}

macro_rules! boolean_ops {
    ($(#[$meta1:meta])* fn $func:ident
    $(#[$meta2:meta])* fn $any:ident) => {
        $(#[$meta1])*
        #[must_use = "method returns a new array and does not mutate the original value"]
        pub fn $func(&self) -> Array<bool> {
            self.map(A::$func)
        }
        $(#[$meta2])*
        #[must_use = "method returns a new boolean value and does not mutate the original value"]
        pub fn $any(&self) -> bool {
            self.iter_memory_order().any(A::$func)
        }
    };
}

/// # Element-wise methods for float arrays
///
/// Element-wise math functions for any array type that contains float number.
impl<A> Array<A>
where
    A: Element + Float,
{
    boolean_ops! {
        /// If the number is `NaN` (not a number), then `true` is returned for each element.
        fn is_nan
        /// Return `true` if any element is `NaN` (not a number).
        fn is_any_nan
    }
    boolean_ops! {
        /// If the number is infinity, then `true` is returned for each element.
        fn is_infinite
        /// Return `true` if any element is infinity.
        fn is_any_infinite
    }
    unary_ops! {
        /// The largest integer less than or equal to each element.
        fn floor
        /// The smallest integer greater than or equal to each element.
        fn ceil
        /// The nearest integer of each element, half way cases away from zero.
        fn round
        /// The integer part of each element.
        fn trunc
        /// The reciprocal (inverse) of each element, `1/x`.
        fn recip
        /// Square root of each element.
        fn sqrt
        /// `e^x` of each element (exponential function).
        fn exp
        /// Natural logarithm of each element.
        fn ln
        /// Base 2 logarithm of each element.
        fn log2
        /// Base 10 logarithm of each element.
        fn log10
        /// Sine of each element (in radians).
        fn sin
        /// Cosine of each element (in radians).
        fn cos
        /// Tangent of each element (in radians).
        fn tan
        /// Arcsine of each element, in radians.
        fn asin
        /// Arccosine of each element, in radians.
        fn acos
        /// Arctangent of each element, in radians.
        fn atan
        /// Hyperbolic sine of each element.
        fn sinh
        /// Hyperbolic cosine of each element.
        fn cosh
        /// Hyperbolic tangent of each element.
        fn tanh
    }
    binary_ops! {
        /// Four quadrant arctangent of `self / rhs`, elementwise with
        /// broadcasting.
        fn atan2
        /// Length of the hypotenuse `sqrt(self² + rhs²)`, elementwise with
        /// broadcasting.
        fn hypot
        /// `self` raised to the power `rhs`, elementwise with broadcasting.
        fn powf
    }

    /// Converts radians to degrees for each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn rad2deg(&self) -> Array<A> {
        self.map(A::to_degrees)
    }

    /// Converts degrees to radians for each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn deg2rad(&self) -> Array<A> {
        self.map(A::to_radians)
    }

    /// Integer power of each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn powi(&self, n: i32) -> Array<A> {
        self.map(|v| v.powi(n))
    }

    /// Square (two powers) of each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn pow2(&self) -> Array<A> {
        self.map(|v| v * v)
    }

    /// The normalized sinc function `sin(πx) / (πx)` of each element, which
    /// is `1` at zero.
    ///
    /// ```
    /// use ndengine::arr1;
    ///
    /// let s = arr1(&[0f64, 1., 0.5]).sinc();
    /// assert_eq!(s.get(0).unwrap(), 1.);
    /// assert!(s.get(1).unwrap().abs() < 1e-15);
    /// assert!((s.get(2).unwrap() - 2. / std::f64::consts::PI).abs() < 1e-15);
    /// ```
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn sinc(&self) -> Array<A>
    where
        A: FloatConst,
    {
        self.map(|x| {
            if x.is_zero() {
                A::one()
            } else {
                let px = A::PI() * x;
                px.sin() / px
            }
        })
    }
}

/// # Element-wise methods for signed arrays
impl<A> Array<A>
where
    A: Element + Signed,
{
    /// Absolute value of each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn abs(&self) -> Array<A> {
        self.map(|x| x.abs())
    }

    /// Sign of each element.
    ///
    /// + `1` for all positive numbers.
    /// + `-1` for all negative numbers.
    /// + `0` for zero, of either sign.
    /// + `NaN` for `NaN`.
    ///
    /// ```
    /// use ndengine::arr1;
    ///
    /// assert_eq!(arr1(&[-3, 0, 7]).sign(), arr1(&[-1, 0, 1]));
    /// assert_eq!(arr1(&[-0.5, 0., 2.]).sign(), arr1(&[-1., 0., 1.]));
    /// ```
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn sign(&self) -> Array<A> {
        self.map(|x| if x.is_zero() { A::zero() } else { x.signum() })
    }
}

/// Elementwise closeness test for [`Array::isclose`].
///
/// Floating point and complex values `x` and `y` are close if
/// `|x - y| <= atol + rtol * |y|`; `NaN` is never close to anything.
/// Integers and booleans are close only if they are equal.
pub trait IsClose: Element {
    fn is_close(self, other: Self, rtol: f64, atol: f64) -> bool;
}

macro_rules! exact_is_close {
    ($($t:ty),*) => {
        $(
        impl IsClose for $t {
            #[inline]
            fn is_close(self, other: Self, _rtol: f64, _atol: f64) -> bool {
                self == other
            }
        }
        )*
    };
}

exact_is_close!(bool, i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! float_is_close {
    ($($t:ty),*) => {
        $(
        impl IsClose for $t {
            #[inline]
            fn is_close(self, other: Self, rtol: f64, atol: f64) -> bool {
                (self - other).abs() <= atol as $t + rtol as $t * other.abs()
            }
        }

        impl IsClose for Complex<$t> {
            #[inline]
            fn is_close(self, other: Self, rtol: f64, atol: f64) -> bool {
                (self - other).norm() <= atol as $t + rtol as $t * other.norm()
            }
        }
        )*
    };
}

float_is_close!(f32, f64);

#[cfg(feature = "half")]
impl IsClose for half::f16 {
    #[inline]
    fn is_close(self, other: Self, rtol: f64, atol: f64) -> bool {
        f32::from(self).is_close(f32::from(other), rtol, atol)
    }
}

/// # Tolerance comparisons
impl<A: IsClose> Array<A> {
    /// Return a boolean array telling, elementwise with broadcasting, if
    /// `self` is close to `other` within relative tolerance `rtol` and
    /// absolute tolerance `atol` (see [`IsClose`]).
    ///
    /// **Errors** with `ShapeMismatch` if the shapes do not broadcast.
    ///
    /// ```
    /// use ndengine::arr1;
    ///
    /// let a = arr1(&[1.0, 2.0, 3.0]);
    /// let b = arr1(&[1.0, 2.1, 3.0 + 1e-9]);
    /// let close = a.isclose(&b, 1e-5, 1e-8).unwrap();
    /// assert_eq!(close, arr1(&[true, false, true]));
    /// ```
    pub fn isclose(&self, other: &Array<A>, rtol: f64, atol: f64) -> NdResult<Array<bool>> {
        func::apply2(self, other, |x, y| x.is_close(y, rtol, atol))
    }

    /// Return `true` if every pair of elements is close, see
    /// [`isclose`](Array::isclose).
    ///
    /// **Errors** with `ShapeMismatch` if the shapes do not broadcast.
    pub fn allclose(&self, other: &Array<A>, rtol: f64, atol: f64) -> NdResult<bool> {
        Ok(self.isclose(other, rtol, atol)?.all())
    }
}

/// # Complex parts
impl<F> Array<Complex<F>>
where
    F: Element + Float,
    Complex<F>: Element,
{
    /// Real part of each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn real(&self) -> Array<F> {
        self.map(|z| z.re)
    }

    /// Imaginary part of each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn imag(&self) -> Array<F> {
        self.map(|z| z.im)
    }

    /// Complex conjugate of each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn conj(&self) -> Array<Complex<F>> {
        self.map(|z| z.conj())
    }

    /// Modulus `|z|` of each element.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn norm(&self) -> Array<F> {
        self.map(|z| z.norm())
    }

    /// Argument of each element, in radians.
    #[must_use = "method returns a new array and does not mutate the original value"]
    pub fn arg(&self) -> Array<F> {
        self.map(|z| z.arg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr1, arr2};
    use std::f64::consts::PI;

    #[test]
    fn angles() {
        let a = arr1(&[0., 90., 180.]);
        let r = a.deg2rad();
        assert!((r.get(2).unwrap() - PI).abs() < 1e-15);
        assert!((r.rad2deg().get(1).unwrap() - 90.).abs() < 1e-12);
        let y = arr1(&[1., -1.]);
        let x = arr2(&[[1.], [0.]]);
        let t = y.atan2(&x).unwrap();
        assert_eq!(t.shape(), &[2, 2]);
        assert_eq!(t.get([0, 0]).unwrap(), PI / 4.);
        assert_eq!(t.get([1, 1]).unwrap(), -PI / 2.);
    }

    #[test]
    fn transcendental() {
        let a = arr1(&[1.0f32, 4.0, 9.0]);
        assert_eq!(a.sqrt(), arr1(&[1.0, 2.0, 3.0]));
        assert_eq!(arr1(&[0.0f64]).exp(), arr1(&[1.0]));
        assert_eq!(arr1(&[-1.5f64, 1.5]).floor(), arr1(&[-2., 1.]));
        assert_eq!(arr1(&[-1.5f64, 1.5]).round(), arr1(&[-2., 2.]));
        assert!(arr1(&[1.0f64, f64::NAN]).is_any_nan());
        assert!(!arr1(&[1.0f64, 2.0]).is_any_infinite());
    }

    #[test]
    fn signed() {
        assert_eq!(arr1(&[-3i8, 4]).abs(), arr1(&[3, 4]));
        assert_eq!(arr1(&[-0.0f64]).sign().get(0).unwrap(), 0.0);
        assert!(arr1(&[f64::NAN]).sign().get(0).unwrap().is_nan());
    }

    #[test]
    fn closeness() {
        let a = arr1(&[1.0, f64::NAN]);
        assert_eq!(a.isclose(&a, 0., 0.).unwrap(), arr1(&[true, false]));
        assert!(arr1(&[1, 2]).allclose(&arr1(&[1, 2]), 0.5, 10.).unwrap());
        assert!(!arr1(&[1, 2]).allclose(&arr1(&[1, 3]), 0.5, 10.).unwrap());
        let z = arr1(&[Complex::new(1.0, 1.0)]);
        let w = arr1(&[Complex::new(1.0, 1.0 + 1e-12)]);
        assert!(z.allclose(&w, 1e-9, 0.).unwrap());
        assert!(arr1(&[1., 2.]).isclose(&arr1(&[1., 2., 3.]), 0., 0.).is_err());
    }

    #[test]
    fn complex_parts() {
        let z = arr1(&[Complex::new(3.0, 4.0), Complex::new(-1.0, 0.0)]);
        assert_eq!(z.real(), arr1(&[3.0, -1.0]));
        assert_eq!(z.imag(), arr1(&[4.0, 0.0]));
        assert_eq!(z.conj().imag(), arr1(&[-4.0, -0.0]));
        assert_eq!(z.norm(), arr1(&[5.0, 1.0]));
    }
}
