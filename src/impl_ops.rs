// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use num_complex::Complex;

use crate::error::NdResult;
use crate::func;
use crate::{Array, Element};

/// Elements that can be used as direct operands in arithmetic with arrays.
///
/// For example, `f64` is a `ScalarOperand` which means that for an array `a`
/// of `f64`, arithmetic like `&a + 1.0`, and, `&a * 2.`, and `a += 3.` are
/// allowed.
///
/// `ScalarOperand` determines for which scalars `K` operations `&A @ K`, and
/// `A @ K`, and `A @= K` are defined, as ***right hand side operands***, for
/// applicable arithmetic operators (denoted `@`).
///
/// ***Left hand side*** scalar operands are not related to this trait (they
/// need one `impl` per concrete scalar type); but they are still implemented
/// for the same types, allowing operations `K @ &A`, and `K @ A` for
/// primitive numeric types `K`.
pub trait ScalarOperand: 'static + Copy {}
impl ScalarOperand for bool {}
impl ScalarOperand for i8 {}
impl ScalarOperand for u8 {}
impl ScalarOperand for i16 {}
impl ScalarOperand for u16 {}
impl ScalarOperand for i32 {}
impl ScalarOperand for u32 {}
impl ScalarOperand for i64 {}
impl ScalarOperand for u64 {}
impl ScalarOperand for f32 {}
impl ScalarOperand for f64 {}
impl ScalarOperand for Complex<f32> {}
impl ScalarOperand for Complex<f64> {}
#[cfg(feature = "half")]
impl ScalarOperand for half::f16 {}

#[track_caller]
fn unwrap_shape<T>(r: NdResult<T>) -> T {
    match r {
        Ok(x) => x,
        Err(e) => panic!("ndengine: {}", e),
    }
}

macro_rules! impl_binary_op(
    ($trt:ident, $operator:tt, $mth:ident, $try_mth:ident, $doc:expr) => (
impl<A> Array<A>
where
    A: Element + $trt<A, Output = A>,
{
    /// Perform elementwise
    #[doc=$doc]
    /// between `self` and `rhs` over their broadcast shape and return the
    /// result as a new array.
    ///
    /// **Errors** with `ShapeMismatch` if the shapes can't be broadcast
    /// together.
    pub fn $try_mth(&self, rhs: &Array<A>) -> NdResult<Array<A>> {
        func::apply2(self, rhs, |x, y| x $operator y)
    }
}

/// Perform elementwise
#[doc=$doc]
/// between references `self` and `rhs`,
/// and return the result as a new `Array`.
///
/// If their shapes disagree, `self` and `rhs` are broadcast to their
/// broadcast shape.
///
/// **Panics** if broadcasting isn’t possible.
impl<'a, 'b, A> $trt<&'b Array<A>> for &'a Array<A>
where
    A: Element + $trt<A, Output = A>,
{
    type Output = Array<A>;
    #[track_caller]
    fn $mth(self, rhs: &'b Array<A>) -> Array<A> {
        unwrap_shape(self.$try_mth(rhs))
    }
}

/// Perform elementwise
#[doc=$doc]
/// between `self` and `rhs`, and return the result as a new `Array`.
///
/// **Panics** if broadcasting isn’t possible.
impl<A> $trt<Array<A>> for Array<A>
where
    A: Element + $trt<A, Output = A>,
{
    type Output = Array<A>;
    #[track_caller]
    fn $mth(self, rhs: Array<A>) -> Array<A> {
        &self $operator &rhs
    }
}

/// Perform elementwise
#[doc=$doc]
/// between `self` and reference `rhs`, and return the result as a new
/// `Array`.
///
/// **Panics** if broadcasting isn’t possible.
impl<'a, A> $trt<&'a Array<A>> for Array<A>
where
    A: Element + $trt<A, Output = A>,
{
    type Output = Array<A>;
    #[track_caller]
    fn $mth(self, rhs: &'a Array<A>) -> Array<A> {
        &self $operator rhs
    }
}

/// Perform elementwise
#[doc=$doc]
/// between reference `self` and `rhs`, and return the result as a new
/// `Array`.
///
/// **Panics** if broadcasting isn’t possible.
impl<'a, A> $trt<Array<A>> for &'a Array<A>
where
    A: Element + $trt<A, Output = A>,
{
    type Output = Array<A>;
    #[track_caller]
    fn $mth(self, rhs: Array<A>) -> Array<A> {
        self $operator &rhs
    }
}

/// Perform elementwise
#[doc=$doc]
/// between the reference `self` and the scalar `x`,
/// and return the result as a new `Array`.
impl<'a, A> $trt<A> for &'a Array<A>
where
    A: Element + ScalarOperand + $trt<A, Output = A>,
{
    type Output = Array<A>;
    fn $mth(self, x: A) -> Array<A> {
        self.map(move |elt| elt $operator x)
    }
}

/// Perform elementwise
#[doc=$doc]
/// between `self` and the scalar `x`, and return the result as a new `Array`.
impl<A> $trt<A> for Array<A>
where
    A: Element + ScalarOperand + $trt<A, Output = A>,
{
    type Output = Array<A>;
    fn $mth(self, x: A) -> Array<A> {
        &self $operator x
    }
}
    );
);

macro_rules! impl_scalar_lhs_op {
    ($scalar:ty, $operator:tt, $trt:ident, $mth:ident) => (
// Perform elementwise
// between the scalar `self` and array `rhs`,
// and return the result as a new `Array`.
impl<'a> $trt<&'a Array<$scalar>> for $scalar {
    type Output = Array<$scalar>;
    fn $mth(self, rhs: &Array<$scalar>) -> Array<$scalar> {
        rhs.map(move |elt| self $operator elt)
    }
}

impl $trt<Array<$scalar>> for $scalar {
    type Output = Array<$scalar>;
    fn $mth(self, rhs: Array<$scalar>) -> Array<$scalar> {
        self $operator &rhs
    }
}
    );
}

mod arithmetic_ops {
    use super::*;
    use std::ops::*;

    impl_binary_op!(Add, +, add, try_add, "addition");
    impl_binary_op!(Sub, -, sub, try_sub, "subtraction");
    impl_binary_op!(Mul, *, mul, try_mul, "multiplication");
    impl_binary_op!(Div, /, div, try_div, "division");
    impl_binary_op!(Rem, %, rem, try_rem, "remainder");
    impl_binary_op!(BitAnd, &, bitand, try_bitand, "bit and");
    impl_binary_op!(BitOr, |, bitor, try_bitor, "bit or");
    impl_binary_op!(BitXor, ^, bitxor, try_bitxor, "bit xor");
    impl_binary_op!(Shl, <<, shl, try_shl, "left shift");
    impl_binary_op!(Shr, >>, shr, try_shr, "right shift");

    macro_rules! all_scalar_ops {
        ($int_scalar:ty) => (
            impl_scalar_lhs_op!($int_scalar, +, Add, add);
            impl_scalar_lhs_op!($int_scalar, -, Sub, sub);
            impl_scalar_lhs_op!($int_scalar, *, Mul, mul);
            impl_scalar_lhs_op!($int_scalar, /, Div, div);
            impl_scalar_lhs_op!($int_scalar, %, Rem, rem);
            impl_scalar_lhs_op!($int_scalar, &, BitAnd, bitand);
            impl_scalar_lhs_op!($int_scalar, |, BitOr, bitor);
            impl_scalar_lhs_op!($int_scalar, ^, BitXor, bitxor);
            impl_scalar_lhs_op!($int_scalar, <<, Shl, shl);
            impl_scalar_lhs_op!($int_scalar, >>, Shr, shr);
        );
    }
    all_scalar_ops!(i8);
    all_scalar_ops!(u8);
    all_scalar_ops!(i16);
    all_scalar_ops!(u16);
    all_scalar_ops!(i32);
    all_scalar_ops!(u32);
    all_scalar_ops!(i64);
    all_scalar_ops!(u64);

    impl_scalar_lhs_op!(bool, &, BitAnd, bitand);
    impl_scalar_lhs_op!(bool, |, BitOr, bitor);
    impl_scalar_lhs_op!(bool, ^, BitXor, bitxor);

    impl_scalar_lhs_op!(f32, +, Add, add);
    impl_scalar_lhs_op!(f32, -, Sub, sub);
    impl_scalar_lhs_op!(f32, *, Mul, mul);
    impl_scalar_lhs_op!(f32, /, Div, div);
    impl_scalar_lhs_op!(f32, %, Rem, rem);

    impl_scalar_lhs_op!(f64, +, Add, add);
    impl_scalar_lhs_op!(f64, -, Sub, sub);
    impl_scalar_lhs_op!(f64, *, Mul, mul);
    impl_scalar_lhs_op!(f64, /, Div, div);
    impl_scalar_lhs_op!(f64, %, Rem, rem);

    impl_scalar_lhs_op!(Complex<f32>, +, Add, add);
    impl_scalar_lhs_op!(Complex<f32>, -, Sub, sub);
    impl_scalar_lhs_op!(Complex<f32>, *, Mul, mul);
    impl_scalar_lhs_op!(Complex<f32>, /, Div, div);

    impl_scalar_lhs_op!(Complex<f64>, +, Add, add);
    impl_scalar_lhs_op!(Complex<f64>, -, Sub, sub);
    impl_scalar_lhs_op!(Complex<f64>, *, Mul, mul);
    impl_scalar_lhs_op!(Complex<f64>, /, Div, div);

    impl<A> Neg for Array<A>
    where
        A: Element + Neg<Output = A>,
    {
        type Output = Self;
        /// Perform an elementwise negation of `self` and return the result
        /// as a new `Array`.
        fn neg(self) -> Self {
            -&self
        }
    }

    impl<'a, A> Neg for &'a Array<A>
    where
        A: Element + Neg<Output = A>,
    {
        type Output = Array<A>;
        /// Perform an elementwise negation of reference `self` and return the
        /// result as a new `Array`.
        fn neg(self) -> Array<A> {
            self.map(Neg::neg)
        }
    }

    impl<A> Not for Array<A>
    where
        A: Element + Not<Output = A>,
    {
        type Output = Self;
        /// Perform an elementwise unary not of `self` and return the result
        /// as a new `Array`.
        fn not(self) -> Self {
            !&self
        }
    }

    impl<'a, A> Not for &'a Array<A>
    where
        A: Element + Not<Output = A>,
    {
        type Output = Array<A>;
        /// Perform an elementwise unary not of reference `self` and return
        /// the result as a new `Array`.
        fn not(self) -> Array<A> {
            self.map(Not::not)
        }
    }
}

mod assign_ops {
    use super::*;

    macro_rules! impl_assign_op {
        ($trt:ident, $method:ident, $try_method:ident, $doc:expr) => {
            use std::ops::$trt;

            impl<A> Array<A>
            where
                A: Element + $trt<A>,
            {
                #[doc=$doc]
                /// `rhs` is broadcast to the shape of `self`. Elements are
                /// updated in place, so the change is visible through every
                /// array sharing the container.
                ///
                /// **Errors** with `ShapeMismatch` if `rhs` can't be broadcast
                /// to the shape of `self`.
                pub fn $try_method(&mut self, rhs: &Array<A>) -> NdResult<()> {
                    func::zip_mut_with(self, rhs, |x, y| x.$method(y))
                }
            }

            #[doc=$doc]
            /// If their shapes disagree, `rhs` is broadcast to the shape of `self`.
            ///
            /// **Panics** if broadcasting isn’t possible.
            impl<'a, A> $trt<&'a Array<A>> for Array<A>
            where
                A: Element + $trt<A>,
            {
                #[track_caller]
                fn $method(&mut self, rhs: &Array<A>) {
                    unwrap_shape(self.$try_method(rhs))
                }
            }

            #[doc=$doc]
            impl<A> $trt<A> for Array<A>
            where
                A: Element + ScalarOperand + $trt<A>,
            {
                fn $method(&mut self, rhs: A) {
                    self.mapv_inplace(move |mut elt| {
                        elt.$method(rhs);
                        elt
                    });
                }
            }
        };
    }

    impl_assign_op!(
        AddAssign,
        add_assign,
        try_add_assign,
        "Perform `self += rhs` as elementwise addition (in place).\n"
    );
    impl_assign_op!(
        SubAssign,
        sub_assign,
        try_sub_assign,
        "Perform `self -= rhs` as elementwise subtraction (in place).\n"
    );
    impl_assign_op!(
        MulAssign,
        mul_assign,
        try_mul_assign,
        "Perform `self *= rhs` as elementwise multiplication (in place).\n"
    );
    impl_assign_op!(
        DivAssign,
        div_assign,
        try_div_assign,
        "Perform `self /= rhs` as elementwise division (in place).\n"
    );
    impl_assign_op!(
        RemAssign,
        rem_assign,
        try_rem_assign,
        "Perform `self %= rhs` as elementwise remainder (in place).\n"
    );
    impl_assign_op!(
        BitAndAssign,
        bitand_assign,
        try_bitand_assign,
        "Perform `self &= rhs` as elementwise bit and (in place).\n"
    );
    impl_assign_op!(
        BitOrAssign,
        bitor_assign,
        try_bitor_assign,
        "Perform `self |= rhs` as elementwise bit or (in place).\n"
    );
    impl_assign_op!(
        BitXorAssign,
        bitxor_assign,
        try_bitxor_assign,
        "Perform `self ^= rhs` as elementwise bit xor (in place).\n"
    );
    impl_assign_op!(
        ShlAssign,
        shl_assign,
        try_shl_assign,
        "Perform `self <<= rhs` as elementwise left shift (in place).\n"
    );
    impl_assign_op!(
        ShrAssign,
        shr_assign,
        try_shr_assign,
        "Perform `self >>= rhs` as elementwise right shift (in place).\n"
    );
}

macro_rules! impl_comparison {
    ($($mth:ident, $operator:tt, $doc:expr;)*) => {
        $(
        #[doc=$doc]
        /// over the broadcast shape of `self` and `rhs`, as a boolean array.
        ///
        /// **Errors** with `ShapeMismatch` if the shapes can't be broadcast
        /// together.
        pub fn $mth(&self, rhs: &Array<A>) -> NdResult<Array<bool>> {
            func::apply2(self, rhs, |x, y| x $operator y)
        }
        )*
    };
}

/// # Elementwise Comparisons
impl<A: Element> Array<A> {
    impl_comparison! {
        equal, ==, "Compare `self == rhs` elementwise";
        not_equal, !=, "Compare `self != rhs` elementwise";
    }
}

impl<A: Element + PartialOrd> Array<A> {
    impl_comparison! {
        less, <, "Compare `self < rhs` elementwise";
        less_equal, <=, "Compare `self <= rhs` elementwise";
        greater, >, "Compare `self > rhs` elementwise";
        greater_equal, >=, "Compare `self >= rhs` elementwise";
    }
}

/// Return `true` if the array shapes and all elements of `self` and `rhs`
/// are equal. Layout and container are not compared.
impl<A: Element> PartialEq for Array<A> {
    fn eq(&self, rhs: &Array<A>) -> bool {
        self.shape() == rhs.shape() && self.iter().zip(rhs.iter()).all(|(x, y)| x == y)
    }
}
