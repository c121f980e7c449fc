//! Arrays whose element type is chosen at runtime.

use std::fmt;

#[cfg(feature = "half")]
use half::f16;
use num_complex::Complex;
use num_traits::{AsPrimitive, Float};

use crate::error::{NdError, NdResult};
use crate::linalg;
use crate::{Array, DType, Element, ElementType, Layout, SliceInfoElem};

/// An array of any of the supported element types.
///
/// The variants are the closed set of element types listed in [`DType`].
/// Metadata operations forward to the typed array. Arithmetic requires equal
/// element types on both sides and never converts implicitly; use
/// [`astype`](DynArray::astype) to convert.
///
/// ```
/// use ndengine::{Array, DType, DynArray};
///
/// let a = DynArray::from(Array::from_vec(vec![1i32, 2, 3]));
/// let b = a.astype(DType::F64).unwrap();
/// assert_eq!(b.dtype(), DType::F64);
///
/// // element types must match
/// assert!(a.try_add(&b).is_err());
/// let c = b.try_add(&b).unwrap();
/// assert_eq!(c.as_array::<f64>().unwrap().to_vec(), vec![2., 4., 6.]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DynArray {
    Bool(Array<bool>),
    I8(Array<i8>),
    I16(Array<i16>),
    I32(Array<i32>),
    I64(Array<i64>),
    U8(Array<u8>),
    U16(Array<u16>),
    U32(Array<u32>),
    U64(Array<u64>),
    #[cfg(feature = "half")]
    F16(Array<f16>),
    F32(Array<f32>),
    F64(Array<f64>),
    C32(Array<Complex<f32>>),
    C64(Array<Complex<f64>>),
}

/// Evaluate `$body` with `$a` bound to the typed array, whatever the variant.
macro_rules! dispatch {
    ($value:expr, $a:ident => $body:expr) => {
        match $value {
            DynArray::Bool($a) => $body,
            DynArray::I8($a) => $body,
            DynArray::I16($a) => $body,
            DynArray::I32($a) => $body,
            DynArray::I64($a) => $body,
            DynArray::U8($a) => $body,
            DynArray::U16($a) => $body,
            DynArray::U32($a) => $body,
            DynArray::U64($a) => $body,
            #[cfg(feature = "half")]
            DynArray::F16($a) => $body,
            DynArray::F32($a) => $body,
            DynArray::F64($a) => $body,
            DynArray::C32($a) => $body,
            DynArray::C64($a) => $body,
        }
    };
}

/// Like `dispatch!`, wrapping the resulting array in the same variant.
macro_rules! dispatch_same {
    ($value:expr, $a:ident => $body:expr) => {
        match $value {
            DynArray::Bool($a) => DynArray::Bool($body),
            DynArray::I8($a) => DynArray::I8($body),
            DynArray::I16($a) => DynArray::I16($body),
            DynArray::I32($a) => DynArray::I32($body),
            DynArray::I64($a) => DynArray::I64($body),
            DynArray::U8($a) => DynArray::U8($body),
            DynArray::U16($a) => DynArray::U16($body),
            DynArray::U32($a) => DynArray::U32($body),
            DynArray::U64($a) => DynArray::U64($body),
            #[cfg(feature = "half")]
            DynArray::F16($a) => DynArray::F16($body),
            DynArray::F32($a) => DynArray::F32($body),
            DynArray::F64($a) => DynArray::F64($body),
            DynArray::C32($a) => DynArray::C32($body),
            DynArray::C64($a) => DynArray::C64($body),
        }
    };
}

macro_rules! binary_op {
    ($(#[$meta:meta])* $name:ident, $try_method:ident; $($tag:ident),*) => {
        $(#[$meta])*
        pub fn $name(&self, rhs: &DynArray) -> NdResult<DynArray> {
            match (self, rhs) {
                $(
                (DynArray::$tag(a), DynArray::$tag(b)) => Ok(DynArray::$tag(a.$try_method(b)?)),
                )*
                (a, b) if a.dtype() == b.dtype() => Err(NdError::NotImplementedForType {
                    operation: stringify!($name),
                    dtype: a.dtype(),
                }),
                (a, b) => Err(NdError::ElementTypeMismatch {
                    expected: a.dtype(),
                    found: b.dtype(),
                }),
            }
        }
    };
}

impl DynArray {
    /// Identity tag of the element type.
    pub fn dtype(&self) -> DType {
        dispatch!(self, a => a.dtype())
    }

    pub fn element_type(&self) -> ElementType {
        dispatch!(self, a => a.element_type())
    }

    pub fn ndim(&self) -> usize {
        dispatch!(self, a => a.ndim())
    }

    pub fn shape(&self) -> &[usize] {
        dispatch!(self, a => a.shape())
    }

    pub fn strides(&self) -> &[isize] {
        dispatch!(self, a => a.strides())
    }

    pub fn offset(&self) -> usize {
        dispatch!(self, a => a.offset())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch!(self, a => a.is_empty())
    }

    pub fn is_contiguous(&self) -> bool {
        dispatch!(self, a => a.is_contiguous())
    }

    pub fn layout(&self) -> Layout {
        dispatch!(self, a => a.layout())
    }

    /// Sliced view, see [`Array::slice`].
    pub fn slice(&self, info: &[SliceInfoElem]) -> NdResult<DynArray> {
        Ok(dispatch_same!(self, a => a.slice(info)?))
    }

    /// Copy-free reshape, see [`Array::reshape`].
    pub fn reshape(&self, shape: &[usize]) -> NdResult<DynArray> {
        Ok(dispatch_same!(self, a => a.reshape(shape)?))
    }

    /// Permute the axes, see [`Array::transpose`].
    pub fn transpose(&self, axes: &[usize]) -> NdResult<DynArray> {
        Ok(dispatch_same!(self, a => a.transpose(axes)?))
    }

    /// Reverse the axes.
    pub fn t(&self) -> DynArray {
        dispatch_same!(self, a => a.t())
    }

    /// Broadcast view, see [`Array::broadcast_to`].
    pub fn broadcast_to(&self, shape: &[usize]) -> NdResult<DynArray> {
        Ok(dispatch_same!(self, a => a.broadcast_to(shape)?))
    }

    /// Copy into a new row major container.
    pub fn copy(&self) -> DynArray {
        dispatch_same!(self, a => a.copy())
    }

    /// Return the typed array if the element type is `T`.
    pub fn as_array<T: Element>(&self) -> Option<&Array<T>> {
        T::from_dyn_ref(self)
    }

    /// Unwrap into the typed array, or give `self` back if the element type
    /// is not `T`.
    pub fn downcast<T: Element>(self) -> Result<Array<T>, DynArray> {
        T::from_dyn(self)
    }

    /// Convert the elements to `dtype`, into a new container.
    ///
    /// Numbers convert like `as` casts; booleans become `0` and `1`; to
    /// `bool` every nonzero value is `true`; real values become complex
    /// values with a zero imaginary part.
    ///
    /// ***Errors*** with `NotImplementedForType` when converting complex
    /// values to a real or boolean type.
    pub fn astype(&self, dtype: DType) -> NdResult<DynArray> {
        match self {
            DynArray::Bool(a) => cast_real(&a.cast::<u8>(), dtype),
            DynArray::I8(a) => cast_real(a, dtype),
            DynArray::I16(a) => cast_real(a, dtype),
            DynArray::I32(a) => cast_real(a, dtype),
            DynArray::I64(a) => cast_real(a, dtype),
            DynArray::U8(a) => cast_real(a, dtype),
            DynArray::U16(a) => cast_real(a, dtype),
            DynArray::U32(a) => cast_real(a, dtype),
            DynArray::U64(a) => cast_real(a, dtype),
            #[cfg(feature = "half")]
            DynArray::F16(a) => cast_real(&a.map(f32::from), dtype),
            DynArray::F32(a) => cast_real(a, dtype),
            DynArray::F64(a) => cast_real(a, dtype),
            DynArray::C32(a) => cast_complex(a, dtype),
            DynArray::C64(a) => cast_complex(a, dtype),
        }
    }

    binary_op! {
        /// Elementwise sum with broadcasting.
        ///
        /// ***Errors*** with `ElementTypeMismatch` if the element types
        /// differ and `NotImplementedForType` for booleans.
        try_add, try_add; I8, I16, I32, I64, U8, U16, U32, U64, F32, F64, C32, C64
    }
    binary_op! {
        /// Elementwise difference with broadcasting.
        try_sub, try_sub; I8, I16, I32, I64, U8, U16, U32, U64, F32, F64, C32, C64
    }
    binary_op! {
        /// Elementwise product with broadcasting.
        try_mul, try_mul; I8, I16, I32, I64, U8, U16, U32, U64, F32, F64, C32, C64
    }
    binary_op! {
        /// Elementwise quotient with broadcasting.
        try_div, try_div; I8, I16, I32, I64, U8, U16, U32, U64, F32, F64, C32, C64
    }

    /// Matrix product, see [`linalg::matmul`].
    ///
    /// ***Errors*** with `ElementTypeMismatch` if the element types differ
    /// and `NotImplementedForType` for booleans.
    pub fn matmul(&self, rhs: &DynArray) -> NdResult<DynArray> {
        macro_rules! arms {
            ($($tag:ident),*) => {
                match (self, rhs) {
                    $((DynArray::$tag(a), DynArray::$tag(b)) => Ok(DynArray::$tag(linalg::matmul(a, b)?)),)*
                    (a, b) if a.dtype() == b.dtype() => Err(NdError::NotImplementedForType {
                        operation: "matmul",
                        dtype: a.dtype(),
                    }),
                    (a, b) => Err(NdError::ElementTypeMismatch {
                        expected: a.dtype(),
                        found: b.dtype(),
                    }),
                }
            };
        }
        arms!(I8, I16, I32, I64, U8, U16, U32, U64, F32, F64, C32, C64)
    }

    fn not_float(&self, operation: &'static str) -> NdError {
        NdError::NotImplementedForType {
            operation,
            dtype: self.dtype(),
        }
    }

    /// Inverse of each matrix, see [`linalg::inv`].
    ///
    /// ***Errors*** with `NotImplementedForType` unless the element type is
    /// `f32` or `f64`.
    pub fn inv(&self) -> NdResult<DynArray> {
        match self {
            DynArray::F32(a) => Ok(DynArray::F32(linalg::inv(a)?)),
            DynArray::F64(a) => Ok(DynArray::F64(linalg::inv(a)?)),
            other => Err(other.not_float("inv")),
        }
    }

    /// Determinant of each matrix, see [`linalg::det`].
    pub fn det(&self) -> NdResult<DynArray> {
        match self {
            DynArray::F32(a) => Ok(DynArray::F32(linalg::det(a)?)),
            DynArray::F64(a) => Ok(DynArray::F64(linalg::det(a)?)),
            other => Err(other.not_float("det")),
        }
    }

    /// Solve linear systems, see [`linalg::solve`].
    pub fn solve(&self, b: &DynArray) -> NdResult<DynArray> {
        match (self, b) {
            (DynArray::F32(a), DynArray::F32(b)) => Ok(DynArray::F32(linalg::solve(a, b)?)),
            (DynArray::F64(a), DynArray::F64(b)) => Ok(DynArray::F64(linalg::solve(a, b)?)),
            (a, b) if a.dtype() != b.dtype() => Err(NdError::ElementTypeMismatch {
                expected: a.dtype(),
                found: b.dtype(),
            }),
            (a, _) => Err(a.not_float("solve")),
        }
    }

    /// QR factorization, see [`linalg::qr`]; returns `(q, r)`.
    pub fn qr(&self) -> NdResult<(DynArray, DynArray)> {
        match self {
            DynArray::F32(a) => linalg::qr(a).map(|f| (DynArray::F32(f.q), DynArray::F32(f.r))),
            DynArray::F64(a) => linalg::qr(a).map(|f| (DynArray::F64(f.q), DynArray::F64(f.r))),
            other => Err(other.not_float("qr")),
        }
    }

    /// Symmetric eigen decomposition, see [`linalg::eigh`]; returns
    /// `(eigenvalues, eigenvectors)`.
    pub fn eigh(&self) -> NdResult<(DynArray, DynArray)> {
        match self {
            DynArray::F32(a) => linalg::eigh(a).map(|(w, v)| (DynArray::F32(w), DynArray::F32(v))),
            DynArray::F64(a) => linalg::eigh(a).map(|(w, v)| (DynArray::F64(w), DynArray::F64(v))),
            other => Err(other.not_float("eigh")),
        }
    }
}

fn cast_real<T>(a: &Array<T>, dtype: DType) -> NdResult<DynArray>
where
    T: Element
        + AsPrimitive<i8>
        + AsPrimitive<i16>
        + AsPrimitive<i32>
        + AsPrimitive<i64>
        + AsPrimitive<u8>
        + AsPrimitive<u16>
        + AsPrimitive<u32>
        + AsPrimitive<u64>
        + AsPrimitive<f32>
        + AsPrimitive<f64>,
{
    Ok(match dtype {
        DType::Bool => DynArray::Bool(a.map(|x| AsPrimitive::<f64>::as_(x) != 0.)),
        DType::I8 => DynArray::I8(a.cast()),
        DType::I16 => DynArray::I16(a.cast()),
        DType::I32 => DynArray::I32(a.cast()),
        DType::I64 => DynArray::I64(a.cast()),
        DType::U8 => DynArray::U8(a.cast()),
        DType::U16 => DynArray::U16(a.cast()),
        DType::U32 => DynArray::U32(a.cast()),
        DType::U64 => DynArray::U64(a.cast()),
        #[cfg(feature = "half")]
        DType::F16 => DynArray::F16(a.map(|x| f16::from_f32(AsPrimitive::<f32>::as_(x)))),
        DType::F32 => DynArray::F32(a.cast()),
        DType::F64 => DynArray::F64(a.cast()),
        DType::C32 => DynArray::C32(a.map(|x| Complex::new(AsPrimitive::<f32>::as_(x), 0.))),
        DType::C64 => DynArray::C64(a.map(|x| Complex::new(AsPrimitive::<f64>::as_(x), 0.))),
    })
}

fn cast_complex<F>(a: &Array<Complex<F>>, dtype: DType) -> NdResult<DynArray>
where
    F: Element + Float + AsPrimitive<f32> + AsPrimitive<f64>,
    Complex<F>: Element,
{
    match dtype {
        DType::C32 => Ok(DynArray::C32(
            a.map(|z| Complex::new(AsPrimitive::<f32>::as_(z.re), AsPrimitive::<f32>::as_(z.im))),
        )),
        DType::C64 => Ok(DynArray::C64(
            a.map(|z| Complex::new(AsPrimitive::<f64>::as_(z.re), AsPrimitive::<f64>::as_(z.im))),
        )),
        _ => Err(NdError::NotImplementedForType {
            operation: "astype from complex to real",
            dtype: a.dtype(),
        }),
    }
}

impl<T: Element> From<Array<T>> for DynArray {
    fn from(array: Array<T>) -> Self {
        T::into_dyn(array)
    }
}

impl fmt::Display for DynArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, a => fmt::Display::fmt(a, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::{arr1, arr2};

    #[test]
    fn conversions() {
        let b = DynArray::from(arr1(&[true, false]));
        let i = b.astype(DType::I64).unwrap();
        assert_eq!(i.as_array::<i64>().unwrap(), &arr1(&[1, 0]));
        let f = DynArray::from(arr1(&[-1.5f64, 0., 300.]));
        assert_eq!(f.astype(DType::U8).unwrap().downcast::<u8>().unwrap(), arr1(&[0, 0, 255]));
        assert_eq!(f.astype(DType::Bool).unwrap().downcast::<bool>().unwrap(), arr1(&[true, false, true]));
        let z = f.astype(DType::C32).unwrap();
        assert_eq!(z.as_array::<Complex<f32>>().unwrap().get(0).unwrap(), Complex::new(-1.5, 0.));
        assert_eq!(z.astype(DType::C64).unwrap().dtype(), DType::C64);
        assert_eq!(z.astype(DType::F32).unwrap_err().kind(), ErrorKind::NotImplementedForType);
    }

    #[test]
    fn metadata_forwards() {
        let a = DynArray::from(Array::<u16>::zeros((2, 3)));
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.t().shape(), &[3, 2]);
        assert_eq!(a.strides(), &[3, 1]);
        assert_eq!(a.element_type().size, 2);
        assert!(a.reshape(&[6]).unwrap().is_contiguous());
        assert!(a.t().reshape(&[6]).is_err());
        assert_eq!(a.slice(&s![1, ..]).unwrap().shape(), &[3]);
        assert!(a.clone().downcast::<i16>().is_err());
    }

    #[test]
    fn arithmetic_needs_equal_tags() {
        let a = DynArray::from(arr1(&[1i32, 2]));
        let b = DynArray::from(arr1(&[1i64, 2]));
        assert_eq!(
            a.try_mul(&b).unwrap_err(),
            NdError::ElementTypeMismatch {
                expected: DType::I32,
                found: DType::I64
            }
        );
        let m = DynArray::from(arr1(&[true]));
        assert_eq!(m.try_add(&m).unwrap_err().kind(), ErrorKind::NotImplementedForType);
        assert_eq!(a.try_sub(&a).unwrap(), DynArray::from(arr1(&[0i32, 0])));
    }

    #[test]
    fn decompositions_need_floats() {
        let a = DynArray::from(arr2(&[[2, 0], [0, 2]]));
        assert_eq!(a.inv().unwrap_err().kind(), ErrorKind::NotImplementedForType);
        assert_eq!(a.eigh().unwrap_err().kind(), ErrorKind::NotImplementedForType);
        let p = a.matmul(&a).unwrap();
        assert_eq!(p.downcast::<i32>().unwrap(), arr2(&[[4, 0], [0, 4]]));
        let f = a.astype(DType::F64).unwrap();
        let d = f.det().unwrap();
        assert_eq!(d.as_array::<f64>().unwrap().first(), Some(4.));
        let (q, r) = f.qr().unwrap();
        assert_eq!(q.dtype(), DType::F64);
        assert_eq!(r.shape(), &[2, 2]);
    }
}
