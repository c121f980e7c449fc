// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for `Array`.
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::sync::Arc;

use num_traits::{Float, NumCast, One, Zero};

use crate::container::Container;
use crate::dimension::{check_bounds, contiguous_strides, size_of_shape_checked, IntoShape, Shape, Strides};
use crate::error::{shape_mismatch, NdError, NdResult};
use crate::iterators::Indices;
use crate::layout::Layout;
use crate::{Array, Element, Order};

/// # Constructor Methods for Arrays
///
/// Arrays built here own a fresh container, laid out in row major order
/// unless an `Order` is passed.
impl<T: Element> Array<T> {
    /// Build an array from its parts without any checks.
    #[inline]
    pub(crate) fn from_parts_unchecked(container: Arc<Container<T>>, shape: Shape, strides: Strides, offset: usize) -> Self {
        debug_assert!(check_bounds(container.len(), &shape, &strides, offset).is_ok());
        Array {
            container,
            shape,
            strides,
            offset,
            marker: PhantomData,
        }
    }

    /// Wrap `v` as a row major array of `shape`; the lengths must agree.
    #[inline]
    pub(crate) fn from_vec_shape(v: Vec<T>, shape: Shape) -> Self {
        debug_assert_eq!(v.len(), shape.size());
        let strides = contiguous_strides(&shape, Order::RowMajor);
        Array::from_parts_unchecked(Container::from_vec(v), shape, strides, 0)
    }

    /// Create an array with zeros (the element type's default value),
    /// shape `shape` and row major memory layout.
    ///
    /// **Errors** with `AllocationError` if the element count overflows
    /// `isize` or the buffer can't be allocated.
    pub fn try_zeros<Sh: IntoShape>(shape: Sh) -> NdResult<Self> {
        Self::try_zeros_with_order(shape, Order::RowMajor)
    }

    /// Create an array with zeros, shape `shape` and the memory layout
    /// `order`.
    pub fn try_zeros_with_order<Sh: IntoShape>(shape: Sh, order: Order) -> NdResult<Self> {
        let shape = shape.into_shape();
        let count = size_of_shape_checked(&shape).map_err(|_| NdError::AllocationError {
            count: shape.iter().fold(1usize, |acc, &n| acc.saturating_mul(n)),
            element: T::DTYPE,
        })?;
        let container = Container::allocate(count)?;
        let strides = contiguous_strides(&shape, order);
        Ok(Array::from_parts_unchecked(container, shape, strides, 0))
    }

    /// Create an array with zeros, shape `shape` and row major memory layout.
    ///
    /// **Panics** if the element count overflows `isize` or the allocation
    /// fails.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::<f64>::zeros((3, 2, 4));
    /// assert_eq!(a.shape(), &[3, 2, 4]);
    /// assert_eq!(a.len(), 24);
    /// ```
    pub fn zeros<Sh: IntoShape>(shape: Sh) -> Self {
        Self::zeros_with_order(shape, Order::RowMajor)
    }

    /// Create an array with zeros and the memory layout `order`.
    ///
    /// **Panics** if the element count overflows `isize` or the allocation
    /// fails.
    pub fn zeros_with_order<Sh: IntoShape>(shape: Sh, order: Order) -> Self {
        match Self::try_zeros_with_order(shape, order) {
            Ok(a) => a,
            Err(e) => panic!("ndengine: {}", e),
        }
    }

    /// Create an array with copies of `elem`, shape `shape`.
    ///
    /// **Errors** with `AllocationError` if the element count overflows
    /// `isize`.
    pub fn try_from_elem<Sh: IntoShape>(shape: Sh, elem: T) -> NdResult<Self> {
        let shape = shape.into_shape();
        let count = size_of_shape_checked(&shape).map_err(|_| NdError::AllocationError {
            count: usize::MAX,
            element: T::DTYPE,
        })?;
        let mut v = Vec::new();
        v.try_reserve_exact(count).map_err(|_| NdError::AllocationError {
            count,
            element: T::DTYPE,
        })?;
        v.resize(count, elem);
        Ok(Array::from_vec_shape(v, shape))
    }

    /// Create an array with copies of `elem`, shape `shape`.
    ///
    /// **Panics** if the element count overflows `isize` or the allocation
    /// fails.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::from_elem((2, 2), 7u8);
    /// assert_eq!(a.to_vec(), vec![7; 4]);
    /// ```
    pub fn from_elem<Sh: IntoShape>(shape: Sh, elem: T) -> Self {
        match Self::try_from_elem(shape, elem) {
            Ok(a) => a,
            Err(e) => panic!("ndengine: {}", e),
        }
    }

    /// Same as [`from_elem`](Array::from_elem).
    pub fn full<Sh: IntoShape>(shape: Sh, elem: T) -> Self {
        Self::from_elem(shape, elem)
    }

    /// Create an array with ones, shape `shape`.
    ///
    /// **Panics** if the element count overflows `isize`.
    pub fn ones<Sh: IntoShape>(shape: Sh) -> Self
    where
        T: One,
    {
        Self::from_elem(shape, T::one())
    }

    /// Create a one-dimensional array that takes ownership of `v`.
    pub fn from_vec(v: Vec<T>) -> Self {
        let n = v.len();
        Array::from_vec_shape(v, Shape::from_slice(&[n]))
    }

    /// Create an array of `shape` from `v`, read in row major order.
    ///
    /// **Errors** with `ShapeMismatch` if the length of `v` does not match the
    /// element count of `shape`.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::from_shape_vec((2, 3), vec![1., 2., 3., 4., 5., 6.]).unwrap();
    /// assert_eq!(a.get([1, 0]).unwrap(), 4.);
    /// assert!(Array::from_shape_vec((2, 2), vec![1., 2., 3.]).is_err());
    /// ```
    pub fn from_shape_vec<Sh: IntoShape>(shape: Sh, v: Vec<T>) -> NdResult<Self> {
        let shape = shape.into_shape();
        size_of_shape_checked(&shape)?;
        if shape.size() != v.len() {
            return Err(shape_mismatch(&shape, &[v.len()]));
        }
        Ok(Array::from_vec_shape(v, shape))
    }

    /// Create an array of `shape` whose elements are `f(index)`, called in
    /// row major order.
    ///
    /// **Panics** if the element count overflows `isize`.
    pub fn from_shape_fn<Sh, F>(shape: Sh, mut f: F) -> Self
    where
        Sh: IntoShape,
        F: FnMut(&[usize]) -> T,
    {
        let shape = shape.into_shape();
        if let Err(e) = size_of_shape_checked(&shape) {
            panic!("ndengine: {}", e);
        }
        let v = Indices::new(&shape).map(|ix| f(&ix)).collect();
        Array::from_vec_shape(v, shape)
    }

    /// Create a zero-dimensional array holding `x`.
    pub fn from_scalar(x: T) -> Self {
        Array::from_vec_shape(vec![x], Shape::default())
    }

    /// Create an array viewing `container` with the given shape, strides and
    /// offset, all counted in elements.
    ///
    /// **Errors** with `BoundsError` if any element of the view would lie
    /// outside the container, `RankMismatch` if `shape` and `strides` differ
    /// in length.
    ///
    /// ```
    /// use ndengine::{Array, Container};
    ///
    /// let c = Container::from_vec((0..6).collect::<Vec<i32>>());
    /// // a reversed column view
    /// let a = Array::from_container(c.clone(), (3,), &[-2], 5).unwrap();
    /// assert_eq!(a.to_vec(), vec![5, 3, 1]);
    /// assert!(Array::from_container(c, (4,), &[2], 0).is_err());
    /// ```
    pub fn from_container<Sh: IntoShape>(container: Arc<Container<T>>, shape: Sh, strides: &[isize], offset: usize) -> NdResult<Self> {
        let shape = shape.into_shape();
        check_bounds(container.len(), &shape, strides, offset)?;
        Ok(Array::from_parts_unchecked(container, shape, Strides::from(strides), offset))
    }

    /// Create an array viewing `container` as described by `layout`.
    pub fn from_layout(container: Arc<Container<T>>, layout: &Layout) -> NdResult<Self> {
        Self::from_container(container, &layout.shape[..], &layout.strides, layout.offset)
    }

    /// Create a row major array of `shape` over `len` elements of external
    /// memory at `ptr`, without copying.
    ///
    /// **Errors** if `shape` needs more than `len` elements.
    ///
    /// # Safety
    ///
    /// Same contract as [`Container::wrap`].
    pub unsafe fn from_external<Sh: IntoShape>(ptr: *mut T, len: usize, shape: Sh) -> NdResult<Self> {
        let shape = shape.into_shape();
        let container = Container::wrap(ptr, len)?;
        let strides = contiguous_strides(&shape, Order::RowMajor);
        Self::from_container(container, shape, &strides, 0)
    }

    /// Create an identity matrix of size `n` (square 2D array).
    ///
    /// **Panics** if `n * n` would overflow `isize`.
    pub fn eye(n: usize) -> Self
    where
        T: Zero + One,
    {
        let mut v = vec![T::zero(); n.checked_mul(n).unwrap_or(usize::MAX)];
        for i in 0..n {
            v[i * n + i] = T::one();
        }
        Array::from_vec_shape(v, Shape::from_slice(&[n, n]))
    }

    /// Create a one-dimensional array of the values `start, start + step, ...`
    /// strictly before `stop`.
    ///
    /// Values are computed as `start + i * step` in `f64` and converted back.
    ///
    /// **Errors** with `InvalidArgument` if `step` is zero, if `step` points
    /// away from `stop`, or if an argument is not a finite number.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// assert_eq!(Array::arange(0, 10, 3).unwrap().to_vec(), vec![0, 3, 6, 9]);
    /// assert_eq!(Array::arange(1., 0., -0.25).unwrap().to_vec(), vec![1., 0.75, 0.5, 0.25]);
    /// ```
    pub fn arange(start: T, stop: T, step: T) -> NdResult<Self>
    where
        T: NumCast + PartialOrd + Zero,
    {
        let to_f64 = |x: T| {
            x.to_f64()
                .filter(|v| v.is_finite())
                .ok_or(NdError::InvalidArgument("arange bounds must be finite numbers"))
        };
        let (a, b, s) = (to_f64(start)?, to_f64(stop)?, to_f64(step)?);
        if s == 0. {
            return Err(NdError::InvalidArgument("arange step must be nonzero"));
        }
        if a == b {
            return Ok(Array::from_vec(Vec::new()));
        }
        if (b > a) != (s > 0.) {
            return Err(NdError::InvalidArgument("arange step points away from stop"));
        }
        let n = ((b - a) / s).ceil() as usize;
        let v = (0..n)
            .map(|i| <T as NumCast>::from(a + i as f64 * s).ok_or(NdError::InvalidArgument("arange value not representable")))
            .collect::<NdResult<Vec<T>>>()?;
        Ok(Array::from_vec(v))
    }
}

impl<A: Element + Float> Array<A> {
    /// Create a one-dimensional array with `n` evenly spaced elements from
    /// `start` to `end`, inclusive of `end` when `endpoint` is true.
    ///
    /// `n == 1` gives `[start]` and `n == 0` an empty array.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::linspace(0., 1., 5, true);
    /// assert_eq!(a.to_vec(), vec![0., 0.25, 0.5, 0.75, 1.]);
    /// let b = Array::linspace(0., 1., 4, false);
    /// assert_eq!(b.to_vec(), vec![0., 0.25, 0.5, 0.75]);
    /// ```
    pub fn linspace(start: A, end: A, n: usize, endpoint: bool) -> Self {
        let intervals = if endpoint { n.saturating_sub(1) } else { n };
        let step = if intervals > 0 {
            (end - start) / <A as NumCast>::from(intervals).unwrap_or_else(A::nan)
        } else {
            A::zero()
        };
        let v = (0..n)
            .map(|i| start + step * <A as NumCast>::from(i).unwrap_or_else(A::nan))
            .collect();
        Array::from_vec(v)
    }
}

impl<T: Element> From<Vec<T>> for Array<T> {
    fn from(v: Vec<T>) -> Self {
        Array::from_vec(v)
    }
}

/// Collect into a one-dimensional array.
impl<T: Element> FromIterator<T> for Array<T> {
    fn from_iter<I>(iterable: I) -> Array<T>
    where
        I: IntoIterator<Item = T>,
    {
        Array::from_vec(iterable.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn zero_extent() {
        let a = Array::<f32>::zeros((0, 5));
        assert_eq!(a.len(), 0);
        assert!(a.is_empty());
        assert_eq!(a.shape(), &[0, 5]);
        assert_eq!(a.iter().count(), 0);
    }

    #[test]
    fn arange_directions() {
        assert_eq!(Array::arange(5i64, 0, -2).unwrap().to_vec(), vec![5, 3, 1]);
        assert_eq!(Array::arange(0u8, 0, 1).unwrap().len(), 0);
        assert_eq!(Array::arange(0, 10, 0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(Array::arange(0, 10, -1).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(Array::arange(-128i8, 127, 1).unwrap().len(), 255);
    }

    #[test]
    fn eye_and_scalar() {
        let e = Array::<i32>::eye(3);
        assert_eq!(e.to_vec(), vec![1, 0, 0, 0, 1, 0, 0, 0, 1]);
        let s = Array::from_scalar(2.5);
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.len(), 1);
        assert_eq!(s.get([]).unwrap(), 2.5);
    }

    #[test]
    fn too_large_shapes() {
        let err = Array::<u8>::try_zeros((usize::MAX, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AllocationError);
    }

    #[test]
    fn column_major_zeros() {
        let a = Array::<f64>::zeros_with_order((2, 3), Order::F);
        assert_eq!(a.strides(), &[1, 2]);
        assert!(a.is_f_contiguous());
        assert!(!a.is_contiguous());
    }

    #[test]
    fn external_memory() {
        let mut data = vec![1, 2, 3, 4, 5, 6];
        let a = unsafe { Array::from_external(data.as_mut_ptr(), data.len(), (2, 3)).unwrap() };
        assert_eq!(a.get([1, 1]).unwrap(), 5);
        assert!(!a.container().is_owned());
        let err = unsafe { Array::from_external(data.as_mut_ptr(), data.len(), (3, 3)) }.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BoundsError);
    }
}
