// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use num_traits::AsPrimitive;

use crate::container::Container;
use crate::dimension::{
    self, broadcast_strides, checked_offset, permute, reshape_strides, IntoShape, Shape, Strides,
};
use crate::element::{DType, ElementType};
use crate::error::{axis_out_of_range, shape_mismatch, NdError, NdResult};
use crate::func;
use crate::iterators::{IndexedIter, Indices, Iter, NdIter, OffsetIter};
use crate::layout::Layout;
use crate::slice::{resolve_slice, Slice, SliceInfoElem};
use crate::{Array, Axis, Element, Order};

/// Tuple or fixed size arrays that can be used to index an array.
///
/// ```
/// use ndengine::Array;
///
/// let a = Array::from_shape_vec((2, 2), vec![0, 1, 2, 3]).unwrap();
/// assert_eq!(a.get([1, 0]).unwrap(), 2);
/// assert_eq!(a.get((1, 0)).unwrap(), 2);
/// assert_eq!(a.get(&[1, 0][..]).unwrap(), 2);
/// ```
pub trait NdIndex {
    /// Return the element offset of the index relative to the view's first
    /// element, or an error if it does not address an element of `shape`.
    fn index_offset(&self, shape: &[usize], strides: &[isize]) -> NdResult<isize>;
}

impl NdIndex for [usize] {
    fn index_offset(&self, shape: &[usize], strides: &[isize]) -> NdResult<isize> {
        checked_offset(self, shape, strides)
    }
}

impl<const N: usize> NdIndex for [usize; N] {
    fn index_offset(&self, shape: &[usize], strides: &[isize]) -> NdResult<isize> {
        checked_offset(self, shape, strides)
    }
}

impl NdIndex for Vec<usize> {
    fn index_offset(&self, shape: &[usize], strides: &[isize]) -> NdResult<isize> {
        checked_offset(self, shape, strides)
    }
}

impl NdIndex for usize {
    fn index_offset(&self, shape: &[usize], strides: &[isize]) -> NdResult<isize> {
        checked_offset(&[*self], shape, strides)
    }
}

impl NdIndex for (usize, usize) {
    fn index_offset(&self, shape: &[usize], strides: &[isize]) -> NdResult<isize> {
        checked_offset(&[self.0, self.1], shape, strides)
    }
}

impl NdIndex for (usize, usize, usize) {
    fn index_offset(&self, shape: &[usize], strides: &[isize]) -> NdResult<isize> {
        checked_offset(&[self.0, self.1, self.2], shape, strides)
    }
}

impl<'a, I: NdIndex + ?Sized> NdIndex for &'a I {
    fn index_offset(&self, shape: &[usize], strides: &[isize]) -> NdResult<isize> {
        (**self).index_offset(shape, strides)
    }
}

/// # Methods For All Arrays
impl<T: Element> Array<T> {
    /// Return the total number of elements in the array.
    pub fn len(&self) -> usize {
        self.shape.size()
    }

    /// Return the length of `axis`.
    ///
    /// **Panics** if the axis is out of bounds.
    #[track_caller]
    pub fn len_of(&self, axis: Axis) -> usize {
        self.shape[axis.index()]
    }

    /// Return whether the array has any elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the number of dimensions (axes) in the array
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Return the shape of the array as a slice.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Return the shape of the array as a [`Shape`].
    pub fn raw_shape(&self) -> &Shape {
        &self.shape
    }

    /// Return the strides of the array as a slice, in elements.
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Return the offset of the first element in the container.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn element_type(&self) -> ElementType {
        ElementType::of::<T>()
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Return `true` if the array is laid out densely in row major order.
    ///
    /// Axes of length one are ignored and empty arrays are always contiguous.
    pub fn is_contiguous(&self) -> bool {
        dimension::is_contiguous(&self.shape, &self.strides, Order::RowMajor)
    }

    /// Return `true` if the array is laid out densely in column major order.
    pub fn is_f_contiguous(&self) -> bool {
        dimension::is_contiguous(&self.shape, &self.strides, Order::ColumnMajor)
    }

    /// Return the container this array views.
    pub fn container(&self) -> &Arc<Container<T>> {
        &self.container
    }

    /// Return `true` if both arrays view the same container.
    pub fn shares_container<U: Element>(&self, other: &Array<U>) -> bool {
        Arc::as_ptr(&self.container) as *const u8 == Arc::as_ptr(&other.container) as *const u8
    }

    /// Return the shape, strides and offset as plain numbers.
    pub fn layout(&self) -> Layout {
        Layout::new(self.shape.to_vec(), self.strides.to_vec(), self.offset)
    }

    /// Another view of the same container.
    #[inline]
    pub(crate) fn with_layout(&self, shape: Shape, strides: Strides, offset: usize) -> Self {
        Array::from_parts_unchecked(self.container.clone(), shape, strides, offset)
    }

    #[inline]
    fn element_offset<I: NdIndex>(&self, index: I) -> NdResult<isize> {
        Ok(self.offset as isize + index.index_offset(&self.shape, &self.strides)?)
    }

    /// Return the element at `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if the index is out of bounds and
    /// `RankMismatch` if it has the wrong number of axes.
    pub fn get<I: NdIndex>(&self, index: I) -> NdResult<T> {
        let off = self.element_offset(index)?;
        Ok(unsafe { self.container.read(off) })
    }

    /// Write `value` at `index`. The write is visible through every array
    /// that views the same element.
    ///
    /// **Errors** with `IndexOutOfRange` if the index is out of bounds and
    /// `RankMismatch` if it has the wrong number of axes.
    pub fn set<I: NdIndex>(&mut self, index: I, value: T) -> NdResult<()> {
        let off = self.element_offset(index)?;
        unsafe { self.container.write(off, value) };
        Ok(())
    }

    /// Return the first element in row major order, or `None` if the array
    /// is empty.
    pub fn first(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { self.container.read(self.offset as isize) })
        }
    }

    /// Return a sliced view of the array.
    ///
    /// See [`s!`](crate::s!) for more information.
    ///
    /// **Errors** if an index or bound is out of range, a step is zero, or
    /// the description names more axes than the array has.
    pub fn slice(&self, info: &[SliceInfoElem]) -> NdResult<Self> {
        let (shape, strides, offset) = resolve_slice(&self.shape, &self.strides, self.offset, info)?;
        Ok(self.with_layout(shape, strides, offset))
    }

    /// Return a view of the array sliced along `axis`.
    pub fn slice_axis(&self, axis: Axis, slice: Slice) -> NdResult<Self> {
        let ax = axis.check(self.ndim())?;
        let mut info = vec![SliceInfoElem::from(..); ax];
        info.push(slice.into());
        self.slice(&info)
    }

    /// Return the subview at `index` along `axis`, which is removed.
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` or `index` is out of
    /// bounds.
    pub fn index_axis(&self, axis: Axis, index: usize) -> NdResult<Self> {
        let ax = axis.check(self.ndim())?;
        let extent = self.shape[ax];
        if index >= extent {
            return Err(NdError::IndexOutOfRange {
                axis: ax,
                index: index as isize,
                extent,
            });
        }
        let offset = self.offset as isize + index as isize * self.strides[ax];
        Ok(self.with_layout(self.shape.remove_axis(ax), self.strides.remove_axis(ax), offset as usize))
    }

    /// Return a view with the same elements read in row major order,
    /// arranged as `shape`.
    ///
    /// **Errors** with `ShapeMismatch` if the element counts differ and
    /// `IncompatibleLayout` if the current strides can't express the new
    /// shape without copying; use [`copy_reshape`](Array::copy_reshape) then.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::from_vec((0..6).collect::<Vec<i32>>());
    /// let b = a.reshape((2, 3)).unwrap();
    /// assert_eq!(b.get([1, 0]).unwrap(), 3);
    /// assert!(b.shares_container(&a));
    /// // the transpose is not row major, so it can't be flattened in place
    /// assert!(b.t().reshape(6).is_err());
    /// ```
    pub fn reshape<Sh: IntoShape>(&self, shape: Sh) -> NdResult<Self> {
        self.reshape_with_order(shape, Order::RowMajor)
    }

    /// Like [`reshape`](Array::reshape), reading the elements in `order`.
    pub fn reshape_with_order<Sh: IntoShape>(&self, shape: Sh, order: Order) -> NdResult<Self> {
        let shape = shape.into_shape();
        let strides = reshape_strides(&self.shape, &self.strides, &shape, order)?;
        Ok(self.with_layout(shape, strides, self.offset))
    }

    /// Return a new array of `shape` holding a row major copy of the
    /// elements.
    ///
    /// **Errors** with `ShapeMismatch` if the element counts differ.
    pub fn copy_reshape<Sh: IntoShape>(&self, shape: Sh) -> NdResult<Self> {
        let shape = shape.into_shape();
        if shape.size_checked() != Some(self.len()) {
            return Err(shape_mismatch(&self.shape, &shape));
        }
        Ok(Array::from_vec_shape(self.to_vec(), shape))
    }

    /// Return the elements as a one-dimensional array in row major order: a
    /// view if the layout allows it, a copy otherwise.
    pub fn ravel(&self) -> Self {
        match self.reshape(self.len()) {
            Ok(view) => view,
            Err(_) => Array::from_vec(self.to_vec()),
        }
    }

    /// Permute the axes: axis `i` of the result is axis `axes[i]` of `self`.
    ///
    /// **Errors** with `InvalidPermutation` unless `axes` is a permutation of
    /// `0..ndim`.
    pub fn transpose(&self, axes: &[usize]) -> NdResult<Self> {
        let (shape, strides) = permute(&self.shape, &self.strides, axes)?;
        Ok(self.with_layout(shape, strides, self.offset))
    }

    /// Return a view with the order of the axes reversed.
    pub fn t(&self) -> Self {
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.reverse();
        strides.reverse();
        self.with_layout(shape, strides, self.offset)
    }

    /// Return a view with axes `a` and `b` swapped.
    ///
    /// **Errors** with `IndexOutOfRange` if either axis is out of bounds.
    pub fn swap_axes(&self, a: usize, b: usize) -> NdResult<Self> {
        let ndim = self.ndim();
        for ax in [a, b] {
            if ax >= ndim {
                return Err(axis_out_of_range(ax, ndim));
            }
        }
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.swap(a, b);
        strides.swap(a, b);
        Ok(self.with_layout(shape, strides, self.offset))
    }

    /// Return a view of the array broadcast to `shape`. Stretched axes and
    /// new leading axes get stride zero, so every position along them reads
    /// the same element.
    ///
    /// Writes through the view land on that shared element once per
    /// position: an in-place update such as [`mapv_inplace`](Array::mapv_inplace)
    /// or `+=` is applied to it repeatedly.
    ///
    /// **Errors** with `ShapeMismatch` if the array can't be broadcast to
    /// `shape`.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::from_vec(vec![1, 2, 3]);
    /// let b = a.broadcast_to((2, 3)).unwrap();
    /// assert_eq!(b.strides(), &[0, 1]);
    /// assert_eq!(b.to_vec(), vec![1, 2, 3, 1, 2, 3]);
    /// ```
    pub fn broadcast_to<Sh: IntoShape>(&self, shape: Sh) -> NdResult<Self> {
        let shape = shape.into_shape();
        let strides = broadcast_strides(&self.shape, &self.strides, &shape)?;
        Ok(self.with_layout(shape, strides, self.offset))
    }

    /// Remove all axes of length one.
    pub fn squeeze(&self) -> Self {
        let (shape, strides): (Vec<usize>, Vec<isize>) = self
            .shape
            .iter()
            .zip(self.strides.iter())
            .filter(|&(&n, _)| n != 1)
            .map(|(&n, &s)| (n, s))
            .unzip();
        self.with_layout(shape.into(), strides.into(), self.offset)
    }

    /// Remove the given axes, which must have length one.
    ///
    /// **Errors** with `IndexOutOfRange` for an axis out of bounds and
    /// `InvalidArgument` for an axis whose length is not one.
    pub fn squeeze_axes(&self, axes: &[Axis]) -> NdResult<Self> {
        let ndim = self.ndim();
        let mut remove = vec![false; ndim];
        for &axis in axes {
            let ax = axis.check(ndim)?;
            if self.shape[ax] != 1 {
                return Err(NdError::InvalidArgument("squeezed axis must have length one"));
            }
            remove[ax] = true;
        }
        let mut shape = Vec::with_capacity(ndim);
        let mut strides = Vec::with_capacity(ndim);
        for ax in (0..ndim).filter(|&ax| !remove[ax]) {
            shape.push(self.shape[ax]);
            strides.push(self.strides[ax]);
        }
        Ok(self.with_layout(shape.into(), strides.into(), self.offset))
    }

    /// Insert a new axis of length one at `axis`.
    ///
    /// **Errors** with `IndexOutOfRange` if `axis > ndim`.
    pub fn insert_axis(&self, axis: Axis) -> NdResult<Self> {
        let ax = axis.check(self.ndim() + 1)?;
        Ok(self.with_layout(self.shape.insert_axis(ax, 1), self.strides.insert_axis(ax, 0), self.offset))
    }

    /// Return an array over a new container, with the same shape and
    /// elements and a row major layout.
    pub fn copy(&self) -> Self {
        Array::from_vec_shape(self.to_vec(), self.shape.clone())
    }

    /// Return `self` if it is already row major contiguous, a copy otherwise.
    pub fn to_contiguous(&self) -> Self {
        if self.is_contiguous() {
            self.clone()
        } else {
            self.copy()
        }
    }

    /// Return the elements in row major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Return an iterator of the elements in row major order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Return an iterator of the elements in the order they are laid out in
    /// memory, for work where the visiting order doesn't matter.
    pub fn iter_memory_order(&self) -> Iter<'_, T> {
        Iter::memory_order(self)
    }

    /// Return an iterator of indexes and elements in row major order.
    pub fn indexed_iter(&self) -> IndexedIter<'_, T> {
        IndexedIter::new(self)
    }

    /// Return an iterator over the indexes of the array.
    pub fn indices(&self) -> Indices {
        Indices::new(&self.shape)
    }

    /// Set every element to `x`.
    pub fn fill(&mut self, x: T) {
        for off in OffsetIter::memory_order(&self.shape, &self.strides, self.offset) {
            unsafe { self.container.write(off, x) }
        }
    }

    /// Copy the elements of `rhs`, broadcast to the shape of `self`, into
    /// `self`.
    ///
    /// **Errors** with `ShapeMismatch` if `rhs` can't be broadcast to the
    /// shape of `self`.
    pub fn assign(&mut self, rhs: &Array<T>) -> NdResult<()> {
        func::zip_mut_with(self, rhs, |x, y| *x = y)
    }

    /// Return a new array of the same shape with `f` applied to each element.
    pub fn map<U, F>(&self, f: F) -> Array<U>
    where
        U: Element,
        F: FnMut(T) -> U,
    {
        func::map(self, f)
    }

    /// Replace each element `x` with `f(x)`, in row major order.
    ///
    /// `f` runs once per position, so on a broadcast view an element shared
    /// by `n` positions is updated `n` times.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::from_scalar(10);
    /// let mut b = a.broadcast_to(3).unwrap();
    /// b.mapv_inplace(|x| x + 1);
    /// assert_eq!(a.get([]).unwrap(), 13);
    /// ```
    pub fn mapv_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(T) -> T,
    {
        for off in OffsetIter::new(&self.shape, &self.strides, self.offset) {
            unsafe {
                let x = self.container.read(off);
                self.container.write(off, f(x));
            }
        }
    }

    /// Return a new array with each element converted with `as`.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::from_vec(vec![1.7f64, -2.5, 300.]);
    /// assert_eq!(a.cast::<i32>().to_vec(), vec![1, -2, 300]);
    /// assert_eq!(a.cast::<u8>().to_vec(), vec![1, 0, 255]);
    /// ```
    pub fn cast<U>(&self) -> Array<U>
    where
        T: AsPrimitive<U>,
        U: Element,
    {
        self.map(|x| x.as_())
    }

    /// Fold all elements in row major order.
    pub fn fold<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        func::fold(self, init, f)
    }

    /// Return the elements where `mask` is true, in row major order, as a
    /// one-dimensional array over a new container.
    ///
    /// **Errors** with `ShapeMismatch` if `mask` can't be broadcast to the
    /// shape of `self`.
    ///
    /// ```
    /// use ndengine::Array;
    ///
    /// let a = Array::from_shape_vec((2, 3), vec![1, -2, 3, -4, 5, -6]).unwrap();
    /// let positive = a.greater(&Array::from_scalar(0)).unwrap();
    /// assert_eq!(a.select(&positive).unwrap().to_vec(), vec![1, 3, 5]);
    /// ```
    pub fn select(&self, mask: &Array<bool>) -> NdResult<Self> {
        let mut out = Vec::new();
        let (cs, cm) = (&self.container, &mask.container);
        NdIter::with_shape(&[self, mask], &self.shape)?.for_each(|offs| unsafe {
            if cm.read(offs[1]) {
                out.push(cs.read(offs[0]));
            }
        });
        Ok(Array::from_vec(out))
    }

    /// Set the elements where `mask` is true to `value`.
    ///
    /// **Errors** with `ShapeMismatch` if `mask` can't be broadcast to the
    /// shape of `self`.
    pub fn assign_where(&mut self, mask: &Array<bool>, value: T) -> NdResult<()> {
        func::zip_mut_with(self, mask, |x, m| {
            if m {
                *x = value
            }
        })
    }

    /// Copy the elements of `other` where `mask` is true.
    ///
    /// **Errors** with `ShapeMismatch` if `mask` or `other` can't be
    /// broadcast to the shape of `self`.
    pub fn assign_where_from(&mut self, mask: &Array<bool>, other: &Array<T>) -> NdResult<()> {
        let mask = func::detach(mask, self);
        let other = func::detach(other, self);
        let iter = NdIter::with_shape(&[&*self, &*mask, &*other], &self.shape)?;
        let (cs, cm, co) = (&self.container, &mask.container, &other.container);
        iter.for_each(|offs| unsafe {
            if cm.read(offs[1]) {
                cs.write(offs[0], co.read(offs[2]));
            }
        });
        Ok(())
    }
}
