// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Iterators over the indices, offsets and elements of arrays.
//!
//! Every iterator here walks its shape in the canonical row major order: the
//! last axis varies fastest. [`OffsetIter::memory_order`] is the one
//! exception and is only used where the visiting order can't be observed.

mod nditer;

use std::iter::FusedIterator;

pub use self::nditer::NdIter;

use crate::dimension::{memory_axis_order, Shape, Strides};
use crate::{Array, Element};

/// Advance `index` to the next position of `shape` in row major order.
///
/// Returns false, leaving `index` at all zeros, after the last position.
#[inline]
pub(crate) fn next_index(shape: &[usize], index: &mut [usize]) -> bool {
    for (ix, &n) in index.iter_mut().zip(shape).rev() {
        *ix += 1;
        if *ix < n {
            return true;
        }
        *ix = 0;
    }
    false
}

/// An iterator over the indexes of a shape, in row major order.
///
/// ```
/// use ndengine::Indices;
///
/// let ix: Vec<_> = Indices::new(&[2, 2]).collect();
/// assert_eq!(ix, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Clone, Debug)]
pub struct Indices {
    shape: Shape,
    index: Vec<usize>,
    remaining: usize,
}

impl Indices {
    pub fn new(shape: &[usize]) -> Self {
        Indices {
            shape: Shape::from_slice(shape),
            index: vec![0; shape.len()],
            remaining: shape.iter().product(),
        }
    }

    /// Restart from the first index.
    pub fn reset(&mut self) {
        self.index.iter_mut().for_each(|i| *i = 0);
        self.remaining = self.shape.size();
    }
}

impl Iterator for Indices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.index.clone();
        self.remaining -= 1;
        next_index(&self.shape, &mut self.index);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Indices {}
impl FusedIterator for Indices {}

/// An iterator over the element offsets of one strided view.
///
/// Offsets are absolute, counted from the start of the container. The offset
/// is carried from step to step: advancing an axis adds its stride, and
/// wrapping it around subtracts the whole axis span.
#[derive(Clone, Debug)]
pub struct OffsetIter {
    shape: Shape,
    strides: Strides,
    index: Vec<usize>,
    start: isize,
    offset: isize,
    remaining: usize,
}

impl OffsetIter {
    /// Iterate the view in row major order.
    pub fn new(shape: &[usize], strides: &[isize], offset: usize) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        OffsetIter {
            shape: Shape::from_slice(shape),
            strides: Strides::from_slice(strides),
            index: vec![0; shape.len()],
            start: offset as isize,
            offset: offset as isize,
            remaining: shape.iter().product(),
        }
    }

    /// Iterate the same set of offsets as [`new`](OffsetIter::new), in
    /// increasing memory order where the layout allows it.
    ///
    /// Axes are reordered by decreasing absolute stride and reversed axes are
    /// flipped.
    pub fn memory_order(shape: &[usize], strides: &[isize], offset: usize) -> Self {
        let axes = memory_axis_order(strides);
        let mut start = offset as isize;
        let mut new_shape = Vec::with_capacity(shape.len());
        let mut new_strides = Vec::with_capacity(shape.len());
        for &ax in &axes {
            let (n, s) = (shape[ax], strides[ax]);
            if s < 0 && n > 0 {
                start += (n - 1) as isize * s;
            }
            new_shape.push(n);
            new_strides.push(s.abs());
        }
        let mut it = OffsetIter::new(&new_shape, &new_strides, 0);
        it.start = start;
        it.offset = start;
        it
    }

    /// Restart from the first offset.
    pub fn reset(&mut self) {
        self.index.iter_mut().for_each(|i| *i = 0);
        self.offset = self.start;
        self.remaining = self.shape.size();
    }

    #[inline]
    fn advance(&mut self) {
        for ((ix, &n), &s) in self.index.iter_mut().zip(self.shape.iter()).zip(self.strides.iter()).rev() {
            *ix += 1;
            self.offset += s;
            if *ix < n {
                return;
            }
            self.offset -= s * n as isize;
            *ix = 0;
        }
    }
}

impl Iterator for OffsetIter {
    type Item = isize;

    #[inline]
    fn next(&mut self) -> Option<isize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.offset;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for OffsetIter {}
impl FusedIterator for OffsetIter {}

/// An iterator over the elements of an array, by value.
///
/// Iterator element type is `T`.
pub struct Iter<'a, T: Element> {
    array: &'a Array<T>,
    offsets: OffsetIter,
}

impl<'a, T: Element> Iter<'a, T> {
    pub(crate) fn new(array: &'a Array<T>) -> Self {
        Iter {
            array,
            offsets: OffsetIter::new(array.shape(), array.strides(), array.offset()),
        }
    }

    pub(crate) fn memory_order(array: &'a Array<T>) -> Self {
        Iter {
            array,
            offsets: OffsetIter::memory_order(array.shape(), array.strides(), array.offset()),
        }
    }
}

impl<'a, T: Element> Iterator for Iter<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let off = self.offsets.next()?;
        // offsets of a validated view lie inside the container
        Some(unsafe { self.array.container().read(off) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl<'a, T: Element> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T: Element> FusedIterator for Iter<'a, T> {}

/// An iterator over the indexes and elements of an array.
///
/// Iterator element type is `(Vec<usize>, T)`.
pub struct IndexedIter<'a, T: Element> {
    array: &'a Array<T>,
    indices: Indices,
    offsets: OffsetIter,
}

impl<'a, T: Element> IndexedIter<'a, T> {
    pub(crate) fn new(array: &'a Array<T>) -> Self {
        IndexedIter {
            array,
            indices: Indices::new(array.shape()),
            offsets: OffsetIter::new(array.shape(), array.strides(), array.offset()),
        }
    }
}

impl<'a, T: Element> Iterator for IndexedIter<'a, T> {
    type Item = (Vec<usize>, T);

    fn next(&mut self) -> Option<Self::Item> {
        let off = self.offsets.next()?;
        let index = self.indices.next()?;
        Some((index, unsafe { self.array.container().read(off) }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl<'a, T: Element> ExactSizeIterator for IndexedIter<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::contiguous_strides;
    use crate::Order;

    #[test]
    fn canonical_offsets() {
        let offs: Vec<_> = OffsetIter::new(&[2, 3], &[1, 2], 0).collect();
        assert_eq!(offs, vec![0, 2, 4, 1, 3, 5]);
        let rev: Vec<_> = OffsetIter::new(&[4], &[-1], 3).collect();
        assert_eq!(rev, vec![3, 2, 1, 0]);
    }

    #[test]
    fn memory_order_offsets() {
        let offs: Vec<_> = OffsetIter::memory_order(&[2, 3], &[1, 2], 0).collect();
        assert_eq!(offs, vec![0, 1, 2, 3, 4, 5]);
        let rev: Vec<_> = OffsetIter::memory_order(&[2, 2], &[-2, -1], 3).collect();
        assert_eq!(rev, vec![0, 1, 2, 3]);
    }

    #[test]
    fn restartable() {
        let mut it = OffsetIter::new(&[2, 2], &[2, 1], 0);
        assert_eq!(it.by_ref().count(), 4);
        assert_eq!(it.next(), None);
        it.reset();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(0));

        let mut ix = Indices::new(&[3]);
        ix.next();
        ix.reset();
        assert_eq!(ix.count(), 3);
    }

    #[test]
    fn empty_and_scalar_shapes() {
        assert_eq!(OffsetIter::new(&[0, 5], &[5, 1], 0).count(), 0);
        assert_eq!(OffsetIter::new(&[], &[], 7).collect::<Vec<_>>(), vec![7]);
        assert_eq!(Indices::new(&[]).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn contiguous_strides_visit_increasing_offsets() {
        let shape = [3, 1, 4, 2];
        let strides = contiguous_strides(&shape, Order::C);
        let offs: Vec<_> = OffsetIter::new(&shape, &strides, 0).collect();
        assert_eq!(offs, (0..24).collect::<Vec<isize>>());
    }
}
