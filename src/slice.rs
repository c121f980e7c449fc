// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::dimension::{Shape, Strides};
use crate::error::{NdError, NdResult};

/// A slice (range with step size).
///
/// Negative `start` or `end` indexes are counted from the back of the axis. If
/// `end` is `None`, the slice extends to the end of the axis.
///
/// ## Examples
///
/// `Slice::new(0, None, 1)` is the full range of an axis. It can also be
/// created with `Slice::from(..)`. The Python equivalent is `[:]`.
///
/// `Slice::new(a, b, 2)` is every second element from `a` until `b`. It can
/// also be created with `Slice::from(a..b).step_by(2)`. The Python equivalent
/// is `[a:b:2]`.
///
/// `Slice::new(a, None, -1)` is every element, from `a` until the end, in
/// reverse order. It can also be created with `Slice::from(a..).step_by(-1)`.
/// The Python equivalent is `[a::-1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: isize,
    pub end: Option<isize>,
    pub step: isize,
}

impl Slice {
    /// Create a new `Slice` with the given extents.
    ///
    /// A zero `step` is reported as an error when the slice is applied.
    pub fn new(start: isize, end: Option<isize>, step: isize) -> Slice {
        Slice { start, end, step }
    }

    /// Create a new `Slice` with the given step size (multiplied with the
    /// previous step size).
    #[inline]
    pub fn step_by(self, step: isize) -> Self {
        Slice {
            step: self.step * step,
            ..self
        }
    }
}

/// Token to represent a new axis in a slice description.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NewAxis;

/// A slice (range with step), an index, or a new axis token.
///
/// See also the [`s![]`](macro.s.html) macro for a convenient way to create a
/// list of `SliceInfoElem`.
///
/// `SliceInfoElem::Index(a)` is the index `a`; it removes the axis. The macro
/// equivalent is `s![a]`.
///
/// `SliceInfoElem::Slice { start: a, end: Some(b), step: 2 }` is every second
/// element from `a` until `b`. The macro equivalent is `s![a..b;2]`.
///
/// `SliceInfoElem::NewAxis` inserts an axis of length one. The macro
/// equivalent is `s![NewAxis]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SliceInfoElem {
    /// A range with step size. Negative `start` or `end` indexes are counted
    /// from the back of the axis. If `end` is `None`, the slice extends to the
    /// end of the axis.
    Slice {
        start: isize,
        end: Option<isize>,
        step: isize,
    },
    /// A single index.
    Index(isize),
    /// A new axis of length 1.
    NewAxis,
}

impl SliceInfoElem {
    /// Returns `true` if `self` is a `Slice` value.
    pub fn is_slice(&self) -> bool {
        matches!(self, SliceInfoElem::Slice { .. })
    }

    /// Returns `true` if `self` is an `Index` value.
    pub fn is_index(&self) -> bool {
        matches!(self, SliceInfoElem::Index(_))
    }

    /// Returns `true` if `self` is a `NewAxis` value.
    pub fn is_new_axis(&self) -> bool {
        matches!(self, SliceInfoElem::NewAxis)
    }

    /// Multiply the step of a `Slice` by `step`; other values are returned
    /// unchanged.
    #[inline]
    pub fn step_by(self, step: isize) -> Self {
        match self {
            SliceInfoElem::Slice { start, end, step: orig } => SliceInfoElem::Slice {
                start,
                end,
                step: orig * step,
            },
            other => other,
        }
    }
}

impl From<Slice> for SliceInfoElem {
    #[inline]
    fn from(s: Slice) -> SliceInfoElem {
        SliceInfoElem::Slice {
            start: s.start,
            end: s.end,
            step: s.step,
        }
    }
}

impl From<NewAxis> for SliceInfoElem {
    #[inline]
    fn from(_: NewAxis) -> SliceInfoElem {
        SliceInfoElem::NewAxis
    }
}

macro_rules! impl_slice_variant_from_range {
    ($self:ty, $constructor:path, $index:ty) => {
        impl From<Range<$index>> for $self {
            #[inline]
            fn from(r: Range<$index>) -> $self {
                $constructor {
                    start: r.start as isize,
                    end: Some(r.end as isize),
                    step: 1,
                }
            }
        }

        impl From<RangeInclusive<$index>> for $self {
            #[inline]
            fn from(r: RangeInclusive<$index>) -> $self {
                let end = *r.end() as isize;
                $constructor {
                    start: *r.start() as isize,
                    end: if end == -1 { None } else { Some(end + 1) },
                    step: 1,
                }
            }
        }

        impl From<RangeFrom<$index>> for $self {
            #[inline]
            fn from(r: RangeFrom<$index>) -> $self {
                $constructor {
                    start: r.start as isize,
                    end: None,
                    step: 1,
                }
            }
        }

        impl From<RangeTo<$index>> for $self {
            #[inline]
            fn from(r: RangeTo<$index>) -> $self {
                $constructor {
                    start: 0,
                    end: Some(r.end as isize),
                    step: 1,
                }
            }
        }

        impl From<RangeToInclusive<$index>> for $self {
            #[inline]
            fn from(r: RangeToInclusive<$index>) -> $self {
                let end = r.end as isize;
                $constructor {
                    start: 0,
                    end: if end == -1 { None } else { Some(end + 1) },
                    step: 1,
                }
            }
        }
    };
}

impl_slice_variant_from_range!(Slice, Slice, isize);
impl_slice_variant_from_range!(Slice, Slice, usize);
impl_slice_variant_from_range!(Slice, Slice, i32);
impl_slice_variant_from_range!(SliceInfoElem, SliceInfoElem::Slice, isize);
impl_slice_variant_from_range!(SliceInfoElem, SliceInfoElem::Slice, usize);
impl_slice_variant_from_range!(SliceInfoElem, SliceInfoElem::Slice, i32);

impl From<RangeFull> for Slice {
    #[inline]
    fn from(_: RangeFull) -> Slice {
        Slice {
            start: 0,
            end: None,
            step: 1,
        }
    }
}

impl From<RangeFull> for SliceInfoElem {
    #[inline]
    fn from(_: RangeFull) -> SliceInfoElem {
        SliceInfoElem::Slice {
            start: 0,
            end: None,
            step: 1,
        }
    }
}

macro_rules! impl_sliceinfoelem_from_index {
    ($index:ty) => {
        impl From<$index> for SliceInfoElem {
            #[inline]
            fn from(r: $index) -> SliceInfoElem {
                SliceInfoElem::Index(r as isize)
            }
        }
    };
}

impl_sliceinfoelem_from_index!(isize);
impl_sliceinfoelem_from_index!(usize);
impl_sliceinfoelem_from_index!(i32);

/// Slice argument constructor.
///
/// `s![]` takes a list of ranges/slices/indices/new-axes, separated by comma,
/// with optional step sizes that are separated from the range by a semicolon.
/// It evaluates to an array of [`SliceInfoElem`], which is passed to
/// [`Array::slice`](crate::Array::slice).
///
/// Each range, index or [`NewAxis`] is converted with `SliceInfoElem::from`.
/// A step written as `r;step` multiplies the step of the range `r`. A negative
/// step walks the selected range backwards, starting at its last element:
/// `s![a..b;-1]` selects the elements of `a..b` in reverse order.
///
/// Axes not named by the list are kept whole.
///
/// ```
/// use ndengine::{s, Array};
///
/// let a = Array::from_shape_vec((4, 4), (0..16).collect()).unwrap();
/// let b = a.slice(&s![1..3, 0..2]).unwrap();
/// assert_eq!(b.to_vec(), vec![4, 5, 8, 9]);
///
/// let row = a.slice(&s![-1, ..;-1]).unwrap();
/// assert_eq!(row.to_vec(), vec![15, 14, 13, 12]);
/// ```
#[macro_export]
macro_rules! s {
    (@elem $r:expr ; $step:expr) => {
        $crate::SliceInfoElem::from($r).step_by($step as isize)
    };
    (@elem $r:expr) => {
        $crate::SliceInfoElem::from($r)
    };
    ($($r:expr $(; $step:expr)?),* $(,)?) => {
        [$($crate::s!(@elem $r $(; $step)?)),*]
    };
}

fn normalize_bound(value: isize, axis: usize, extent: usize) -> NdResult<usize> {
    let n = extent as isize;
    let abs = if value < 0 { value + n } else { value };
    if (0..=n).contains(&abs) {
        Ok(abs as usize)
    } else {
        Err(NdError::IndexOutOfRange {
            axis,
            index: value,
            extent,
        })
    }
}

fn normalize_index(value: isize, axis: usize, extent: usize) -> NdResult<usize> {
    let n = extent as isize;
    let abs = if value < 0 { value + n } else { value };
    if (0..n).contains(&abs) {
        Ok(abs as usize)
    } else {
        Err(NdError::IndexOutOfRange {
            axis,
            index: value,
            extent,
        })
    }
}

/// Apply a slice description to a view's shape, strides and offset.
///
/// Returns the new shape, strides and offset; the buffer is not touched.
///
/// **Errors** if a slice bound lies outside `[0, extent]` or an index outside
/// `[0, extent)` after counting negative values from the back
/// (`IndexOutOfRange`), if a step is zero (`InvalidArgument`) or if the
/// description names more axes than the view has (`RankMismatch`).
pub fn resolve_slice(shape: &[usize], strides: &[isize], offset: usize, info: &[SliceInfoElem]) -> NdResult<(Shape, Strides, usize)> {
    let consumed = info.iter().filter(|e| !e.is_new_axis()).count();
    if consumed > shape.len() {
        return Err(NdError::RankMismatch {
            expected: shape.len(),
            got: consumed,
        });
    }
    let mut new_shape = Vec::with_capacity(shape.len() + info.len());
    let mut new_strides = Vec::with_capacity(shape.len() + info.len());
    let mut offset = offset as isize;
    let mut axis = 0;
    for elem in info {
        match *elem {
            SliceInfoElem::Slice { start, end, step } => {
                let extent = shape[axis];
                let stride = strides[axis];
                if step == 0 {
                    return Err(NdError::InvalidArgument("slice step must be nonzero"));
                }
                let start = normalize_bound(start, axis, extent)?;
                let end = match end {
                    Some(e) => normalize_bound(e, axis, extent)?,
                    None => extent,
                }
                .max(start);
                let abs_step = step.unsigned_abs();
                let len = (end - start + abs_step - 1) / abs_step;
                if len > 0 {
                    let first = if step > 0 { start } else { end - 1 };
                    offset += first as isize * stride;
                }
                new_shape.push(len);
                new_strides.push(stride * step);
                axis += 1;
            }
            SliceInfoElem::Index(i) => {
                let i = normalize_index(i, axis, shape[axis])?;
                offset += i as isize * strides[axis];
                axis += 1;
            }
            SliceInfoElem::NewAxis => {
                new_shape.push(1);
                new_strides.push(0);
            }
        }
    }
    new_shape.extend_from_slice(&shape[axis..]);
    new_strides.extend_from_slice(&strides[axis..]);
    debug_assert!(offset >= 0);
    Ok((Shape::from(new_shape), Strides::from(new_strides), offset as usize))
}
