// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shape and stride algebra.
//!
//! Pure functions over shapes and strides. Strides are counted in elements.

use crate::error::{NdError, NdResult};
use crate::Order;

pub use self::axis::Axis;
pub use self::broadcast::{broadcast_all, broadcast_shapes, broadcast_strides};
pub use self::dim::{IntoShape, Shape, Strides};
pub use self::permute::{inverse_permutation, permute, validate_permutation};
pub use self::reshape::reshape_strides;

mod axis;
mod broadcast;
mod dim;
mod permute;
mod reshape;

/// Calculate offset from `n` and a signed stride
#[inline(always)]
pub fn stride_offset(n: usize, stride: isize) -> isize {
    (n as isize) * stride
}

/// Return the strides of a densely packed array of `shape` in `order`.
///
/// Axes of length zero or one take part in the product as if they had length
/// one, so the result never depends on whether the array is empty.
pub fn contiguous_strides(shape: &[usize], order: Order) -> Strides {
    let mut strides = Strides::zeros(shape.len());
    let mut acc = 1isize;
    match order {
        Order::RowMajor => {
            for (s, &n) in strides.iter_mut().zip(shape).rev() {
                *s = acc;
                acc = acc.wrapping_mul(n.max(1) as isize);
            }
        }
        Order::ColumnMajor => {
            for (s, &n) in strides.iter_mut().zip(shape) {
                *s = acc;
                acc = acc.wrapping_mul(n.max(1) as isize);
            }
        }
    }
    strides
}

/// Return the number of elements of `shape`.
///
/// Errors if the product of non-zero axis lengths overflows `isize`, even
/// when another axis is zero.
pub fn size_of_shape_checked(shape: &[usize]) -> NdResult<usize> {
    let size_nonzero = shape
        .iter()
        .filter(|&&d| d != 0)
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(NdError::InvalidArgument("shape size overflows isize"))?;
    if size_nonzero > isize::MAX as usize {
        Err(NdError::InvalidArgument("shape size overflows isize"))
    } else {
        Ok(shape.iter().product())
    }
}

/// Return the lowest and highest element offsets a view reaches, or `None`
/// when the view has no elements.
///
/// Errors if the offsets overflow `isize`.
pub fn offset_range(shape: &[usize], strides: &[isize], offset: usize) -> NdResult<Option<(isize, isize)>> {
    if shape.iter().any(|&n| n == 0) {
        return Ok(None);
    }
    let overflow = || NdError::InvalidArgument("view offsets overflow isize");
    let base = isize::try_from(offset).map_err(|_| overflow())?;
    let (mut min, mut max) = (base, base);
    for (&n, &s) in shape.iter().zip(strides) {
        let reach = ((n - 1) as isize).checked_mul(s).ok_or_else(overflow)?;
        if reach < 0 {
            min = min.checked_add(reach).ok_or_else(overflow)?;
        } else {
            max = max.checked_add(reach).ok_or_else(overflow)?;
        }
    }
    Ok(Some((min, max)))
}

/// Check that every element of the view lies inside a buffer of `len`
/// elements.
///
/// An empty view only needs its offset to be at most `len`.
pub fn check_bounds(len: usize, shape: &[usize], strides: &[isize], offset: usize) -> NdResult<()> {
    if shape.len() != strides.len() {
        return Err(NdError::RankMismatch {
            expected: shape.len(),
            got: strides.len(),
        });
    }
    size_of_shape_checked(shape)?;
    match offset_range(shape, strides, offset)? {
        None if offset <= len => Ok(()),
        None => Err(NdError::BoundsError {
            min: offset as isize,
            max: offset as isize,
            len,
        }),
        Some((min, max)) if min >= 0 && (max as usize) < len => Ok(()),
        Some((min, max)) => Err(NdError::BoundsError { min, max, len }),
    }
}

/// Return true if the view is densely packed in `order`.
///
/// Axes of length one are ignored, and an empty view is always contiguous.
pub fn is_contiguous(shape: &[usize], strides: &[isize], order: Order) -> bool {
    if shape.iter().any(|&n| n == 0) {
        return true;
    }
    let mut expected = 1isize;
    let check = |(&n, &s): (&usize, &isize), expected: &mut isize| {
        if n != 1 {
            if s != *expected {
                return false;
            }
            *expected *= n as isize;
        }
        true
    };
    match order {
        Order::RowMajor => shape.iter().zip(strides).rev().all(|p| check(p, &mut expected)),
        Order::ColumnMajor => shape.iter().zip(strides).all(|p| check(p, &mut expected)),
    }
}

/// Return the element offset of `index`, relative to the view's first element.
///
/// The caller checks the index against the shape.
#[inline]
pub fn offset_of(index: &[usize], strides: &[isize]) -> isize {
    index
        .iter()
        .zip(strides)
        .fold(0, |acc, (&i, &s)| acc + stride_offset(i, s))
}

/// Check `index` against `shape` and return its offset relative to the view's
/// first element.
pub fn checked_offset(index: &[usize], shape: &[usize], strides: &[isize]) -> NdResult<isize> {
    if index.len() != shape.len() {
        return Err(NdError::RankMismatch {
            expected: shape.len(),
            got: index.len(),
        });
    }
    for (axis, (&i, &n)) in index.iter().zip(shape).enumerate() {
        if i >= n {
            return Err(NdError::IndexOutOfRange {
                axis,
                index: i as isize,
                extent: n,
            });
        }
    }
    Ok(offset_of(index, strides))
}

/// Return the axis order that visits memory in increasing address order:
/// axes sorted by decreasing absolute stride, ties kept in axis order.
pub(crate) fn memory_axis_order(strides: &[isize]) -> Vec<usize> {
    let mut axes: Vec<usize> = (0..strides.len()).collect();
    axes.sort_by(|&a, &b| strides[b].unsigned_abs().cmp(&strides[a].unsigned_abs()));
    axes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_strides() {
        assert_eq!(contiguous_strides(&[2, 3, 4], Order::C), Strides::from([12, 4, 1]));
        assert_eq!(contiguous_strides(&[2, 3, 4], Order::F), Strides::from([1, 2, 6]));
        assert_eq!(contiguous_strides(&[], Order::C).ndim(), 0);
        assert_eq!(contiguous_strides(&[3, 0, 2], Order::C), Strides::from([2, 2, 1]));
        assert!(is_contiguous(&[3, 0, 2], &[0, 0, 0], Order::C));
    }

    #[test]
    fn contiguity() {
        assert!(is_contiguous(&[2, 3], &[3, 1], Order::C));
        assert!(!is_contiguous(&[2, 3], &[3, 1], Order::F));
        assert!(is_contiguous(&[2, 1, 3], &[3, 100, 1], Order::C));
        assert!(!is_contiguous(&[2, 3], &[1, 2], Order::C));
        assert!(is_contiguous(&[2, 3], &[1, 2], Order::F));
    }

    #[test]
    fn bounds() {
        assert!(check_bounds(6, &[2, 3], &[3, 1], 0).is_ok());
        assert!(check_bounds(6, &[2, 3], &[-3, 1], 3).is_ok());
        let err = check_bounds(6, &[2, 3], &[3, 1], 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BoundsError);
        assert_eq!(check_bounds(6, &[2, 3], &[-3, 1], 0).unwrap_err().kind(), ErrorKind::BoundsError);
        assert!(check_bounds(0, &[0, 5], &[5, 1], 0).is_ok());
        assert!(check_bounds(4, &[0], &[1], 5).is_err());
        assert_eq!(check_bounds(6, &[2, 3], &[3], 0).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn checked_offsets() {
        assert_eq!(checked_offset(&[1, 2], &[2, 3], &[3, 1]).unwrap(), 5);
        assert_eq!(
            checked_offset(&[2, 0], &[2, 3], &[3, 1]).unwrap_err(),
            NdError::IndexOutOfRange { axis: 0, index: 2, extent: 2 }
        );
        assert_eq!(checked_offset(&[0], &[2, 3], &[3, 1]).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn overflowing_shape() {
        assert!(size_of_shape_checked(&[usize::MAX, 2]).is_err());
        assert!(size_of_shape_checked(&[usize::MAX, 0, 2]).is_err());
        assert_eq!(size_of_shape_checked(&[3, 0]).unwrap(), 0);
    }
}
