// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::{shape_mismatch, NdError, NdResult};
use crate::{Array, Axis, Element, Slice};

/// Concatenate arrays along an existing axis.
///
/// ***Errors*** if the arrays have mismatching shapes, apart from along
/// `axis`. ***Errors*** if `arrays` is empty, if `axis` is out of bounds, or
/// if the result is larger than is possible to represent.
///
/// ```
/// use ndengine::{arr2, concatenate, Axis};
///
/// let a = arr2(&[[2., 2.],
///                [3., 3.]]);
/// let b = arr2(&[[4., 4.]]);
/// assert_eq!(
///     concatenate(Axis(0), &[&a, &b]).unwrap(),
///     arr2(&[[2., 2.],
///            [3., 3.],
///            [4., 4.]])
/// );
/// ```
pub fn concatenate<A: Element>(axis: Axis, arrays: &[&Array<A>]) -> NdResult<Array<A>> {
    let first = arrays
        .first()
        .ok_or(NdError::InvalidArgument("need at least one array to concatenate"))?;
    let ax = axis.check(first.ndim())?;

    let mut res_shape = first.shape.clone();
    let mut stacked = 0usize;
    for array in arrays {
        let compatible = array.ndim() == first.ndim()
            && array
                .shape()
                .iter()
                .zip(first.shape())
                .enumerate()
                .all(|(i, (m, n))| i == ax || m == n);
        if !compatible {
            return Err(shape_mismatch(first.shape(), array.shape()));
        }
        stacked += array.shape[ax];
    }
    res_shape[ax] = stacked;

    let res = Array::try_zeros(res_shape)?;
    let mut start = 0;
    for array in arrays {
        let len = array.shape[ax];
        let mut front = res.slice_axis(axis, Slice::from(start as isize..(start + len) as isize))?;
        front.assign(array)?;
        start += len;
    }
    Ok(res)
}

/// Stack arrays along a new axis.
///
/// ***Errors*** if the arrays have mismatching shapes.
/// ***Errors*** if `arrays` is empty, if `axis` is out of bounds, or if the
/// result is larger than is possible to represent.
///
/// ```
/// use ndengine::{arr2, arr3, stack, Axis};
///
/// let a = arr2(&[[2., 2.],
///                [3., 3.]]);
/// assert_eq!(
///     stack(Axis(0), &[&a, &a]).unwrap(),
///     arr3(&[[[2., 2.],
///             [3., 3.]],
///            [[2., 2.],
///             [3., 3.]]])
/// );
/// ```
pub fn stack<A: Element>(axis: Axis, arrays: &[&Array<A>]) -> NdResult<Array<A>> {
    let first = arrays
        .first()
        .ok_or(NdError::InvalidArgument("need at least one array to stack"))?;
    // the new axis may also go after the last one
    let ax = axis.check(first.ndim() + 1)?;
    if let Some(other) = arrays.iter().find(|a| a.shape() != first.shape()) {
        return Err(shape_mismatch(first.shape(), other.shape()));
    }
    let expanded = arrays
        .iter()
        .map(|a| a.insert_axis(Axis(ax)))
        .collect::<NdResult<Vec<_>>>()?;
    let views = expanded.iter().collect::<Vec<_>>();
    concatenate(Axis(ax), &views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::{arr1, arr2};

    #[test]
    fn concatenate_columns() {
        let a = arr2(&[[1, 2], [3, 4]]);
        let b = arr2(&[[5], [6]]);
        let c = concatenate(Axis(1), &[&a, &b, &a]).unwrap();
        assert_eq!(c, arr2(&[[1, 2, 5, 1, 2], [3, 4, 6, 3, 4]]));
        assert!(!c.shares_container(&a));
    }

    #[test]
    fn concatenate_views() {
        let a = arr2(&[[1, 2], [3, 4]]);
        let c = concatenate(Axis(0), &[&a.t(), &a]).unwrap();
        assert_eq!(c, arr2(&[[1, 3], [2, 4], [1, 2], [3, 4]]));
    }

    #[test]
    fn stack_last_axis() {
        let a = arr1(&[1, 2, 3]);
        let b = arr1(&[4, 5, 6]);
        let s = stack(Axis(1), &[&a, &b]).unwrap();
        assert_eq!(s, arr2(&[[1, 4], [2, 5], [3, 6]]));
    }

    #[test]
    fn errors() {
        let a = arr2(&[[1, 2], [3, 4]]);
        let b = arr1(&[1, 2]);
        assert_eq!(concatenate::<i32>(Axis(0), &[]).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(concatenate(Axis(0), &[&a, &b]).unwrap_err().kind(), ErrorKind::ShapeMismatch);
        assert_eq!(stack(Axis(0), &[&a, &a.slice(&s![..1, ..]).unwrap()]).unwrap_err().kind(), ErrorKind::ShapeMismatch);
        assert_eq!(stack(Axis(3), &[&a]).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    }
}
