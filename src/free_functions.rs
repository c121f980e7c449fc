// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::dimension::Shape;
use crate::error::{NdError, NdResult};
use crate::{Array, Element};

/// Create a zero-dimensional array with the element `x`.
pub fn arr0<A: Element>(x: A) -> Array<A> {
    Array::from_scalar(x)
}

/// Create a one-dimensional array with elements from `xs`.
pub fn arr1<A: Element>(xs: &[A]) -> Array<A> {
    Array::from_vec(xs.to_vec())
}

/// Create a two-dimensional array with elements from `xs`.
///
/// ```
/// use ndengine::arr2;
///
/// let a = arr2(&[[1, 2, 3],
///                [4, 5, 6]]);
/// assert_eq!(a.shape(), &[2, 3]);
/// ```
pub fn arr2<A: Element, const N: usize>(xs: &[[A; N]]) -> Array<A> {
    let v = xs.iter().flat_map(|row| row.iter().copied()).collect();
    Array::from_vec_shape(v, Shape::from([xs.len(), N]))
}

/// Create a three-dimensional array with elements from `xs`.
///
/// ```
/// use ndengine::arr3;
///
/// let a = arr3(&[[[1, 2],
///                 [3, 4]],
///                [[5, 6],
///                 [7, 8]],
///                [[9, 0],
///                 [1, 2]]]);
/// assert_eq!(a.shape(), &[3, 2, 2]);
/// ```
pub fn arr3<A: Element, const N: usize, const M: usize>(xs: &[[[A; M]; N]]) -> Array<A> {
    let v = xs
        .iter()
        .flat_map(|plane| plane.iter().flat_map(|row| row.iter().copied()))
        .collect();
    Array::from_vec_shape(v, Shape::from([xs.len(), N, M]))
}

/// Return coordinate arrays from one-dimensional coordinate vectors, with
/// matrix (`ij`) indexing.
///
/// For `n` inputs of lengths `l0, l1, ...`, output `i` holds the values of
/// input `i` along axis `i`. With `sparse` the outputs have length one on
/// every other axis, ready to be broadcast against each other; otherwise
/// each output is a full `(l0, l1, ...)` array.
///
/// ***Errors*** with `RankMismatch` if an input is not one-dimensional.
///
/// ```
/// use ndengine::{arr1, arr2, meshgrid};
///
/// let x = arr1(&[1, 2, 3]);
/// let y = arr1(&[10, 20]);
/// let grid = meshgrid(&[&x, &y], false).unwrap();
/// assert_eq!(grid[0], arr2(&[[1, 1], [2, 2], [3, 3]]));
/// assert_eq!(grid[1], arr2(&[[10, 20], [10, 20], [10, 20]]));
///
/// let sparse = meshgrid(&[&x, &y], true).unwrap();
/// assert_eq!(sparse[1].shape(), &[1, 2]);
/// ```
pub fn meshgrid<A: Element>(arrays: &[&Array<A>], sparse: bool) -> NdResult<Vec<Array<A>>> {
    if let Some(bad) = arrays.iter().find(|a| a.ndim() != 1) {
        return Err(NdError::RankMismatch {
            expected: 1,
            got: bad.ndim(),
        });
    }
    let full: Vec<usize> = arrays.iter().map(|a| a.len()).collect();
    arrays
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let mut sh = vec![1; arrays.len()];
            sh[i] = a.len();
            let column = a.copy_reshape(sh)?;
            if sparse {
                Ok(column)
            } else {
                Ok(column.broadcast_to(&full)?.copy())
            }
        })
        .collect()
}
