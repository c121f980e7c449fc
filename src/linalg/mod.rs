// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Linear algebra.
//!
//! Matrix functions treat the last two axes of an array as the matrix axes
//! and any leading axes as a batch of matrices.

mod decomp;
mod matmul;

pub use self::decomp::{det, eigh, inv, lu, qr, solve, Lu, Qr, JACOBI_MAX_SWEEPS};
pub use self::matmul::{dot, matmul, matmul_into, matmul_with, matvec, mm, MatmulConfig};

use crate::error::{NdError, NdResult};
use crate::{Array, Element, LinalgScalar};

/// Swap the last two axes of `a`, without copying.
///
/// ***Errors*** with `RankMismatch` if `a` has fewer than two axes.
///
/// ```
/// use ndengine::{linalg, Array};
///
/// let a = Array::<f32>::zeros((5, 2, 3));
/// let t = linalg::transpose_view(&a).unwrap();
/// assert_eq!(t.shape(), &[5, 3, 2]);
/// assert!(t.shares_container(&a));
/// ```
pub fn transpose_view<A: Element>(a: &Array<A>) -> NdResult<Array<A>> {
    let nd = a.ndim();
    if nd < 2 {
        return Err(NdError::RankMismatch { expected: 2, got: nd });
    }
    a.swap_axes(nd - 2, nd - 1)
}

impl<A: LinalgScalar> Array<A> {
    /// Matrix product of `self` and `rhs`, see [`matmul`].
    pub fn matmul(&self, rhs: &Array<A>) -> NdResult<Array<A>> {
        matmul(self, rhs)
    }
}
