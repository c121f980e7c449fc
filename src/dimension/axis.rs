// Copyright 2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::error::{axis_out_of_range, NdResult};

/// An axis index.
///
/// Axis *0* is the array's outermost axis and *n*-1 is the innermost.
/// Axis arguments use this type so they can't be mixed up with lengths or
/// element indices.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Axis(pub usize);

impl Axis {
    /// Return the index of the axis.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }

    /// Return the index if it is less than `ndim`.
    #[inline]
    pub(crate) fn check(self, ndim: usize) -> NdResult<usize> {
        if self.0 < ndim {
            Ok(self.0)
        } else {
            Err(axis_out_of_range(self.0, ndim))
        }
    }
}
