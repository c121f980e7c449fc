// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;
use std::ops::{Add, Mul};

use num_traits::{FromPrimitive, One, Zero};

use crate::error::{NdError, NdResult};
use crate::func;
use crate::{Array, Axis, Element, LinalgScalar, NdFloat};

/// # Numerical Methods for Arrays
///
/// Whole-array reductions visit the elements in row major order, so results
/// over floats do not depend on the memory layout.
impl<A: Element> Array<A> {
    /// Return the sum of all elements in the array.
    ///
    /// ```
    /// use ndengine::arr2;
    ///
    /// let a = arr2(&[[1., 2.],
    ///                [3., 4.]]);
    /// assert_eq!(a.sum(), 10.);
    /// ```
    pub fn sum(&self) -> A
    where
        A: Zero + Add<Output = A>,
    {
        self.fold(A::zero(), |acc, x| acc + x)
    }

    /// Return the product of all elements in the array.
    pub fn prod(&self) -> A
    where
        A: One + Mul<Output = A>,
    {
        self.fold(A::one(), |acc, x| acc * x)
    }

    /// Return sum along `axis`.
    ///
    /// ```
    /// use ndengine::{arr1, arr2, Axis};
    ///
    /// let a = arr2(&[[1., 2., 3.],
    ///                [4., 5., 6.]]);
    /// assert_eq!(a.sum_axis(Axis(0), false).unwrap(), arr1(&[5., 7., 9.]));
    /// assert_eq!(a.sum_axis(Axis(1), true).unwrap(), arr2(&[[6.], [15.]]));
    /// ```
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` is out of bounds.
    pub fn sum_axis(&self, axis: Axis, keepdims: bool) -> NdResult<Array<A>>
    where
        A: Zero + Add<Output = A>,
    {
        func::reduce_axis(self, axis, A::zero(), |acc, x| acc + x, keepdims)
    }

    /// Return product along `axis`.
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` is out of bounds.
    pub fn prod_axis(&self, axis: Axis, keepdims: bool) -> NdResult<Array<A>>
    where
        A: One + Mul<Output = A>,
    {
        func::reduce_axis(self, axis, A::one(), |acc, x| acc * x, keepdims)
    }

    /// Return the mean of all elements, or `None` if the array is empty.
    pub fn mean(&self) -> Option<A>
    where
        A: LinalgScalar + FromPrimitive,
    {
        if self.is_empty() {
            None
        } else {
            Some(self.sum() / A::from_usize(self.len())?)
        }
    }

    /// Return mean along `axis`.
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` is out of bounds and
    /// `InvalidArgument` if the axis has length zero.
    ///
    /// ```
    /// use ndengine::{arr1, arr2, Axis};
    ///
    /// let a = arr2(&[[1., 2.],
    ///                [3., 4.]]);
    /// assert_eq!(a.mean_axis(Axis(0), false).unwrap(), arr1(&[2.0, 3.0]));
    /// assert_eq!(a.mean_axis(Axis(1), false).unwrap(), arr1(&[1.5, 3.5]));
    /// ```
    pub fn mean_axis(&self, axis: Axis, keepdims: bool) -> NdResult<Array<A>>
    where
        A: LinalgScalar + FromPrimitive,
    {
        let ax = axis.check(self.ndim())?;
        let n = match A::from_usize(self.shape[ax]) {
            Some(n) if self.shape[ax] > 0 => n,
            _ => return Err(NdError::InvalidArgument("mean over an axis of length zero")),
        };
        let sum = self.sum_axis(axis, keepdims)?;
        Ok(sum.map(|x| x / n))
    }

    /// Return the minimum element.
    ///
    /// Elements that are not comparable (NaN) are skipped over unless they
    /// come first.
    ///
    /// **Errors** with `InvalidArgument` if the array is empty.
    pub fn min(&self) -> NdResult<A>
    where
        A: PartialOrd,
    {
        self.extreme(Ordering::Less)
    }

    /// Return the maximum element.
    ///
    /// **Errors** with `InvalidArgument` if the array is empty.
    pub fn max(&self) -> NdResult<A>
    where
        A: PartialOrd,
    {
        self.extreme(Ordering::Greater)
    }

    fn extreme(&self, wanted: Ordering) -> NdResult<A>
    where
        A: PartialOrd,
    {
        let mut iter = self.iter_memory_order();
        let first = iter
            .next()
            .ok_or(NdError::InvalidArgument("min/max of an empty array"))?;
        Ok(iter.fold(first, |m, x| if x.partial_cmp(&m) == Some(wanted) { x } else { m }))
    }

    /// Return the minimum along `axis`.
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` is out of bounds and
    /// `InvalidArgument` if the axis has length zero.
    pub fn min_axis(&self, axis: Axis, keepdims: bool) -> NdResult<Array<A>>
    where
        A: PartialOrd,
    {
        self.extreme_axis(axis, keepdims, Ordering::Less)
    }

    /// Return the maximum along `axis`.
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` is out of bounds and
    /// `InvalidArgument` if the axis has length zero.
    pub fn max_axis(&self, axis: Axis, keepdims: bool) -> NdResult<Array<A>>
    where
        A: PartialOrd,
    {
        self.extreme_axis(axis, keepdims, Ordering::Greater)
    }

    fn extreme_axis(&self, axis: Axis, keepdims: bool, wanted: Ordering) -> NdResult<Array<A>>
    where
        A: PartialOrd,
    {
        let ax = axis.check(self.ndim())?;
        if self.shape[ax] == 0 {
            return Err(NdError::InvalidArgument("min/max over an axis of length zero"));
        }
        let mut acc = self.index_axis(axis, 0)?.copy();
        for i in 1..self.shape[ax] {
            let lane = self.index_axis(axis, i)?;
            func::zip_mut_with(&mut acc, &lane, |m, x| {
                if x.partial_cmp(m) == Some(wanted) {
                    *m = x
                }
            })?;
        }
        if keepdims {
            acc.insert_axis(axis)
        } else {
            Ok(acc)
        }
    }

    /// Limit the values for each element.
    ///
    /// **Errors** with `InvalidArgument` if `low > high` or the bounds are
    /// not comparable.
    ///
    /// ```
    /// use ndengine::arr1;
    ///
    /// let a = arr1(&[0, 3, 6, 9]);
    /// assert_eq!(a.clip(2, 7).unwrap(), arr1(&[2, 3, 6, 7]));
    /// assert!(a.clip(7, 2).is_err());
    /// ```
    pub fn clip(&self, low: A, high: A) -> NdResult<Array<A>>
    where
        A: PartialOrd,
    {
        match low.partial_cmp(&high) {
            Some(Ordering::Less) | Some(Ordering::Equal) => {}
            _ => return Err(NdError::InvalidArgument("clip bounds must satisfy low <= high")),
        }
        Ok(self.map(|v| {
            if v < low {
                low
            } else if v > high {
                high
            } else {
                v
            }
        }))
    }

    /// Return the distinct elements in increasing order as a one-dimensional
    /// array.
    pub fn unique(&self) -> Array<A>
    where
        A: PartialOrd,
    {
        let mut v = self.to_vec();
        v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        v.dedup();
        Array::from_vec(v)
    }
}

impl<A: NdFloat> Array<A> {
    /// Return the variance along `axis`, with `ddof` delta degrees of
    /// freedom: the sum of squared deviations from the mean is divided by
    /// `n - ddof`.
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` is out of bounds and
    /// `InvalidArgument` unless `ddof` is less than the axis length.
    pub fn var_axis(&self, axis: Axis, ddof: usize, keepdims: bool) -> NdResult<Array<A>> {
        let ax = axis.check(self.ndim())?;
        let n = self.shape[ax];
        if ddof >= n {
            return Err(NdError::InvalidArgument("ddof must be less than the axis length"));
        }
        let mean = self.mean_axis(axis, true)?;
        let dev = func::apply2(self, &mean, |x, m| (x - m) * (x - m))?;
        let denom = A::from_usize(n - ddof).unwrap_or_else(A::nan);
        Ok(dev.sum_axis(axis, keepdims)?.map(|s| s / denom))
    }

    /// Return the standard deviation along `axis`, with `ddof` delta
    /// degrees of freedom.
    ///
    /// ```
    /// use ndengine::{arr1, arr2, Axis};
    ///
    /// let a = arr2(&[[1., 2.],
    ///                [3., 4.],
    ///                [5., 6.]]);
    /// let s = a.std_axis(Axis(0), 1, false).unwrap();
    /// assert_eq!(s, arr1(&[2., 2.]));
    /// ```
    pub fn std_axis(&self, axis: Axis, ddof: usize, keepdims: bool) -> NdResult<Array<A>> {
        Ok(self.var_axis(axis, ddof, keepdims)?.map(A::sqrt))
    }
}

/// # Boolean Reductions
impl Array<bool> {
    /// Return `true` if any element is `true`.
    pub fn any(&self) -> bool {
        self.iter_memory_order().any(|x| x)
    }

    /// Return `true` if every element is `true`; `true` for an empty array.
    pub fn all(&self) -> bool {
        self.iter_memory_order().all(|x| x)
    }

    /// Logical or along `axis`.
    pub fn any_axis(&self, axis: Axis, keepdims: bool) -> NdResult<Array<bool>> {
        func::reduce_axis(self, axis, false, |acc, x| acc || x, keepdims)
    }

    /// Logical and along `axis`.
    pub fn all_axis(&self, axis: Axis, keepdims: bool) -> NdResult<Array<bool>> {
        func::reduce_axis(self, axis, true, |acc, x| acc && x, keepdims)
    }
}
