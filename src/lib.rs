// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndengine"]
#![doc(html_root_url = "https://docs.rs/ndengine/0.1/")]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::needless_range_loop,
    clippy::manual_map,
    clippy::too_many_arguments
)]

//! The `ndengine` crate provides an *n*-dimensional array engine: strided
//! views over shared, reference counted buffers, a broadcasting iteration
//! protocol, elementwise function dispatch and a linear algebra layer built
//! on the same view abstraction.
//!
//! - [`Container`]: one buffer of elements plus an atomic reference count.
//! - [`Array`]: a shape, strides and an offset into a container. Slicing,
//!   reshaping, transposing and broadcasting produce new arrays over the same
//!   container in O(1); writes through one array are visible through every
//!   other array that overlaps it.
//! - [`NdIter`]: walks one or several views in lockstep in row major order
//!   over their broadcast shape.
//! - [`func`]: elementwise application of plain closures with broadcasting,
//!   plus the arithmetic operators built from it.
//! - [`linalg`]: matrix product (tiled, bit-identical to the naive triple
//!   loop), LU, QR and symmetric eigen decompositions.
//! - [`DynArray`]: the closed set of element types as a tagged union, for code
//!   that picks the element type at runtime.
//! - [`Vector`]: a one-dimensional convenience wrapper.
//!
//! ## Highlights
//!
//! - Negative strides (reversed views) and zero strides (broadcast views).
//! - Fallible operations return [`NdResult`] with an [`NdError`] that names
//!   the offending shapes, axis or index.
//! - Operators (`+`, `*`, ...) panic on incompatible shapes, like slicing
//!   panics in `std`; every operator has a `try_` method returning a result.
//!
//! ## Crate Feature Flags
//!
//! - `serde`: serialization of [`Layout`] and [`DType`].
//! - `approx`: implementations of the `approx` traits for arrays.
//! - `half`: the `f16` element type.
//!
//! ## Example
//!
//! ```
//! use ndengine::{s, Array};
//!
//! let a = Array::from_shape_vec((4, 4), (0..16).collect()).unwrap();
//! let b = a.slice(&s![1..3, 0..2]).unwrap();
//! assert_eq!(b.shape(), &[2, 2]);
//! assert_eq!(b.to_vec(), vec![4, 5, 8, 9]);
//!
//! let c = &b + &Array::from_vec(vec![10, 20]);
//! assert_eq!(c.to_vec(), vec![14, 25, 18, 29]);
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

pub use crate::container::Container;
pub use crate::dimension::{
    broadcast_all, broadcast_shapes, contiguous_strides, inverse_permutation, Axis, IntoShape, Shape, Strides,
};
pub use crate::dyn_array::DynArray;
pub use crate::element::{DType, Element, ElementType};
pub use crate::error::{ErrorKind, NdError, NdResult};
pub use crate::free_functions::{arr0, arr1, arr2, arr3, meshgrid};
pub use crate::impl_methods::NdIndex;
pub use crate::impl_ops::ScalarOperand;
pub use crate::iterators::{IndexedIter, Indices, Iter, NdIter, OffsetIter};
pub use crate::layout::{Layout, Strided};
pub use crate::linalg::MatmulConfig;
pub use crate::linalg_traits::{LinalgScalar, NdFloat};
pub use crate::numeric::IsClose;
pub use crate::order::Order;
pub use crate::slice::{resolve_slice, NewAxis, Slice, SliceInfoElem};
pub use crate::stacking::{concatenate, stack};
pub use crate::vector::Vector;

pub use num_complex::{Complex, Complex32, Complex64};

#[macro_use]
mod slice;

mod arrayformat;
#[cfg(feature = "approx")]
mod array_approx;
mod container;
pub mod dimension;
mod dyn_array;
mod element;
mod error;
mod free_functions;
pub mod func;
mod impl_constructors;
mod impl_methods;
mod impl_ops;
pub mod iterators;
mod layout;
pub mod linalg;
mod linalg_traits;
mod numeric;
mod order;
pub mod prelude;
mod stacking;
mod vector;

/// An *n*-dimensional strided view of a shared [`Container`].
///
/// An array is a shape, one stride per axis (in elements, possibly negative
/// or zero) and the offset of its first element, plus a reference to the
/// container holding the data. Every index that is valid for the shape
/// addresses an element inside the container; this is checked whenever an
/// array is built from parts.
///
/// Cloning an array is cheap and produces another view of the same
/// container; use [`.copy()`](Array::copy) for an independent copy. Methods
/// documented as returning a new array allocate a new container.
///
/// ```
/// use ndengine::Array;
///
/// let a = Array::<f64>::zeros((2, 3));
/// let mut b = a.clone();
/// b.set([1, 2], 5.).unwrap();
/// assert_eq!(a.get([1, 2]).unwrap(), 5.);
/// ```
///
/// Element data is not synchronized, so arrays stay on the thread that made
/// them: an `Array` is neither `Send` nor `Sync`. Only the container's
/// reference count may be shared across threads.
///
/// ```compile_fail
/// use ndengine::Array;
///
/// let a = Array::<u64>::zeros(4);
/// let mut b = a.clone();
/// std::thread::spawn(move || b.set(0, 1).unwrap());
/// ```
#[derive(Clone)]
pub struct Array<T: Element> {
    container: Arc<Container<T>>,
    shape: Shape,
    strides: Strides,
    offset: usize,
    /// writes go through a shared pointer; keeps views off other threads
    marker: PhantomData<*const ()>,
}

impl<T: Element> Strided for Array<T> {
    #[inline]
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }
}
