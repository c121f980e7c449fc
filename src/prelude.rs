// Copyright 2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ndengine prelude.
//!
//! This module contains the most used types, traits, functions, and macros
//! that you can import easily as a group.
//!
//! ```
//! use ndengine::prelude::*;
//!
//! let a = Array::from_shape_vec((2, 2), vec![1., 2., 3., 4.]).unwrap();
//! assert_eq!(a.slice(&s![.., 1]).unwrap().to_vec(), vec![2., 4.]);
//! ```

#[doc(no_inline)]
pub use crate::{Array, DynArray, Vector};

#[doc(no_inline)]
pub use crate::{Axis, IntoShape, Layout, Order, Shape, Slice, Strided, Strides};

#[doc(no_inline)]
pub use crate::{DType, Element, LinalgScalar, NdFloat};

#[doc(no_inline)]
pub use crate::{NdError, NdResult};

#[doc(no_inline)]
pub use crate::{arr0, arr1, arr2, arr3, concatenate, stack};

pub use crate::s;
