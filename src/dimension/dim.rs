// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

const CAP: usize = 4;

/// T is usize or isize
#[derive(Debug)]
enum DimRepr<T> {
    Inline(u32, [T; CAP]),
    Alloc(Box<[T]>),
}

impl<T> Deref for DimRepr<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        match *self {
            DimRepr::Inline(len, ref ar) => &ar[..len as usize],
            DimRepr::Alloc(ref ar) => ar,
        }
    }
}

impl<T> DerefMut for DimRepr<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        match *self {
            DimRepr::Inline(len, ref mut ar) => &mut ar[..len as usize],
            DimRepr::Alloc(ref mut ar) => ar,
        }
    }
}

impl<T: Copy + Default> DimRepr<T> {
    fn copy_from(x: &[T]) -> Self {
        if x.len() <= CAP {
            let mut arr = [T::default(); CAP];
            arr[..x.len()].copy_from_slice(x);
            DimRepr::Inline(x.len() as u32, arr)
        } else {
            DimRepr::Alloc(x.to_vec().into_boxed_slice())
        }
    }

    fn from_vec_auto(v: Vec<T>) -> Self {
        if v.len() <= CAP {
            Self::copy_from(&v)
        } else {
            DimRepr::Alloc(v.into_boxed_slice())
        }
    }
}

impl<T: Copy> Clone for DimRepr<T> {
    fn clone(&self) -> Self {
        match *self {
            DimRepr::Inline(len, arr) => DimRepr::Inline(len, arr),
            DimRepr::Alloc(ref ar) => DimRepr::Alloc(ar.clone()),
        }
    }
}

impl<T: PartialEq> PartialEq for DimRepr<T> {
    fn eq(&self, rhs: &Self) -> bool {
        self[..] == rhs[..]
    }
}

impl<T: Eq> Eq for DimRepr<T> {}

impl<T: Hash> Hash for DimRepr<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&self[..], state)
    }
}

macro_rules! dim_type {
    ($(#[$meta:meta])* $name:ident, $elem:ty) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name(DimRepr<$elem>);

        impl $name {
            /// Create from a slice of per-axis values.
            pub fn from_slice(values: &[$elem]) -> Self {
                $name(DimRepr::copy_from(values))
            }

            /// Create with `ndim` axes, every value zero.
            pub fn zeros(ndim: usize) -> Self {
                $name(DimRepr::from_vec_auto(vec![0; ndim]))
            }

            /// Number of axes.
            #[inline]
            pub fn ndim(&self) -> usize {
                self.0.len()
            }

            #[inline]
            pub fn as_slice(&self) -> &[$elem] {
                &self.0
            }

            #[inline]
            pub fn as_mut_slice(&mut self) -> &mut [$elem] {
                &mut self.0
            }

            /// Return a copy with the value at `axis` removed.
            ///
            /// **Panics** if `axis` is out of bounds.
            pub fn remove_axis(&self, axis: usize) -> Self {
                let mut v = self.0.to_vec();
                v.remove(axis);
                $name::from(v)
            }

            /// Return a copy with `value` inserted before `axis`.
            ///
            /// **Panics** if `axis > ndim`.
            pub fn insert_axis(&self, axis: usize, value: $elem) -> Self {
                let mut v = self.0.to_vec();
                v.insert(axis, value);
                $name::from(v)
            }
        }

        impl Default for $name {
            /// The default has zero axes.
            fn default() -> Self {
                $name::from_slice(&[])
            }
        }

        impl Deref for $name {
            type Target = [$elem];
            #[inline]
            fn deref(&self) -> &[$elem] {
                &self.0
            }
        }

        impl DerefMut for $name {
            #[inline]
            fn deref_mut(&mut self) -> &mut [$elem] {
                &mut self.0
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(v: Vec<$elem>) -> Self {
                $name(DimRepr::from_vec_auto(v))
            }
        }

        impl<'a> From<&'a [$elem]> for $name {
            fn from(v: &'a [$elem]) -> Self {
                $name::from_slice(v)
            }
        }

        impl<const N: usize> From<[$elem; N]> for $name {
            fn from(v: [$elem; N]) -> Self {
                $name::from_slice(&v)
            }
        }

        impl PartialEq<[$elem]> for $name {
            fn eq(&self, rhs: &[$elem]) -> bool {
                self[..] == *rhs
            }
        }

        impl<const N: usize> PartialEq<[$elem; N]> for $name {
            fn eq(&self, rhs: &[$elem; N]) -> bool {
                self[..] == rhs[..]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self[..], f)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self[..], f)
            }
        }
    };
}

dim_type! {
    /// Array shape: the extent of each axis.
    ///
    /// Shapes with up to four axes are stored inline and don't need any
    /// dynamic memory allocation.
    Shape, usize
}

dim_type! {
    /// Per-axis stride in elements, possibly negative or zero.
    Strides, isize
}

impl Shape {
    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.iter().product()
    }

    /// Total number of elements, or `None` if it overflows `isize`.
    pub fn size_checked(&self) -> Option<usize> {
        super::size_of_shape_checked(self).ok()
    }
}

/// Argument conversion into a [`Shape`].
///
/// Implemented for `usize` (one axis), tuples and arrays of `usize`, slices,
/// vectors and shapes themselves.
pub trait IntoShape {
    fn into_shape(self) -> Shape;
}

impl IntoShape for Shape {
    #[inline]
    fn into_shape(self) -> Shape {
        self
    }
}

impl<'a> IntoShape for &'a Shape {
    #[inline]
    fn into_shape(self) -> Shape {
        self.clone()
    }
}

impl IntoShape for usize {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::from_slice(&[self])
    }
}

impl<'a> IntoShape for &'a [usize] {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::from_slice(self)
    }
}

impl IntoShape for Vec<usize> {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::from(self)
    }
}

impl<'a> IntoShape for &'a Vec<usize> {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::from_slice(self)
    }
}

impl<const N: usize> IntoShape for [usize; N] {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::from_slice(&self)
    }
}

macro_rules! tuple_into_shape {
    ($ty:ty; $($i:tt)*) => {
        impl IntoShape for $ty {
            #[inline]
            fn into_shape(self) -> Shape {
                Shape::from_slice(&[$(self.$i),*])
            }
        }
    };
}

impl IntoShape for () {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::default()
    }
}

tuple_into_shape!((usize,); 0);
tuple_into_shape!((usize, usize); 0 1);
tuple_into_shape!((usize, usize, usize); 0 1 2);
tuple_into_shape!((usize, usize, usize, usize); 0 1 2 3);
tuple_into_shape!((usize, usize, usize, usize, usize); 0 1 2 3 4);
tuple_into_shape!((usize, usize, usize, usize, usize, usize); 0 1 2 3 4 5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_and_heap_agree() {
        let short = Shape::from_slice(&[2, 3]);
        let long = Shape::from(vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(short.ndim(), 2);
        assert_eq!(long.ndim(), 6);
        assert_eq!(long.size(), 720);
        assert_eq!(long.remove_axis(5).remove_axis(4), Shape::from([1, 2, 3, 4]));
        assert_eq!(short.insert_axis(0, 1), Shape::from([1, 2, 3]));
    }

    #[test]
    fn shape_arguments() {
        assert_eq!((2, 3).into_shape(), Shape::from([2, 3]));
        assert_eq!(5usize.into_shape(), Shape::from([5]));
        assert_eq!(().into_shape().ndim(), 0);
        assert_eq!(vec![4, 4].into_shape().to_string(), "[4, 4]");
    }
}
