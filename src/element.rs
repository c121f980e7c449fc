//! Element type descriptors.
//!
//! Every container and array carries exactly one element type. The closed set
//! of supported types is listed in [`DType`]; [`Element`] ties a Rust type to
//! its tag and to the matching variant of [`DynArray`].
use std::fmt;
use std::mem;

use num_complex::Complex;

#[cfg(feature = "half")]
use half::f16;

use crate::dyn_array::DynArray;
use crate::Array;

/// Identity tag of an element type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    /// half precision float, with crate feature `half`
    #[cfg(feature = "half")]
    F16,
    F32,
    F64,
    /// `Complex<f32>`
    C32,
    /// `Complex<f64>`
    C64,
}

impl DType {
    /// Short lowercase name, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            #[cfg(feature = "half")]
            DType::F16 => "f16",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::C32 => "c32",
            DType::C64 => "c64",
        }
    }

    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            DType::Bool | DType::I8 | DType::U8 => 1,
            DType::I16 | DType::U16 => 2,
            #[cfg(feature = "half")]
            DType::F16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 | DType::C32 => 8,
            DType::C64 => 16,
        }
    }

    /// Return true for real floating point types.
    pub fn is_float(self) -> bool {
        match self {
            DType::F32 | DType::F64 => true,
            #[cfg(feature = "half")]
            DType::F16 => true,
            _ => false,
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, DType::C32 | DType::C64)
    }

    pub fn is_integer(self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub fn is_signed_integer(self) -> bool {
        matches!(self, DType::I8 | DType::I16 | DType::I32 | DType::I64)
    }

    pub fn is_unsigned_integer(self) -> bool {
        matches!(self, DType::U8 | DType::U16 | DType::U32 | DType::U64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Size, alignment and identity tag of an element type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementType {
    pub dtype: DType,
    pub size: usize,
    pub align: usize,
}

impl ElementType {
    /// Return the descriptor of `T`.
    #[inline]
    pub fn of<T: Element>() -> Self {
        ElementType {
            dtype: T::DTYPE,
            size: mem::size_of::<T>(),
            align: mem::align_of::<T>(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (size {}, align {})", self.dtype, self.size, self.align)
    }
}

/// Types that can be stored in a [`Container`](crate::Container).
///
/// `'static` for type-based dispatch, `Copy` so that elements are read and
/// written by value and never need destructors. The trait is sealed: the set
/// of element types is closed and each one has a [`DynArray`] variant.
pub trait Element: 'static + Copy + Default + PartialEq + fmt::Debug + Send + Sync + private::Sealed {
    /// Identity tag of the type.
    const DTYPE: DType;

    /// Wrap a typed array into the type-erased union.
    #[doc(hidden)]
    fn into_dyn(array: Array<Self>) -> DynArray;

    /// Unwrap the type-erased union if the tag matches.
    #[doc(hidden)]
    fn from_dyn(array: DynArray) -> Result<Array<Self>, DynArray>;

    #[doc(hidden)]
    fn from_dyn_ref(array: &DynArray) -> Option<&Array<Self>>;
}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const DTYPE: DType = DType::$tag;

            #[inline]
            fn into_dyn(array: Array<Self>) -> DynArray {
                DynArray::$tag(array)
            }

            #[inline]
            fn from_dyn(array: DynArray) -> Result<Array<Self>, DynArray> {
                match array {
                    DynArray::$tag(a) => Ok(a),
                    other => Err(other),
                }
            }

            #[inline]
            fn from_dyn_ref(array: &DynArray) -> Option<&Array<Self>> {
                match array {
                    DynArray::$tag(a) => Some(a),
                    _ => None,
                }
            }
        }
        )*
    };
}

impl_element! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Complex<f32> => C32,
    Complex<f64> => C64,
}

#[cfg(feature = "half")]
impl_element! {
    f16 => F16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors() {
        let et = ElementType::of::<f64>();
        assert_eq!(et.dtype, DType::F64);
        assert_eq!(et.size, 8);
        assert_eq!(et.size, DType::F64.size());
        assert_eq!(ElementType::of::<Complex<f64>>().size, DType::C64.size());
        assert_eq!(ElementType::of::<bool>().size, 1);
        assert!(DType::F32.is_float());
        assert!(!DType::C32.is_float());
        assert!(DType::U16.is_integer());
        assert_eq!(DType::C64.to_string(), "c64");
    }
}
