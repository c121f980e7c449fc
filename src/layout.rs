//! Plain-number description of a view, for interop with external formats.
use crate::dimension::{check_bounds, Shape, Strides};
use crate::error::NdResult;

/// Shape, strides and offset of a view as plain numbers.
///
/// With crate feature `serde` the layout can be serialized; the element data
/// itself is left to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub shape: Vec<usize>,
    pub strides: Vec<isize>,
    pub offset: usize,
}

impl Layout {
    pub fn new(shape: Vec<usize>, strides: Vec<isize>, offset: usize) -> Self {
        Layout { shape, strides, offset }
    }

    /// Return the parts as `(shape, strides, offset)`.
    pub fn into_parts(self) -> (Vec<usize>, Vec<isize>, usize) {
        (self.shape, self.strides, self.offset)
    }

    /// Check that the layout fits a buffer of `len` elements.
    pub fn validate(&self, len: usize) -> NdResult<()> {
        check_bounds(len, &self.shape, &self.strides, self.offset)
    }
}

/// Anything that describes a strided view: shape, strides and offset.
///
/// The iterators accept any mix of `Strided` operands, so views of different
/// element types can be traversed in lockstep.
pub trait Strided {
    fn shape(&self) -> &[usize];
    fn strides(&self) -> &[isize];
    fn offset(&self) -> usize;
}

impl Strided for Layout {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn strides(&self) -> &[isize] {
        &self.strides
    }

    fn offset(&self) -> usize {
        self.offset
    }
}

/// A bare `(shape, strides, offset)` triple.
impl Strided for (Shape, Strides, usize) {
    fn shape(&self) -> &[usize] {
        &self.0
    }

    fn strides(&self) -> &[isize] {
        &self.1
    }

    fn offset(&self) -> usize {
        self.2
    }
}
