// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use thiserror::Error;

use crate::dimension::{Shape, Strides};
use crate::element::DType;

/// Result alias used by every fallible operation in the crate.
pub type NdResult<T> = Result<T, NdError>;

/// An error from an array operation.
///
/// Each variant carries the offending shapes, axis, index or element type.
/// Use [`NdError::kind`] to match on the category of the error.
#[derive(Error, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum NdError {
    #[error("incompatible shapes {lhs} and {rhs}")]
    ShapeMismatch { lhs: Shape, rhs: Shape },

    #[error("expected {expected} axes, got {got}")]
    RankMismatch { expected: usize, got: usize },

    #[error("shape {shape} with strides {strides} cannot be viewed as {target} without a copy")]
    IncompatibleLayout {
        shape: Shape,
        strides: Strides,
        target: Shape,
    },

    #[error("index {index} is out of range for axis {axis} of length {extent}")]
    IndexOutOfRange {
        axis: usize,
        index: isize,
        extent: usize,
    },

    #[error("axis {axis} is out of range for an array with {ndim} axes")]
    AxisOutOfRange { axis: usize, ndim: usize },

    #[error("view addresses offsets {min}..={max} outside a container of {len} elements")]
    BoundsError { min: isize, max: isize, len: usize },

    #[error("{axes:?} is not a permutation of the axes 0..{ndim}")]
    InvalidPermutation { axes: Vec<usize>, ndim: usize },

    #[error("could not allocate {count} elements of type {element}")]
    AllocationError { count: usize, element: DType },

    #[error("{operation} is not implemented for element type {dtype}")]
    NotImplementedForType {
        operation: &'static str,
        dtype: DType,
    },

    #[error("element type mismatch: expected {expected}, found {found}")]
    ElementTypeMismatch { expected: DType, found: DType },

    #[error("matrix is singular: zero pivot in column {pivot}")]
    SingularMatrix { pivot: usize },

    #[error("no convergence after {iterations} sweeps")]
    ConvergenceFailure { iterations: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Error category of an [`NdError`].
///
/// This enumeration is not exhaustive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// incompatible shapes or ranks
    ShapeMismatch,
    /// the layout can not be reinterpreted without a copy
    IncompatibleLayout,
    /// index, slice bound or axis outside of its range
    IndexOutOfRange,
    /// a view would address memory outside of its container
    BoundsError,
    /// axes are not a permutation
    InvalidPermutation,
    /// buffer allocation failed
    AllocationError,
    /// the operation does not apply to the element type
    NotImplementedForType,
    /// two operands carry different element types
    ElementTypeMismatch,
    /// zero pivot during factorization
    SingularMatrix,
    /// iterative algorithm did not converge
    ConvergenceFailure,
    /// a scalar argument is invalid
    InvalidArgument,
}

impl NdError {
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            NdError::ShapeMismatch { .. } | NdError::RankMismatch { .. } => ErrorKind::ShapeMismatch,
            NdError::IncompatibleLayout { .. } => ErrorKind::IncompatibleLayout,
            NdError::IndexOutOfRange { .. } | NdError::AxisOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            NdError::BoundsError { .. } => ErrorKind::BoundsError,
            NdError::InvalidPermutation { .. } => ErrorKind::InvalidPermutation,
            NdError::AllocationError { .. } => ErrorKind::AllocationError,
            NdError::NotImplementedForType { .. } => ErrorKind::NotImplementedForType,
            NdError::ElementTypeMismatch { .. } => ErrorKind::ElementTypeMismatch,
            NdError::SingularMatrix { .. } => ErrorKind::SingularMatrix,
            NdError::ConvergenceFailure { .. } => ErrorKind::ConvergenceFailure,
            NdError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Return true if retrying the operation could succeed.
    ///
    /// Only allocation failure and numerical non-convergence qualify; every
    /// other kind reports a contract violation by the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind(), ErrorKind::AllocationError | ErrorKind::ConvergenceFailure)
    }
}

#[inline]
pub(crate) fn shape_mismatch(lhs: &[usize], rhs: &[usize]) -> NdError {
    NdError::ShapeMismatch {
        lhs: Shape::from(lhs),
        rhs: Shape::from(rhs),
    }
}

#[inline]
pub(crate) fn axis_out_of_range(axis: usize, ndim: usize) -> NdError {
    NdError::AxisOutOfRange { axis, ndim }
}
