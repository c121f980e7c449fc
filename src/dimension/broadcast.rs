use crate::dimension::{Shape, Strides};
use crate::error::{shape_mismatch, NdResult};

/// Calculate the common shape for a pair of array shapes, that they can be
/// broadcast to. Return an error if the shapes are not compatible.
///
/// The shapes are aligned at their last axis and the shorter one is padded
/// with ones on the left. Each pair of lengths must be equal or contain a
/// one; the result takes the larger length. The rule is symmetric.
///
/// ```
/// use ndengine::broadcast_shapes;
///
/// assert_eq!(broadcast_shapes(&[4, 1, 3], &[5, 1]).unwrap(), [4, 5, 3]);
/// assert!(broadcast_shapes(&[3, 4], &[2, 4]).is_err());
/// ```
pub fn broadcast_shapes(shape1: &[usize], shape2: &[usize]) -> NdResult<Shape> {
    let (long, short) = if shape1.len() >= shape2.len() {
        (shape1, shape2)
    } else {
        (shape2, shape1)
    };
    let k = long.len() - short.len();
    let mut out = Shape::from_slice(long);
    for (out, &s2) in out[k..].iter_mut().zip(short) {
        if *out != s2 {
            if *out == 1 {
                *out = s2
            } else if s2 != 1 {
                return Err(shape_mismatch(shape1, shape2));
            }
        }
    }
    Ok(out)
}

/// Reduce a list of shapes to their common broadcast shape.
///
/// The empty list broadcasts to the rank-0 shape. The error names the first
/// pair that failed.
pub fn broadcast_all<'a, I>(shapes: I) -> NdResult<Shape>
where
    I: IntoIterator<Item = &'a [usize]>,
{
    shapes
        .into_iter()
        .try_fold(Shape::default(), |acc, s| broadcast_shapes(&acc, s))
}

/// Compute the strides that view an array of `from_shape` and `from_strides`
/// as `to_shape`.
///
/// Stretched axes and new leading axes get stride zero. Errors if `from_shape`
/// does not broadcast to exactly `to_shape`.
pub fn broadcast_strides(from_shape: &[usize], from_strides: &[isize], to_shape: &[usize]) -> NdResult<Strides> {
    if from_shape.len() > to_shape.len() {
        return Err(shape_mismatch(from_shape, to_shape));
    }
    let k = to_shape.len() - from_shape.len();
    let mut strides = Strides::zeros(to_shape.len());
    for (ax, (&from, &stride)) in from_shape.iter().zip(from_strides).enumerate() {
        let to = to_shape[k + ax];
        if from == to {
            strides[k + ax] = stride;
        } else if from == 1 {
            strides[k + ax] = 0;
        } else {
            return Err(shape_mismatch(from_shape, to_shape));
        }
    }
    Ok(strides)
}
