use crate::dimension::{Shape, Strides};
use crate::error::{NdError, NdResult};

/// Check that `axes` is a bijection on `0..ndim`.
pub fn validate_permutation(axes: &[usize], ndim: usize) -> NdResult<()> {
    let invalid = || NdError::InvalidPermutation {
        axes: axes.to_vec(),
        ndim,
    };
    if axes.len() != ndim {
        return Err(invalid());
    }
    let mut seen = vec![false; ndim];
    for &axis in axes {
        match seen.get_mut(axis) {
            Some(s) if !*s => *s = true,
            _ => return Err(invalid()),
        }
    }
    Ok(())
}

/// Reorder `shape` and `strides` so that new axis `i` is old axis `axes[i]`.
pub fn permute(shape: &[usize], strides: &[isize], axes: &[usize]) -> NdResult<(Shape, Strides)> {
    validate_permutation(axes, shape.len())?;
    let new_shape = axes.iter().map(|&a| shape[a]).collect::<Vec<_>>();
    let new_strides = axes.iter().map(|&a| strides[a]).collect::<Vec<_>>();
    Ok((Shape::from(new_shape), Strides::from(new_strides)))
}

/// Return the permutation that undoes `axes`.
pub fn inverse_permutation(axes: &[usize]) -> NdResult<Vec<usize>> {
    validate_permutation(axes, axes.len())?;
    let mut inverse = vec![0; axes.len()];
    for (i, &a) in axes.iter().enumerate() {
        inverse[a] = i;
    }
    Ok(inverse)
}
