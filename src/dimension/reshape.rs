use crate::dimension::{contiguous_strides, size_of_shape_checked, Shape, Strides};
use crate::error::{shape_mismatch, NdError, NdResult};
use crate::Order;

/// Compute the strides for viewing `shape` with `strides` as `to` without
/// moving any element in memory.
///
/// Elements are read in `order` in both the old and the new shape.
///
/// **Errors** with `ShapeMismatch` if the element counts differ or overflow
/// `isize`, and with `IncompatibleLayout` if the existing layout can not be
/// remapped to `to` without a copy.
pub fn reshape_strides(shape: &[usize], strides: &[isize], to: &[usize], order: Order) -> NdResult<Strides> {
    debug_assert_eq!(shape.len(), strides.len());
    let size = match (size_of_shape_checked(shape), size_of_shape_checked(to)) {
        (Ok(from), Ok(target)) if from == target => from,
        _ => return Err(shape_mismatch(shape, to)),
    };
    if size == 0 {
        return Ok(contiguous_strides(to, order));
    }
    let mut to_strides = Strides::zeros(to.len());
    let incompatible = || NdError::IncompatibleLayout {
        shape: Shape::from(shape),
        strides: Strides::from(strides),
        target: Shape::from(to),
    };
    match order {
        Order::RowMajor => {
            reshape_strides_c(shape, strides, to, &mut to_strides).map_err(|_| incompatible())?;
        }
        Order::ColumnMajor => {
            let rev = |s: &[usize]| s.iter().rev().copied().collect::<Vec<_>>();
            let rev_strides: Vec<isize> = strides.iter().rev().copied().collect();
            let mut out = Strides::zeros(to.len());
            reshape_strides_c(&rev(shape), &rev_strides, &rev(to), &mut out).map_err(|_| incompatible())?;
            for (dst, &src) in to_strides.iter_mut().zip(out.iter().rev()) {
                *dst = src;
            }
        }
    }
    Ok(to_strides)
}

/// Layout-preserving reshape in row major index order.
///
/// Preconditions: both shapes hold the same, non-zero, number of elements.
/// The leftover axes of either side must all have length one. Returns
/// `Err(())` when a group of `from` axes that has to be merged is not
/// contiguous in memory.
fn reshape_strides_c(from_dim: &[usize], from_strides: &[isize], to_dim: &[usize], to_strides: &mut [isize]) -> Result<(), ()> {
    // cursor indexes into the from and to dimensions
    let mut fi = 0;
    let mut ti = 0;

    while fi < from_dim.len() && ti < to_dim.len() {
        let mut fd = from_dim[fi];
        let mut fs = from_strides[fi];
        let mut td = to_dim[ti];

        if fd == td {
            to_strides[ti] = from_strides[fi];
            fi += 1;
            ti += 1;
            continue;
        }

        if fd == 1 {
            fi += 1;
            continue;
        }

        if td == 1 {
            to_strides[ti] = 1;
            ti += 1;
            continue;
        }

        // stride times element count is distributed over a group of axes
        let mut fstride_whole = fs * (fd as isize);
        let mut fd_product = fd;
        let mut td_product = td;

        while fd_product != td_product {
            if fd_product < td_product {
                fi += 1;
                if fi >= from_dim.len() {
                    return Err(());
                }
                fd = from_dim[fi];
                fd_product *= fd;
                if fd > 1 {
                    let fs_old = fs;
                    fs = from_strides[fi];
                    // this axis and the previous one must be contiguous together
                    if fs_old != fd as isize * fs {
                        return Err(());
                    }
                }
            } else {
                fstride_whole /= td as isize;
                to_strides[ti] = fstride_whole;
                ti += 1;
                if ti >= to_dim.len() {
                    return Err(());
                }
                td = to_dim[ti];
                td_product *= td;
            }
        }

        fstride_whole /= td as isize;
        to_strides[ti] = fstride_whole;

        fi += 1;
        ti += 1;
    }

    // skip past 1-dims at the end
    while fi < from_dim.len() && from_dim[fi] == 1 {
        fi += 1;
    }

    while ti < to_dim.len() && to_dim[ti] == 1 {
        to_strides[ti] = 1;
        ti += 1;
    }

    if fi < from_dim.len() || ti < to_dim.len() {
        return Err(());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn merge_and_split_contiguous() {
        assert_eq!(reshape_strides(&[2, 3], &[3, 1], &[6], Order::C).unwrap(), [1]);
        assert_eq!(reshape_strides(&[6], &[1], &[3, 2], Order::C).unwrap(), [2, 1]);
        assert_eq!(reshape_strides(&[2, 3, 4], &[12, 4, 1], &[6, 4], Order::C).unwrap(), [4, 1]);
        assert_eq!(reshape_strides(&[2, 3], &[1, 2], &[6], Order::F).unwrap(), [1]);
        assert_eq!(reshape_strides(&[1, 2, 1, 3], &[7, 3, 9, 1], &[6, 1], Order::C).unwrap(), [1, 1]);
    }

    #[test]
    fn compatible_strided_layouts() {
        // every other column of a (4, 6) array, split along the rows
        assert_eq!(reshape_strides(&[4, 3], &[6, 2], &[2, 2, 3], Order::C).unwrap(), [12, 6, 2]);
        assert_eq!(reshape_strides(&[4, 3], &[6, 2], &[12], Order::C).unwrap(), [2]);
        // reversed axis
        assert_eq!(reshape_strides(&[6], &[-1], &[2, 3], Order::C).unwrap(), [-3, -1]);
    }

    #[test]
    fn incompatible_layouts() {
        let transposed = reshape_strides(&[3, 2], &[1, 3], &[6], Order::C).unwrap_err();
        assert_eq!(transposed.kind(), ErrorKind::IncompatibleLayout);
        // the first three columns of a (4, 6) array
        let err = reshape_strides(&[4, 3], &[6, 1], &[12], Order::C).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleLayout);
        let count = reshape_strides(&[2, 3], &[3, 1], &[5], Order::C).unwrap_err();
        assert_eq!(count.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn overflowing_target_is_a_shape_mismatch() {
        let err = reshape_strides(&[4], &[1], &[usize::MAX, 2], Order::C).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        let err = reshape_strides(&[0], &[1], &[0, usize::MAX, 3], Order::F).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn empty_arrays_reshape_freely() {
        assert_eq!(reshape_strides(&[0, 3], &[3, 1], &[3, 0, 2], Order::C).unwrap(), [2, 2, 1]);
    }
}
