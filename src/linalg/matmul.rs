// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ops::Range;

use num_integer::Integer;
use rawpointer::PointerExt;

use crate::dimension::{broadcast_shapes, size_of_shape_checked};
use crate::error::{shape_mismatch, NdError, NdResult};
use crate::iterators::OffsetIter;
use crate::{Array, Axis, LinalgScalar};

/// Tile sizes of the matrix multiplication kernel.
///
/// The kernel packs a `kc × nc` block of the right hand side and an
/// `mc × kc` block of the left hand side into contiguous buffers before
/// multiplying them. Tile sizes only affect speed: every configuration
/// computes exactly the same values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatmulConfig {
    /// rows of the left hand side per block
    pub mc: usize,
    /// depth (shared axis) per block
    pub kc: usize,
    /// columns of the right hand side per block
    pub nc: usize,
}

impl Default for MatmulConfig {
    fn default() -> Self {
        MatmulConfig { mc: 64, kc: 128, nc: 256 }
    }
}

impl MatmulConfig {
    fn check(&self) -> NdResult<()> {
        if self.mc == 0 || self.kc == 0 || self.nc == 0 {
            Err(NdError::InvalidArgument("matmul tile sizes must be nonzero"))
        } else {
            Ok(())
        }
    }
}

/// A strided matrix operand: pointer to element `[0, 0]` and the row and
/// column strides.
#[derive(Copy, Clone)]
struct MatRef<A> {
    ptr: *const A,
    rs: isize,
    cs: isize,
}

impl<A: Copy> MatRef<A> {
    /// Read element `[i, j]`.
    ///
    /// The caller must ensure the index is inside the operand's shape.
    #[inline(always)]
    unsafe fn at(&self, i: usize, j: usize) -> A {
        *self.ptr.stride_offset(self.rs, i).stride_offset(self.cs, j)
    }
}

/// Copy the block `rows × cols` of `mat` into `buf`, row by row.
unsafe fn pack<A: Copy>(buf: &mut Vec<A>, mat: MatRef<A>, rows: Range<usize>, cols: Range<usize>) {
    buf.clear();
    for i in rows {
        for j in cols.clone() {
            buf.push(mat.at(i, j));
        }
    }
}

/// `c += a · b` for an `m × k` operand `a`, a `k × n` operand `b` and a row
/// major `m × n` slice `c`.
///
/// Each element of `c` receives its products in ascending `p` order, one
/// addition at a time, so the result is bit-identical to the naive triple
/// loop over a zeroed `c`.
fn gemm<A: LinalgScalar>(cfg: &MatmulConfig, m: usize, k: usize, n: usize, a: MatRef<A>, b: MatRef<A>, c: &mut [A]) {
    debug_assert_eq!(c.len(), m * n);
    let mut pa = Vec::with_capacity(cfg.mc.min(m) * cfg.kc.min(k));
    let mut pb = Vec::with_capacity(cfg.kc.min(k) * cfg.nc.min(n));
    for jc in (0..n).step_by(cfg.nc) {
        let nb = cfg.nc.min(n - jc);
        for pc in (0..k).step_by(cfg.kc) {
            let kb = cfg.kc.min(k - pc);
            unsafe { pack(&mut pb, b, pc..pc + kb, jc..jc + nb) };
            for ic in (0..m).step_by(cfg.mc) {
                let mb = cfg.mc.min(m - ic);
                unsafe { pack(&mut pa, a, ic..ic + mb, pc..pc + kb) };
                for i in 0..mb {
                    let crow = &mut c[(ic + i) * n + jc..][..nb];
                    let arow = &pa[i * kb..][..kb];
                    for (p, &aip) in arow.iter().enumerate() {
                        let brow = &pb[p * nb..][..nb];
                        for (cij, &bpj) in crow.iter_mut().zip(brow) {
                            *cij = *cij + aip * bpj;
                        }
                    }
                }
            }
        }
    }
}

/// Matrix product of `a` and `b` with the default tile sizes.
///
/// Both operands need at least two axes. The last two axes are the matrix
/// axes and must agree as `m × k` and `k × n`; any leading axes are batch
/// axes and are broadcast against each other. The result has shape
/// `batch × m × n` and a new container.
///
/// ***Errors*** with `RankMismatch` if an operand has fewer than two axes and
/// `ShapeMismatch` if the matrix or batch axes are incompatible.
///
/// ```
/// use ndengine::{arr2, linalg::matmul};
///
/// let a = arr2(&[[1., 2., 3.],
///                [4., 5., 6.]]);
/// let b = arr2(&[[1., 0.],
///                [0., 1.],
///                [1., 1.]]);
/// assert_eq!(matmul(&a, &b).unwrap(), arr2(&[[4., 5.],
///                                            [10., 11.]]));
/// ```
pub fn matmul<A: LinalgScalar>(a: &Array<A>, b: &Array<A>) -> NdResult<Array<A>> {
    matmul_with(a, b, &MatmulConfig::default())
}

/// Matrix product of `a` and `b` using the tile sizes of `config`.
///
/// ***Errors*** as [`matmul`], and with `InvalidArgument` if a tile size is
/// zero.
pub fn matmul_with<A: LinalgScalar>(a: &Array<A>, b: &Array<A>, config: &MatmulConfig) -> NdResult<Array<A>> {
    config.check()?;
    let (andim, bndim) = (a.ndim(), b.ndim());
    for ndim in [andim, bndim] {
        if ndim < 2 {
            return Err(NdError::RankMismatch { expected: 2, got: ndim });
        }
    }
    let (m, k) = (a.shape[andim - 2], a.shape[andim - 1]);
    let (k2, n) = (b.shape[bndim - 2], b.shape[bndim - 1]);
    if k != k2 {
        return Err(shape_mismatch(a.shape(), b.shape()));
    }
    let batch = broadcast_shapes(&a.shape[..andim - 2], &b.shape[..bndim - 2])
        .map_err(|_| shape_mismatch(a.shape(), b.shape()))?;
    let nb = batch.len();
    let with_matrix = |r: usize, c: usize| {
        let mut sh = batch.to_vec();
        sh.extend([r, c]);
        sh
    };
    let a = a.broadcast_to(with_matrix(m, k))?;
    let b = b.broadcast_to(with_matrix(k, n))?;
    let out_shape = with_matrix(m, n);

    let total = size_of_shape_checked(&out_shape)?;
    let mut c = Vec::new();
    c.try_reserve_exact(total).map_err(|_| NdError::AllocationError {
        count: total,
        element: A::DTYPE,
    })?;
    c.resize(total, A::zero());

    let batches = batch.size();
    log::debug!(
        "matmul {:?} x {:?}: {} batch(es) of {}x{}x{}, {} row/col tiles (mc={}, kc={}, nc={})",
        a.shape(),
        b.shape(),
        batches,
        m,
        k,
        n,
        Integer::div_ceil(&m, &config.mc) * Integer::div_ceil(&n, &config.nc),
        config.mc,
        config.kc,
        config.nc
    );

    if total > 0 {
        let a_bases = OffsetIter::new(&batch, &a.strides[..nb], a.offset);
        let b_bases = OffsetIter::new(&batch, &b.strides[..nb], b.offset);
        let ap = a.container.as_ptr() as *const A;
        let bp = b.container.as_ptr() as *const A;
        for ((ao, bo), cblock) in a_bases.zip(b_bases).zip(c.chunks_mut(m * n)) {
            let am = MatRef {
                ptr: ap.wrapping_offset(ao),
                rs: a.strides[nb],
                cs: a.strides[nb + 1],
            };
            let bm = MatRef {
                ptr: bp.wrapping_offset(bo),
                rs: b.strides[nb],
                cs: b.strides[nb + 1],
            };
            gemm(config, m, k, n, am, bm, cblock);
        }
    }
    Ok(Array::from_vec_shape(c, out_shape.into()))
}

/// Matrix product of `a` and `b` written into `out`.
///
/// The product is computed into a new buffer first, so `out` may share a
/// container with either operand.
///
/// ***Errors*** as [`matmul`], and with `ShapeMismatch` if `out` does not
/// have the shape of the product.
pub fn matmul_into<A: LinalgScalar>(a: &Array<A>, b: &Array<A>, out: &mut Array<A>) -> NdResult<()> {
    let product = matmul(a, b)?;
    if out.shape() != product.shape() {
        return Err(shape_mismatch(out.shape(), product.shape()));
    }
    out.assign(&product)
}

/// Inner product of two one-dimensional arrays, summed from zero in
/// ascending index order.
///
/// ***Errors*** with `RankMismatch` unless both operands are one-dimensional
/// and `ShapeMismatch` if their lengths differ.
pub fn dot<A: LinalgScalar>(a: &Array<A>, b: &Array<A>) -> NdResult<A> {
    for x in [a, b] {
        if x.ndim() != 1 {
            return Err(NdError::RankMismatch {
                expected: 1,
                got: x.ndim(),
            });
        }
    }
    if a.len() != b.len() {
        return Err(shape_mismatch(a.shape(), b.shape()));
    }
    Ok(a.iter().zip(b.iter()).fold(A::zero(), |acc, (x, y)| acc + x * y))
}

/// Product of the (batched) matrix `a` with the vector `x`.
///
/// `a` has shape `batch × m × k` and `x` has length `k`; the result has shape
/// `batch × m`.
///
/// ***Errors*** with `RankMismatch` if `a` has fewer than two axes or `x` is
/// not one-dimensional, `ShapeMismatch` if `k` differs.
pub fn matvec<A: LinalgScalar>(a: &Array<A>, x: &Array<A>) -> NdResult<Array<A>> {
    if x.ndim() != 1 {
        return Err(NdError::RankMismatch {
            expected: 1,
            got: x.ndim(),
        });
    }
    let column = x.insert_axis(Axis(1))?;
    let product = matmul(a, &column)?;
    let last = product.ndim() - 1;
    product.index_axis(Axis(last), 0)
}

/// Tensor product contracting the last axis of `a` with the first axis of
/// `b`.
///
/// The result has shape `a.shape[..-1] ++ b.shape[1..]`.
///
/// ***Errors*** with `RankMismatch` if an operand has no axes and
/// `ShapeMismatch` if the contracted lengths differ.
///
/// ```
/// use ndengine::{linalg::mm, Array};
///
/// let a = Array::<f64>::ones((2, 3, 4));
/// let b = Array::<f64>::ones((4, 5));
/// let c = mm(&a, &b).unwrap();
/// assert_eq!(c.shape(), &[2, 3, 5]);
/// assert_eq!(c.get([1, 2, 4]).unwrap(), 4.);
/// ```
pub fn mm<A: LinalgScalar>(a: &Array<A>, b: &Array<A>) -> NdResult<Array<A>> {
    for x in [a, b] {
        if x.ndim() == 0 {
            return Err(NdError::RankMismatch { expected: 1, got: 0 });
        }
    }
    let k = a.shape[a.ndim() - 1];
    if k != b.shape[0] {
        return Err(shape_mismatch(a.shape(), b.shape()));
    }
    let lead = &a.shape[..a.ndim() - 1];
    let trail = &b.shape[1..];
    let m = lead.iter().product::<usize>();
    let n = trail.iter().product::<usize>();
    let product = matmul(&a.copy_reshape((m, k))?, &b.copy_reshape((k, n))?)?;
    let mut shape = lead.to_vec();
    shape.extend_from_slice(trail);
    product.reshape(shape)
}
