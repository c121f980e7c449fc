//! Matrix decompositions over the floating point element types.
//!
//! The factorizations copy their input into a row major buffer and work on
//! that, so any strided or broadcast view is accepted.

use crate::error::{shape_mismatch, NdError, NdResult};
use crate::{Array, Axis, NdFloat};

/// Sweep budget of the Jacobi eigenvalue iteration.
pub const JACOBI_MAX_SWEEPS: usize = 100;

/// Row major square matrix scratch space.
#[derive(Clone, Debug)]
struct Square<A> {
    n: usize,
    data: Vec<A>,
}

impl<A: NdFloat> Square<A> {
    fn identity(n: usize) -> Self {
        let mut data = vec![A::zero(); n * n];
        for i in 0..n {
            data[i * n + i] = A::one();
        }
        Square { n, data }
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> A {
        self.data[i * self.n + j]
    }

    #[inline(always)]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut A {
        &mut self.data[i * self.n + j]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        for j in 0..self.n {
            self.data.swap(a * self.n + j, b * self.n + j);
        }
    }
}

/// Return `n` if `a` is an `n × n` matrix.
fn square_size<A: NdFloat>(a: &Array<A>) -> NdResult<usize> {
    if a.ndim() != 2 {
        return Err(NdError::RankMismatch {
            expected: 2,
            got: a.ndim(),
        });
    }
    let (m, n) = (a.shape()[0], a.shape()[1]);
    if m != n {
        return Err(shape_mismatch(a.shape(), &[n, n]));
    }
    Ok(n)
}

/// LU factorization with partial pivoting: `P · A = L · U`.
///
/// `L` is unit lower triangular and `U` upper triangular; both are stored
/// packed in one matrix. A factorization of a singular matrix is still
/// returned: [`det`](Lu::det) is zero, while [`solve`](Lu::solve) and
/// [`inv`](Lu::inv) fail with `SingularMatrix`.
#[derive(Clone, Debug)]
pub struct Lu<A: NdFloat> {
    lu: Square<A>,
    perm: Vec<usize>,
    sign: A,
    singular: Option<usize>,
}

impl<A: NdFloat> Lu<A> {
    fn factor(mut lu: Square<A>) -> Self {
        let n = lu.n;
        let mut perm: Vec<usize> = (0..n).collect();
        let mut sign = A::one();
        let mut singular = None;
        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&r, &s| {
                    lu.at(r, col)
                        .abs()
                        .partial_cmp(&lu.at(s, col).abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(col);
            if lu.at(pivot, col) == A::zero() {
                singular.get_or_insert(col);
                continue;
            }
            if pivot != col {
                lu.swap_rows(pivot, col);
                perm.swap(pivot, col);
                sign = -sign;
            }
            let d = lu.at(col, col);
            for r in col + 1..n {
                let f = lu.at(r, col) / d;
                *lu.at_mut(r, col) = f;
                for c in col + 1..n {
                    let u = lu.at(col, c);
                    *lu.at_mut(r, c) -= f * u;
                }
            }
        }
        Lu { lu, perm, sign, singular }
    }

    /// Size of the factored matrix.
    pub fn size(&self) -> usize {
        self.lu.n
    }

    /// Return `true` if a zero pivot was met.
    pub fn is_singular(&self) -> bool {
        self.singular.is_some()
    }

    /// Row permutation: row `i` of `P · A` is row `perm()[i]` of `A`.
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// The unit lower triangular factor.
    pub fn l(&self) -> Array<A> {
        let n = self.lu.n;
        Array::from_shape_fn((n, n), |ix| match ix[0].cmp(&ix[1]) {
            std::cmp::Ordering::Greater => self.lu.at(ix[0], ix[1]),
            std::cmp::Ordering::Equal => A::one(),
            std::cmp::Ordering::Less => A::zero(),
        })
    }

    /// The upper triangular factor.
    pub fn u(&self) -> Array<A> {
        let n = self.lu.n;
        Array::from_shape_fn((n, n), |ix| if ix[0] <= ix[1] { self.lu.at(ix[0], ix[1]) } else { A::zero() })
    }

    /// The permutation matrix `P`.
    pub fn p(&self) -> Array<A> {
        let n = self.lu.n;
        Array::from_shape_fn((n, n), |ix| if self.perm[ix[0]] == ix[1] { A::one() } else { A::zero() })
    }

    /// Determinant of the factored matrix.
    pub fn det(&self) -> A {
        if self.singular.is_some() {
            return A::zero();
        }
        (0..self.lu.n).fold(self.sign, |d, i| d * self.lu.at(i, i))
    }

    fn check_regular(&self) -> NdResult<()> {
        match self.singular {
            Some(pivot) => {
                log::debug!("lu: zero pivot in column {} of a {}x{} matrix", pivot, self.lu.n, self.lu.n);
                Err(NdError::SingularMatrix { pivot })
            }
            None => Ok(()),
        }
    }

    /// Solve in place for one right hand side given as a contiguous column.
    fn solve_column(&self, b: &[A], x: &mut [A]) {
        let n = self.lu.n;
        for i in 0..n {
            let mut s = b[self.perm[i]];
            for j in 0..i {
                s -= self.lu.at(i, j) * x[j];
            }
            x[i] = s;
        }
        for i in (0..n).rev() {
            let mut s = x[i];
            for j in i + 1..n {
                s -= self.lu.at(i, j) * x[j];
            }
            x[i] = s / self.lu.at(i, i);
        }
    }

    /// Solve `A · x = b` for a vector `b` of length `n` or a matrix `b` of
    /// shape `n × r`.
    ///
    /// ***Errors*** with `SingularMatrix` if `A` is singular, `ShapeMismatch`
    /// if `b` has the wrong length and `RankMismatch` if it is neither a
    /// vector nor a matrix.
    pub fn solve(&self, b: &Array<A>) -> NdResult<Array<A>> {
        self.check_regular()?;
        let n = self.lu.n;
        if b.ndim() == 0 || b.ndim() > 2 {
            return Err(NdError::RankMismatch {
                expected: 2,
                got: b.ndim(),
            });
        }
        if b.shape()[0] != n {
            return Err(shape_mismatch(&[n, n], b.shape()));
        }
        let r = if b.ndim() == 2 { b.shape()[1] } else { 1 };
        let cols = b.to_vec();
        let mut out = vec![A::zero(); n * r];
        let mut col = vec![A::zero(); n];
        let mut x = vec![A::zero(); n];
        for c in 0..r {
            for i in 0..n {
                col[i] = cols[i * r + c];
            }
            self.solve_column(&col, &mut x);
            for i in 0..n {
                out[i * r + c] = x[i];
            }
        }
        Array::from_shape_vec(b.shape(), out)
    }

    /// Inverse of the factored matrix.
    ///
    /// ***Errors*** with `SingularMatrix` if it is singular.
    pub fn inv(&self) -> NdResult<Array<A>> {
        self.check_regular()?;
        let n = self.lu.n;
        let mut out = vec![A::zero(); n * n];
        let mut e = vec![A::zero(); n];
        let mut x = vec![A::zero(); n];
        for c in 0..n {
            e.iter_mut().for_each(|v| *v = A::zero());
            e[c] = A::one();
            self.solve_column(&e, &mut x);
            for i in 0..n {
                out[i * n + c] = x[i];
            }
        }
        Array::from_shape_vec((n, n), out)
    }
}

/// LU factorization of the square matrix `a`.
///
/// ***Errors*** with `RankMismatch` unless `a` is two-dimensional and
/// `ShapeMismatch` unless it is square.
///
/// ```
/// use ndengine::{arr2, linalg};
///
/// let a = arr2(&[[0., 2.],
///                [3., 4.]]);
/// let f = linalg::lu(&a).unwrap();
/// assert_eq!(f.det(), -6.);
/// let pa = linalg::matmul(&f.p(), &a).unwrap();
/// assert_eq!(pa, linalg::matmul(&f.l(), &f.u()).unwrap());
/// ```
pub fn lu<A: NdFloat>(a: &Array<A>) -> NdResult<Lu<A>> {
    let n = square_size(a)?;
    Ok(Lu::factor(Square { n, data: a.to_vec() }))
}

/// Apply `f` to every `n × n` matrix of the stack `a` (shape `batch × n × n`)
/// and collect the outputs, each `per` elements long, in row major order.
fn for_each_matrix<A, F>(a: &Array<A>, per: usize, mut f: F) -> NdResult<(Vec<usize>, Vec<A>)>
where
    A: NdFloat,
    F: FnMut(Square<A>, &mut Vec<A>) -> NdResult<()>,
{
    let nd = a.ndim();
    if nd < 2 {
        return Err(NdError::RankMismatch { expected: 2, got: nd });
    }
    let n = a.shape()[nd - 1];
    if a.shape()[nd - 2] != n {
        return Err(shape_mismatch(a.shape(), &[n, n]));
    }
    let batch = a.shape()[..nd - 2].to_vec();
    let data = a.to_vec();
    let count = batch.iter().product::<usize>();
    let mut out = Vec::with_capacity(count * per);
    if n == 0 {
        for _ in 0..count {
            f(Square { n, data: Vec::new() }, &mut out)?;
        }
    } else {
        for chunk in data.chunks(n * n) {
            f(Square { n, data: chunk.to_vec() }, &mut out)?;
        }
    }
    Ok((batch, out))
}

/// Determinant of each matrix in `a` (shape `batch × n × n`); the result has
/// shape `batch`.
///
/// ***Errors*** with `RankMismatch` if `a` has fewer than two axes and
/// `ShapeMismatch` if the matrices are not square.
pub fn det<A: NdFloat>(a: &Array<A>) -> NdResult<Array<A>> {
    let (batch, out) = for_each_matrix(a, 1, |m, out| {
        out.push(Lu::factor(m).det());
        Ok(())
    })?;
    Array::from_shape_vec(batch, out)
}

/// Inverse of each matrix in `a` (shape `batch × n × n`).
///
/// ***Errors*** as [`det`], and with `SingularMatrix` if a matrix is
/// singular.
///
/// ```
/// use ndengine::{arr2, linalg};
///
/// let a = arr2(&[[4., 7.],
///                [2., 6.]]);
/// let ainv = linalg::inv(&a).unwrap();
/// let i = linalg::matmul(&a, &ainv).unwrap();
/// assert!(i.allclose(&ndengine::Array::eye(2), 1e-12, 1e-12).unwrap());
/// ```
pub fn inv<A: NdFloat>(a: &Array<A>) -> NdResult<Array<A>> {
    let n = a.shape().last().copied().unwrap_or(0);
    let (_, out) = for_each_matrix(a, n * n, |m, out| {
        let f = Lu::factor(m);
        out.extend(f.inv()?.iter());
        Ok(())
    })?;
    Array::from_shape_vec(a.shape(), out)
}

/// Solve `A · x = b` for each matrix `A` in `a` (shape `batch × n × n`).
///
/// `b` has shape `batch × n` (one vector per matrix) or `batch × n × r`.
/// Batch axes of `a` and `b` broadcast against each other.
///
/// ***Errors*** with `SingularMatrix` if a matrix is singular,
/// `ShapeMismatch` if the shapes do not fit and `RankMismatch` if an operand
/// has too few axes.
///
/// ```
/// use ndengine::{arr1, arr2, linalg};
///
/// let a = arr2(&[[3., 1.],
///                [1., 2.]]);
/// let x = linalg::solve(&a, &arr1(&[9., 8.])).unwrap();
/// assert!(x.allclose(&arr1(&[2., 3.]), 1e-12, 1e-12).unwrap());
/// ```
pub fn solve<A: NdFloat>(a: &Array<A>, b: &Array<A>) -> NdResult<Array<A>> {
    let nd = a.ndim();
    if nd < 2 {
        return Err(NdError::RankMismatch { expected: 2, got: nd });
    }
    // a vector right hand side has one axis less than `a`
    let vector = b.ndim() + 1 == nd;
    let b = if vector { b.insert_axis(Axis(b.ndim()))? } else { b.clone() };
    let bd = b.ndim();
    if bd < 2 {
        return Err(NdError::RankMismatch { expected: 2, got: bd });
    }
    let n = a.shape()[nd - 1];
    let r = b.shape()[bd - 1];
    if b.shape()[bd - 2] != n {
        return Err(shape_mismatch(a.shape(), b.shape()));
    }
    let batch = crate::broadcast_shapes(&a.shape()[..nd - 2], &b.shape()[..bd - 2])
        .map_err(|_| shape_mismatch(a.shape(), b.shape()))?;
    let with = |tail: [usize; 2]| {
        let mut sh = batch.to_vec();
        sh.extend(tail);
        sh
    };
    let a = a.broadcast_to(with([n, n]))?;
    let b = b.broadcast_to(with([n, r]))?;
    let x = if n * r == 0 {
        Array::try_zeros(with([n, r]))?
    } else {
        let rhs = b.to_vec();
        let mut rhs_chunks = rhs.chunks(n * r);
        let (_, out) = for_each_matrix(&a, n * r, |m, out| {
            let f = Lu::factor(m);
            let chunk = rhs_chunks.next().unwrap_or(&[]);
            let x = f.solve(&Array::from_shape_vec((n, r), chunk.to_vec())?)?;
            out.extend(x.iter());
            Ok(())
        })?;
        Array::from_shape_vec(with([n, r]), out)?
    };
    if vector {
        let last = x.ndim() - 1;
        x.index_axis(Axis(last), 0)
    } else {
        Ok(x)
    }
}

/// Reduced QR factorization `A = Q · R` of an `m × n` matrix, with
/// `k = min(m, n)`: `Q` is `m × k` with orthonormal columns and `R` is
/// `k × n` upper triangular.
#[derive(Clone, Debug)]
pub struct Qr<A: NdFloat> {
    pub q: Array<A>,
    pub r: Array<A>,
}

/// QR factorization by Householder reflections.
///
/// ***Errors*** with `RankMismatch` unless `a` is two-dimensional.
///
/// ```
/// use ndengine::{arr2, linalg};
///
/// let a = arr2(&[[12., -51.,   4.],
///                [ 6., 167., -68.],
///                [-4.,  24., -41.]]);
/// let f = linalg::qr(&a).unwrap();
/// let back = linalg::matmul(&f.q, &f.r).unwrap();
/// assert!(back.allclose(&a, 1e-12, 1e-10).unwrap());
/// ```
pub fn qr<A: NdFloat>(a: &Array<A>) -> NdResult<Qr<A>> {
    if a.ndim() != 2 {
        return Err(NdError::RankMismatch {
            expected: 2,
            got: a.ndim(),
        });
    }
    let (m, n) = (a.shape()[0], a.shape()[1]);
    let k = m.min(n);
    let mut r = a.to_vec();
    let mut q = Square::identity(m);
    let two = A::one() + A::one();
    let mut v = vec![A::zero(); m];
    for j in 0..k {
        let norm = (j..m).fold(A::zero(), |s, i| s + r[i * n + j] * r[i * n + j]).sqrt();
        if norm == A::zero() {
            continue;
        }
        let x0 = r[j * n + j];
        let alpha = if x0 < A::zero() { norm } else { -norm };
        for i in j..m {
            v[i] = r[i * n + j];
        }
        v[j] = v[j] - alpha;
        let vnorm = (j..m).fold(A::zero(), |s, i| s + v[i] * v[i]).sqrt();
        if vnorm == A::zero() {
            continue;
        }
        for i in j..m {
            v[i] /= vnorm;
        }
        // R <- (I - 2vvᵀ) R
        for c in 0..n {
            let s = (j..m).fold(A::zero(), |s, i| s + v[i] * r[i * n + c]);
            for i in j..m {
                r[i * n + c] -= two * v[i] * s;
            }
        }
        // Q <- Q (I - 2vvᵀ)
        for row in 0..m {
            let s = (j..m).fold(A::zero(), |s, i| s + q.at(row, i) * v[i]);
            for i in j..m {
                *q.at_mut(row, i) -= two * s * v[i];
            }
        }
        for i in j + 1..m {
            r[i * n + j] = A::zero();
        }
    }
    let q = Array::from_shape_fn((m, k), |ix| q.at(ix[0], ix[1]));
    let r = Array::from_shape_fn((k, n), |ix| r[ix[0] * n + ix[1]]);
    Ok(Qr { q, r })
}

/// Eigenvalues and eigenvectors of the symmetric matrix `a`, by the cyclic
/// Jacobi method.
///
/// Returns `(w, v)`: the eigenvalues `w` in ascending order and the matrix
/// `v` whose column `i` is the unit eigenvector of `w[i]`. Only symmetric
/// input is supported; the result for other matrices is unspecified.
///
/// ***Errors*** with `RankMismatch` or `ShapeMismatch` unless `a` is square
/// and `ConvergenceFailure` if the off-diagonal part has not vanished after
/// [`JACOBI_MAX_SWEEPS`] sweeps.
///
/// ```
/// use ndengine::{arr1, arr2, linalg};
///
/// let a = arr2(&[[2., 1.],
///                [1., 2.]]);
/// let (w, v) = linalg::eigh(&a).unwrap();
/// assert!(w.allclose(&arr1(&[1., 3.]), 1e-12, 1e-12).unwrap());
/// let av = linalg::matmul(&a, &v).unwrap();
/// assert!(av.allclose(&(&v * &w), 1e-12, 1e-12).unwrap());
/// ```
pub fn eigh<A: NdFloat>(a: &Array<A>) -> NdResult<(Array<A>, Array<A>)> {
    let n = square_size(a)?;
    let mut m = Square { n, data: a.to_vec() };
    let mut v = Square::identity(n);
    let norm = m.data.iter().fold(A::zero(), |s, &x| s + x * x).sqrt();
    let eps = A::epsilon();
    let hundred = A::from_f64(100.).unwrap_or_else(A::one);

    let off_norm = |m: &Square<A>| {
        let mut s = A::zero();
        for p in 0..n {
            for q in 0..n {
                if p != q {
                    s += m.at(p, q) * m.at(p, q);
                }
            }
        }
        s.sqrt()
    };

    let mut sweep = 0;
    loop {
        if off_norm(&m) <= eps * norm {
            break;
        }
        if sweep == JACOBI_MAX_SWEEPS {
            log::debug!("eigh: no convergence after {} sweeps on a {}x{} matrix", sweep, n, n);
            return Err(NdError::ConvergenceFailure { iterations: sweep });
        }
        for p in 0..n {
            for q in p + 1..n {
                let apq = m.at(p, q);
                if apq == A::zero() {
                    continue;
                }
                let (app, aqq) = (m.at(p, p), m.at(q, q));
                // negligible next to both diagonal entries
                if sweep > 3 && app.abs() + hundred * apq.abs() == app.abs() && aqq.abs() + hundred * apq.abs() == aqq.abs() {
                    *m.at_mut(p, q) = A::zero();
                    *m.at_mut(q, p) = A::zero();
                    continue;
                }
                let theta = (aqq - app) / (apq + apq);
                let t = if theta >= A::zero() {
                    A::one() / (theta + (theta * theta + A::one()).sqrt())
                } else {
                    -A::one() / (-theta + (theta * theta + A::one()).sqrt())
                };
                let c = A::one() / (t * t + A::one()).sqrt();
                let s = t * c;
                for k in 0..n {
                    let (akp, akq) = (m.at(k, p), m.at(k, q));
                    *m.at_mut(k, p) = c * akp - s * akq;
                    *m.at_mut(k, q) = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (m.at(p, k), m.at(q, k));
                    *m.at_mut(p, k) = c * apk - s * aqk;
                    *m.at_mut(q, k) = s * apk + c * aqk;
                }
                *m.at_mut(p, q) = A::zero();
                *m.at_mut(q, p) = A::zero();
                for k in 0..n {
                    let (vkp, vkq) = (v.at(k, p), v.at(k, q));
                    *v.at_mut(k, p) = c * vkp - s * vkq;
                    *v.at_mut(k, q) = s * vkp + c * vkq;
                }
            }
        }
        sweep += 1;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| m.at(i, i).partial_cmp(&m.at(j, j)).unwrap_or(std::cmp::Ordering::Equal));
    let w = Array::from_shape_fn(n, |ix| m.at(order[ix[0]], order[ix[0]]));
    let vecs = Array::from_shape_fn((n, n), |ix| v.at(ix[0], order[ix[1]]));
    Ok((w, vecs))
}
