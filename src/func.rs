//! Elementwise application of closures over arrays, with broadcasting.
//!
//! The out-of-place functions ([`map`], [`apply2`], [`apply3`], [`apply`])
//! reconcile their inputs to one broadcast shape, call the closure once per
//! position in row major order and collect the results into an array over a
//! new container.
//!
//! The `*_into` variants write into an existing array instead. Its shape
//! must equal the broadcast shape exactly. An input whose memory overlaps the
//! output under a different layout is copied first, so the result is the same
//! as the out-of-place one.
//!
//! ```
//! use ndengine::{func, Array};
//!
//! let a = Array::from_shape_vec((2, 2), vec![1., 2., 3., 4.]).unwrap();
//! let b = Array::from_vec(vec![10., 100.]);
//! let c = func::apply2(&a, &b, |x, y| x * y).unwrap();
//! assert_eq!(c.to_vec(), vec![10., 200., 30., 400.]);
//! ```
use std::borrow::Cow;
use std::mem::size_of;

use crate::container::Container;
use crate::dimension::{broadcast_strides, contiguous_strides, Shape};
use crate::error::{shape_mismatch, NdError, NdResult};
use crate::iterators::NdIter;
use crate::layout::{Layout, Strided};
use crate::{Array, Axis, Element, Order};

/// Return a new array of the same shape with `f` applied to each element.
pub fn map<A, U, F>(a: &Array<A>, f: F) -> Array<U>
where
    A: Element,
    U: Element,
    F: FnMut(A) -> U,
{
    let v = a.iter().map(f).collect();
    Array::from_vec_shape(v, a.shape.clone())
}

/// Return `f(a, b)` over the broadcast shape of `a` and `b`.
///
/// **Errors** with `ShapeMismatch` if the shapes can't be broadcast together.
pub fn apply2<A, B, U, F>(a: &Array<A>, b: &Array<B>, mut f: F) -> NdResult<Array<U>>
where
    A: Element,
    B: Element,
    U: Element,
    F: FnMut(A, B) -> U,
{
    let iter = NdIter::new(&[a, b])?;
    let shape = Shape::from_slice(iter.shape());
    let mut out = Vec::with_capacity(iter.len());
    let (ca, cb) = (&a.container, &b.container);
    iter.for_each(|offs| unsafe { out.push(f(ca.read(offs[0]), cb.read(offs[1]))) });
    Ok(Array::from_vec_shape(out, shape))
}

/// Return `f(a, b, c)` over the broadcast shape of the three inputs.
///
/// **Errors** with `ShapeMismatch` if the shapes can't be broadcast together.
pub fn apply3<A, B, C, U, F>(a: &Array<A>, b: &Array<B>, c: &Array<C>, mut f: F) -> NdResult<Array<U>>
where
    A: Element,
    B: Element,
    C: Element,
    U: Element,
    F: FnMut(A, B, C) -> U,
{
    let iter = NdIter::new(&[a, b, c])?;
    let shape = Shape::from_slice(iter.shape());
    let mut out = Vec::with_capacity(iter.len());
    let (ca, cb, cc) = (&a.container, &b.container, &c.container);
    iter.for_each(|offs| unsafe { out.push(f(ca.read(offs[0]), cb.read(offs[1]), cc.read(offs[2]))) });
    Ok(Array::from_vec_shape(out, shape))
}

/// Return `f(&[x0, x1, ...])` over the broadcast shape of any number of
/// inputs of one element type. The slice passed to `f` holds one element per
/// input, in input order.
///
/// **Errors** with `ShapeMismatch` if the shapes can't be broadcast together
/// and `InvalidArgument` if `arrays` is empty.
///
/// ```
/// use ndengine::{func, Array};
///
/// let a = Array::from_vec(vec![1, 2, 3]);
/// let b = Array::from_vec(vec![4, 5, 6]);
/// let c = Array::from_scalar(100);
/// let s = func::apply(&[&a, &b, &c], |xs| xs.iter().sum::<i32>()).unwrap();
/// assert_eq!(s.to_vec(), vec![105, 107, 109]);
/// ```
pub fn apply<A, U, F>(arrays: &[&Array<A>], mut f: F) -> NdResult<Array<U>>
where
    A: Element,
    U: Element,
    F: FnMut(&[A]) -> U,
{
    let operands: Vec<&dyn Strided> = arrays.iter().map(|a| *a as &dyn Strided).collect();
    let iter = NdIter::new(&operands)?;
    let shape = Shape::from_slice(iter.shape());
    let mut out = Vec::with_capacity(iter.len());
    let mut args = Vec::with_capacity(arrays.len());
    iter.for_each(|offs| {
        args.clear();
        args.extend(arrays.iter().zip(offs).map(|(a, &off)| unsafe { a.container.read(off) }));
        out.push(f(&args));
    });
    Ok(Array::from_vec_shape(out, shape))
}

/// Write `f(x)` for each element `x` of `a` into `out`.
///
/// **Errors** with `ShapeMismatch` unless `a` broadcasts to exactly the shape
/// of `out`.
pub fn map_into<A, U, F>(a: &Array<A>, out: &mut Array<U>, mut f: F) -> NdResult<()>
where
    A: Element,
    U: Element,
    F: FnMut(A) -> U,
{
    let a = detach(a, out);
    let iter = NdIter::with_shape(&[&*a, &*out], &out.shape)?;
    let (ca, co) = (&a.container, &out.container);
    iter.for_each(|offs| unsafe { co.write(offs[1], f(ca.read(offs[0]))) });
    Ok(())
}

/// Write `f(a, b)` into `out`, whose shape must be the broadcast shape of
/// `a` and `b`.
///
/// **Errors** with `ShapeMismatch` if the inputs don't broadcast to exactly
/// the shape of `out`.
///
/// ```
/// use ndengine::{func, Array};
///
/// let a = Array::from_vec(vec![1, 2, 3]);
/// let mut out = Array::zeros((2, 3));
/// func::apply2_into(&a, &Array::from_shape_vec((2, 1), vec![0, 10]).unwrap(), &mut out, |x, y| x + y).unwrap();
/// assert_eq!(out.to_vec(), vec![1, 2, 3, 11, 12, 13]);
/// ```
pub fn apply2_into<A, B, U, F>(a: &Array<A>, b: &Array<B>, out: &mut Array<U>, mut f: F) -> NdResult<()>
where
    A: Element,
    B: Element,
    U: Element,
    F: FnMut(A, B) -> U,
{
    check_output(&[&a.shape[..], &b.shape[..]], &out.shape)?;
    let a = detach(a, out);
    let b = detach(b, out);
    let iter = NdIter::with_shape(&[&*a, &*b, &*out], &out.shape)?;
    let (ca, cb, co) = (&a.container, &b.container, &out.container);
    iter.for_each(|offs| unsafe { co.write(offs[2], f(ca.read(offs[0]), cb.read(offs[1]))) });
    Ok(())
}

/// Write `f(&[x0, x1, ...])` into `out`, whose shape must be the broadcast
/// shape of `arrays`.
///
/// **Errors** with `ShapeMismatch` if the inputs don't broadcast to exactly
/// the shape of `out` and `InvalidArgument` if `arrays` is empty.
pub fn apply_into<A, U, F>(arrays: &[&Array<A>], out: &mut Array<U>, mut f: F) -> NdResult<()>
where
    A: Element,
    U: Element,
    F: FnMut(&[A]) -> U,
{
    if arrays.is_empty() {
        return Err(NdError::InvalidArgument("apply_into needs at least one input"));
    }
    let shapes: Vec<&[usize]> = arrays.iter().map(|a| &a.shape[..]).collect();
    check_output(&shapes, &out.shape)?;
    let inputs: Vec<Cow<'_, Array<A>>> = arrays.iter().map(|a| detach(a, out)).collect();
    let mut operands: Vec<&dyn Strided> = inputs.iter().map(|a| &**a as &dyn Strided).collect();
    operands.push(&*out);
    let iter = NdIter::with_shape(&operands, &out.shape)?;
    let n = inputs.len();
    let co = &out.container;
    let mut args = Vec::with_capacity(n);
    iter.for_each(|offs| {
        args.clear();
        args.extend(inputs.iter().zip(offs).map(|(a, &off)| unsafe { a.container.read(off) }));
        unsafe { co.write(offs[n], f(&args)) };
    });
    Ok(())
}

/// Update each element of `target` with `f(&mut elt, r)`, where `r` is the
/// element of `rhs` broadcast to the shape of `target`.
///
/// **Errors** with `ShapeMismatch` if `rhs` does not broadcast to the shape
/// of `target`.
pub fn zip_mut_with<A, B, F>(target: &mut Array<A>, rhs: &Array<B>, mut f: F) -> NdResult<()>
where
    A: Element,
    B: Element,
    F: FnMut(&mut A, B),
{
    let rhs = detach(rhs, target);
    let iter = NdIter::with_shape(&[&*target, &*rhs], &target.shape)?;
    let (ct, cr) = (&target.container, &rhs.container);
    iter.for_each(|offs| unsafe {
        let mut elt = ct.read(offs[0]);
        f(&mut elt, cr.read(offs[1]));
        ct.write(offs[0], elt);
    });
    Ok(())
}

/// Fold all elements of `a` in row major order.
pub fn fold<A, B, F>(a: &Array<A>, init: B, f: F) -> B
where
    A: Element,
    F: FnMut(B, A) -> B,
{
    a.iter().fold(init, f)
}

/// Fold the lanes of `a` along `axis`, each lane starting from `init` and
/// visited in increasing index order.
///
/// The result has the shape of `a` with `axis` removed, or set to length one
/// if `keepdims` is true.
///
/// **Errors** with `IndexOutOfRange` if `axis` is not an axis of `a`.
///
/// ```
/// use ndengine::{func, Array, Axis};
///
/// let a = Array::from_shape_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let rows = func::reduce_axis(&a, Axis(1), 0, |acc, x| acc + x, false).unwrap();
/// assert_eq!(rows.to_vec(), vec![6, 15]);
/// let cols = func::reduce_axis(&a, Axis(0), 1, |acc, x| acc * x, true).unwrap();
/// assert_eq!(cols.shape(), &[1, 3]);
/// assert_eq!(cols.to_vec(), vec![4, 10, 18]);
/// ```
pub fn reduce_axis<A, U, F>(a: &Array<A>, axis: Axis, init: U, mut f: F, keepdims: bool) -> NdResult<Array<U>>
where
    A: Element,
    U: Element,
    F: FnMut(U, A) -> U,
{
    let ax = axis.check(a.ndim())?;
    let kept = a.shape.remove_axis(ax);
    let mut acc = vec![init; kept.size()];
    // the accumulator viewed with the input's shape, constant along `axis`
    let acc_strides = contiguous_strides(&kept, Order::RowMajor).insert_axis(ax, 0);
    let acc_view = Layout::new(a.shape.to_vec(), acc_strides.to_vec(), 0);
    let ca = &a.container;
    NdIter::new(&[a, &acc_view])?.for_each(|offs| {
        let slot = &mut acc[offs[1] as usize];
        *slot = f(*slot, unsafe { ca.read(offs[0]) });
    });
    let shape = if keepdims { a.shape.remove_axis(ax).insert_axis(ax, 1) } else { kept };
    Ok(Array::from_vec_shape(acc, shape))
}

/// Check that the input shapes broadcast to exactly `out`.
fn check_output(shapes: &[&[usize]], out: &[usize]) -> NdResult<()> {
    for &shape in shapes {
        broadcast_strides(shape, &vec![0; shape.len()], out).map_err(|_| shape_mismatch(shape, out))?;
    }
    Ok(())
}

/// Return `input` itself, or a copy of it if writing `out` position by
/// position could clobber elements of `input` that are still to be read.
pub(crate) fn detach<'a, A: Element, U: Element>(input: &'a Array<A>, out: &Array<U>) -> Cow<'a, Array<A>> {
    if !overlaps(&input.container, &out.container) {
        return Cow::Borrowed(input);
    }
    let same_positions = size_of::<A>() == size_of::<U>()
        && input.container.as_ptr() as usize == out.container.as_ptr() as usize
        && input.offset == out.offset
        && broadcast_strides(&input.shape, &input.strides, &out.shape).map_or(false, |s| s == out.strides);
    if same_positions {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.copy())
    }
}

fn overlaps<A: Element, U: Element>(a: &Container<A>, b: &Container<U>) -> bool {
    let a0 = a.as_ptr() as usize;
    let a1 = a0 + a.len() * size_of::<A>();
    let b0 = b.as_ptr() as usize;
    let b1 = b0 + b.len() * size_of::<U>();
    a0 < b1 && b0 < a1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::s;

    #[test]
    fn out_of_place_is_a_new_container() {
        let a = Array::from_vec(vec![1, 2, 3]);
        let b = map(&a, |x| x * 2);
        assert!(!a.shares_container(&b));
        assert_eq!(b.to_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn apply2_mixed_types() {
        let a = Array::from_vec(vec![1.5f64, 2.5]);
        let b = Array::from_shape_vec((2, 1), vec![1i32, 2]).unwrap();
        let c = apply2(&a, &b, |x, y| x * y as f64).unwrap();
        assert_eq!(c.shape(), &[2, 2]);
        assert_eq!(c.to_vec(), vec![1.5, 2.5, 3., 5.]);
    }

    #[test]
    fn apply3_where() {
        let mask = Array::from_vec(vec![true, false, true]);
        let x = Array::from_vec(vec![1, 2, 3]);
        let y = Array::from_scalar(0);
        let r = apply3(&mask, &x, &y, |m, a, b| if m { a } else { b }).unwrap();
        assert_eq!(r.to_vec(), vec![1, 0, 3]);
    }

    #[test]
    fn apply_needs_inputs() {
        let err = apply::<i32, i32, _>(&[], |_| 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn into_checks_output_shape() {
        let a = Array::from_vec(vec![1, 2, 3]);
        let mut out = Array::<i32>::zeros((2, 2));
        let err = apply2_into(&a, &a, &mut out, |x, y| x + y).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        // the output may not be broadcast by the inputs
        let mut small = Array::<i32>::zeros(3);
        let col = Array::from_shape_vec((2, 1), vec![1, 2]).unwrap();
        assert!(apply2_into(&a, &col, &mut small, |x, y| x + y).is_err());
    }

    #[test]
    fn aliasing_output_matches_out_of_place() {
        let a = Array::from_shape_vec((3, 3), (0..9).collect()).unwrap();
        let expected = apply2(&a, &a.t(), |x, y| x * 10 + y).unwrap();
        let mut out = a.clone();
        let t = a.t();
        apply2_into(&a, &t, &mut out, |x, y| x * 10 + y).unwrap();
        assert_eq!(out, expected);
        assert_eq!(a, expected);
    }

    #[test]
    fn in_place_same_layout() {
        let mut a = Array::from_vec(vec![1, 2, 3, 4]);
        let src = a.clone();
        map_into(&src, &mut a, |x| x * x).unwrap();
        assert_eq!(a.to_vec(), vec![1, 4, 9, 16]);
    }

    #[test]
    fn zip_mut_with_reversed_self() {
        let mut a = Array::from_vec(vec![1, 2, 3, 4]);
        let rev = a.slice(&s![..;-1]).unwrap();
        zip_mut_with(&mut a, &rev, |x, y| *x += y).unwrap();
        assert_eq!(a.to_vec(), vec![5, 5, 5, 5]);
    }

    #[test]
    fn reduce_axis_keepdims() {
        let a = Array::from_shape_vec((2, 2, 2), (0..8).collect()).unwrap();
        let r = reduce_axis(&a, Axis(1), 0, |acc, x| acc + x, true).unwrap();
        assert_eq!(r.shape(), &[2, 1, 2]);
        assert_eq!(r.to_vec(), vec![2, 4, 10, 12]);
        assert!(reduce_axis(&a, Axis(3), 0, |acc, x| acc + x, false).is_err());
        let empty = Array::<i32>::zeros((0, 3));
        assert_eq!(reduce_axis(&empty, Axis(0), 7, |acc, x| acc + x, false).unwrap().to_vec(), vec![7, 7, 7]);
    }
}
