use ndengine::prelude::*;
use ndengine::ErrorKind;

#[test]
fn reshape_contiguous_is_a_view() {
    let a = Array::from_vec((0..24).collect::<Vec<i32>>());
    let b = a.reshape((2, 3, 4)).unwrap();
    assert!(b.shares_container(&a));
    assert_eq!(b.strides(), &[12, 4, 1]);
    assert_eq!(b.get([1, 2, 3]).unwrap(), 23);
    let c = b.reshape((6, 4)).unwrap();
    assert_eq!(c.get([5, 0]).unwrap(), 20);
    assert_eq!(b.reshape((4, 7)).unwrap_err().kind(), ErrorKind::ShapeMismatch);
}

#[test]
fn reshape_merges_only_contiguous_groups() {
    let a = Array::from_shape_vec((4, 6), (0..24).collect::<Vec<u8>>()).unwrap();
    // every other column: rows stay addressable, columns split
    let cols = a.slice(&s![.., ..;2]).unwrap();
    let split = cols.reshape((4, 3, 1)).unwrap();
    assert!(split.shares_container(&a));
    assert_eq!(split.to_vec(), cols.to_vec());
    // a stride of 6 over rows of three elements spaced by 2 still merges
    let flat = cols.reshape(12).unwrap();
    assert_eq!(flat.strides(), &[2]);
    assert!(flat.shares_container(&a));
    let head = a.slice(&s![.., ..3]).unwrap();
    assert_eq!(head.reshape(12).unwrap_err().kind(), ErrorKind::IncompatibleLayout);

    // a row slice can be regrouped freely
    let rows = a.slice(&s![1..3, ..]).unwrap();
    let r = rows.reshape((3, 4)).unwrap();
    assert!(r.shares_container(&a));
    assert_eq!(r.to_vec(), (6..18).collect::<Vec<u8>>());
}

#[test]
fn reshape_of_transpose_needs_a_copy() {
    let a = Array::from_shape_vec((2, 3), vec![1., 2., 3., 4., 5., 6.]).unwrap();
    let t = a.t();
    let err = t.reshape(6).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleLayout);
    let flat = t.copy_reshape(6).unwrap();
    assert_eq!(flat.to_vec(), vec![1., 4., 2., 5., 3., 6.]);
    assert!(!flat.shares_container(&a));
    // column major reading of the transpose is row major memory
    let cm = t.reshape_with_order(6, Order::ColumnMajor).unwrap();
    assert!(cm.shares_container(&a));
    assert_eq!(cm.to_vec(), vec![1., 2., 3., 4., 5., 6.]);
}

#[test]
fn ravel() {
    let a = Array::from_shape_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
    let r = a.ravel();
    assert!(r.shares_container(&a));
    let rt = a.t().ravel();
    assert!(!rt.shares_container(&a));
    assert_eq!(rt.to_vec(), vec![1, 3, 2, 4]);
}

#[test]
fn reshape_zero_sized_and_scalars() {
    let e = Array::<f32>::zeros((0, 5));
    assert_eq!(e.reshape((5, 0, 2)).unwrap().shape(), &[5, 0, 2]);
    let s = Array::from_scalar(3i8);
    let one = s.reshape((1, 1)).unwrap();
    assert_eq!(one.get([0, 0]).unwrap(), 3);
    assert_eq!(one.reshape(()).unwrap().first(), Some(3));
}

#[test]
fn reshape_broadcast_view() {
    let a = arr1(&[1, 2]).broadcast_to((3, 2)).unwrap();
    let b = a.reshape((3, 1, 2)).unwrap();
    assert_eq!(b.strides()[0], 0);
    assert_eq!(a.reshape(6).unwrap_err().kind(), ErrorKind::IncompatibleLayout);
}

#[test]
fn reshape_overflowing_shape_is_an_error() {
    let a = Array::<f32>::zeros(4);
    assert_eq!(a.reshape((usize::MAX, 2)).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    assert_eq!(a.copy_reshape((usize::MAX, 2)).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    assert_eq!(
        a.reshape_with_order((2, usize::MAX), Order::F).unwrap_err().kind(),
        ErrorKind::ShapeMismatch
    );
}
