use ndengine::prelude::*;
use ndengine::{broadcast_all, broadcast_shapes, ErrorKind};

#[test]
fn broadcast_shape_rules() {
    assert_eq!(&broadcast_shapes(&[2, 1, 3], &[4, 1]).unwrap()[..], &[2, 4, 3]);
    assert_eq!(&broadcast_shapes(&[], &[5]).unwrap()[..], &[5]);
    assert_eq!(&broadcast_shapes(&[0], &[1]).unwrap()[..], &[0]);
    assert_eq!(broadcast_shapes(&[0], &[2]).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    assert_eq!(broadcast_shapes(&[3, 2], &[3]).unwrap_err().kind(), ErrorKind::ShapeMismatch);

    let shapes: [&[usize]; 3] = [&[8, 1, 6, 1], &[7, 1, 5], &[1]];
    assert_eq!(&broadcast_all(shapes.iter().copied()).unwrap()[..], &[8, 7, 6, 5]);
    assert!(broadcast_all(std::iter::empty()).unwrap().is_empty());
}

#[test]
fn broadcast_views() {
    let c = Array::from_shape_vec((2, 1), vec![1, 2]).unwrap();
    assert!(c.broadcast_to(1).is_err());
    assert!(c.broadcast_to(()).is_err());
    assert!(c.broadcast_to((2, 1)).is_ok());
    assert!(c.broadcast_to((32, 2, 1)).is_ok());
    assert!(c.broadcast_to((32, 1, 2)).is_err());

    let b = c.broadcast_to((3, 2, 4)).unwrap();
    assert_eq!(b.strides(), &[0, 1, 0]);
    assert!(b.shares_container(&c));
    assert_eq!(b.len(), 24);
    assert_eq!(b.sum(), 36);

    // () can be broadcast to anything
    let z = Array::<f32>::zeros(());
    assert!(z.broadcast_to(()).is_ok());
    assert!(z.broadcast_to(3).is_ok());
    assert_eq!(z.broadcast_to((7, 2, 9)).unwrap().strides(), &[0, 0, 0]);
}

#[test]
fn broadcast_arithmetic() {
    let a = Array::from_shape_vec((2, 3), vec![1., 2., 3., 4., 5., 6.]).unwrap();
    let row = arr1(&[10., 20., 30.]);
    let col = Array::from_shape_vec((2, 1), vec![100., 200.]).unwrap();
    assert_eq!((&a + &row).to_vec(), vec![11., 22., 33., 14., 25., 36.]);
    assert_eq!((&a * &col).to_vec(), vec![100., 200., 300., 800., 1000., 1200.]);
    let outer = &col + &row;
    assert_eq!(outer.shape(), &[2, 3]);
    assert_eq!(outer.to_vec(), vec![110., 120., 130., 210., 220., 230.]);
    assert_eq!((&a - 1.).to_vec(), vec![0., 1., 2., 3., 4., 5.]);
    assert_eq!((2f64 * &a).sum(), 42.);
}

#[test]
fn broadcast_in_place() {
    let mut a = Array::<i32>::zeros((3, 2));
    a += &arr1(&[1, 2]);
    a *= &Array::from_shape_vec((3, 1), vec![1, 10, 100]).unwrap();
    assert_eq!(a.to_vec(), vec![1, 2, 10, 20, 100, 200]);
    // the target shape never grows
    let err = a.try_add_assign(&Array::zeros((2, 3, 2))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
}

#[test]
#[should_panic]
fn add_incompatible_shapes_panics() {
    let a = Array::<f32>::zeros((2, 4));
    let b = Array::<f32>::zeros(3);
    let _ = &a + &b;
}

#[test]
fn zero_length_axes() {
    let a = Array::<f64>::zeros((0, 3));
    let b = arr1(&[1., 2., 3.]);
    let c = &a + &b;
    assert_eq!(c.shape(), &[0, 3]);
    assert!(c.is_empty());
    let d = a.try_add(&Array::zeros((2, 3))).unwrap_err();
    assert_eq!(d.kind(), ErrorKind::ShapeMismatch);
}

#[test]
fn comparisons_broadcast() {
    let a = arr2(&[[1, 5], [3, 2]]);
    let m = a.greater_equal(&arr1(&[2, 5])).unwrap();
    assert_eq!(m.to_vec(), vec![false, true, true, false]);
    assert_eq!(a.equal(&Array::from_scalar(2)).unwrap().to_vec(), vec![false, false, false, true]);
}
