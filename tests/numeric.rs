#![allow(clippy::float_cmp, clippy::approx_constant)]

use approx::assert_abs_diff_eq;
use ndengine::prelude::*;
use ndengine::{Complex64, ErrorKind};

#[test]
fn reductions() {
    let a = arr2(&[[1., 2., 3.], [4., 5., 6.]]);
    assert_eq!(a.sum(), 21.);
    assert_eq!(a.prod(), 720.);
    assert_eq!(a.mean(), Some(3.5));
    assert_eq!(a.sum_axis(Axis(0), false).unwrap(), arr1(&[5., 7., 9.]));
    assert_eq!(a.sum_axis(Axis(1), true).unwrap(), arr2(&[[6.], [15.]]));
    assert_eq!(a.prod_axis(Axis(1), false).unwrap(), arr1(&[6., 120.]));
    assert_eq!(a.mean_axis(Axis(1), false).unwrap(), arr1(&[2., 5.]));
    assert_eq!(a.sum_axis(Axis(2), false).unwrap_err().kind(), ErrorKind::IndexOutOfRange);

    // the same reductions over a transposed view
    let t = a.t();
    assert_eq!(t.sum_axis(Axis(1), false).unwrap(), arr1(&[5., 7., 9.]));
    assert_eq!(t.sum(), 21.);
}

#[test]
fn empty_reductions() {
    let e = Array::<f64>::zeros((0, 3));
    assert_eq!(e.sum(), 0.);
    assert_eq!(e.prod(), 1.);
    assert_eq!(e.mean(), None);
    assert_eq!(e.sum_axis(Axis(0), false).unwrap(), arr1(&[0., 0., 0.]));
    assert_eq!(e.sum_axis(Axis(1), false).unwrap().shape(), &[0]);
    assert_eq!(e.mean_axis(Axis(0), false).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(e.min().unwrap_err().kind(), ErrorKind::InvalidArgument);
}

#[test]
fn min_max() {
    let a = arr2(&[[3, -1, 4], [1, 5, -9]]);
    assert_eq!(a.min().unwrap(), -9);
    assert_eq!(a.max().unwrap(), 5);
    assert_eq!(a.min_axis(Axis(0), false).unwrap(), arr1(&[1, -1, -9]));
    assert_eq!(a.max_axis(Axis(1), true).unwrap(), arr2(&[[4], [5]]));
    assert_eq!(
        Array::<i32>::zeros((2, 0)).max_axis(Axis(1), false).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn variance() {
    let a = arr2(&[[1., 2.], [3., 4.], [5., 6.]]);
    assert_eq!(a.var_axis(Axis(0), 0, false).unwrap(), arr1(&[8. / 3., 8. / 3.]));
    assert_eq!(a.var_axis(Axis(0), 1, false).unwrap(), arr1(&[4., 4.]));
    assert_eq!(a.std_axis(Axis(1), 1, true).unwrap().shape(), &[3, 1]);
    assert_abs_diff_eq!(a.std_axis(Axis(1), 0, false).unwrap().get(0).unwrap(), 0.5);
    assert_eq!(a.var_axis(Axis(1), 2, false).unwrap_err().kind(), ErrorKind::InvalidArgument);
}

#[test]
fn clip_and_unique() {
    let a = arr1(&[4., -1., 7.5, 2.]);
    assert_eq!(a.clip(0., 5.).unwrap(), arr1(&[4., 0., 5., 2.]));
    assert_eq!(a.clip(1., 1.).unwrap(), arr1(&[1., 1., 1., 1.]));
    assert_eq!(a.clip(f64::NAN, 1.).unwrap_err().kind(), ErrorKind::InvalidArgument);
    let u = arr2(&[[3, 1, 2], [2, 3, 3]]).unique();
    assert_eq!(u, arr1(&[1, 2, 3]));
}

#[test]
fn boolean_reductions() {
    let m = arr2(&[[true, false], [true, true]]);
    assert!(m.any());
    assert!(!m.all());
    assert_eq!(m.all_axis(Axis(0), false).unwrap(), arr1(&[true, false]));
    assert_eq!(m.any_axis(Axis(1), false).unwrap(), arr1(&[true, true]));
    assert!(Array::<bool>::zeros(0).all());
    assert!(!Array::<bool>::zeros(0).any());
}

#[test]
fn float_maths() {
    let a = arr1(&[1.0f64, 4., 9.]);
    assert_eq!(a.sqrt(), arr1(&[1., 2., 3.]));
    assert_eq!(a.powi(2), arr1(&[1., 16., 81.]));
    assert_eq!(a.pow2(), a.powi(2));
    assert_eq!(a.recip().get(1).unwrap(), 0.25);
    assert_eq!(arr1(&[-1.5, 0.5, 2.5]).round(), arr1(&[-2., 1., 3.]));
    assert_eq!(arr1(&[-1.5, 0.5]).floor(), arr1(&[-2., 0.]));
    assert_abs_diff_eq!(arr1(&[180.0f64]).deg2rad().get(0).unwrap(), std::f64::consts::PI);
    assert!(arr1(&[1., f64::NAN]).is_any_nan());
    assert_eq!(arr1(&[1., f64::INFINITY]).is_infinite(), arr1(&[false, true]));

    let y = arr1(&[1., -1.]);
    let x = Array::from_scalar(0.);
    let angles = y.atan2(&x).unwrap();
    assert_abs_diff_eq!(angles.get(0).unwrap(), std::f64::consts::FRAC_PI_2);
    assert_abs_diff_eq!(angles.get(1).unwrap(), -std::f64::consts::FRAC_PI_2);
    assert_eq!(arr1(&[3.]).hypot(&arr1(&[4.])).unwrap(), arr1(&[5.]));
    assert!(arr1(&[1., 2.]).powf(&arr1(&[1., 2., 3.])).is_err());
}

#[test]
fn signed_maths() {
    assert_eq!(arr1(&[-3i8, 0, 2]).abs(), arr1(&[3, 0, 2]));
    assert_eq!(arr1(&[-3i64, 0, 2]).sign(), arr1(&[-1, 0, 1]));
    assert!(arr1(&[f32::NAN]).sign().is_any_nan());
}

#[test]
fn closeness() {
    let a = arr1(&[1.0, 100.0, f64::NAN]);
    let b = arr1(&[1.0 + 1e-10, 100.01, f64::NAN]);
    assert_eq!(a.isclose(&b, 1e-5, 1e-8).unwrap(), arr1(&[true, false, false]));
    assert_eq!(a.isclose(&b, 1e-4, 0.).unwrap(), arr1(&[true, true, false]));
    assert!(!a.allclose(&a, 1e-5, 1e-8).unwrap());
    assert!(arr1(&[1, 2]).allclose(&arr1(&[1, 2]), 0.5, 10.).unwrap());
    assert!(!arr1(&[1, 2]).allclose(&arr1(&[1, 3]), 0.5, 10.).unwrap());
    assert!(arr1(&[1., 2.]).allclose(&arr1(&[1., 2., 3.]), 1., 1.).is_err());
}

#[test]
fn complex_parts() {
    let z = arr1(&[Complex64::new(3., 4.), Complex64::new(0., -1.)]);
    assert_eq!(z.real(), arr1(&[3., 0.]));
    assert_eq!(z.imag(), arr1(&[4., -1.]));
    assert_eq!(z.norm(), arr1(&[5., 1.]));
    assert_eq!(z.conj().imag(), arr1(&[-4., 1.]));
    assert_abs_diff_eq!(z.arg().get(1).unwrap(), -std::f64::consts::FRAC_PI_2);
    let w = &z * &z;
    assert_eq!(w.get(0).unwrap(), Complex64::new(-7., 24.));
}

#[test]
fn stacking() {
    let a = arr2(&[[1, 2], [3, 4]]);
    let b = arr2(&[[5, 6]]);
    let c = concatenate(Axis(0), &[&a, &b]).unwrap();
    assert_eq!(c, arr2(&[[1, 2], [3, 4], [5, 6]]));
    assert_eq!(
        concatenate(Axis(1), &[&a, &b]).unwrap_err().kind(),
        ErrorKind::ShapeMismatch
    );
    let d = concatenate(Axis(1), &[&a, &a.t()]).unwrap();
    assert_eq!(d, arr2(&[[1, 2, 1, 3], [3, 4, 2, 4]]));
    assert!(concatenate::<i32>(Axis(0), &[]).is_err());

    let s = stack(Axis(1), &[&arr1(&[1, 2]), &arr1(&[3, 4])]).unwrap();
    assert_eq!(s, arr2(&[[1, 3], [2, 4]]));
    let s = stack(Axis(2), &[&a, &a]).unwrap();
    assert_eq!(s.shape(), &[2, 2, 2]);
    assert!(stack(Axis(3), &[&a]).is_err());
}

#[test]
fn meshgrid() {
    let x = arr1(&[1, 2, 3]);
    let y = arr1(&[10, 20]);
    let grids = ndengine::meshgrid(&[&x, &y], false).unwrap();
    assert_eq!(grids[0], arr2(&[[1, 1], [2, 2], [3, 3]]));
    assert_eq!(grids[1], arr2(&[[10, 20], [10, 20], [10, 20]]));
    let sparse = ndengine::meshgrid(&[&x, &y], true).unwrap();
    assert_eq!(sparse[0].shape(), &[3, 1]);
    assert_eq!(sparse[1].shape(), &[1, 2]);
    assert_eq!(&sparse[0] + &sparse[1], arr2(&[[11, 21], [12, 22], [13, 23]]));
}
