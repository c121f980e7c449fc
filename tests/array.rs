#![allow(clippy::float_cmp)]

use defmac::defmac;
use itertools::iproduct;
use ndengine::prelude::*;
use ndengine::{Complex64, Container, ErrorKind, NewAxis};

#[test]
fn construct_and_index() {
    let a = Array::from_shape_fn((3, 4), |ix| (10 * ix[0] + ix[1]) as i32);
    assert_eq!(a.shape(), &[3, 4]);
    assert_eq!(a.strides(), &[4, 1]);
    assert_eq!(a.len(), 12);
    assert!(a.is_contiguous());
    for (i, j) in iproduct!(0..3usize, 0..4usize) {
        assert_eq!(a.get([i, j]).unwrap(), (10 * i + j) as i32);
        assert_eq!(a.get((i, j)).unwrap(), (10 * i + j) as i32);
    }
    assert_eq!(a.get([3, 0]).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(a.get([0]).unwrap_err().kind(), ErrorKind::ShapeMismatch);

    let z = Array::<f32>::zeros(());
    assert_eq!(z.ndim(), 0);
    assert_eq!(z.len(), 1);
    assert_eq!(z.first(), Some(0.));

    let o = Array::<u16>::ones((2, 2));
    assert_eq!(o.sum(), 4);
    assert_eq!(Array::<i64>::eye(3).sum(), 3);
}

#[test]
fn from_shape_vec_checks_length() {
    let err = Array::from_shape_vec((2, 3), vec![0; 5]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    let a = Array::from_shape_vec((2, 0, 3), Vec::<u8>::new()).unwrap();
    assert!(a.is_empty());
    assert_eq!(a.to_vec(), Vec::<u8>::new());
}

#[test]
fn clones_share_the_container() {
    let a = Array::<i32>::zeros((2, 2));
    let mut b = a.clone();
    assert_eq!(Container::ref_count(a.container()), 2);
    b.set([0, 1], 7).unwrap();
    assert_eq!(a.get([0, 1]).unwrap(), 7);

    let mut c = a.copy();
    c.set([0, 1], 0).unwrap();
    assert_eq!(a.get([0, 1]).unwrap(), 7);
    assert!(!c.shares_container(&a));
    drop(b);
    assert_eq!(Container::ref_count(a.container()), 1);
}

#[test]
fn slicing() {
    let a = Array::from_shape_vec((4, 5), (0..20).collect::<Vec<i32>>()).unwrap();
    let b = a.slice(&s![1..3, ..;2]).unwrap();
    assert_eq!(b.shape(), &[2, 3]);
    assert_eq!(b.strides(), &[5, 2]);
    assert_eq!(b.offset(), 5);
    assert_eq!(b.to_vec(), vec![5, 7, 9, 10, 12, 14]);

    let rev = a.slice(&s![..;-1, -1]).unwrap();
    assert_eq!(rev.shape(), &[4]);
    assert_eq!(rev.to_vec(), vec![19, 14, 9, 4]);

    let added = a.slice(&s![0, NewAxis, 1..3]).unwrap();
    assert_eq!(added.shape(), &[1, 2]);
    assert_eq!(added.to_vec(), vec![1, 2]);

    // slices of slices compose
    let inner = b.slice(&s![1, 1..]).unwrap();
    assert_eq!(inner.to_vec(), vec![12, 14]);
    assert!(inner.shares_container(&a));
}

#[test]
fn slicing_errors() {
    let a = Array::<f64>::zeros((3, 3));
    defmac!(kind info => a.slice(info).unwrap_err().kind());
    assert_eq!(kind!(&s![0..4]), ErrorKind::IndexOutOfRange);
    assert_eq!(kind!(&s![3]), ErrorKind::IndexOutOfRange);
    assert_eq!(kind!(&s![-4]), ErrorKind::IndexOutOfRange);
    assert_eq!(kind!(&s![..;0]), ErrorKind::InvalidArgument);
    assert_eq!(kind!(&s![0, 0, 0]), ErrorKind::ShapeMismatch);
}

#[test]
fn empty_slices() {
    let a = Array::from_vec((0..5).collect::<Vec<u32>>());
    let e = a.slice(&s![3..3]).unwrap();
    assert_eq!(e.shape(), &[0]);
    assert!(e.is_empty());
    assert_eq!(e.sum(), 0);
    let e = a.slice(&s![5..]).unwrap();
    assert!(e.is_empty());
}

#[test]
fn writes_through_views() {
    let a = Array::<i32>::zeros((3, 3));
    let mut diag_row = a.slice(&s![1, ..]).unwrap();
    diag_row.fill(4);
    let mut col = a.slice(&s![.., 2]).unwrap();
    col += 1;
    assert_eq!(a.to_vec(), vec![0, 0, 1, 4, 4, 5, 0, 0, 1]);

    let mut t = a.t();
    t.set([2, 0], 9).unwrap();
    assert_eq!(a.get([0, 2]).unwrap(), 9);
}

#[test]
fn index_axis_and_squeeze() {
    let a = Array::from_shape_fn((2, 1, 3), |ix| (ix[0] * 3 + ix[2]) as u64);
    let sub = a.index_axis(Axis(2), 1).unwrap();
    assert_eq!(sub.shape(), &[2, 1]);
    assert_eq!(sub.to_vec(), vec![1, 4]);
    assert_eq!(a.index_axis(Axis(0), 2).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(a.index_axis(Axis(3), 0).unwrap_err().kind(), ErrorKind::IndexOutOfRange);

    assert_eq!(a.squeeze().shape(), &[2, 3]);
    assert_eq!(a.squeeze_axes(&[Axis(1)]).unwrap().shape(), &[2, 3]);
    assert_eq!(a.squeeze_axes(&[Axis(0)]).unwrap_err().kind(), ErrorKind::InvalidArgument);
    let b = a.insert_axis(Axis(3)).unwrap();
    assert_eq!(b.shape(), &[2, 1, 3, 1]);
    assert_eq!(b.to_vec(), a.to_vec());
}

#[test]
fn transpose_and_swap() {
    let a = Array::from_shape_fn((2, 3, 4), |ix| (ix[0] * 100 + ix[1] * 10 + ix[2]) as i32);
    let p = a.transpose(&[2, 0, 1]).unwrap();
    assert_eq!(p.shape(), &[4, 2, 3]);
    for (i, j, k) in iproduct!(0..4usize, 0..2usize, 0..3usize) {
        assert_eq!(p.get([i, j, k]).unwrap(), a.get([j, k, i]).unwrap());
    }
    assert_eq!(a.transpose(&[0, 0, 1]).unwrap_err().kind(), ErrorKind::InvalidPermutation);
    assert_eq!(a.transpose(&[0, 1]).unwrap_err().kind(), ErrorKind::InvalidPermutation);

    let s = a.swap_axes(0, 2).unwrap();
    assert_eq!(s.shape(), &[4, 3, 2]);
    assert_eq!(a.t(), s);
    assert!(a.swap_axes(0, 3).is_err());
}

#[test]
fn select_and_masks() {
    let mut a = Array::from_shape_vec((2, 3), vec![1., -2., 3., -4., 5., -6.]).unwrap();
    let negative = a.less(&Array::from_scalar(0.)).unwrap();
    assert_eq!(a.select(&negative).unwrap().to_vec(), vec![-2., -4., -6.]);
    a.assign_where(&negative, 0.).unwrap();
    assert_eq!(a.to_vec(), vec![1., 0., 3., 0., 5., 0.]);

    let first_col = Array::from_shape_vec((2, 1), vec![true, false]).unwrap();
    a.assign_where_from(&first_col, &Array::from_vec(vec![7., 8., 9.])).unwrap();
    assert_eq!(a.to_vec(), vec![7., 8., 9., 0., 5., 0.]);
}

#[test]
fn equality_ignores_layout() {
    let a = arr2(&[[1, 2], [3, 4]]);
    let b = arr2(&[[1, 3], [2, 4]]);
    assert_eq!(a, b.t());
    assert_ne!(a, b);
    assert_ne!(a, a.reshape(4).unwrap());
}

#[test]
fn from_container_bounds() {
    let c = Container::from_vec((0..6).collect::<Vec<i32>>());
    let a = Array::from_container(c.clone(), (2, 3), &[3, 1], 0).unwrap();
    assert_eq!(a.get([1, 2]).unwrap(), 5);
    let err = Array::from_container(c.clone(), (2, 3), &[3, 1], 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BoundsError);
    let err = Array::from_container(c, (2, 3), &[1], 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
}

#[test]
fn wrapped_memory_is_not_freed() {
    let mut buf = vec![1.0f64, 2., 3., 4.];
    let c = unsafe { Container::wrap(buf.as_mut_ptr(), buf.len()) }.unwrap();
    assert!(!c.is_owned());
    {
        let mut a = Array::from_container(c, (2, 2), &[1, 2], 0).unwrap();
        assert_eq!(a.to_vec(), vec![1., 3., 2., 4.]);
        a.set([1, 0], 20.).unwrap();
    }
    assert_eq!(buf, vec![1., 20., 3., 4.]);
}

#[test]
fn layout_round_trip() {
    let a = Array::from_shape_vec((3, 2), (0..6).collect::<Vec<u8>>()).unwrap();
    let t = a.t();
    let layout = t.layout();
    assert_eq!(layout, Layout::new(vec![2, 3], vec![1, 2], 0));
    let b = Array::from_layout(t.container().clone(), &layout).unwrap();
    assert_eq!(b, t);
}

#[test]
fn arange_and_linspace() {
    assert_eq!(Array::arange(2u32, 9, 3).unwrap().to_vec(), vec![2, 5, 8]);
    assert_eq!(Array::arange(3i32, -3, -2).unwrap().to_vec(), vec![3, 1, -1]);
    assert!(Array::arange(0, 5, 0).is_err());
    assert!(Array::arange(0, 5, -1).is_err());
    assert!(Array::arange(0., 0., 1.).unwrap().is_empty());

    let l = Array::linspace(-1.0f32, 1., 3, true);
    assert_eq!(l.to_vec(), vec![-1., 0., 1.]);
    assert_eq!(Array::linspace(5.0f64, 9., 1, true).to_vec(), vec![5.]);
    assert!(Array::linspace(0.0f64, 1., 0, true).is_empty());
}

#[test]
fn cast_and_map() {
    let a = arr1(&[1.7f64, -0.5, 3.0]);
    assert_eq!(a.cast::<i32>().to_vec(), vec![1, 0, 3]);
    assert_eq!(a.map(|x| x > 0.).to_vec(), vec![true, false, true]);
    let mut b = a.copy();
    b.mapv_inplace(|x| x * 2.);
    assert_eq!(b.to_vec(), vec![3.4, -1., 6.]);
}

#[test]
fn element_types() {
    assert_eq!(Array::<u8>::zeros(1).dtype(), DType::U8);
    assert_eq!(Array::<Complex64>::zeros(1).dtype(), DType::C64);
    let et = Array::<f32>::zeros(1).element_type();
    assert_eq!(et.size, 4);
    assert_eq!(et.dtype.name(), "f32");
    assert!(DType::I16.is_signed_integer());
    assert!(!DType::Bool.is_integer());
}

#[test]
fn errors_display() {
    let a = Array::<f64>::zeros((2, 3));
    let err = a.try_add(&Array::zeros(4)).unwrap_err();
    assert_eq!(err.to_string(), "incompatible shapes [2, 3] and [4]");
    assert!(!err.is_transient());
}
