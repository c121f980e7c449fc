use ndengine::prelude::*;
use ndengine::{Complex32, ErrorKind};

#[test]
fn tags_follow_the_wrapped_array() {
    let cases = [
        (DynArray::from(arr1(&[true])), DType::Bool, 1),
        (DynArray::from(arr1(&[1i8])), DType::I8, 1),
        (DynArray::from(arr1(&[1u32])), DType::U32, 4),
        (DynArray::from(arr1(&[1.0f64])), DType::F64, 8),
        (DynArray::from(arr1(&[Complex32::new(0., 1.)])), DType::C32, 8),
    ];
    for (a, dtype, size) in &cases {
        assert_eq!(a.dtype(), *dtype);
        assert_eq!(a.element_type().size, *size);
        assert_eq!(a.len(), 1);
    }
}

#[test]
fn views_stay_typed() {
    let a = DynArray::from(Array::from_shape_vec((2, 3), (0..6).collect::<Vec<i16>>()).unwrap());
    let t = a.t();
    assert_eq!(t.strides(), &[1, 3]);
    let r = a.slice(&s![.., ..;-1]).unwrap();
    assert_eq!(r.as_array::<i16>().unwrap().to_vec(), vec![2, 1, 0, 5, 4, 3]);
    let b = a.broadcast_to(&[4, 2, 3]).unwrap();
    assert_eq!(b.strides(), &[0, 3, 1]);
    assert!(a.as_array::<i32>().is_none());
    assert_eq!(a.transpose(&[1, 0]).unwrap(), t);
}

#[test]
fn arithmetic_and_conversion() {
    let a = DynArray::from(arr2(&[[1u8, 2], [3, 4]]));
    let b = DynArray::from(arr1(&[10u8, 20]));
    let sum = a.try_add(&b).unwrap();
    assert_eq!(sum.downcast::<u8>().unwrap(), arr2(&[[11, 22], [13, 24]]));
    let err = a.try_div(&DynArray::from(arr1(&[1.0f32]))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ElementTypeMismatch);
    assert!(a.try_add(&DynArray::from(arr1(&[1u8, 2, 3]))).is_err());

    let f = a.astype(DType::F32).unwrap();
    let inv = f.inv().unwrap();
    let back = f.matmul(&inv).unwrap();
    assert!(back
        .as_array::<f32>()
        .unwrap()
        .allclose(&Array::eye(2), 1e-5, 1e-5)
        .unwrap());
    assert_eq!(f.solve(&b).unwrap_err().kind(), ErrorKind::ElementTypeMismatch);
}

#[test]
fn display_matches_typed_array() {
    let a = arr2(&[[1, 2], [3, 4]]);
    assert_eq!(DynArray::from(a.clone()).to_string(), a.to_string());
}
