//! Randomised checks of the layout and broadcasting laws.
use itertools::assert_equal;
use ndengine::prelude::*;
use ndengine::{broadcast_shapes, contiguous_strides, inverse_permutation, OffsetIter};
use quickcheck::quickcheck;

/// A small shape of rank 0 to 4 with extents 0 to 4.
fn small_shape(raw: &[u8]) -> Vec<usize> {
    raw.iter().take(4).map(|&x| x as usize % 5).collect()
}

/// The index into an operand of `shape` read at position `ix` of a
/// broadcast result.
fn operand_index(shape: &[usize], ix: &[usize]) -> Vec<usize> {
    let lead = ix.len() - shape.len();
    shape
        .iter()
        .zip(&ix[lead..])
        .map(|(&n, &i)| if n == 1 { 0 } else { i })
        .collect()
}

fn numbered(shape: &[usize]) -> Array<i64> {
    let n = shape.iter().product::<usize>();
    Array::from_shape_vec(shape, (0..n as i64).collect()).unwrap()
}

quickcheck! {
    fn contiguous_offsets_increase(raw: Vec<u8>) -> bool {
        let shape = small_shape(&raw);
        let strides = contiguous_strides(&shape, Order::RowMajor);
        let n = shape.iter().product::<usize>() as isize;
        OffsetIter::new(&shape, &strides, 0).eq(0..n)
    }

    fn transpose_then_inverse_is_identity(raw: Vec<u8>, seed: usize) -> bool {
        let shape = small_shape(&raw);
        let a = numbered(&shape);
        let mut perm: Vec<usize> = (0..shape.len()).collect();
        if !perm.is_empty() {
            let len = perm.len();
            perm.rotate_left(seed % len);
        }
        let inv = inverse_permutation(&perm).unwrap();
        let back = a.transpose(&perm).unwrap().transpose(&inv).unwrap();
        back.shape() == a.shape() && back.strides() == a.strides() && back == a
    }

    fn reshape_round_trip(raw: Vec<u8>) -> bool {
        let shape = small_shape(&raw);
        let a = numbered(&shape);
        let flat = a.reshape(a.len()).unwrap();
        let back = flat.reshape(&shape[..]).unwrap();
        back == a && back.shares_container(&a)
    }

    fn broadcast_add_is_elementwise(raw: Vec<u8>, ones_a: u8, ones_b: u8, drop: u8, swap: bool) -> bool {
        let base = small_shape(&raw);
        let with_ones = |mask: u8| -> Vec<usize> {
            base.iter()
                .enumerate()
                .map(|(i, &n)| if (mask >> i) & 1 == 1 { 1 } else { n })
                .collect()
        };
        let a_shape = with_ones(ones_a);
        let b_shape = with_ones(ones_b)[drop as usize % (base.len() + 1)..].to_vec();
        let (a_shape, b_shape) = if swap { (b_shape, a_shape) } else { (a_shape, b_shape) };
        let a = numbered(&a_shape);
        let b = numbered(&b_shape).map(|x| x * 1000);
        let expected_shape = broadcast_shapes(&a_shape, &b_shape).unwrap();
        let sum = &a + &b;
        sum.shape() == &expected_shape[..]
            && sum.len() == expected_shape.iter().product::<usize>()
            && sum.indexed_iter().all(|(ix, x)| {
                x == a.get(operand_index(&a_shape, &ix)).unwrap() + b.get(operand_index(&b_shape, &ix)).unwrap()
            })
    }
}

#[test]
fn broadcast_add_edge_shapes() {
    let scalar = Array::from_scalar(7i64);
    let empty = Array::<i64>::zeros((0, 3));
    assert_eq!(&scalar + &scalar, Array::from_scalar(14));
    assert_eq!((&scalar + &numbered(&[2, 3])).to_vec(), (7..13).collect::<Vec<_>>());
    assert_eq!((&empty + &scalar).shape(), &[0, 3]);
    assert_eq!((&numbered(&[1, 3]) + &empty).shape(), &[0, 3]);
    assert_eq!((&Array::<i64>::zeros((2, 1, 0)) + &numbered(&[4, 1])).shape(), &[2, 4, 0]);
}

#[test]
fn aliasing_is_visible_through_every_view() {
    let a = numbered(&[4, 4]);
    let mut block = a.slice(&s![1..3, 1..3]).unwrap();
    assert_eq!(block.to_vec(), vec![5, 6, 9, 10]);
    block.set([0, 1], -1).unwrap();
    assert_eq!(a.get([1, 2]).unwrap(), -1);
    assert_eq!(a.t().get([2, 1]).unwrap(), -1);
    assert_equal(a.reshape(16).unwrap().iter().filter(|&x| x < 0), vec![-1]);
}

#[test]
fn identity_and_small_products() {
    let a = numbered(&[2, 3]).cast::<f64>();
    let b = numbered(&[3, 2]).cast::<f64>();
    let eye = Array::eye(3);
    assert_eq!(a.matmul(&eye).unwrap(), a);
    let c = a.matmul(&b).unwrap();
    assert_eq!(c, arr2(&[[10., 13.], [28., 40.]]));
}

#[test]
fn incompatible_broadcast_reports_both_shapes() {
    let err = ndengine::broadcast_shapes(&[3, 4], &[2, 4]).unwrap_err();
    assert_eq!(err.kind(), ndengine::ErrorKind::ShapeMismatch);
    assert_eq!(err.to_string(), "incompatible shapes [3, 4] and [2, 4]");
}
