// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::{Array, Axis, Element};

/// Arrays with more elements than this are shown abbreviated, unless the
/// alternate flag `{:#}` is used.
const ARRAY_MANY_ELEMENT_LIMIT: usize = 500;
/// Number of leading and trailing items kept on each axis when abbreviated.
const AXIS_EDGE_ITEMS: usize = 3;

/// Format `len` items, separated by `separator`, eliding the middle ones
/// when `collapse` is set and there are more than twice the edge items.
fn format_with_overflow<F>(
    f: &mut fmt::Formatter<'_>,
    len: usize,
    collapse: bool,
    separator: &str,
    mut fmt_elem: F,
) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, usize) -> fmt::Result,
{
    if len == 0 {
        return Ok(());
    }
    if collapse && len > 2 * AXIS_EDGE_ITEMS {
        for i in 0..AXIS_EDGE_ITEMS {
            if i > 0 {
                f.write_str(separator)?;
            }
            fmt_elem(f, i)?;
        }
        f.write_str(separator)?;
        f.write_str("...")?;
        for i in len - AXIS_EDGE_ITEMS..len {
            f.write_str(separator)?;
            fmt_elem(f, i)?;
        }
    } else {
        for i in 0..len {
            if i > 0 {
                f.write_str(separator)?;
            }
            fmt_elem(f, i)?;
        }
    }
    Ok(())
}

fn format_array<A, F>(array: &Array<A>, f: &mut fmt::Formatter<'_>, mut format: F) -> fmt::Result
where
    A: Element,
    F: FnMut(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    let collapse = !f.alternate() && array.len() > ARRAY_MANY_ELEMENT_LIMIT;
    format_inner(array, f, &mut format, 0, collapse)
}

fn format_inner<A, F>(view: &Array<A>, f: &mut fmt::Formatter<'_>, format: &mut F, depth: usize, collapse: bool) -> fmt::Result
where
    A: Element,
    F: FnMut(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    match view.ndim() {
        0 => match view.first() {
            Some(x) => format(&x, f),
            None => Ok(()),
        },
        1 => {
            f.write_str("[")?;
            format_with_overflow(f, view.shape()[0], collapse, ", ", |f, i| {
                let x = view.get(i).map_err(|_| fmt::Error)?;
                format(&x, f)
            })?;
            f.write_str("]")
        }
        ndim => {
            // one newline per axis level below, then indent to the bracket
            let blank_lines = "\n".repeat(ndim - 1);
            let indent = " ".repeat(depth + 1);
            let separator = format!(",{}{}", blank_lines, indent);
            f.write_str("[")?;
            format_with_overflow(f, view.shape()[0], collapse, &separator, |f, i| {
                let sub = view.index_axis(Axis(0), i).map_err(|_| fmt::Error)?;
                format_inner(&sub, f, format, depth + 1, collapse)
            })?;
            f.write_str("]")
        }
    }
}

/// Format the array using `Display` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<A: Element + fmt::Display> fmt::Display for Array<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <A as fmt::Display>::fmt)
    }
}

/// Format the array using `Debug` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style, followed by its layout and element
/// type.
impl<A: Element> fmt::Debug for Array<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <A as fmt::Debug>::fmt)?;
        write!(
            f,
            " shape={:?}, strides={:?}, offset={}, dtype={}",
            self.shape(),
            self.strides(),
            self.offset(),
            self.dtype()
        )
    }
}

/// Format the array using `LowerExp` and apply the formatting parameters used
/// to each element.
impl<A: Element + fmt::LowerExp> fmt::LowerExp for Array<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <A as fmt::LowerExp>::fmt)
    }
}

#[cfg(test)]
mod tests {
    use crate::{arr0, arr1, arr2, arr3, Array};

    #[test]
    fn small() {
        assert_eq!(arr0(5).to_string(), "5");
        assert_eq!(arr1(&[1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(arr2(&[[1, 2], [3, 4]]).to_string(), "[[1, 2],\n [3, 4]]");
        assert_eq!(
            arr3(&[[[1, 2]], [[3, 4]]]).to_string(),
            "[[[1, 2]],\n\n [[3, 4]]]"
        );
    }

    #[test]
    fn empty() {
        assert_eq!(Array::<i32>::zeros(0).to_string(), "[]");
        assert_eq!(Array::<i32>::zeros((0, 3)).to_string(), "[]");
        assert_eq!(Array::<i32>::zeros((2, 0)).to_string(), "[[],\n []]");
    }

    #[test]
    fn precision_applies_to_elements() {
        assert_eq!(format!("{:.1}", arr1(&[1.26, 2.])), "[1.3, 2.0]");
    }

    #[test]
    fn views_format_in_logical_order() {
        let a = arr2(&[[1, 2], [3, 4]]);
        assert_eq!(a.t().to_string(), "[[1, 3],\n [2, 4]]");
    }

    #[test]
    fn large_arrays_are_abbreviated() {
        let a = Array::from_vec((0..1000).collect::<Vec<i32>>());
        assert_eq!(a.to_string(), "[0, 1, 2, ..., 997, 998, 999]");
        assert_eq!(format!("{:#}", a).matches(", ").count(), 999);
        let m = Array::from_shape_vec((100, 10), (0..1000).collect::<Vec<i32>>()).unwrap();
        let s = m.to_string();
        assert!(s.starts_with("[[0, 1, 2, ..., 7, 8, 9],\n [10, 11, 12, ..., 17, 18, 19],"));
        assert!(s.contains(",\n ...,\n"));
    }

    #[test]
    fn debug_has_layout() {
        let a = arr1(&[1u8, 2]);
        assert_eq!(format!("{:?}", a), "[1, 2] shape=[2], strides=[1], offset=0, dtype=u8");
    }
}
