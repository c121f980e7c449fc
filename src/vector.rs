use std::fmt;
use std::ops::Deref;

use num_traits::Float;

use crate::error::{NdError, NdResult};
use crate::iterators::Iter;
use crate::linalg;
use crate::{Array, Element, LinalgScalar, Slice, SliceInfoElem};

/// A one-dimensional array.
///
/// `Vector` dereferences to the [`Array`] it wraps, so every array method is
/// available; the methods here are the vector specific ones, with plain
/// `usize` indices.
///
/// ```
/// use ndengine::Vector;
///
/// let mut v = Vector::from_vec(vec![3., 4.]);
/// assert_eq!(v.norm(), 5.);
/// v.set(0, 0.).unwrap();
/// assert_eq!(v.dot(&v).unwrap(), 16.);
/// ```
#[derive(Clone, PartialEq)]
pub struct Vector<T: Element> {
    array: Array<T>,
}

impl<T: Element> Vector<T> {
    /// Create a vector of length `len` filled with `value`.
    pub fn new(len: usize, value: T) -> Self {
        Vector {
            array: Array::from_elem(len, value),
        }
    }

    /// Create a vector of length `len` filled with zeros.
    pub fn zeros(len: usize) -> Self {
        Vector { array: Array::zeros(len) }
    }

    /// Create a vector owning the elements of `v`, without copying.
    pub fn from_vec(v: Vec<T>) -> Self {
        Vector {
            array: Array::from_vec(v),
        }
    }

    /// Wrap a one-dimensional array; the container is shared, not copied.
    ///
    /// ***Errors*** with `RankMismatch` unless `array` has exactly one axis.
    pub fn from_array(array: Array<T>) -> NdResult<Self> {
        if array.ndim() != 1 {
            return Err(NdError::RankMismatch {
                expected: 1,
                got: array.ndim(),
            });
        }
        Ok(Vector { array })
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Return element `i`.
    ///
    /// ***Errors*** with `IndexOutOfRange` if `i >= len`.
    pub fn get(&self, i: usize) -> NdResult<T> {
        self.array.get(i)
    }

    /// Write element `i`, visible through every view of the same container.
    ///
    /// ***Errors*** with `IndexOutOfRange` if `i >= len`.
    pub fn set(&mut self, i: usize, value: T) -> NdResult<()> {
        self.array.set(i, value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.array.iter()
    }

    /// Inner product with `other`.
    ///
    /// ***Errors*** with `ShapeMismatch` if the lengths differ.
    pub fn dot(&self, other: &Vector<T>) -> NdResult<T>
    where
        T: LinalgScalar,
    {
        linalg::dot(&self.array, &other.array)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> T
    where
        T: Float,
    {
        self.array.fold(T::zero(), |acc, x| acc + x * x).sqrt()
    }

    /// Return the view of the elements selected by `slice`.
    pub fn slice(&self, slice: Slice) -> NdResult<Vector<T>> {
        Ok(Vector {
            array: self.array.slice(&[SliceInfoElem::from(slice)])?,
        })
    }

    /// Return a reversed view.
    ///
    /// ```
    /// use ndengine::Vector;
    ///
    /// let v = Vector::from_vec(vec![1, 2, 3]);
    /// assert_eq!(v.reversed().to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn reversed(&self) -> Vector<T> {
        Vector {
            array: self.array.with_layout(
                self.array.shape.clone(),
                self.array.strides.iter().map(|&s| -s).collect::<Vec<_>>().into(),
                self.last_offset(),
            ),
        }
    }

    fn last_offset(&self) -> usize {
        match self.len() {
            0 => self.array.offset,
            n => (self.array.offset as isize + (n as isize - 1) * self.array.strides[0]) as usize,
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.array.to_vec()
    }

    /// Unwrap the underlying array.
    pub fn into_array(self) -> Array<T> {
        self.array
    }
}

impl<T: Element> Deref for Vector<T> {
    type Target = Array<T>;

    fn deref(&self) -> &Array<T> {
        &self.array
    }
}

impl<T: Element> TryFrom<Array<T>> for Vector<T> {
    type Error = NdError;

    fn try_from(array: Array<T>) -> NdResult<Self> {
        Vector::from_array(array)
    }
}

impl<T: Element> From<Vector<T>> for Array<T> {
    fn from(v: Vector<T>) -> Self {
        v.array
    }
}

impl<T: Element> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        Vector::from_vec(iterable.into_iter().collect())
    }
}

impl<T: Element> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.array, f)
    }
}

impl<T: Element + fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.array, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rank_checked() {
        let m = Array::<f64>::zeros((2, 2));
        assert_eq!(Vector::from_array(m.clone()).unwrap_err().kind(), ErrorKind::ShapeMismatch);
        let row = Vector::try_from(m.index_axis(crate::Axis(0), 1).unwrap()).unwrap();
        assert!(row.shares_container(&m));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn views_share() {
        let v: Vector<i32> = (0..6).collect();
        let mut odd = v.slice(Slice::from(1..).step_by(2)).unwrap();
        assert_eq!(odd.to_vec(), vec![1, 3, 5]);
        odd.set(0, 10).unwrap();
        assert_eq!(v.get(1).unwrap(), 10);
        let r = odd.reversed();
        assert_eq!(r.to_vec(), vec![5, 3, 10]);
        assert_eq!(r.reversed().to_vec(), odd.to_vec());
        assert!(v.get(6).is_err());
    }

    #[test]
    fn empty() {
        let v = Vector::<f32>::zeros(0);
        assert!(v.is_empty());
        assert_eq!(v.norm(), 0.);
        assert!(v.reversed().is_empty());
        assert_eq!(Vector::new(3, 7u8).into_array(), Array::from_elem(3, 7u8));
    }

    #[test]
    fn formats_like_its_array() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        assert_eq!(v.to_string(), v.array.to_string());
        assert_eq!(format!("{:?}", v), format!("{:?}", v.array));
    }
}
