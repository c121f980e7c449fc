use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{Array, Element};

impl<A: Element> Array<A> {
    /// A test for equality that uses the elementwise absolute difference to compute the
    /// approximate equality of two arrays.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn abs_diff_eq<B>(&self, other: &Array<B>, epsilon: A::Epsilon) -> bool
    where
        A: AbsDiffEq<B>,
        A::Epsilon: Clone,
        B: Element,
    {
        <Self as AbsDiffEq<_>>::abs_diff_eq(self, other, epsilon)
    }

    /// A test for equality that uses an elementwise relative comparison if the values are far
    /// apart; and the absolute difference otherwise.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn relative_eq<B>(&self, other: &Array<B>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool
    where
        A: RelativeEq<B>,
        A::Epsilon: Clone,
        B: Element,
    {
        <Self as RelativeEq<_>>::relative_eq(self, other, epsilon, max_relative)
    }
}

/// Arrays of different shapes are never equal; no broadcasting takes place.
///
/// **Requires crate feature `"approx"`.**
impl<A, B> AbsDiffEq<Array<B>> for Array<A>
where
    A: Element + AbsDiffEq<B>,
    A::Epsilon: Clone,
    B: Element,
{
    type Epsilon = A::Epsilon;

    fn default_epsilon() -> A::Epsilon {
        A::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Array<B>, epsilon: A::Epsilon) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        self.iter()
            .zip(other.iter())
            .all(move |(a, b)| A::abs_diff_eq(&a, &b, epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A, B> RelativeEq<Array<B>> for Array<A>
where
    A: Element + RelativeEq<B>,
    A::Epsilon: Clone,
    B: Element,
{
    fn default_max_relative() -> A::Epsilon {
        A::default_max_relative()
    }

    fn relative_eq(&self, other: &Array<B>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        self.iter()
            .zip(other.iter())
            .all(move |(a, b)| A::relative_eq(&a, &b, epsilon.clone(), max_relative.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A, B> UlpsEq<Array<B>> for Array<A>
where
    A: Element + UlpsEq<B>,
    A::Epsilon: Clone,
    B: Element,
{
    fn default_max_ulps() -> u32 {
        A::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Array<B>, epsilon: A::Epsilon, max_ulps: u32) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        self.iter()
            .zip(other.iter())
            .all(move |(a, b)| A::ulps_eq(&a, &b, epsilon.clone(), max_ulps))
    }
}
