//! Traits for the coefficient ring the enumeration engine runs over.
//!
//! The engine in [`crate::full_cone`] is generic over the integer
//! representation it uses for generator coordinates, facet normals, and
//! volumes. This mirrors the "templated numeric type" design of the
//! reference implementation: every algorithmic routine in `pivot`,
//! `simplex`, and `reducer` is parametric over a single trait rather than
//! hard-coded to a fixed-width or arbitrary-precision integer.
//!
//! # Why a ring trait
//!
//! A support hyperplane pivot only ever adds, subtracts, multiplies,
//! compares, and takes the gcd of coefficients. A reimplementation that
//! hard-codes `i64` would have to be rewritten from scratch the day a user
//! needs `i128` or arbitrary precision. Defining the operations as a trait
//! lets [`crate::ring_native::NativeRing`] and an arbitrary-precision
//! wrapper both satisfy the same contract.

use auto_impl::auto_impl; // auto-implement this trait on references to objects that implement it

//  ---------------------------------------------------------------------------
//  THE SEMIRING TRAIT
//  ---------------------------------------------------------------------------

/// Basic operations for semirings.
#[auto_impl(&)]
pub trait Semiring<Element> {
    /// Return `true` iff `x` is the additive identity.
    fn is_0(&self, x: &Element) -> bool;
    /// Return `true` iff `x` is the multiplicative identity.
    fn is_1(&self, x: &Element) -> bool;
    /// The additive identity.
    fn zero(&self) -> Element;
    /// The multiplicative identity.
    fn one(&self) -> Element;

    /// Add.
    fn add(&self, x: &Element, y: &Element) -> Element;
    /// Multiply.
    fn multiply(&self, x: &Element, y: &Element) -> Element;
}

//  ---------------------------------------------------------------------------
//  THE RING TRAIT
//  ---------------------------------------------------------------------------

/// Basic operations for **unital commutative** rings.
pub trait Ring<Element>: Semiring<Element> {
    /// Subtract `y` from `x`.
    fn subtract(&self, x: &Element, y: &Element) -> Element;
    /// Reverse the sign of `x`.
    fn negate(&self, x: &Element) -> Element;
    /// Three-way comparison. The engine needs this for sign classification
    /// during a pivot (§4.1) and for ordering candidates in the reducer
    /// (§4.5); it is kept separate from `PartialOrd` so ring implementors
    /// that wrap non-`Ord` element types (e.g. a modular residue) can still
    /// supply a total order over the signed integers they represent.
    fn compare(&self, x: &Element, y: &Element) -> std::cmp::Ordering;
}

//  ---------------------------------------------------------------------------
//  THE INTEGER RING TRAIT
//  ---------------------------------------------------------------------------

/// A [`Ring`] with the extra structure the enumeration engine needs from an
/// integer type specifically: sign, remainder, gcd, and a lossy cast to
/// `f64` for heuristics (norm estimates, thresholds) that don't need exact
/// arithmetic.
pub trait IntegerRing<Element>: Ring<Element> {
    /// `-1`, `0`, or `1`.
    fn sign(&self, x: &Element) -> i32;
    /// Euclidean remainder of `x` modulo `m` (`m > 0`), always in `[0, m)`.
    fn rem_euclid(&self, x: &Element, m: &Element) -> Element;
    /// Greatest common divisor, always non-negative.
    fn gcd(&self, x: &Element, y: &Element) -> Element;
    /// Lossy cast, used only for heuristics (never for results the engine
    /// asserts are exact).
    fn to_f64(&self, x: &Element) -> f64;
    /// Build an element from an `i64` literal (used for small constants
    /// like `1`, `-1`, generator indices cast into the ring).
    fn from_i64(&self, x: i64) -> Element;
    /// Exact division. Callers must only invoke this when `y` is known to
    /// divide `x` (e.g. dividing by a gcd); behavior is unspecified
    /// otherwise.
    fn div_exact(&self, x: &Element, y: &Element) -> Element;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring_native::NativeIntegerRing;

    #[test]
    fn semiring_laws_hold_for_i64() {
        let ring = NativeIntegerRing::<i64>::new();
        assert_eq!(ring.add(&2, &3), 5);
        assert_eq!(ring.multiply(&2, &3), 6);
        assert!(ring.is_0(&0));
        assert!(ring.is_1(&1));
        assert_eq!(ring.zero(), 0);
        assert_eq!(ring.one(), 1);
    }

    #[test]
    fn integer_ring_gcd_and_sign() {
        let ring = NativeIntegerRing::<i64>::new();
        assert_eq!(ring.gcd(&12, &18), 6);
        assert_eq!(ring.gcd(&0, &5), 5);
        assert_eq!(ring.sign(&-4), -1);
        assert_eq!(ring.sign(&0), 0);
        assert_eq!(ring.sign(&4), 1);
    }
}
