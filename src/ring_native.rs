//! Zero-memory ring-operation objects for integer types native to Rust
//! (and one arbitrary-precision variant backed by `num-bigint`).
//!
//! To give the engine a concrete ring to run over, define a zero-sized
//! struct `R` that implements [`Semiring`]/[`Ring`]/[`IntegerRing`] and pass
//! it (or a reference to it) wherever a ring parameter is expected. The
//! objects defined here use zero memory at runtime; the ring "instance" is
//! only a type-level marker.

use crate::ring::{IntegerRing, Ring, Semiring};
use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::marker::PhantomData;

//----------------------------------------------------------
//  NATIVE INTEGER RINGS (i32, i64, i128, ...)
//----------------------------------------------------------

/// Ring operations for any signed integer type native to Rust.
///
/// # Examples
///
/// ```
/// use fullcone::ring::{Semiring, Ring, IntegerRing};
/// use fullcone::ring_native::NativeIntegerRing;
///
/// let ring = NativeIntegerRing::<i64>::new();
/// assert_eq!(ring.add(&2, &3), 5);
/// assert_eq!(ring.subtract(&2, &3), -1);
/// assert_eq!(ring.gcd(&12, &18), 6);
/// assert_eq!(ring.sign(&-7), -1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeIntegerRing<Element> {
    phantom: PhantomData<Element>,
}

impl<Element> NativeIntegerRing<Element> {
    pub fn new() -> Self {
        NativeIntegerRing {
            phantom: PhantomData,
        }
    }
}

macro_rules! impl_native_integer_ring {
    ($t:ty) => {
        impl Semiring<$t> for NativeIntegerRing<$t> {
            fn is_0(&self, x: &$t) -> bool {
                *x == 0
            }
            fn is_1(&self, x: &$t) -> bool {
                *x == 1
            }
            fn zero(&self) -> $t {
                0
            }
            fn one(&self) -> $t {
                1
            }
            fn add(&self, x: &$t, y: &$t) -> $t {
                x + y
            }
            fn multiply(&self, x: &$t, y: &$t) -> $t {
                x * y
            }
        }

        impl Ring<$t> for NativeIntegerRing<$t> {
            fn subtract(&self, x: &$t, y: &$t) -> $t {
                x - y
            }
            fn negate(&self, x: &$t) -> $t {
                -x
            }
            fn compare(&self, x: &$t, y: &$t) -> Ordering {
                x.cmp(y)
            }
        }

        impl IntegerRing<$t> for NativeIntegerRing<$t> {
            fn sign(&self, x: &$t) -> i32 {
                match *x {
                    v if v > 0 => 1,
                    v if v < 0 => -1,
                    _ => 0,
                }
            }
            fn rem_euclid(&self, x: &$t, m: &$t) -> $t {
                x.rem_euclid(*m)
            }
            fn gcd(&self, x: &$t, y: &$t) -> $t {
                x.gcd(y)
            }
            fn to_f64(&self, x: &$t) -> f64 {
                *x as f64
            }
            fn from_i64(&self, x: i64) -> $t {
                x as $t
            }
            fn div_exact(&self, x: &$t, y: &$t) -> $t {
                x / y
            }
        }
    };
}

impl_native_integer_ring!(i32);
impl_native_integer_ring!(i64);
impl_native_integer_ring!(i128);

//----------------------------------------------------------
//  ARBITRARY-PRECISION RING (num_bigint::BigInt)
//----------------------------------------------------------

/// Ring operations for [`BigInt`]. Instantiating the engine with this ring
/// instead of [`NativeIntegerRing`] trades speed for a hard guarantee that
/// no pivot, determinant, or reduction step can overflow; it's the
/// fallback a caller reaches for after a [`crate::error::ConeError::Arithmetic`]
/// from the fixed-width path.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntRing;

impl BigIntRing {
    pub fn new() -> Self {
        BigIntRing
    }
}

impl Semiring<BigInt> for BigIntRing {
    fn is_0(&self, x: &BigInt) -> bool {
        x.is_zero()
    }
    fn is_1(&self, x: &BigInt) -> bool {
        x.is_one()
    }
    fn zero(&self) -> BigInt {
        BigInt::zero()
    }
    fn one(&self) -> BigInt {
        BigInt::one()
    }
    fn add(&self, x: &BigInt, y: &BigInt) -> BigInt {
        x + y
    }
    fn multiply(&self, x: &BigInt, y: &BigInt) -> BigInt {
        x * y
    }
}

impl Ring<BigInt> for BigIntRing {
    fn subtract(&self, x: &BigInt, y: &BigInt) -> BigInt {
        x - y
    }
    fn negate(&self, x: &BigInt) -> BigInt {
        -x
    }
    fn compare(&self, x: &BigInt, y: &BigInt) -> Ordering {
        x.cmp(y)
    }
}

impl IntegerRing<BigInt> for BigIntRing {
    fn sign(&self, x: &BigInt) -> i32 {
        if x.is_positive() {
            1
        } else if x.is_negative() {
            -1
        } else {
            0
        }
    }
    fn rem_euclid(&self, x: &BigInt, m: &BigInt) -> BigInt {
        x.mod_floor(m)
    }
    fn gcd(&self, x: &BigInt, y: &BigInt) -> BigInt {
        x.gcd(y)
    }
    fn to_f64(&self, x: &BigInt) -> f64 {
        x.to_f64().unwrap_or(f64::INFINITY)
    }
    fn from_i64(&self, x: i64) -> BigInt {
        BigInt::from(x)
    }
    fn div_exact(&self, x: &BigInt, y: &BigInt) -> BigInt {
        x / y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_ring_i128_matches_i64_on_small_values() {
        let r64 = NativeIntegerRing::<i64>::new();
        let r128 = NativeIntegerRing::<i128>::new();
        assert_eq!(r64.gcd(&12, &18) as i128, r128.gcd(&12, &18));
    }

    #[test]
    fn bigint_ring_basic_ops() {
        let ring = BigIntRing::new();
        let a = BigInt::from(6);
        let b = BigInt::from(9);
        assert_eq!(ring.add(&a, &b), BigInt::from(15));
        assert_eq!(ring.gcd(&a, &b), BigInt::from(3));
        assert_eq!(ring.sign(&ring.negate(&a)), -1);
    }
}
