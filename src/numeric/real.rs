// ============================================================================
// Real Number Contract
// The numeric interface a generic simulation kernel is written against
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::fixed_point::FixedPoint;
use super::storage::{Storage, StorageKind};
use crate::domain::TypeDescriptor;
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A registered numeric representation.
///
/// Implemented for `f32` (`FLOAT`), `f64` (`DOUBLE`) and every
/// [`FixedPoint`] (`FIXED(N,K)` / `FAST_FIXED(N,K)`). The descriptor is a
/// compile-time constant, so a monomorphized kernel can always report the
/// canonical name of the types it was instantiated with.
pub trait Real:
    Copy
    + Default
    + PartialOrd
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Catalogue descriptor of this representation
    const DESCRIPTOR: TypeDescriptor;

    fn zero() -> Self;

    fn one() -> Self;

    /// Convert from f64 (nearest, saturating for fixed-point).
    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;

    /// Convert from an integer.
    fn from_int(value: i64) -> Self;

    /// Division that reports a zero divisor instead of producing infinity.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    fn checked_div(self, rhs: Self) -> NumericResult<Self>;

    /// Canonical catalogue name (`FLOAT`, `FIXED(32,16)`, ...).
    fn type_name() -> String {
        Self::DESCRIPTOR.name()
    }
}

impl Real for f32 {
    const DESCRIPTOR: TypeDescriptor = TypeDescriptor::float();

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_int(value: i64) -> Self {
        value as f32
    }

    #[inline]
    fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs == 0.0 {
            Err(NumericError::DivisionByZero)
        } else {
            Ok(self / rhs)
        }
    }
}

impl Real for f64 {
    const DESCRIPTOR: TypeDescriptor = TypeDescriptor::double();

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_int(value: i64) -> Self {
        value as f64
    }

    #[inline]
    fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs == 0.0 {
            Err(NumericError::DivisionByZero)
        } else {
            Ok(self / rhs)
        }
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Real for FixedPoint<N, K, S> {
    const DESCRIPTOR: TypeDescriptor = match S::KIND {
        StorageKind::Exact => TypeDescriptor::fixed(N, K),
        StorageKind::Fast => TypeDescriptor::fast_fixed(N, K),
    };

    #[inline]
    fn zero() -> Self {
        FixedPoint::zero()
    }

    #[inline]
    fn one() -> Self {
        FixedPoint::one()
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        FixedPoint::from_f64(value)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        FixedPoint::to_f64(self)
    }

    #[inline]
    fn from_int(value: i64) -> Self {
        FixedPoint::from_int(value)
    }

    #[inline]
    fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        FixedPoint::checked_div(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{FastFixed, Fixed};

    fn halve<T: Real>(value: T) -> NumericResult<T> {
        value.checked_div(T::from_int(2))
    }

    #[test]
    fn test_type_names() {
        assert_eq!(f32::type_name(), "FLOAT");
        assert_eq!(f64::type_name(), "DOUBLE");
        assert_eq!(Fixed::<32, 16>::type_name(), "FIXED(32,16)");
        assert_eq!(FastFixed::<64, 32>::type_name(), "FAST_FIXED(64,32)");
    }

    #[test]
    fn test_generic_arithmetic() {
        assert_eq!(halve(7.0f32).unwrap(), 3.5);
        assert_eq!(halve(7.0f64).unwrap(), 3.5);
        assert_eq!(halve(Fixed::<32, 16>::from_int(7)).unwrap().to_f64(), 3.5);
    }

    #[test]
    fn test_checked_div_by_zero_is_uniform() {
        assert_eq!(1.0f32.checked_div(0.0), Err(NumericError::DivisionByZero));
        assert_eq!(1.0f64.checked_div(0.0), Err(NumericError::DivisionByZero));
        assert_eq!(
            Real::checked_div(Fixed::<16, 8>::one(), Fixed::<16, 8>::zero()),
            Err(NumericError::DivisionByZero)
        );
    }
}
