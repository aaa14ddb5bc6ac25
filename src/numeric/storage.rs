// ============================================================================
// Fixed-Point Storage Strategies
// Backing integer selection for exact-width and fastest-width representations
// ============================================================================
//
// Both strategies store the same N-bit two's-complement value. Every
// arithmetic result is normalised into the N-bit range before it is stored,
// so a `Fast` value never carries bits an `Exact` value could not hold.
// Only the size of the backing integer differs.

use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bit widths a fixed-point type may be instantiated with.
pub const SUPPORTED_WIDTHS: [u32; 4] = [8, 16, 32, 64];

/// Signed integer usable as the raw backing of a fixed-point value.
pub trait RawInt: Copy + Default + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Width of the backing integer in bits
    const BITS: u32;

    /// Widen to i128 (lossless).
    fn to_i128(self) -> i128;

    /// Narrow from i128, keeping the low `BITS` bits.
    fn from_i128_wrapping(value: i128) -> Self;
}

macro_rules! impl_raw_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl RawInt for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_i128_wrapping(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_raw_int!(i8, i16, i32, i64);

/// Which storage strategy a fixed-point type uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StorageKind {
    /// Backing integer is exactly N bits wide (`intN_t`)
    Exact,
    /// Backing integer is the fastest type with at least N bits (`int_fastN_t`)
    Fast,
}

impl StorageKind {
    /// Canonical name prefix (`FIXED` or `FAST_FIXED`).
    pub const fn prefix(self) -> &'static str {
        match self {
            StorageKind::Exact => "FIXED",
            StorageKind::Fast => "FAST_FIXED",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Exact => write!(f, "exact-width"),
            StorageKind::Fast => write!(f, "fastest-width"),
        }
    }
}

/// Marker trait for a storage strategy.
pub trait StorageStrategy: Copy + Default + Debug + Send + Sync + 'static {
    const KIND: StorageKind;
}

/// Storage strategy resolved for a concrete bit width `N`.
///
/// Only the widths in [`SUPPORTED_WIDTHS`] have implementations, so an
/// unsupported width is a compile error rather than a run-time surprise.
pub trait Storage<const N: u32>: StorageStrategy {
    type Raw: RawInt;
}

/// Exact-width storage: `raw` occupies exactly N bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Exact;

/// Fastest-width storage: `raw` occupies the native fast integer for N bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fast;

impl StorageStrategy for Exact {
    const KIND: StorageKind = StorageKind::Exact;
}

impl StorageStrategy for Fast {
    const KIND: StorageKind = StorageKind::Fast;
}

impl Storage<8> for Exact {
    type Raw = i8;
}

impl Storage<16> for Exact {
    type Raw = i16;
}

impl Storage<32> for Exact {
    type Raw = i32;
}

impl Storage<64> for Exact {
    type Raw = i64;
}

// Mirrors int_fast16_t / int_fast32_t: the machine word on 64-bit targets.
#[cfg(target_pointer_width = "64")]
type FastWord = i64;

#[cfg(not(target_pointer_width = "64"))]
type FastWord = i32;

impl Storage<8> for Fast {
    type Raw = i8;
}

impl Storage<16> for Fast {
    type Raw = FastWord;
}

impl Storage<32> for Fast {
    type Raw = FastWord;
}

impl Storage<64> for Fast {
    type Raw = i64;
}

/// Wrap an i128 into the two's-complement range of `bits` bits.
#[inline]
pub(crate) const fn wrap_to_width(value: i128, bits: u32) -> i128 {
    let shift = 128 - bits;
    (value << shift) >> shift
}

/// Smallest value representable in `bits` bits.
#[inline]
pub(crate) const fn min_for_width(bits: u32) -> i128 {
    -(1i128 << (bits - 1))
}

/// Largest value representable in `bits` bits.
#[inline]
pub(crate) const fn max_for_width(bits: u32) -> i128 {
    (1i128 << (bits - 1)) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_bits<S: Storage<N>, const N: u32>() -> u32 {
        <S::Raw as RawInt>::BITS
    }

    #[test]
    fn test_exact_widths_match() {
        assert_eq!(raw_bits::<Exact, 8>(), 8);
        assert_eq!(raw_bits::<Exact, 16>(), 16);
        assert_eq!(raw_bits::<Exact, 32>(), 32);
        assert_eq!(raw_bits::<Exact, 64>(), 64);
    }

    #[test]
    fn test_fast_widths_at_least_n() {
        assert!(raw_bits::<Fast, 8>() >= 8);
        assert!(raw_bits::<Fast, 16>() >= 16);
        assert!(raw_bits::<Fast, 32>() >= 32);
        assert!(raw_bits::<Fast, 64>() >= 64);
    }

    #[test]
    fn test_wrap_to_width() {
        assert_eq!(wrap_to_width(127, 8), 127);
        assert_eq!(wrap_to_width(128, 8), -128);
        assert_eq!(wrap_to_width(-129, 8), 127);
        assert_eq!(wrap_to_width(1 << 40, 32), 0);
        assert_eq!(wrap_to_width(i64::MAX as i128 + 1, 64), i64::MIN as i128);
    }

    #[test]
    fn test_width_bounds() {
        assert_eq!(min_for_width(8), -128);
        assert_eq!(max_for_width(8), 127);
        assert_eq!(min_for_width(64), i64::MIN as i128);
        assert_eq!(max_for_width(64), i64::MAX as i128);
    }

    #[test]
    fn test_storage_kind_prefix() {
        assert_eq!(Exact::KIND.prefix(), "FIXED");
        assert_eq!(Fast::KIND.prefix(), "FAST_FIXED");
        assert_eq!(StorageKind::Fast.to_string(), "fastest-width");
    }
}
