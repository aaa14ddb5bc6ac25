// ============================================================================
// Fixed-Point Number
// Binary fixed-point arithmetic with compile-time width and precision
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::storage::{
    max_for_width, min_for_width, wrap_to_width, Exact, Fast, RawInt, Storage,
};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Binary fixed-point number with compile-time width and precision.
///
/// Represents `raw / 2^K`, where `raw` is an N-bit two's-complement integer
/// held in the backing integer chosen by the storage strategy `S`.
///
/// # Type Parameters
/// - `N`: Total bit width (8, 16, 32 or 64)
/// - `K`: Fractional bits, `0 < K <= N`
/// - `S`: [`Exact`] or [`Fast`] storage
///
/// # Overflow Policy
/// - Operators (`+ - * /`, unary `-`) wrap into the N-bit range.
/// - `checked_*` methods report `Overflow` / `Underflow` instead.
/// - `from_f64` saturates; `try_from_f64` reports the error.
///
/// # Rounding
/// - Construction from floats and decimal strings rounds to nearest, ties
///   away from zero.
/// - Multiplication truncates toward negative infinity.
/// - Division truncates toward zero.
///
/// # Example
/// ```
/// use fluid_dispatch::numeric::Fixed;
///
/// let three = Fixed::<32, 16>::from_int(3);
/// let half = Fixed::<32, 16>::from_f64(0.5);
/// assert_eq!((three + half).raw(), 229_376);
/// assert_eq!((three + half).to_f64(), 3.5);
/// ```
#[repr(transparent)]
pub struct FixedPoint<const N: u32, const K: u32, S: Storage<N>> {
    raw: S::Raw,
    _storage: PhantomData<S>,
}

/// Fixed-point number backed by an exactly N-bit integer.
pub type Fixed<const N: u32, const K: u32> = FixedPoint<N, K, Exact>;

/// Fixed-point number backed by the fastest integer with at least N bits.
pub type FastFixed<const N: u32, const K: u32> = FixedPoint<N, K, Fast>;

impl<const N: u32, const K: u32, S: Storage<N>> FixedPoint<N, K, S> {
    const VALID_PARAMS: () = assert!(K > 0 && K <= N, "fixed-point requires 0 < K <= N");

    /// Total bit width
    pub const BITS: u32 = N;

    /// Fractional bits
    pub const FRAC_BITS: u32 = K;

    /// The scale factor (2^K)
    pub const SCALE: i128 = 1i128 << K;

    /// Smallest raw value
    pub const MIN_RAW: i128 = min_for_width(N);

    /// Largest raw value
    pub const MAX_RAW: i128 = max_for_width(N);

    #[inline]
    fn from_wrapped(raw: i128) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_PARAMS;
        Self {
            raw: S::Raw::from_i128_wrapping(wrap_to_width(raw, N)),
            _storage: PhantomData,
        }
    }

    #[inline]
    fn from_checked(raw: i128) -> NumericResult<Self> {
        if raw > Self::MAX_RAW {
            Err(NumericError::Overflow)
        } else if raw < Self::MIN_RAW {
            Err(NumericError::Underflow)
        } else {
            Ok(Self::from_wrapped(raw))
        }
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a raw scaled value, wrapping it into the N-bit range.
    #[inline]
    pub fn from_raw(raw: i128) -> Self {
        Self::from_wrapped(raw)
    }

    /// Zero
    #[inline]
    pub fn zero() -> Self {
        Self::from_wrapped(0)
    }

    /// One, saturated to `max()` when `K == N` leaves no integer bit.
    #[inline]
    pub fn one() -> Self {
        Self::from_wrapped(Self::SCALE.min(Self::MAX_RAW))
    }

    /// Smallest step between two representable values (raw = 1).
    #[inline]
    pub fn epsilon() -> Self {
        Self::from_wrapped(1)
    }

    /// Minimum representable value
    #[inline]
    pub fn min_value() -> Self {
        Self::from_wrapped(Self::MIN_RAW)
    }

    /// Maximum representable value
    #[inline]
    pub fn max_value() -> Self {
        Self::from_wrapped(Self::MAX_RAW)
    }

    /// Create from an integer, wrapping on overflow.
    #[inline]
    pub fn from_int(value: i64) -> Self {
        Self::from_wrapped((value as i128) << K)
    }

    /// Create from an integer.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the value does not fit in N bits.
    #[inline]
    pub fn try_from_int(value: i64) -> NumericResult<Self> {
        Self::from_checked((value as i128) << K)
    }

    /// Create from a float, rounding to nearest with ties away from zero.
    ///
    /// # Errors
    /// - `InvalidInput` for NaN
    /// - `Overflow` / `Underflow` if the rounded value does not fit in N bits
    pub fn try_from_f64(value: f64) -> NumericResult<Self> {
        if value.is_nan() {
            return Err(NumericError::InvalidInput);
        }

        // Scaling by a power of two is exact, so `round` is the only rounding step.
        let scaled = (value * Self::SCALE as f64).round();
        let limit = (1u128 << (N - 1)) as f64;

        if scaled >= limit {
            Err(NumericError::Overflow)
        } else if scaled < -limit {
            Err(NumericError::Underflow)
        } else {
            Ok(Self::from_wrapped(scaled as i128))
        }
    }

    /// Create from a float, saturating at the range limits. NaN maps to zero.
    pub fn from_f64(value: f64) -> Self {
        match Self::try_from_f64(value) {
            Ok(v) => v,
            Err(NumericError::Overflow) => Self::max_value(),
            Err(NumericError::Underflow) => Self::min_value(),
            Err(_) => Self::zero(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The raw scaled value (value × 2^K), widened to i128.
    #[inline]
    pub fn raw(self) -> i128 {
        self.raw.to_i128()
    }

    /// The raw value in its backing integer.
    #[inline]
    pub fn raw_value(self) -> S::Raw {
        self.raw
    }

    /// Convert to f64 with a single rounding step.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.raw() as f64 / Self::SCALE as f64
    }

    /// Convert to f32 with a single rounding step.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.raw() as f32 / Self::SCALE as f32
    }

    /// Integer part, rounded toward negative infinity.
    #[inline]
    pub fn floor_int(self) -> i128 {
        self.raw() >> K
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw() == 0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.raw() > 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.raw() < 0
    }

    /// Get absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` for the minimum value, which has no positive twin.
    #[inline]
    pub fn abs(self) -> NumericResult<Self> {
        Self::from_checked(self.raw().abs())
    }

    // ========================================================================
    // Checked Arithmetic
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        Self::from_checked(self.raw() + rhs.raw())
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        Self::from_checked(self.raw() - rhs.raw())
    }

    /// Checked multiplication.
    ///
    /// Operands are widened to i128 (at least 2N bits), multiplied, then
    /// arithmetic-shifted right by K bits.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        Self::from_checked((self.raw() * rhs.raw()) >> K)
    }

    /// Checked division.
    ///
    /// The numerator is widened by K bits before the integer division.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Overflow` or `Underflow` if the quotient is out of range
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let quotient = (self.raw() << K)
            .checked_div(rhs.raw())
            .ok_or(NumericError::Overflow)?;
        Self::from_checked(quotient)
    }

    // ========================================================================
    // Wrapping Arithmetic
    // ========================================================================

    #[inline]
    pub fn wrapping_add(self, rhs: Self) -> Self {
        Self::from_wrapped(self.raw() + rhs.raw())
    }

    #[inline]
    pub fn wrapping_sub(self, rhs: Self) -> Self {
        Self::from_wrapped(self.raw() - rhs.raw())
    }

    #[inline]
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        Self::from_wrapped((self.raw() * rhs.raw()) >> K)
    }

    /// Wrapping division.
    ///
    /// # Panics
    /// Panics on division by zero.
    #[inline]
    pub fn wrapping_div(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            panic!("{}", NumericError::DivisionByZero);
        }
        Self::from_wrapped((self.raw() << K).wrapping_div(rhs.raw()))
    }

    // ========================================================================
    // Rescaling
    // ========================================================================

    /// Convert to another parameterisation.
    ///
    /// Dropped fractional bits are truncated toward negative infinity and the
    /// result wraps into the target width. Values of different `(N, K)` are
    /// never compared implicitly; rescale one side first.
    pub fn rescale<const N2: u32, const K2: u32, S2: Storage<N2>>(self) -> FixedPoint<N2, K2, S2> {
        let raw = if K2 >= K {
            self.raw() << (K2 - K)
        } else {
            self.raw() >> (K - K2)
        };
        FixedPoint::<N2, K2, S2>::from_raw(raw)
    }

    /// Same value with the other storage strategy.
    #[inline]
    pub fn with_storage<S2: Storage<N>>(self) -> FixedPoint<N, K, S2> {
        FixedPoint::<N, K, S2>::from_raw(self.raw())
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<const N: u32, const K: u32, S: Storage<N>> Clone for FixedPoint<N, K, S> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Copy for FixedPoint<N, K, S> {}

impl<const N: u32, const K: u32, S: Storage<N>> Default for FixedPoint<N, K, S> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> PartialEq for FixedPoint<N, K, S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Eq for FixedPoint<N, K, S> {}

impl<const N: u32, const K: u32, S: Storage<N>> PartialOrd for FixedPoint<N, K, S> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Ord for FixedPoint<N, K, S> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Hash for FixedPoint<N, K, S> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw().hash(state);
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Neg for FixedPoint<N, K, S> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::from_wrapped(-self.raw())
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Add for FixedPoint<N, K, S> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.wrapping_add(rhs)
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Sub for FixedPoint<N, K, S> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.wrapping_sub(rhs)
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> Mul for FixedPoint<N, K, S> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.wrapping_mul(rhs)
    }
}

// Panics on a zero divisor; use checked_div where the divisor is untrusted
impl<const N: u32, const K: u32, S: Storage<N>> Div for FixedPoint<N, K, S> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.wrapping_div(rhs)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<const N: u32, const K: u32, S: Storage<N>> fmt::Debug for FixedPoint<N, K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{})({}, raw={})",
            S::KIND.prefix(),
            N,
            K,
            self,
            self.raw()
        )
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> fmt::Display for FixedPoint<N, K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

// ============================================================================
// Conversion to and from rust_decimal
// ============================================================================

impl<const N: u32, const K: u32, S: Storage<N>> FixedPoint<N, K, S> {
    /// Exact decimal value (`raw × 5^K / 10^K`).
    ///
    /// # Errors
    /// Returns `PrecisionLoss` if the exact value needs more than 28 decimal
    /// places or a 96-bit mantissa.
    pub fn to_decimal(self) -> NumericResult<rust_decimal::Decimal> {
        let mantissa = 5i128
            .checked_pow(K)
            .and_then(|factor| self.raw().checked_mul(factor))
            .ok_or(NumericError::PrecisionLoss)?;
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, K)
            .map_err(|_| NumericError::PrecisionLoss)
    }

    /// Convert from a decimal, rounding to nearest with ties away from zero.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the value does not fit in N bits.
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        use rust_decimal::prelude::ToPrimitive;
        use rust_decimal::RoundingStrategy;

        let overflow = if d.is_sign_negative() {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        };

        let scale = rust_decimal::Decimal::from_i128_with_scale(Self::SCALE, 0);
        let scaled = d
            .checked_mul(scale)
            .ok_or(overflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let raw = scaled.to_i128().ok_or(overflow)?;
        Self::from_checked(raw)
    }
}

impl<const N: u32, const K: u32, S: Storage<N>> std::str::FromStr for FixedPoint<N, K, S> {
    type Err = NumericError;

    /// Parse from a decimal string such as `"3.5"` or `"-0.125"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = rust_decimal::Decimal::from_str_exact(s.trim())
            .map_err(|_| NumericError::InvalidInput)?;
        Self::from_decimal(d)
    }
}

// ============================================================================
// Tests
// ============================================================================
