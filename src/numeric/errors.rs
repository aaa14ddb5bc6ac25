// ============================================================================
// Numeric Errors
// Error types for fixed-point arithmetic and conversions
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors from checked fixed-point arithmetic and conversions.
///
/// The wrapping operators never produce these; they come from the
/// `checked_*` and `try_*` methods, where a result that leaves the
/// two's-complement range of N bits is reported instead of wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericError {
    /// Raw result above `MAX_RAW`, i.e. 2^(N-1) - 1
    Overflow,
    /// Raw result below `MIN_RAW`, i.e. -2^(N-1)
    Underflow,
    /// Divisor is zero, for fixed-point and float kernels alike
    DivisionByZero,
    /// The value has no exact decimal form at this scale
    PrecisionLoss,
    /// A NaN float, or text that is not a number
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "overflow: result above the largest representable value")
            },
            NumericError::Underflow => {
                write!(f, "underflow: result below the smallest representable value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::PrecisionLoss => write!(f, "value has no exact decimal form"),
            NumericError::InvalidInput => write!(f, "input is not a number"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result of a checked numeric operation
pub type NumericResult<T> = Result<T, NumericError>;
