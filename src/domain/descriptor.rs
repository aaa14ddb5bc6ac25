// ============================================================================
// Type Descriptor
// Metadata and canonical naming for one registered numeric representation
// ============================================================================

use crate::numeric::{StorageKind, SUPPORTED_WIDTHS};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Kind
// ============================================================================

/// The family a registered representation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeKind {
    /// Built-in single precision float (`FLOAT`)
    Float,

    /// Built-in double precision float (`DOUBLE`)
    Double,

    /// Fixed-point on an exactly N-bit integer (`FIXED(N,K)`)
    FixedExact {
        /// Total bit width N
        bits: u32,
        /// Fractional bit count K
        frac_bits: u32,
    },

    /// Fixed-point on the fastest integer with at least N bits (`FAST_FIXED(N,K)`)
    FixedFast {
        /// Total bit width N
        bits: u32,
        /// Fractional bit count K
        frac_bits: u32,
    },
}

// ============================================================================
// Type Descriptor
// ============================================================================

/// Descriptor of one registered numeric representation.
///
/// Descriptors are compile-time constants (see [`crate::numeric::Real::DESCRIPTOR`]);
/// the canonical name is derived from the kind, so two descriptors with the
/// same kind always share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDescriptor {
    kind: TypeKind,
}

impl TypeDescriptor {
    /// `FLOAT`
    pub const fn float() -> Self {
        Self {
            kind: TypeKind::Float,
        }
    }

    /// `DOUBLE`
    pub const fn double() -> Self {
        Self {
            kind: TypeKind::Double,
        }
    }

    /// `FIXED(bits,frac_bits)`
    pub const fn fixed(bits: u32, frac_bits: u32) -> Self {
        Self {
            kind: TypeKind::FixedExact { bits, frac_bits },
        }
    }

    /// `FAST_FIXED(bits,frac_bits)`
    pub const fn fast_fixed(bits: u32, frac_bits: u32) -> Self {
        Self {
            kind: TypeKind::FixedFast { bits, frac_bits },
        }
    }

    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Total bit width N (fixed-point kinds only)
    pub const fn total_bits(&self) -> Option<u32> {
        match self.kind {
            TypeKind::FixedExact { bits, .. } | TypeKind::FixedFast { bits, .. } => Some(bits),
            _ => None,
        }
    }

    /// Fractional bit count K (fixed-point kinds only)
    pub const fn fractional_bits(&self) -> Option<u32> {
        match self.kind {
            TypeKind::FixedExact { frac_bits, .. } | TypeKind::FixedFast { frac_bits, .. } => {
                Some(frac_bits)
            },
            _ => None,
        }
    }

    /// Storage strategy (fixed-point kinds only)
    pub const fn storage(&self) -> Option<StorageKind> {
        match self.kind {
            TypeKind::FixedExact { .. } => Some(StorageKind::Exact),
            TypeKind::FixedFast { .. } => Some(StorageKind::Fast),
            _ => None,
        }
    }

    pub const fn is_fixed_point(&self) -> bool {
        self.storage().is_some()
    }

    /// Canonical display name, e.g. `FIXED(32,16)`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// One line of human-readable description for help output.
    pub fn summary(&self) -> String {
        match self.kind {
            TypeKind::Float => "Built-in float".to_string(),
            TypeKind::Double => "Built-in double".to_string(),
            TypeKind::FixedExact { bits, frac_bits } => {
                format!("Fixed point number represented as `int{bits}_t` divided by 2^{frac_bits}")
            },
            TypeKind::FixedFast { bits, frac_bits } => format!(
                "Fixed point number represented as `int_fast{bits}_t` divided by 2^{frac_bits}"
            ),
        }
    }

    /// Check the fixed-point parameters: N must be a supported width and
    /// `0 < K <= N`.
    pub fn validate(&self) -> Result<(), ParseTypeError> {
        if let (Some(bits), Some(frac_bits)) = (self.total_bits(), self.fractional_bits()) {
            if !SUPPORTED_WIDTHS.contains(&bits) {
                return Err(ParseTypeError::UnsupportedWidth(bits));
            }
            if frac_bits == 0 || frac_bits > bits {
                return Err(ParseTypeError::InvalidFractionalBits { bits, frac_bits });
            }
        }
        Ok(())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeKind::Float => write!(f, "FLOAT"),
            TypeKind::Double => write!(f, "DOUBLE"),
            TypeKind::FixedExact { bits, frac_bits } => write!(f, "FIXED({},{})", bits, frac_bits),
            TypeKind::FixedFast { bits, frac_bits } => {
                write!(f, "FAST_FIXED({},{})", bits, frac_bits)
            },
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Errors from parsing a type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTypeError {
    /// Input was empty or whitespace only
    Empty,
    /// Name is not FLOAT, DOUBLE, FIXED(..) or FAST_FIXED(..)
    UnknownKeyword(String),
    /// Fixed-point arguments are missing or not two integers
    MalformedArguments(String),
    /// N is not one of the supported widths
    UnsupportedWidth(u32),
    /// K is zero or larger than N
    InvalidFractionalBits { bits: u32, frac_bits: u32 },
}

impl fmt::Display for ParseTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTypeError::Empty => write!(f, "empty type name"),
            ParseTypeError::UnknownKeyword(name) => write!(f, "unknown type keyword '{}'", name),
            ParseTypeError::MalformedArguments(args) => {
                write!(f, "malformed fixed-point arguments '{}', expected (N,K)", args)
            },
            ParseTypeError::UnsupportedWidth(bits) => write!(
                f,
                "unsupported bit width {}, expected one of {:?}",
                bits, SUPPORTED_WIDTHS
            ),
            ParseTypeError::InvalidFractionalBits { bits, frac_bits } => write!(
                f,
                "fractional bits {} out of range for width {} (need 0 < K <= N)",
                frac_bits, bits
            ),
        }
    }
}

impl std::error::Error for ParseTypeError {}

impl FromStr for TypeDescriptor {
    type Err = ParseTypeError;

    /// Parse a type name.
    ///
    /// Case-insensitive and whitespace-tolerant. `FIXED_FAST(N,K)` is
    /// accepted as an alias for `FAST_FIXED(N,K)`.
    ///
    /// # Examples
    /// - "FLOAT" -> FLOAT
    /// - "fixed( 32, 16 )" -> FIXED(32,16)
    /// - "FIXED_FAST(64,32)" -> FAST_FIXED(64,32)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if compact.is_empty() {
            return Err(ParseTypeError::Empty);
        }

        match compact.as_str() {
            "FLOAT" => return Ok(Self::float()),
            "DOUBLE" => return Ok(Self::double()),
            _ => {},
        }

        let (keyword, args) = match compact.find('(') {
            Some(pos) => (&compact[..pos], &compact[pos..]),
            None => return Err(ParseTypeError::UnknownKeyword(compact)),
        };

        let constructor: fn(u32, u32) -> Self = match keyword {
            "FIXED" => Self::fixed,
            "FAST_FIXED" | "FIXED_FAST" => Self::fast_fixed,
            _ => return Err(ParseTypeError::UnknownKeyword(keyword.to_string())),
        };

        let inner = args
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseTypeError::MalformedArguments(args.to_string()))?;

        let mut parts = inner.split(',');
        let (bits, frac_bits) = match (parts.next(), parts.next(), parts.next()) {
            (Some(n), Some(k), None) => {
                let bits = n
                    .parse()
                    .map_err(|_| ParseTypeError::MalformedArguments(args.to_string()))?;
                let frac_bits = k
                    .parse()
                    .map_err(|_| ParseTypeError::MalformedArguments(args.to_string()))?;
                (bits, frac_bits)
            },
            _ => return Err(ParseTypeError::MalformedArguments(args.to_string())),
        };

        let descriptor = constructor(bits, frac_bits);
        descriptor.validate()?;
        Ok(descriptor)
    }
}
