// ============================================================================
// Dispatch Errors
// Error types for name resolution, dispatch and run preparation
// ============================================================================

use crate::domain::{FieldError, NameConflict, Role};
use crate::numeric::NumericError;
use std::fmt;
use std::path::PathBuf;

/// Errors raised while turning three type names into a running specialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A role's name matches no catalogue entry ("misspelled")
    UnknownTypeName { role: Role, name: String },

    /// An index handed to the dispatcher is outside the catalogue
    InvalidTypeIndex {
        role: Role,
        index: usize,
        catalogue_size: usize,
    },

    /// All three names are valid but that combination was not built
    UnbuiltCombination {
        quantity: String,
        velocity: String,
        velocity_flow: String,
    },

    /// The catalogue registers the same name twice (strict validation only)
    DuplicateTypeName {
        name: String,
        first: usize,
        duplicate: usize,
    },

    /// Arithmetic failure, e.g. a fixed-point division by zero
    Numeric(NumericError),

    /// The field file could not be read
    FieldIo { path: PathBuf, message: String },

    /// The field file does not fit the grid
    FieldShape { row: usize, length: usize, max: usize },

    /// The run configuration is invalid
    InvalidConfig(String),
}

impl DispatchError {
    /// Process exit status for this error.
    ///
    /// - 2: unknown type name
    /// - 3: valid names, combination not built
    /// - 1: everything else
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::UnknownTypeName { .. } => 2,
            DispatchError::UnbuiltCombination { .. } => 3,
            _ => 1,
        }
    }

    /// Role to blame, when the failure concerns a single slot
    pub fn role(&self) -> Option<Role> {
        match self {
            DispatchError::UnknownTypeName { role, .. }
            | DispatchError::InvalidTypeIndex { role, .. } => Some(*role),
            _ => None,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownTypeName { role, name } => write!(
                f,
                "unknown {} type '{}' ({}): no registered type has this name",
                role,
                name,
                role.flag()
            ),
            DispatchError::InvalidTypeIndex {
                role,
                index,
                catalogue_size,
            } => write!(
                f,
                "invalid {} type index {}: catalogue has {} types",
                role, index, catalogue_size
            ),
            DispatchError::UnbuiltCombination {
                quantity,
                velocity,
                velocity_flow,
            } => write!(
                f,
                "combination ({}, {}, {}) is valid but was not built into this binary",
                quantity, velocity, velocity_flow
            ),
            DispatchError::DuplicateTypeName {
                name,
                first,
                duplicate,
            } => write!(
                f,
                "type '{}' registered twice (indices {} and {})",
                name, first, duplicate
            ),
            DispatchError::Numeric(e) => write!(f, "numeric error: {}", e),
            DispatchError::FieldIo { path, message } => {
                write!(f, "cannot read field '{}': {}", path.display(), message)
            },
            DispatchError::FieldShape { row, length, max } => write!(
                f,
                "field row {} has {} characters, at most {} allowed",
                row, length, max
            ),
            DispatchError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Numeric(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NumericError> for DispatchError {
    fn from(e: NumericError) -> Self {
        DispatchError::Numeric(e)
    }
}

impl From<FieldError> for DispatchError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io { path, message } => DispatchError::FieldIo { path, message },
            FieldError::RowTooLong { row, length, max } => {
                DispatchError::FieldShape { row, length, max }
            },
            FieldError::TooLarge { dimensions } => DispatchError::InvalidConfig(
                FieldError::TooLarge { dimensions }.to_string(),
            ),
        }
    }
}

impl From<NameConflict> for DispatchError {
    fn from(conflict: NameConflict) -> Self {
        DispatchError::DuplicateTypeName {
            name: conflict.name,
            first: conflict.first,
            duplicate: conflict.duplicate,
        }
    }
}

/// Result type alias for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;
