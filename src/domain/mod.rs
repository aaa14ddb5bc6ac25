// ============================================================================
// Domain Models Module
// Type descriptors, the catalogue, role selection and the field grid
// ============================================================================

pub mod catalogue;
pub mod config;
pub mod descriptor;
pub mod field;
pub mod selection;

pub use catalogue::{Catalogue, NameConflict};
pub use config::RunConfig;
pub use descriptor::{ParseTypeError, TypeDescriptor, TypeKind};
pub use field::{Field, FieldDimensions, FieldError, DEFAULT_COLS, DEFAULT_ROWS};
pub use selection::{DispatchTriple, Role};
