// ============================================================================
// Run Configuration
// Type selection and field configuration for one simulation run
// ============================================================================

use super::field::FieldDimensions;
use super::selection::Role;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything a run needs before dispatch: one type name per role and the
/// field to load.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunConfig {
    /// Type name for the particle quantity (e.g. "FIXED(32,16)")
    pub quantity_type: String,

    /// Type name for velocities
    pub velocity_type: String,

    /// Type name for velocity flow
    pub velocity_flow_type: String,

    /// Optional: field layout file
    /// None means a blank grid of `dimensions`
    pub field_path: Option<PathBuf>,

    /// Grid size the field is read into
    pub dimensions: FieldDimensions,
}

impl RunConfig {
    /// Create a new configuration with required parameters
    pub fn new(
        quantity_type: impl Into<String>,
        velocity_type: impl Into<String>,
        velocity_flow_type: impl Into<String>,
    ) -> Self {
        Self {
            quantity_type: quantity_type.into(),
            velocity_type: velocity_type.into(),
            velocity_flow_type: velocity_flow_type.into(),
            field_path: None,
            dimensions: FieldDimensions::default(),
        }
    }

    /// Builder method: Set the field file
    pub fn with_field_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    /// Builder method: Set the grid size
    pub fn with_dimensions(mut self, dimensions: FieldDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Type name configured for `role`
    pub fn type_name(&self, role: Role) -> &str {
        match role {
            Role::Quantity => &self.quantity_type,
            Role::Velocity => &self.velocity_type,
            Role::VelocityFlow => &self.velocity_flow_type,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for role in Role::ALL {
            if self.type_name(role).trim().is_empty() {
                return Err(format!("{} type name cannot be empty", role));
            }
        }

        if self.dimensions.rows == 0 || self.dimensions.cols == 0 {
            return Err("Field dimensions must be positive".to_string());
        }

        if self.dimensions.cell_count().is_none() {
            return Err(format!("Field of {} cells is too large", self.dimensions));
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl RunConfig {
    /// Same type for all three roles
    pub fn uniform(type_name: impl Into<String>) -> Self {
        let name = type_name.into();
        Self::new(name.clone(), name.clone(), name)
    }

    /// DOUBLE everywhere - the reference run other types are compared against
    pub fn float_baseline() -> Self {
        Self::uniform("DOUBLE")
    }
}
