// ============================================================================
// Type Selection
// Simulation roles and the resolved index triple
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three independently chosen type slots of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// Particle quantity (pressure / density) type, `--p-type`
    Quantity,
    /// Velocity type, `--v-type`
    Velocity,
    /// Velocity flow type, `--v-flow-type`
    VelocityFlow,
}

impl Role {
    /// All roles in slot order
    pub const ALL: [Role; 3] = [Role::Quantity, Role::Velocity, Role::VelocityFlow];

    /// Slot position (0, 1, 2)
    pub const fn slot(self) -> usize {
        match self {
            Role::Quantity => 0,
            Role::Velocity => 1,
            Role::VelocityFlow => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Quantity => "quantity",
            Role::Velocity => "velocity",
            Role::VelocityFlow => "velocity-flow",
        }
    }

    /// Command line option that selects this role's type
    pub const fn flag(self) -> &'static str {
        match self {
            Role::Quantity => "--p-type",
            Role::Velocity => "--v-type",
            Role::VelocityFlow => "--v-flow-type",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalogue indices for the three roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DispatchTriple {
    pub quantity: usize,
    pub velocity: usize,
    pub velocity_flow: usize,
}

impl DispatchTriple {
    pub const fn new(quantity: usize, velocity: usize, velocity_flow: usize) -> Self {
        Self {
            quantity,
            velocity,
            velocity_flow,
        }
    }

    /// Index for `role`
    pub const fn get(&self, role: Role) -> usize {
        match role {
            Role::Quantity => self.quantity,
            Role::Velocity => self.velocity,
            Role::VelocityFlow => self.velocity_flow,
        }
    }

    /// Indices in slot order
    pub const fn as_array(&self) -> [usize; 3] {
        [self.quantity, self.velocity, self.velocity_flow]
    }
}

impl From<[usize; 3]> for DispatchTriple {
    fn from(indices: [usize; 3]) -> Self {
        Self::new(indices[0], indices[1], indices[2])
    }
}

impl fmt::Display for DispatchTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.quantity, self.velocity, self.velocity_flow
        )
    }
}
