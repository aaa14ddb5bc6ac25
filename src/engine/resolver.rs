// ============================================================================
// Name Resolver
// Maps user-supplied type names to catalogue indices
// ============================================================================

use super::errors::{DispatchError, DispatchResult};
use crate::domain::{Catalogue, DispatchTriple, Role, TypeDescriptor};

/// Resolves type names against a catalogue, one role at a time.
///
/// Lookup order:
/// 1. exact canonical name (`FIXED(32,16)`)
/// 2. the name parsed and re-rendered canonically (`fixed(32, 16)`,
///    `FIXED_FAST(64,32)`)
///
/// A name that matches neither way is an `UnknownTypeName` for its role;
/// it never falls back to a default index.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> NameResolver<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &'a Catalogue {
        self.catalogue
    }

    /// Resolve one role's type name.
    ///
    /// # Errors
    /// Returns `UnknownTypeName` carrying `role` and the name as supplied.
    pub fn resolve(&self, role: Role, name: &str) -> DispatchResult<usize> {
        if let Some(index) = self.catalogue.index_of(name) {
            tracing::debug!("Resolved {} type {} -> {}", role, name, index);
            return Ok(index);
        }

        let canonical = name
            .parse::<TypeDescriptor>()
            .ok()
            .and_then(|descriptor| self.catalogue.index_of(&descriptor.name()));

        match canonical {
            Some(index) => {
                tracing::debug!(
                    "Resolved {} type {} -> {} ({})",
                    role,
                    name,
                    index,
                    self.catalogue.name_at(index)
                );
                Ok(index)
            },
            None => Err(DispatchError::UnknownTypeName {
                role,
                name: name.to_string(),
            }),
        }
    }

    /// Resolve all three roles, stopping at the first failure (slot order).
    ///
    /// # Errors
    /// Returns the first role's `UnknownTypeName`.
    pub fn resolve_triple(
        &self,
        quantity: &str,
        velocity: &str,
        velocity_flow: &str,
    ) -> DispatchResult<DispatchTriple> {
        Ok(DispatchTriple::new(
            self.resolve(Role::Quantity, quantity)?,
            self.resolve(Role::Velocity, velocity)?,
            self.resolve(Role::VelocityFlow, velocity_flow)?,
        ))
    }

    /// Resolve all three roles independently, reporting every failure.
    ///
    /// # Errors
    /// Returns one `UnknownTypeName` per failing role, in slot order.
    pub fn resolve_all(&self, names: [&str; 3]) -> Result<DispatchTriple, Vec<DispatchError>> {
        let mut indices = [0usize; 3];
        let mut errors = Vec::new();

        for role in Role::ALL {
            match self.resolve(role, names[role.slot()]) {
                Ok(index) => indices[role.slot()] = index,
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(DispatchTriple::from(indices))
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_catalogue() -> Catalogue {
        Catalogue::new([
            TypeDescriptor::float(),
            TypeDescriptor::double(),
            TypeDescriptor::fixed(32, 16),
        ])
    }

    #[test]
    fn test_resolve_registered_names() {
        let catalogue = scenario_catalogue();
        let resolver = NameResolver::new(&catalogue);

        for (index, name) in catalogue.names().enumerate() {
            assert_eq!(resolver.resolve(Role::Quantity, name), Ok(index));
        }
    }

    #[test]
    fn test_resolve_scenario_triple() {
        let catalogue = scenario_catalogue();
        let resolver = NameResolver::new(&catalogue);

        let triple = resolver
            .resolve_triple("FIXED(32,16)", "FLOAT", "DOUBLE")
            .unwrap();
        assert_eq!(triple, DispatchTriple::new(2, 0, 1));
    }

    #[test]
    fn test_unregistered_name_is_unknown() {
        let catalogue = scenario_catalogue();
        let resolver = NameResolver::new(&catalogue);

        assert_eq!(
            resolver.resolve_triple("FIXED(64,32)", "FLOAT", "DOUBLE"),
            Err(DispatchError::UnknownTypeName {
                role: Role::Quantity,
                name: "FIXED(64,32)".to_string(),
            })
        );
    }

    #[test]
    fn test_lenient_spellings() {
        let catalogue = Catalogue::new([
            TypeDescriptor::double(),
            TypeDescriptor::fast_fixed(64, 32),
        ]);
        let resolver = NameResolver::new(&catalogue);

        assert_eq!(resolver.resolve(Role::Velocity, "double"), Ok(0));
        assert_eq!(resolver.resolve(Role::Velocity, "FIXED_FAST(64,32)"), Ok(1));
        assert_eq!(resolver.resolve(Role::Velocity, "fast_fixed( 64, 32 )"), Ok(1));
        // Same parameters, other storage strategy: not registered
        assert!(resolver.resolve(Role::Velocity, "FIXED(64,32)").is_err());
    }

    #[test]
    fn test_roles_fail_independently() {
        let catalogue = scenario_catalogue();
        let resolver = NameResolver::new(&catalogue);

        let errors = resolver
            .resolve_all(["FLOAT", "HALF", "FIXED(8,4)"])
            .unwrap_err();
        assert_eq!(
            errors,
            vec![
                DispatchError::UnknownTypeName {
                    role: Role::Velocity,
                    name: "HALF".to_string(),
                },
                DispatchError::UnknownTypeName {
                    role: Role::VelocityFlow,
                    name: "FIXED(8,4)".to_string(),
                },
            ]
        );

        assert_eq!(
            resolver.resolve_all(["DOUBLE", "DOUBLE", "FLOAT"]),
            Ok(DispatchTriple::new(1, 1, 0))
        );
    }

    #[test]
    fn test_duplicate_registration_resolves_lowest_index() {
        let catalogue = Catalogue::new([
            TypeDescriptor::float(),
            TypeDescriptor::fixed(16, 8),
            TypeDescriptor::fixed(16, 8),
        ]);
        let resolver = NameResolver::new(&catalogue);
        assert_eq!(resolver.resolve(Role::Quantity, "FIXED(16,8)"), Ok(1));
        assert_eq!(catalogue.conflicts().len(), 1);
    }
}
