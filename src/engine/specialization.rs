// ============================================================================
// Specialization Table
// The allow-list of compiled (quantity, velocity, velocity-flow) combinations
// ============================================================================

use super::errors::{DispatchError, DispatchResult};
use crate::domain::{Catalogue, DispatchTriple, Field, Role, TypeDescriptor};
use crate::interfaces::Simulation;
use crate::numeric::Real;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Version of the manifest layout
pub const MANIFEST_VERSION: u32 = 1;

/// Monomorphized entry point of one specialization.
pub type Invoker<S> = fn(&S, &Field) -> <S as Simulation>::Output;

fn invoke_specialized<S: Simulation, P: Real, V: Real, VF: Real>(
    simulation: &S,
    field: &Field,
) -> S::Output {
    simulation.run::<P, V, VF>(field)
}

// ============================================================================
// Specialization
// ============================================================================

/// One compiled instance of `Simulation::run::<P, V, VF>`.
///
/// Only the combinations that are turned into a `Specialization` get
/// monomorphized; everything else is absent from the binary.
pub struct Specialization<S: Simulation> {
    types: [TypeDescriptor; 3],
    invoke: Invoker<S>,
}

impl<S: Simulation> Specialization<S> {
    /// Compile the specialization for `<P, V, VF>`.
    pub fn of<P: Real, V: Real, VF: Real>() -> Self {
        Self {
            types: [P::DESCRIPTOR, V::DESCRIPTOR, VF::DESCRIPTOR],
            invoke: invoke_specialized::<S, P, V, VF>,
        }
    }

    /// Descriptors in slot order
    pub fn types(&self) -> &[TypeDescriptor; 3] {
        &self.types
    }

    /// Canonical names in slot order
    pub fn type_names(&self) -> [String; 3] {
        [
            self.types[0].name(),
            self.types[1].name(),
            self.types[2].name(),
        ]
    }

    /// Run the specialized kernel.
    #[inline]
    pub fn invoke(&self, simulation: &S, field: &Field) -> S::Output {
        (self.invoke)(simulation, field)
    }
}

impl<S: Simulation> Clone for Specialization<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Simulation> Copy for Specialization<S> {}

impl<S: Simulation> fmt::Debug for Specialization<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Specialization<{}, {}, {}>",
            self.types[0], self.types[1], self.types[2]
        )
    }
}

// ============================================================================
// Manifest
// ============================================================================

/// The allow-list rendered as data: which name triples are compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpecializationManifest {
    pub version: u32,
    pub combinations: Vec<[String; 3]>,
}

impl SpecializationManifest {
    /// Whether the exact name triple is listed
    pub fn contains(&self, quantity: &str, velocity: &str, velocity_flow: &str) -> bool {
        self.combinations
            .iter()
            .any(|[p, v, vf]| p == quantity && v == velocity && vf == velocity_flow)
    }

    /// Pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SpecializationManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Built specializations (manifest v{}, {} entries):",
            self.version,
            self.combinations.len()
        )?;
        for [p, v, vf] in &self.combinations {
            writeln!(f, "  {}, {}, {}", p, v, vf)?;
        }
        Ok(())
    }
}

// ============================================================================
// Specialization Table
// ============================================================================

/// Compiled specializations keyed by their catalogue index triple.
pub struct SpecializationTable<S: Simulation> {
    entries: HashMap<DispatchTriple, Specialization<S>>,
    order: Vec<DispatchTriple>,
}

impl<S: Simulation> SpecializationTable<S> {
    /// Key `specializations` by their indices in `catalogue`.
    ///
    /// Duplicate triples keep the first entry.
    ///
    /// # Errors
    /// Returns `UnknownTypeName` if a specialization uses a type the catalogue
    /// does not register, naming the slot it appears in.
    pub fn new(
        catalogue: &Catalogue,
        specializations: impl IntoIterator<Item = Specialization<S>>,
    ) -> DispatchResult<Self> {
        let mut entries = HashMap::new();
        let mut order = Vec::new();

        for specialization in specializations {
            let mut indices = [0usize; 3];
            for role in Role::ALL {
                let name = specialization.types[role.slot()].name();
                indices[role.slot()] = catalogue
                    .index_of(&name)
                    .ok_or(DispatchError::UnknownTypeName { role, name })?;
            }

            let triple = DispatchTriple::from(indices);
            if entries.contains_key(&triple) {
                tracing::warn!("Duplicate specialization {:?} ignored", specialization);
                continue;
            }
            entries.insert(triple, specialization);
            order.push(triple);
        }

        tracing::debug!("Specialization table built with {} entries", order.len());
        Ok(Self { entries, order })
    }

    /// Specialization compiled for `triple`, if any.
    #[inline]
    pub fn lookup(&self, triple: &DispatchTriple) -> Option<&Specialization<S>> {
        self.entries.get(triple)
    }

    #[inline]
    pub fn contains(&self, triple: &DispatchTriple) -> bool {
        self.entries.contains_key(triple)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Triples in registration order
    pub fn triples(&self) -> impl Iterator<Item = &DispatchTriple> {
        self.order.iter()
    }

    /// The allow-list as data
    pub fn manifest(&self) -> SpecializationManifest {
        SpecializationManifest {
            version: MANIFEST_VERSION,
            combinations: self
                .order
                .iter()
                .filter_map(|triple| self.entries.get(triple))
                .map(Specialization::type_names)
                .collect(),
        }
    }
}

impl<S: Simulation> fmt::Debug for SpecializationTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecializationTable")
            .field("len", &self.order.len())
            .field("triples", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldDimensions;
    use crate::numeric::{FastFixed, Fixed};

    struct Echo;

    impl Simulation for Echo {
        type Output = String;

        fn run<P: Real, V: Real, VF: Real>(&self, _field: &Field) -> Self::Output {
            format!("{}/{}/{}", P::type_name(), V::type_name(), VF::type_name())
        }
    }

    fn scenario_catalogue() -> Catalogue {
        Catalogue::new([
            TypeDescriptor::float(),
            TypeDescriptor::double(),
            TypeDescriptor::fixed(32, 16),
        ])
    }

    #[test]
    fn test_specialization_invokes_its_types() {
        let spec = Specialization::<Echo>::of::<Fixed<32, 16>, f32, f64>();
        let field = Field::blank(FieldDimensions::new(1, 1));
        assert_eq!(spec.invoke(&Echo, &field), "FIXED(32,16)/FLOAT/DOUBLE");
        assert_eq!(format!("{:?}", spec), "Specialization<FIXED(32,16), FLOAT, DOUBLE>");
    }

    #[test]
    fn test_table_keys_by_catalogue_indices() {
        let catalogue = scenario_catalogue();
        let table = SpecializationTable::new(
            &catalogue,
            [
                Specialization::<Echo>::of::<Fixed<32, 16>, f32, f64>(),
                Specialization::of::<f64, f64, f64>(),
            ],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.contains(&DispatchTriple::new(2, 0, 1)));
        assert!(table.contains(&DispatchTriple::new(1, 1, 1)));
        assert!(!table.contains(&DispatchTriple::new(0, 0, 0)));
    }

    #[test]
    fn test_table_rejects_unregistered_types() {
        let catalogue = scenario_catalogue();
        let result = SpecializationTable::new(
            &catalogue,
            [Specialization::<Echo>::of::<f32, FastFixed<32, 16>, f64>()],
        );
        assert_eq!(
            result.unwrap_err(),
            DispatchError::UnknownTypeName {
                role: Role::Velocity,
                name: "FAST_FIXED(32,16)".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_specializations_keep_first() {
        let catalogue = scenario_catalogue();
        let table = SpecializationTable::new(
            &catalogue,
            [
                Specialization::<Echo>::of::<f32, f32, f32>(),
                Specialization::of::<f32, f32, f32>(),
            ],
        )
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_manifest() {
        let catalogue = scenario_catalogue();
        let table = SpecializationTable::new(
            &catalogue,
            [
                Specialization::<Echo>::of::<Fixed<32, 16>, f32, f64>(),
                Specialization::of::<f32, f32, f32>(),
            ],
        )
        .unwrap();

        let manifest = table.manifest();
        assert_eq!(manifest.version, MANIFEST_VERSION);
        assert_eq!(manifest.combinations.len(), 2);
        assert!(manifest.contains("FIXED(32,16)", "FLOAT", "DOUBLE"));
        assert!(!manifest.contains("FLOAT", "FIXED(32,16)", "DOUBLE"));
        assert!(manifest.to_string().contains("  FLOAT, FLOAT, FLOAT\n"));
    }
}
