// ============================================================================
// Dispatch Session Factory
// Creates dispatch sessions and prepared runs from configuration
// ============================================================================

use super::dispatcher::Dispatcher;
use super::errors::{DispatchError, DispatchResult};
use super::resolver::NameResolver;
use super::specialization::{Specialization, SpecializationTable};
use crate::domain::{Catalogue, DispatchTriple, Field, RunConfig};
use crate::interfaces::{DispatchObserver, NoOpObserver, Simulation};
use crate::registry;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// A run whose types are resolved and whose field is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRun {
    pub triple: DispatchTriple,
    pub field: Field,
}

/// Resolves the configured names against `catalogue` and loads the field.
///
/// Names are resolved in slot order before anything else is checked, so an
/// empty or misspelled name is reported as `UnknownTypeName` for its role.
///
/// # Example
/// ```
/// use fluid_dispatch::prelude::*;
///
/// let catalogue = default_catalogue();
/// let config = RunConfig::new("FIXED(32,16)", "FLOAT", "DOUBLE");
/// let run = prepare_from_config(&config, &catalogue).unwrap();
/// assert_eq!(run.triple, DispatchTriple::new(2, 0, 1));
/// ```
pub fn prepare_from_config(config: &RunConfig, catalogue: &Catalogue) -> DispatchResult<PreparedRun> {
    let triple = NameResolver::new(catalogue).resolve_triple(
        &config.quantity_type,
        &config.velocity_type,
        &config.velocity_flow_type,
    )?;

    config.validate().map_err(DispatchError::InvalidConfig)?;

    let field = match &config.field_path {
        Some(path) => Field::load(path, config.dimensions)?,
        None => Field::try_blank(config.dimensions)?,
    };

    tracing::info!(
        "Prepared run {}: p={} v={} v_flow={} on {} field",
        triple,
        catalogue.name_at(triple.quantity),
        catalogue.name_at(triple.velocity),
        catalogue.name_at(triple.velocity_flow),
        field.dimensions()
    );

    Ok(PreparedRun { triple, field })
}

// ============================================================================
// Dispatch Session
// ============================================================================

/// Owns a catalogue, its specialization table and an observer.
pub struct DispatchSession<S: Simulation> {
    catalogue: Catalogue,
    table: SpecializationTable<S>,
    observer: Arc<dyn DispatchObserver>,
}

impl<S: Simulation> DispatchSession<S> {
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn table(&self) -> &SpecializationTable<S> {
        &self.table
    }

    /// Dispatcher borrowing this session's catalogue and table
    pub fn dispatcher(&self) -> Dispatcher<'_, S> {
        Dispatcher::new(&self.catalogue, &self.table).with_observer(Arc::clone(&self.observer))
    }

    /// Prepare `config` and run `simulation` with the types it names.
    ///
    /// # Errors
    /// Anything [`prepare_from_config`] or [`Dispatcher::dispatch`] returns.
    pub fn run(&self, simulation: &S, config: &RunConfig) -> DispatchResult<S::Output> {
        let prepared = prepare_from_config(config, &self.catalogue)?;
        self.dispatcher()
            .dispatch(simulation, prepared.triple, &prepared.field)
    }
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for dispatch sessions with a fluent API
///
/// Without further configuration the session uses the default registration
/// set from [`registry`].
///
/// # Example
/// ```
/// use fluid_dispatch::prelude::*;
/// use fluid_dispatch::{catalogue, specializations};
///
/// let session = DispatchSessionBuilder::<FieldProbe>::new()
///     .with_catalogue(catalogue![FLOAT, DOUBLE])
///     .with_specializations(specializations![(FLOAT, DOUBLE, DOUBLE)])
///     .build()
///     .unwrap();
///
/// let report = session
///     .run(&FieldProbe, &RunConfig::new("FLOAT", "DOUBLE", "DOUBLE"))
///     .unwrap()
///     .unwrap();
/// assert_eq!(report.types, ["FLOAT", "DOUBLE", "DOUBLE"]);
/// ```
pub struct DispatchSessionBuilder<S: Simulation> {
    catalogue: Option<Catalogue>,
    specializations: Option<Vec<Specialization<S>>>,
    observer: Arc<dyn DispatchObserver>,
    strict: bool,
}

impl<S: Simulation> DispatchSessionBuilder<S> {
    pub fn new() -> Self {
        Self {
            catalogue: None,
            specializations: None,
            observer: Arc::new(NoOpObserver),
            strict: false,
        }
    }

    /// Use `catalogue` instead of the default registration set
    pub fn with_catalogue(mut self, catalogue: Catalogue) -> Self {
        self.catalogue = Some(catalogue);
        self
    }

    /// Use `specializations` instead of the default allow-list
    pub fn with_specializations(mut self, specializations: Vec<Specialization<S>>) -> Self {
        self.specializations = Some(specializations);
        self
    }

    /// Report dispatch events to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Reject catalogues that register a name twice
    pub fn strict_catalogue(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the session
    ///
    /// # Errors
    /// - `DuplicateTypeName` in strict mode
    /// - `UnknownTypeName` if a specialization uses an unregistered type
    pub fn build(self) -> DispatchResult<DispatchSession<S>> {
        let catalogue = self.catalogue.unwrap_or_else(registry::default_catalogue);
        if self.strict {
            catalogue.validate()?;
        }

        let specializations = self
            .specializations
            .unwrap_or_else(registry::default_specializations);
        let table = SpecializationTable::new(&catalogue, specializations)?;

        tracing::info!(
            "Dispatch session ready: {} types, {} specializations",
            catalogue.size(),
            table.len()
        );

        Ok(DispatchSession {
            catalogue,
            table,
            observer: self.observer,
        })
    }
}

impl<S: Simulation> Default for DispatchSessionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldDimensions, Role, TypeDescriptor};
    use crate::engine::FieldProbe;
    use crate::interfaces::CollectingObserver;
    use crate::numeric::NumericError;
    use std::io::Write;

    #[test]
    fn test_prepare_blank_field() {
        let catalogue = registry::default_catalogue();
        let config = RunConfig::float_baseline().with_dimensions(FieldDimensions::new(3, 4));

        let run = prepare_from_config(&config, &catalogue).unwrap();
        assert_eq!(run.triple, DispatchTriple::new(1, 1, 1));
        assert_eq!(run.field, Field::blank(FieldDimensions::new(3, 4)));
    }

    #[test]
    fn test_prepare_loads_field_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "####").unwrap();
        writeln!(file, "#..#").unwrap();

        let catalogue = registry::default_catalogue();
        let config = RunConfig::uniform("FLOAT")
            .with_field_path(file.path())
            .with_dimensions(FieldDimensions::new(2, 4));

        let run = prepare_from_config(&config, &catalogue).unwrap();
        assert_eq!(run.field.row(1), Some(&b"#..#"[..]));
    }

    #[test]
    fn test_prepare_reports_first_bad_role() {
        let catalogue = registry::default_catalogue();
        let config = RunConfig::new("DOUBLE", "", "HALF");

        assert_eq!(
            prepare_from_config(&config, &catalogue),
            Err(DispatchError::UnknownTypeName {
                role: Role::Velocity,
                name: String::new(),
            })
        );
    }

    #[test]
    fn test_prepare_rejects_bad_dimensions_and_missing_file() {
        let catalogue = registry::default_catalogue();

        let config = RunConfig::float_baseline().with_dimensions(FieldDimensions::new(0, 84));
        assert!(matches!(
            prepare_from_config(&config, &catalogue),
            Err(DispatchError::InvalidConfig(_))
        ));

        let config = RunConfig::float_baseline()
            .with_dimensions(FieldDimensions::new(usize::MAX / 2 + 1, 2));
        let err = prepare_from_config(&config, &catalogue).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidConfig(_)));
        assert_eq!(err.exit_code(), 1);

        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::float_baseline().with_field_path(dir.path().join("missing.txt"));
        assert!(matches!(
            prepare_from_config(&config, &catalogue),
            Err(DispatchError::FieldIo { .. })
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let session = DispatchSessionBuilder::<FieldProbe>::new().build().unwrap();
        assert_eq!(session.catalogue().size(), 6);
        assert_eq!(session.table().len(), 12);

        let report = session
            .run(&FieldProbe, &RunConfig::new("FIXED(32,16)", "FLOAT", "DOUBLE"))
            .unwrap()
            .unwrap();
        assert_eq!(report.types, ["FIXED(32,16)", "FLOAT", "DOUBLE"]);
        assert_eq!(report.open_cells, 36 * 84);
    }

    #[test]
    fn test_session_unbuilt_combination() {
        let session = DispatchSessionBuilder::<FieldProbe>::new().build().unwrap();
        let err = session
            .run(&FieldProbe, &RunConfig::new("FLOAT", "FLOAT", "DOUBLE"))
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_kernel_error_is_forwarded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "##").unwrap();
        writeln!(file, "##").unwrap();

        let session = DispatchSessionBuilder::<FieldProbe>::new().build().unwrap();
        let config = RunConfig::uniform("FIXED(32,16)")
            .with_field_path(file.path())
            .with_dimensions(FieldDimensions::new(2, 2));

        let output = session.run(&FieldProbe, &config).unwrap();
        assert_eq!(output, Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_strict_catalogue() {
        let duplicated = Catalogue::new([
            TypeDescriptor::float(),
            TypeDescriptor::double(),
            TypeDescriptor::float(),
        ]);

        let lenient = DispatchSessionBuilder::<FieldProbe>::new()
            .with_catalogue(duplicated.clone())
            .with_specializations(Vec::new())
            .build();
        assert!(lenient.is_ok());

        let strict = DispatchSessionBuilder::<FieldProbe>::new()
            .with_catalogue(duplicated)
            .with_specializations(Vec::new())
            .strict_catalogue(true)
            .build();
        assert!(matches!(
            strict,
            Err(DispatchError::DuplicateTypeName {
                first: 0,
                duplicate: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_defaults_need_default_types() {
        let result = DispatchSessionBuilder::<FieldProbe>::new()
            .with_catalogue(Catalogue::new([TypeDescriptor::float()]))
            .build();
        assert!(matches!(result, Err(DispatchError::UnknownTypeName { .. })));
    }

    #[test]
    fn test_session_observer() {
        let observer = Arc::new(CollectingObserver::new());
        let session = DispatchSessionBuilder::<FieldProbe>::new()
            .with_observer(observer.clone())
            .build()
            .unwrap();

        session
            .run(&FieldProbe, &RunConfig::float_baseline())
            .unwrap()
            .unwrap();
        assert_eq!(observer.events().len(), 6);
    }
}
