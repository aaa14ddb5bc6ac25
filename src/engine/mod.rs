// ============================================================================
// Engine Module
// Name resolution, the compiled specialization set and static dispatch
// ============================================================================

mod dispatcher;
mod errors;
mod probe;
mod resolver;
mod specialization;

pub mod factory;

pub use dispatcher::{DispatchState, Dispatcher, SLOT_COUNT};
pub use errors::{DispatchError, DispatchResult};
pub use factory::{prepare_from_config, DispatchSession, DispatchSessionBuilder, PreparedRun};
pub use probe::{FieldProbe, ProbeReport, WALL};
pub use resolver::NameResolver;
pub use specialization::{
    Invoker, Specialization, SpecializationManifest, SpecializationTable, MANIFEST_VERSION,
};
