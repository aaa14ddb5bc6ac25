// ============================================================================
// Fluid Dispatch Library
// Runtime selection of statically compiled numeric type combinations
// ============================================================================

//! # Fluid Dispatch
//!
//! A simulation kernel is written once, generic over three numeric types:
//! the particle quantity `P`, the velocity `V` and the velocity flow `VF`.
//! This crate picks the concrete types at run time, by name, and calls a
//! specialization that was monomorphized at build time.
//!
//! ## Features
//!
//! - **Fixed-point numbers** `FixedPoint<N, K, S>` with exact-width and
//!   fastest-width storage that always agree on raw values
//! - **Type catalogue** of registered representations with canonical names
//!   (`FLOAT`, `DOUBLE`, `FIXED(N,K)`, `FAST_FIXED(N,K)`)
//! - **Name resolution** per role with role-specific errors
//! - **Static dispatch** over an explicit allow-list of compiled triples;
//!   missing combinations are a reportable error, never a fallback
//!
//! ## Example
//!
//! ```rust
//! use fluid_dispatch::prelude::*;
//!
//! let catalogue = default_catalogue();
//! let table = default_table::<FieldProbe>(&catalogue).unwrap();
//! let dispatcher = Dispatcher::new(&catalogue, &table);
//!
//! let field = Field::blank(FieldDimensions::default());
//! let report = dispatcher
//!     .dispatch_names(&FieldProbe, ["FIXED(32,16)", "FLOAT", "DOUBLE"], &field)
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(report.types, ["FIXED(32,16)", "FLOAT", "DOUBLE"]);
//! println!("{}", report);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
#[cfg(feature = "logging")]
pub mod logging;
pub mod numeric;
#[macro_use]
pub mod registry;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        Catalogue, DispatchTriple, Field, FieldDimensions, Role, RunConfig, TypeDescriptor,
        TypeKind,
    };
    pub use crate::engine::{
        prepare_from_config, DispatchError, DispatchResult, DispatchSession,
        DispatchSessionBuilder, Dispatcher, FieldProbe, NameResolver, PreparedRun, ProbeReport,
        Specialization, SpecializationManifest, SpecializationTable,
    };
    pub use crate::interfaces::{
        CollectingObserver, DispatchEvent, DispatchObserver, LoggingObserver, NoOpObserver,
        Simulation,
    };
    pub use crate::numeric::{FastFixed, Fixed, FixedPoint, NumericError, NumericResult, Real};
    pub use crate::registry::{default_catalogue, default_specializations, default_table};
}
