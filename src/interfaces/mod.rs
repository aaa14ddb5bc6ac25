// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
mod simulation;

pub use event_handler::{
    CollectingObserver, DispatchEvent, DispatchObserver, LoggingObserver, NoOpObserver, SessionId,
};
pub use simulation::Simulation;
