// ============================================================================
// Dispatcher
// Turns a runtime index triple into a call of the matching specialization
// ============================================================================

use super::errors::{DispatchError, DispatchResult};
use super::resolver::NameResolver;
use super::specialization::SpecializationTable;
use crate::domain::{Catalogue, DispatchTriple, Field, Role};
use crate::interfaces::{DispatchEvent, DispatchObserver, NoOpObserver, SessionId, Simulation};
use arrayvec::ArrayVec;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;

/// Number of type slots: quantity, velocity, velocity flow
pub const SLOT_COUNT: usize = 3;

/// Where a dispatch currently is.
///
/// Transitions: `ResolvingSlot(Quantity) -> ResolvingSlot(Velocity) ->
/// ResolvingSlot(VelocityFlow) -> Invoking -> Completed`, with `Failed`
/// reachable from every resolving step and from the table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    ResolvingSlot(Role),
    Invoking,
    Completed,
    Failed(Option<Role>),
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchState::ResolvingSlot(role) => write!(f, "resolving {} slot", role),
            DispatchState::Invoking => write!(f, "invoking"),
            DispatchState::Completed => write!(f, "completed"),
            DispatchState::Failed(Some(role)) => write!(f, "failed at {} slot", role),
            DispatchState::Failed(None) => write!(f, "failed"),
        }
    }
}

/// Static dispatcher over a catalogue and the specializations built for it.
///
/// Slots are fixed left to right. Each slot walks the catalogue from
/// position 0 until it meets the requested index; running off the end is
/// `InvalidTypeIndex` for that slot. Once all three are fixed the triple is
/// looked up in the table: absent means `UnbuiltCombination`, present means
/// the specialization runs and its output is returned untouched.
pub struct Dispatcher<'a, S: Simulation> {
    catalogue: &'a Catalogue,
    table: &'a SpecializationTable<S>,
    observer: Arc<dyn DispatchObserver>,
}

impl<'a, S: Simulation> Dispatcher<'a, S> {
    /// Create a dispatcher that reports to nobody
    pub fn new(catalogue: &'a Catalogue, table: &'a SpecializationTable<S>) -> Self {
        Self {
            catalogue,
            table,
            observer: Arc::new(NoOpObserver),
        }
    }

    /// Report dispatch events to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn catalogue(&self) -> &'a Catalogue {
        self.catalogue
    }

    pub fn table(&self) -> &'a SpecializationTable<S> {
        self.table
    }

    /// Run the specialization selected by `triple`.
    ///
    /// # Errors
    /// - `InvalidTypeIndex` for the first slot whose index is out of range
    /// - `UnbuiltCombination` when every index is valid but the triple has no
    ///   specialization
    pub fn dispatch(
        &self,
        simulation: &S,
        triple: DispatchTriple,
        field: &Field,
    ) -> DispatchResult<S::Output> {
        let session = SessionId::new();
        let mut events = Vec::with_capacity(SLOT_COUNT + 2);

        events.push(DispatchEvent::Started {
            session,
            triple,
            timestamp: Utc::now(),
        });
        tracing::debug!("Dispatch {} started for {}", session, triple);

        let result = self.fix_and_invoke(session, simulation, &triple, field, &mut events);

        match &result {
            Ok(_) => {
                tracing::debug!("Dispatch {} {}", session, DispatchState::Completed);
                events.push(DispatchEvent::Completed {
                    session,
                    timestamp: Utc::now(),
                });
            },
            Err(e) => {
                let state = DispatchState::Failed(e.role());
                tracing::warn!("Dispatch {} {}: {}", session, state, e);
                events.push(DispatchEvent::Failed {
                    session,
                    role: e.role(),
                    reason: e.to_string(),
                    timestamp: Utc::now(),
                });
            },
        }

        self.observer.on_events(events);
        result
    }

    /// Resolve three names and dispatch the resulting triple.
    ///
    /// # Errors
    /// `UnknownTypeName` for the first unknown name, then anything
    /// [`Dispatcher::dispatch`] returns.
    pub fn dispatch_names(
        &self,
        simulation: &S,
        names: [&str; 3],
        field: &Field,
    ) -> DispatchResult<S::Output> {
        let triple =
            NameResolver::new(self.catalogue).resolve_triple(names[0], names[1], names[2])?;
        self.dispatch(simulation, triple, field)
    }

    // ========================================================================
    // Slot Walk
    // ========================================================================

    fn fix_and_invoke(
        &self,
        session: SessionId,
        simulation: &S,
        triple: &DispatchTriple,
        field: &Field,
        events: &mut Vec<DispatchEvent>,
    ) -> DispatchResult<S::Output> {
        let mut fixed: ArrayVec<usize, SLOT_COUNT> = ArrayVec::new();
        self.fix_slots(session, &triple.as_array(), &mut fixed, events)?;

        let resolved = DispatchTriple::new(fixed[0], fixed[1], fixed[2]);
        let specialization = self.table.lookup(&resolved).ok_or_else(|| {
            DispatchError::UnbuiltCombination {
                quantity: self.catalogue.name_at(resolved.quantity).to_string(),
                velocity: self.catalogue.name_at(resolved.velocity).to_string(),
                velocity_flow: self.catalogue.name_at(resolved.velocity_flow).to_string(),
            }
        })?;

        let type_names = specialization.type_names();
        tracing::info!(
            "Dispatch {} {} <{}, {}, {}>",
            session,
            DispatchState::Invoking,
            type_names[0],
            type_names[1],
            type_names[2]
        );
        events.push(DispatchEvent::Invoking {
            session,
            type_names,
            timestamp: Utc::now(),
        });

        Ok(specialization.invoke(simulation, field))
    }

    /// Fix the leftmost unfixed slot, then recurse into the rest.
    fn fix_slots(
        &self,
        session: SessionId,
        remaining: &[usize],
        fixed: &mut ArrayVec<usize, SLOT_COUNT>,
        events: &mut Vec<DispatchEvent>,
    ) -> DispatchResult<()> {
        let Some((&target, rest)) = remaining.split_first() else {
            return Ok(());
        };
        let role = Role::ALL[fixed.len()];
        tracing::trace!("Dispatch {} {}", session, DispatchState::ResolvingSlot(role));

        let mut position = 0;
        while position < self.catalogue.size() {
            if position == target {
                fixed.push(position);
                events.push(DispatchEvent::SlotResolved {
                    session,
                    role,
                    index: position,
                    type_name: self.catalogue.name_at(position).to_string(),
                    timestamp: Utc::now(),
                });
                return self.fix_slots(session, rest, fixed, events);
            }
            position += 1;
        }

        Err(DispatchError::InvalidTypeIndex {
            role,
            index: target,
            catalogue_size: self.catalogue.size(),
        })
    }
}

impl<S: Simulation> fmt::Debug for Dispatcher<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("catalogue_size", &self.catalogue.size())
            .field("specializations", &self.table.len())
            .finish()
    }
}
