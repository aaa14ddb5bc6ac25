// ============================================================================
// Dispatch Observer Interface
// Defines the contract for observing dispatch state transitions
// ============================================================================

use crate::domain::{DispatchTriple, Role};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier correlating the events of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Events emitted by the dispatcher
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DispatchEvent {
    /// Dispatch started with all three indices supplied
    Started {
        session: SessionId,
        triple: DispatchTriple,
        timestamp: DateTime<Utc>,
    },

    /// A slot was fixed to a catalogue entry
    SlotResolved {
        session: SessionId,
        role: Role,
        index: usize,
        type_name: String,
        timestamp: DateTime<Utc>,
    },

    /// All slots fixed, specialization about to run
    Invoking {
        session: SessionId,
        type_names: [String; 3],
        timestamp: DateTime<Utc>,
    },

    /// Specialization returned
    Completed {
        session: SessionId,
        timestamp: DateTime<Utc>,
    },

    /// Dispatch failed; `role` is set when a single slot is to blame
    Failed {
        session: SessionId,
        role: Option<Role>,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl DispatchEvent {
    /// Session this event belongs to
    pub fn session(&self) -> SessionId {
        match self {
            DispatchEvent::Started { session, .. }
            | DispatchEvent::SlotResolved { session, .. }
            | DispatchEvent::Invoking { session, .. }
            | DispatchEvent::Completed { session, .. }
            | DispatchEvent::Failed { session, .. } => *session,
        }
    }
}

/// Observer trait for dispatch events
/// Implementations can handle logging, auditing, tests, etc.
pub trait DispatchObserver: Send + Sync {
    /// Handle a dispatch event
    fn on_event(&self, event: DispatchEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<DispatchEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op observer
pub struct NoOpObserver;

impl DispatchObserver for NoOpObserver {
    fn on_event(&self, _event: DispatchEvent) {
        // Do nothing
    }
}

/// Logging observer
pub struct LoggingObserver;

impl DispatchObserver for LoggingObserver {
    fn on_event(&self, event: DispatchEvent) {
        tracing::debug!("Dispatch event: {:?}", event);
    }
}

/// Observer that keeps every event in memory
#[derive(Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<DispatchEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far
    pub fn events(&self) -> Vec<DispatchEvent> {
        self.events.lock().clone()
    }

    /// Drain the collected events
    pub fn take(&self) -> Vec<DispatchEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl DispatchObserver for CollectingObserver {
    fn on_event(&self, event: DispatchEvent) {
        self.events.lock().push(event);
    }
}
