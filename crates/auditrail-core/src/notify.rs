//! Event notifier
//!
//! Publishes "entry created" events to registered subscribers after the
//! entry is durably persisted, never before: a subscriber may rely on the
//! entry it receives already existing in the store. Subscribers run in
//! registration order; a failing subscriber is logged and isolated, it can
//! neither stop later subscribers nor roll back the committed entry.

use crate::model::{LogEntry, ObjectSnapshot};
use crate::ops::RelationAction;
use auditrail_core_types::ObjectRef;
use tracing::warn;

/// A published audit event
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// A simple lifecycle change produced one entry
    EntryCreated {
        old: Option<ObjectSnapshot>,
        new: Option<ObjectSnapshot>,
        entry: LogEntry,
    },
    /// A relation change produced one entry for one related object
    RelationEntryCreated {
        /// The owning side of the relation
        instance: ObjectRef,
        /// Every related object affected by the triggering bulk event
        related: Vec<ObjectRef>,
        action: RelationAction,
        field_name: String,
        entry: LogEntry,
    },
}

impl AuditEvent {
    /// The entry this event is about
    pub fn entry(&self) -> &LogEntry {
        match self {
            AuditEvent::EntryCreated { entry, .. } => entry,
            AuditEvent::RelationEntryCreated { entry, .. } => entry,
        }
    }
}

/// A downstream consumer of audit events (cache invalidation, shipping, ...)
pub trait AuditSubscriber {
    /// Name used in failure logs
    fn name(&self) -> &str;

    /// React to one published event
    ///
    /// # Errors
    ///
    /// Any error is logged by the bus and isolated to this subscriber.
    fn on_event(&self, event: &AuditEvent) -> crate::errors::Result<()>;
}

/// Registration-ordered list of subscribers
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn AuditSubscriber>>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; subscribers are invoked in registration order
    pub fn subscribe(&mut self, subscriber: Box<dyn AuditSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// True if no subscribers are registered
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Publish an event to every subscriber
    ///
    /// Must only be called after the event's entry has been persisted.
    /// Subscriber failures are logged and do not affect other subscribers.
    pub fn publish(&self, event: &AuditEvent) {
        for subscriber in &self.subscribers {
            if let Err(err) = subscriber.on_event(event) {
                warn!(
                    component = module_path!(),
                    op = "publish",
                    subscriber = subscriber.name(),
                    entry_id = %event.entry().id,
                    err_code = err.code(),
                    "audit subscriber failed; continuing with remaining subscribers"
                );
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
