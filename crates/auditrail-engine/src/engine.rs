//! The audit engine façade
//!
//! [`AuditEngine`] is what the integrating system's lifecycle hooks call.
//! It consults the tracking registry, reduces snapshots to their tracked
//! fields, fetches "before" state where needed, and delegates to the core
//! operations, which persist entries and then notify subscribers.
//! It is generic over the two store contracts so the same wiring
//! runs against the in-memory store in tests and SQLite in production.

use auditrail_core::model::{LogEntry, ObjectSnapshot};
use auditrail_core::ops::{
    log_create, log_delete, log_relation_change, log_update, save_entry, EntryStore,
    RelationAction, SnapshotSource,
};
use auditrail_core::{log_op_error, log_op_start};
use auditrail_core::{AuditError, AuditRegistry, AuditSubscriber, EventBus, Result};
use auditrail_core_types::{ActorContext, ObjectRef};
use auditrail_store::SqliteEntryStore;
use std::path::Path;
use tracing::debug;

/// Hook-facing façade wiring registry, stores, and notifier together
pub struct AuditEngine<O: SnapshotSource, E: EntryStore> {
    registry: AuditRegistry,
    objects: O,
    entries: E,
    bus: EventBus,
}

impl<O: SnapshotSource, E: EntryStore> AuditEngine<O, E> {
    /// Create an engine over the given registry and stores
    pub fn new(registry: AuditRegistry, objects: O, entries: E) -> Self {
        Self {
            registry,
            objects,
            entries,
            bus: EventBus::new(),
        }
    }

    /// Register a notification subscriber (invoked in registration order)
    pub fn subscribe(&mut self, subscriber: Box<dyn AuditSubscriber>) {
        self.bus.subscribe(subscriber);
    }

    /// The tracking registry
    pub fn registry(&self) -> &AuditRegistry {
        &self.registry
    }

    /// Mutable access to the tracking registry (startup wiring)
    pub fn registry_mut(&mut self) -> &mut AuditRegistry {
        &mut self.registry
    }

    /// The snapshot source
    pub fn objects(&self) -> &O {
        &self.objects
    }

    /// Mutable access to the snapshot source
    pub fn objects_mut(&mut self) -> &mut O {
        &mut self.objects
    }

    /// The entry store
    pub fn entries(&self) -> &E {
        &self.entries
    }

    /// Reduce a snapshot to its tracked fields, or None if the kind is not
    /// audited at all
    fn tracked(&self, snapshot: &ObjectSnapshot) -> Option<ObjectSnapshot> {
        self.registry
            .options(&snapshot.object.kind)
            .map(|options| options.apply(snapshot))
    }

    /// Hook: an object was created
    ///
    /// Returns the created entry, or None when the kind is not audited or
    /// creation logging is disabled.
    ///
    /// # Errors
    ///
    /// `Serialization`/`Persistence` from the entry factory.
    pub fn object_created(
        &mut self,
        snapshot: &ObjectSnapshot,
        actor: &ActorContext,
    ) -> Result<Option<LogEntry>> {
        if !self.registry.settings().log_create {
            return Ok(None);
        }
        let Some(tracked) = self.tracked(snapshot) else {
            return Ok(None);
        };

        log_op_start!("object_created", object = %snapshot.object);
        match log_create(&mut self.entries, &self.bus, &tracked, actor) {
            Ok(entry) => Ok(Some(entry)),
            Err(err) => {
                log_op_error!("object_created", err);
                Err(err)
            }
        }
    }

    /// Hook: an object is being updated
    ///
    /// Fetches the "before" snapshot from the snapshot source itself. No
    /// entry is created when the kind is not audited, update logging is
    /// disabled, no prior snapshot exists, or nothing tracked changed.
    ///
    /// # Errors
    ///
    /// `Persistence` from the snapshot source or the entry factory.
    pub fn object_updated(
        &mut self,
        new: &ObjectSnapshot,
        actor: &ActorContext,
    ) -> Result<Option<LogEntry>> {
        if !self.registry.settings().log_update {
            return Ok(None);
        }
        let Some(tracked_new) = self.tracked(new) else {
            return Ok(None);
        };

        log_op_start!("object_updated", object = %new.object);
        let old = self.objects.get(&new.object)?;
        let tracked_old = old.as_ref().and_then(|o| self.tracked(o));

        match log_update(
            &mut self.entries,
            &self.bus,
            tracked_old.as_ref(),
            &tracked_new,
            actor,
        ) {
            Ok(entry) => Ok(entry),
            Err(err) => {
                log_op_error!("object_updated", err);
                Err(err)
            }
        }
    }

    /// Hook: an object was deleted
    ///
    /// The caller supplies the final pre-deletion snapshot; the entry's
    /// target reference outlives the object.
    ///
    /// # Errors
    ///
    /// `Serialization`/`Persistence` from the entry factory.
    pub fn object_deleted(
        &mut self,
        snapshot: &ObjectSnapshot,
        actor: &ActorContext,
    ) -> Result<Option<LogEntry>> {
        if !self.registry.settings().log_delete {
            return Ok(None);
        }
        let Some(tracked) = self.tracked(snapshot) else {
            return Ok(None);
        };

        log_op_start!("object_deleted", object = %snapshot.object);
        match log_delete(&mut self.entries, &self.bus, &tracked, actor) {
            Ok(entry) => Ok(Some(entry)),
            Err(err) => {
                log_op_error!("object_deleted", err);
                Err(err)
            }
        }
    }

    /// Hook: a many-valued relation changed in bulk
    ///
    /// Expands into one entry per affected related object. Nothing is
    /// logged when relation tracking is disabled or `field_name` is not a
    /// registered relation field of the instance's kind.
    ///
    /// # Errors
    ///
    /// `ObjectNotFound` if the owning instance has no snapshot;
    /// `Persistence` from the stores.
    pub fn relation_changed(
        &mut self,
        instance: &ObjectRef,
        related_kind: &str,
        related_ids: &[String],
        action: RelationAction,
        field_name: &str,
        actor: &ActorContext,
    ) -> Result<Vec<LogEntry>> {
        if !self.registry.settings().track_relations {
            return Ok(Vec::new());
        }
        let tracked_relation = self
            .registry
            .options(&instance.kind)
            .map(|o| o.relation_fields.iter().any(|f| f == field_name))
            .unwrap_or(false);
        if !tracked_relation {
            debug!(
                component = module_path!(),
                op = "relation_changed",
                object = %instance,
                field = field_name,
                "relation field not tracked; skipping"
            );
            return Ok(Vec::new());
        }

        log_op_start!("relation_changed", object = %instance, field = field_name);
        let instance_snapshot =
            self.objects
                .get(instance)?
                .ok_or_else(|| AuditError::ObjectNotFound {
                    kind: instance.kind.clone(),
                    id: instance.id.clone(),
                })?;

        log_relation_change(
            &self.objects,
            &mut self.entries,
            &self.bus,
            &instance_snapshot,
            related_kind,
            related_ids,
            action,
            field_name,
            actor,
        )
    }

    /// Guarded write path for existing entries
    ///
    /// The only sanctioned way to modify a persisted entry: protected
    /// fields are reverted (with warnings), `additional_data` passes
    /// through.
    ///
    /// # Errors
    ///
    /// `Persistence` from the entry store.
    pub fn update_entry(&mut self, proposed: LogEntry) -> Result<LogEntry> {
        save_entry(&mut self.entries, proposed)
    }

    /// All entries for one object, newest first
    ///
    /// # Errors
    ///
    /// `Persistence` from the entry store.
    pub fn entries_for_object(&self, object: &ObjectRef) -> Result<Vec<LogEntry>> {
        self.entries.entries_for_object(object)
    }

    /// All entries for the named identities of one kind, newest first
    ///
    /// # Errors
    ///
    /// `Persistence` from the entry store.
    pub fn entries_for_objects(&self, kind: &str, ids: &[String]) -> Result<Vec<LogEntry>> {
        self.entries.entries_for_objects(kind, ids)
    }
}

impl<O: SnapshotSource> AuditEngine<O, SqliteEntryStore> {
    /// Convenience constructor: SQLite-backed trail at the given path
    ///
    /// # Errors
    ///
    /// `Persistence` if the database cannot be opened or migrated.
    pub fn with_sqlite<P: AsRef<Path>>(
        registry: AuditRegistry,
        objects: O,
        path: P,
    ) -> Result<Self> {
        let entries = SqliteEntryStore::open(path)?;
        Ok(Self::new(registry, objects, entries))
    }
}
