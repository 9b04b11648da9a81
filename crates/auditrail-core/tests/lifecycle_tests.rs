//! Lifecycle logging scenarios: creation, update, deletion.

mod common;

use auditrail_core::diff::FieldChange;
use auditrail_core::ops::{log_create, log_delete, log_update};
use auditrail_core::{Action, AuditEvent, AuditSubscriber, EntryStore, EventBus};
use auditrail_core_types::{ActorContext, ObjectRef};
use common::{article, new_store, snapshot};
use serde_json::json;
use std::sync::{Arc, Mutex};

struct CountingSubscriber {
    seen: Arc<Mutex<Vec<String>>>,
}

impl AuditSubscriber for CountingSubscriber {
    fn name(&self) -> &str {
        "counting"
    }

    fn on_event(&self, event: &AuditEvent) -> auditrail_core::Result<()> {
        self.seen.lock().unwrap().push(event.entry().id.clone());
        Ok(())
    }
}

#[test]
fn test_creation_is_logged() {
    let mut store = new_store();
    let bus = EventBus::new();

    let entry = log_create(&mut store, &bus, &article("x"), &ActorContext::anonymous()).unwrap();

    assert_eq!(entry.action, Action::Create);
    assert_eq!(entry.object_repr, "Article 1");
    assert_eq!(
        entry.changes_set().unwrap().get("name"),
        Some(&FieldChange(None, Some("x".to_string())))
    );
    assert_eq!(store.entry_count(), 1);
}

#[test]
fn test_update_is_logged_with_old_and_new() {
    let mut store = new_store();
    let bus = EventBus::new();

    let entry = log_update(
        &mut store,
        &bus,
        Some(&article("x")),
        &article("y"),
        &ActorContext::anonymous(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(entry.action, Action::Update);
    assert_eq!(entry.changes, r#"{"name":["x","y"]}"#);
}

#[test]
fn test_noop_update_produces_no_entry() {
    let mut store = new_store();
    let bus = EventBus::new();

    let result = log_update(
        &mut store,
        &bus,
        Some(&article("x")),
        &article("x"),
        &ActorContext::anonymous(),
    )
    .unwrap();

    assert!(result.is_none());
    assert_eq!(store.entry_count(), 0);
}

#[test]
fn test_deletion_is_logged() {
    let mut store = new_store();
    let bus = EventBus::new();

    let entry = log_delete(&mut store, &bus, &article("x"), &ActorContext::anonymous()).unwrap();

    assert_eq!(entry.action, Action::Delete);
    assert_eq!(entry.changes, r#"{"name":["x",null]}"#);
    // Target reference survives the object
    assert_eq!(entry.object, ObjectRef::new("article", "1"));
}

#[test]
fn test_create_and_delete_log_even_without_fields() {
    let mut store = new_store();
    let bus = EventBus::new();
    let bare = snapshot("article", "1", "Article 1", &[]);

    log_create(&mut store, &bus, &bare, &ActorContext::anonymous()).unwrap();
    log_delete(&mut store, &bus, &bare, &ActorContext::anonymous()).unwrap();

    assert_eq!(store.entry_count(), 2);
}

#[test]
fn test_actor_context_lands_on_entry() {
    let mut store = new_store();
    let bus = EventBus::new();
    let actor = ActorContext::for_actor("u7", "carol")
        .with_remote_addr("192.0.2.4")
        .with_client("cli/2.1");

    let entry = log_create(&mut store, &bus, &article("x"), &actor).unwrap();

    assert_eq!(entry.actor_id.as_deref(), Some("u7"));
    assert_eq!(entry.actor_repr.as_deref(), Some("carol"));
    assert_eq!(entry.remote_addr.as_deref(), Some("192.0.2.4"));
    assert_eq!(entry.client.as_deref(), Some("cli/2.1"));
}

#[test]
fn test_subscribers_see_persisted_entries() {
    let mut store = new_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut bus = EventBus::new();
    bus.subscribe(Box::new(CountingSubscriber { seen: seen.clone() }));

    let entry = log_create(&mut store, &bus, &article("x"), &ActorContext::anonymous()).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.as_slice(), &[entry.id.clone()]);
    // The entry the subscriber saw was already in the store
    assert!(store.get_prior(&entry.id).unwrap().is_some());
}

#[test]
fn test_timestamps_are_monotonic_across_entries() {
    let mut store = new_store();
    let bus = EventBus::new();

    let first = log_create(&mut store, &bus, &article("x"), &ActorContext::anonymous()).unwrap();
    let second = log_update(
        &mut store,
        &bus,
        Some(&article("x")),
        &article("y"),
        &ActorContext::anonymous(),
    )
    .unwrap()
    .unwrap();

    assert!(second.timestamp > first.timestamp);
}

#[test]
fn test_entries_for_object_returns_newest_first() {
    let mut store = new_store();
    let bus = EventBus::new();

    log_create(&mut store, &bus, &article("x"), &ActorContext::anonymous()).unwrap();
    log_update(
        &mut store,
        &bus,
        Some(&article("x")),
        &article("y"),
        &ActorContext::anonymous(),
    )
    .unwrap();

    let entries = store
        .entries_for_object(&ObjectRef::new("article", "1"))
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, Action::Update);
    assert_eq!(entries[1].action, Action::Create);
}

#[test]
fn test_additional_data_from_snapshot_is_stored() {
    let mut store = new_store();
    let bus = EventBus::new();
    let snap = article("x").with_additional_data(json!({"import_batch": 12}));

    let entry = log_create(&mut store, &bus, &snap, &ActorContext::anonymous()).unwrap();
    assert_eq!(entry.additional_data, Some(json!({"import_batch": 12})));

    let without = article("y");
    let entry = log_update(
        &mut store,
        &bus,
        Some(&article("x")),
        &without,
        &ActorContext::anonymous(),
    )
    .unwrap()
    .unwrap();
    assert!(entry.additional_data.is_none());
}
