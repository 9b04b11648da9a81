//! End-to-end scenarios: lifecycle hooks through the engine façade into
//! SQLite, with notifications.

use auditrail_core::diff::FieldChange;
use auditrail_core::model::{Action, ObjectSnapshot};
use auditrail_core::{AuditRegistry, TrackingOptions};
use auditrail_core::{MemoryStore, RelationAction};
use auditrail_core_types::{ActorContext, ObjectRef};
use auditrail_engine::AuditEngine;
use auditrail_store::SqliteEntryStore;
use serde_json::json;

fn article(id: &str, name: &str) -> ObjectSnapshot {
    ObjectSnapshot::new(ObjectRef::new("article", id), format!("Article {}", id))
        .with_field("name", json!(name))
}

fn engine() -> AuditEngine<MemoryStore, SqliteEntryStore> {
    let mut registry = AuditRegistry::new();
    registry.register("article", TrackingOptions::all_fields());
    registry.register(
        "tag",
        TrackingOptions::all_fields().relation("articles"),
    );
    AuditEngine::new(
        registry,
        MemoryStore::new(),
        SqliteEntryStore::open_in_memory().unwrap(),
    )
}

#[test]
fn test_scenario_creation() {
    let mut engine = engine();

    let entry = engine
        .object_created(&article("1", "x"), &ActorContext::anonymous())
        .unwrap()
        .unwrap();

    assert_eq!(entry.action, Action::Create);
    assert_eq!(entry.changes, r#"{"name":[null,"x"]}"#);

    let trail = engine
        .entries_for_object(&ObjectRef::new("article", "1"))
        .unwrap();
    assert_eq!(trail.len(), 1);
}

#[test]
fn test_scenario_update_and_noop_update() {
    let mut engine = engine();
    engine.objects_mut().insert_object(article("1", "x"));

    // Observable change: one UPDATE entry
    let entry = engine
        .object_updated(&article("1", "y"), &ActorContext::anonymous())
        .unwrap()
        .unwrap();
    assert_eq!(entry.action, Action::Update);
    assert_eq!(entry.changes, r#"{"name":["x","y"]}"#);

    // No observable change: zero entries
    let entry = engine
        .object_updated(&article("1", "x"), &ActorContext::anonymous())
        .unwrap();
    assert!(entry.is_none());

    let trail = engine
        .entries_for_object(&ObjectRef::new("article", "1"))
        .unwrap();
    assert_eq!(trail.len(), 1);
}

#[test]
fn test_scenario_deletion() {
    let mut engine = engine();

    let entry = engine
        .object_deleted(&article("1", "x"), &ActorContext::anonymous())
        .unwrap()
        .unwrap();

    assert_eq!(entry.action, Action::Delete);
    assert_eq!(entry.changes, r#"{"name":["x",null]}"#);
}

#[test]
fn test_scenario_entry_rewrite_is_rejected_annotation_succeeds() {
    let mut engine = engine();
    let entry = engine
        .object_created(&article("1", "x"), &ActorContext::anonymous())
        .unwrap()
        .unwrap();

    let mut proposed = entry.clone();
    proposed.timestamp = proposed.timestamp + chrono::Duration::hours(1);
    proposed.additional_data = Some(json!({"reviewed_by": "alice"}));

    let saved = engine.update_entry(proposed).unwrap();
    assert_eq!(saved.timestamp, entry.timestamp, "timestamp rewrite rejected");
    assert_eq!(
        saved.additional_data,
        Some(json!({"reviewed_by": "alice"})),
        "annotation update succeeds on the same call"
    );

    let trail = engine
        .entries_for_object(&ObjectRef::new("article", "1"))
        .unwrap();
    assert_eq!(trail[0].timestamp, entry.timestamp);
    assert_eq!(trail[0].additional_data, Some(json!({"reviewed_by": "alice"})));
}

#[test]
fn test_scenario_relation_clear_enumerates_membership() {
    let mut engine = engine();
    let tag = ObjectSnapshot::new(ObjectRef::new("tag", "t1"), "Tag t1");
    engine.objects_mut().insert_object(tag.clone());
    for id in ["1", "2", "3"] {
        engine.objects_mut().insert_object(article(id, "x"));
    }
    engine.objects_mut().set_relation(
        &tag.object,
        "articles",
        vec![
            ObjectRef::new("article", "1"),
            ObjectRef::new("article", "2"),
            ObjectRef::new("article", "3"),
        ],
    );

    let created = engine
        .relation_changed(
            &tag.object,
            "article",
            &[],
            RelationAction::Clear,
            "articles",
            &ActorContext::anonymous(),
        )
        .unwrap();

    assert_eq!(created.len(), 3, "delete entries for all three members, not zero");
    for entry in &created {
        assert_eq!(
            entry.changes_set().unwrap().get("articles"),
            Some(&FieldChange(
                Some("delete".to_string()),
                Some("Tag t1".to_string())
            ))
        );
    }
}

#[test]
fn test_relation_add_logs_against_related_objects() {
    let mut engine = engine();
    let tag = ObjectSnapshot::new(ObjectRef::new("tag", "t1"), "Tag t1");
    engine.objects_mut().insert_object(tag.clone());
    engine.objects_mut().insert_object(article("1", "x"));

    let created = engine
        .relation_changed(
            &tag.object,
            "article",
            &["1".to_string()],
            RelationAction::Add,
            "articles",
            &ActorContext::anonymous(),
        )
        .unwrap();

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].object, ObjectRef::new("article", "1"));

    let trail = engine
        .entries_for_objects("article", &["1".to_string()])
        .unwrap();
    assert_eq!(trail.len(), 1);
}

#[test]
fn test_with_sqlite_persists_across_engines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trail.db");

    let mut registry = AuditRegistry::new();
    registry.register("article", TrackingOptions::all_fields());

    {
        let mut engine =
            AuditEngine::with_sqlite(registry.clone(), MemoryStore::new(), &path).unwrap();
        engine
            .object_created(&article("1", "x"), &ActorContext::anonymous())
            .unwrap()
            .unwrap();
    }

    let engine = AuditEngine::with_sqlite(registry, MemoryStore::new(), &path).unwrap();
    let trail = engine
        .entries_for_object(&ObjectRef::new("article", "1"))
        .unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, Action::Create);
}

#[test]
fn test_actor_fields_flow_to_persisted_entry() {
    let mut engine = engine();
    let actor = ActorContext::for_actor("u1", "alice")
        .with_remote_addr("198.51.100.7")
        .with_client("admin-ui/3.2");

    engine
        .object_created(&article("1", "x"), &actor)
        .unwrap()
        .unwrap();

    let trail = engine
        .entries_for_object(&ObjectRef::new("article", "1"))
        .unwrap();
    assert_eq!(trail[0].actor_repr.as_deref(), Some("alice"));
    assert_eq!(trail[0].remote_addr.as_deref(), Some("198.51.100.7"));
    assert_eq!(trail[0].client.as_deref(), Some("admin-ui/3.2"));
}
