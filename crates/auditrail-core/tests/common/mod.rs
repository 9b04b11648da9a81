use auditrail_core::{MemoryStore, ObjectSnapshot};
use auditrail_core_types::ObjectRef;
use serde_json::Value;

/// Create a new empty MemoryStore for testing
#[allow(dead_code)]
pub fn new_store() -> MemoryStore {
    MemoryStore::new()
}

/// Build a snapshot with the given fields
#[allow(dead_code)]
pub fn snapshot(kind: &str, id: &str, repr: &str, fields: &[(&str, Value)]) -> ObjectSnapshot {
    let mut snap = ObjectSnapshot::new(ObjectRef::new(kind, id), repr);
    for (name, value) in fields {
        snap = snap.with_field(*name, value.clone());
    }
    snap
}

/// An "article" snapshot with a single `name` field
#[allow(dead_code)]
pub fn article(name: &str) -> ObjectSnapshot {
    snapshot(
        "article",
        "1",
        "Article 1",
        &[("name", Value::String(name.to_string()))],
    )
}
