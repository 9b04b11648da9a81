pub mod entry_ops;
pub mod lifecycle_ops;
pub mod relation_ops;
pub mod store;

pub use entry_ops::{create_entry, save_entry};
pub use lifecycle_ops::{log_create, log_delete, log_update};
pub use relation_ops::{log_relation_change, RelationAction};
pub use store::{EntryStore, MemoryStore, SnapshotSource};
