// src/store/mod.rs
// =============================================================================
// The key-value store content entries are written into.
//
// The site generator owns the store; the loader only needs a handful of
// operations, captured by the ContentStore trait. MemoryStore is the
// in-process implementation used by the CLI and the tests.
//
// A load cycle never writes entries one at a time. It stages the whole
// batch first and then calls replace_all(), so the store goes straight from
// the previous cycle's entries to the new ones.
//
// Rust concepts:
// - Traits with default methods
// - Send + Sync bounds so a store can be shared across async tasks
// =============================================================================

mod memory;

pub use memory::MemoryStore;

use crate::content::ContentEntry;

/// Storage for content entries, keyed by entry id.
pub trait ContentStore: Send + Sync {
    /// Removes every entry.
    fn clear(&self);

    /// Inserts or overwrites the entry with `entry.id`.
    fn set(&self, entry: ContentEntry);

    fn get(&self, id: &str) -> Option<ContentEntry>;

    /// All entries, sorted by id.
    fn entries(&self) -> Vec<ContentEntry>;

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the whole contents with `entries`.
    ///
    /// The default is clear-then-set. Stores that can swap their contents
    /// in one step should override it so readers never observe an empty store.
    fn replace_all(&self, entries: Vec<ContentEntry>) {
        self.clear();
        for entry in entries {
            self.set(entry);
        }
    }
}
