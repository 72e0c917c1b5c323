// src/store/memory.rs
// =============================================================================
// In-memory ContentStore backed by a HashMap behind an RwLock.
//
// replace_all() builds the new map outside the lock and swaps it in with a
// single write, so a concurrent reader sees either the old batch or the new
// one, never a half-filled or empty store.
// =============================================================================

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::ContentStore;
use crate::content::ContentEntry;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, ContentEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write is a single insert, clear or assign, so a poisoned map is
    // still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ContentEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ContentEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ContentStore for MemoryStore {
    fn clear(&self) {
        self.write().clear();
    }

    fn set(&self, entry: ContentEntry) {
        self.write().insert(entry.id.clone(), entry);
    }

    fn get(&self, id: &str) -> Option<ContentEntry> {
        self.read().get(id).cloned()
    }

    fn entries(&self) -> Vec<ContentEntry> {
        let mut entries: Vec<_> = self.read().values().cloned().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn replace_all(&self, entries: Vec<ContentEntry>) {
        let staged: HashMap<String, ContentEntry> = entries
            .into_iter()
            .map(|entry| (entry.id.clone(), entry))
            .collect();
        *self.write() = staged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::EntryData;
    use std::collections::BTreeMap;

    fn entry(id: &str, title: &str) -> ContentEntry {
        ContentEntry {
            id: id.to_string(),
            data: EntryData {
                title: title.to_string(),
                date: "2021-01-01".to_string(),
                description: None,
                github_url: format!("https://github.com/alice/{id}"),
                stars: Some(0),
                extra: BTreeMap::new(),
            },
            body: String::new(),
        }
    }

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set(entry("foo", "Foo"));
        assert_eq!(store.get("foo").unwrap().data.title, "Foo");
        assert!(store.get("bar").is_none());
    }

    #[test]
    fn test_set_overwrites_same_id() {
        let store = MemoryStore::new();
        store.set(entry("foo", "First"));
        store.set(entry("foo", "Second"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("foo").unwrap().data.title, "Second");
    }

    #[test]
    fn test_replace_all_drops_stale_entries() {
        let store = MemoryStore::new();
        store.set(entry("old", "Old"));
        store.replace_all(vec![entry("b", "B"), entry("a", "A")]);

        assert!(store.get("old").is_none());
        let ids: Vec<_> = store.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_replace_all_with_nothing_empties_store() {
        let store = MemoryStore::new();
        store.set(entry("old", "Old"));
        store.replace_all(Vec::new());
        assert!(store.is_empty());
    }
}
