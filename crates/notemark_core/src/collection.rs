//! Persistent collection cell: one storage key bound to one typed sequence.
//!
//! # Responsibility
//! - Load a collection from durable storage at startup.
//! - Keep the in-memory value and its persisted form in sync on every write.
//!
//! # Invariants
//! - Readers always observe a fully formed value; there is no partial-write
//!   state.
//! - A failed write-through still advances the in-memory value; durability
//!   degrades but the operation itself does not fail.

use crate::store::KeyValueStore;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// One storage key bound to an in-memory `Vec<T>` with write-through
/// persistence.
#[derive(Debug)]
pub struct PersistentCollection<T> {
    key: &'static str,
    items: Vec<T>,
}

impl<T: Serialize + DeserializeOwned> PersistentCollection<T> {
    /// Loads the collection stored under `key`.
    ///
    /// An absent key seeds `default` and persists the seed immediately.
    /// Unreadable stored data falls back to `default` without failing; the
    /// fallback is logged, never propagated.
    pub fn load<S: KeyValueStore>(store: &mut S, key: &'static str, default: Vec<T>) -> Self {
        let items = match store.get_item(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(err) => {
                    warn!("event=collection_load module=collection status=corrupt key={key} error={err}");
                    default
                }
            },
            Ok(None) => {
                persist(store, key, &default);
                default
            }
            Err(err) => {
                warn!("event=collection_load module=collection status=error key={key} error={err}");
                default
            }
        };

        Self { key, items }
    }

    /// Current value. Never blocks, never fails.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replaces the collection and writes it through to the store.
    pub fn set<S: KeyValueStore>(&mut self, store: &mut S, next: Vec<T>) {
        self.items = next;
        persist(store, self.key, &self.items);
    }

    /// Applies `f` to the previous value and writes the result through.
    ///
    /// Single-threaded callers get atomic read-compute-write semantics; no
    /// other operation can observe the value mid-update.
    pub fn update<S: KeyValueStore>(&mut self, store: &mut S, f: impl FnOnce(&mut Vec<T>)) {
        f(&mut self.items);
        persist(store, self.key, &self.items);
    }
}

fn persist<S: KeyValueStore, T: Serialize>(store: &mut S, key: &str, items: &[T]) {
    let raw = match serde_json::to_string(items) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("event=collection_persist module=collection status=error key={key} error={err}");
            return;
        }
    };

    if let Err(err) = store.set_item(key, &raw) {
        warn!("event=collection_persist module=collection status=error key={key} error={err}");
    }
}
