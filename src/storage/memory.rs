//! In-memory collection
//!
//! Records are kept in insertion order, keyed by a monotonically increasing
//! sequence number, with a side index from record ID to sequence. Nothing is
//! written to disk: dropping the collection drops its contents.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use uuid::Uuid;

use super::{Record, StorageError};
use crate::models::Page;

#[derive(Debug)]
struct Entries<T> {
    next_seq: u64,
    records: BTreeMap<u64, T>,
    index: HashMap<Uuid, u64>,
}

impl<T> Entries<T> {
    fn new() -> Self {
        Self {
            next_seq: 0,
            records: BTreeMap::new(),
            index: HashMap::new(),
        }
    }
}

/// A thread-safe, insertion-ordered set of records
#[derive(Debug)]
pub struct Collection<T> {
    entries: RwLock<Entries<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Entries::new()),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, failing if its ID is already taken
    pub fn insert(&self, record: T) -> Result<T, StorageError> {
        let mut entries = self.entries.write();
        let id = record.id();
        if entries.index.contains_key(&id) {
            return Err(StorageError::DuplicateId { kind: T::KIND, id });
        }

        let seq = entries.next_seq;
        entries.next_seq += 1;
        entries.index.insert(id, seq);
        entries.records.insert(seq, record.clone());
        Ok(record)
    }

    /// Get a record by ID
    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<T> {
        let entries = self.entries.read();
        let seq = entries.index.get(id)?;
        entries.records.get(seq).cloned()
    }

    /// Mutate a record in place under the write lock
    ///
    /// Returns `Ok(None)` when the ID is unknown. If `change` fails, the
    /// error is returned and the stored record is left as it was.
    pub fn update<E>(
        &self,
        id: &Uuid,
        change: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<Option<T>, E> {
        let mut entries = self.entries.write();
        let Some(&seq) = entries.index.get(id) else {
            return Ok(None);
        };
        let Some(record) = entries.records.get_mut(&seq) else {
            return Ok(None);
        };

        let mut updated = record.clone();
        change(&mut updated)?;
        *record = updated.clone();
        Ok(Some(updated))
    }

    /// Remove a record by ID, returning it if it existed
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        let mut entries = self.entries.write();
        let seq = entries.index.remove(id)?;
        entries.records.remove(&seq)
    }

    /// List records matching `filter`, in insertion order, sliced to `page`
    #[must_use]
    pub fn list(&self, filter: impl Fn(&T) -> bool, page: Page) -> Vec<T> {
        self.entries
            .read()
            .records
            .values()
            .filter(|r| filter(r))
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().records.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every record
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.records.clear();
        entries.index.clear();
    }
}
