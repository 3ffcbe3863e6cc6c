//! Storage for tasks and habits
//!
//! Everything lives in process memory. A fresh [`Store`] is always empty, so
//! restarting the process clears all entities.

mod memory;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Habit, Task};

pub use memory::Collection;

/// An entity that can be kept in a [`Collection`]
pub trait Record: Clone + Send + Sync {
    /// Human-readable entity name ("Task", "Habit")
    const KIND: &'static str;

    /// Unique identifier of this record
    fn id(&self) -> Uuid;

    /// Tags attached to this record
    fn tags(&self) -> &[String];
}

impl Record for Task {
    const KIND: &'static str = "Task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Record for Habit {
    const KIND: &'static str = "Habit";

    fn id(&self) -> Uuid {
        self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Errors raised by storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A record with this ID is already stored
    #[error("{kind} {id} already exists")]
    DuplicateId {
        /// Entity name
        kind: &'static str,
        /// Conflicting ID
        id: Uuid,
    },
}

/// The process-wide store: one collection per resource type
#[derive(Debug, Default)]
pub struct Store {
    tasks: Collection<Task>,
    habits: Collection<Habit>,
}

impl Store {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Task collection
    #[must_use]
    pub const fn tasks(&self) -> &Collection<Task> {
        &self.tasks
    }

    /// Habit collection
    #[must_use]
    pub const fn habits(&self) -> &Collection<Habit> {
        &self.habits
    }
}
