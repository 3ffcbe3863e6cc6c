//! Task model
//!
//! A task is a to-do item with a completion flag, an optional due date and
//! a priority from 1 (high) to 5 (low).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// A task - a unit of work to be completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (server-assigned UUID v4)
    pub id: Uuid,

    /// What needs to be done
    pub title: String,

    /// Optional detailed description
    pub description: Option<String>,

    /// Optional due date (`YYYY-MM-DD`)
    pub due_date: Option<NaiveDate>,

    /// Priority level (1 = high, 5 = low)
    pub priority: Priority,

    /// Categorization tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Completion status
    #[serde(default)]
    pub completed: bool,

    /// When this task was created
    pub created_at: DateTime<Utc>,

    /// When this task was last modified
    pub updated_at: DateTime<Utc>,
}

/// Task priority, 1 (high) through 5 (low)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Most urgent priority
    pub const HIGHEST: Self = Self(1);
    /// Least urgent priority
    pub const LOWEST: Self = Self(5);

    /// Create a priority, rejecting values outside 1..=5
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::HIGHEST.0..=Self::LOWEST.0).contains(v))
            .map(Self)
            .ok_or(ValidationError::Priority(value))
    }

    /// Numeric value of this priority
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for Priority {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields supplied when creating a task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Task title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
    /// Priority (defaults to 3)
    pub priority: Priority,
    /// Tags
    pub tags: Vec<String>,
    /// Initial completion status
    pub completed: bool,
}

/// A partial update to a task
///
/// `None` leaves a field untouched. For optional fields the inner `Option`
/// is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<Option<String>>,
    /// New due date
    pub due_date: Option<Option<NaiveDate>>,
    /// New priority
    pub priority: Option<Priority>,
    /// Replacement tag list
    pub tags: Option<Vec<String>>,
    /// New completion status
    pub completed: Option<bool>,
}

impl TaskChanges {
    /// Whether applying these changes would leave every field as it is
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
            && self.completed.is_none()
    }
}

impl Task {
    /// Create a new task from validated fields
    pub fn new(id: Uuid, fields: NewTask, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let title = super::require_text("title", fields.title)?;
        Ok(Self {
            id,
            title,
            description: fields.description,
            due_date: fields.due_date,
            priority: fields.priority,
            tags: fields.tags,
            completed: fields.completed,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update and bump `updated_at`
    ///
    /// Validation happens before any field is touched, so a rejected update
    /// leaves the task unchanged.
    pub fn apply(&mut self, changes: TaskChanges, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let title = changes.title.map(|t| super::require_text("title", t)).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.updated_at = now.max(self.created_at);
        Ok(())
    }

    /// Whether this task carries the given tag (exact match)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
