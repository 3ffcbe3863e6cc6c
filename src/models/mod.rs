//! Data models for the tracker
//!
//! Core abstractions:
//! - Task: "What needs to be done" (with completion status and tags)
//! - Habit: "What to keep doing" (with frequency and optional target)
//! - Page: which slice of a listing to return

mod habit;
mod page;
mod task;

use thiserror::Error;

pub use habit::{Frequency, Habit, HabitChanges, NewHabit};
pub use page::Page;
pub use task::{NewTask, Priority, Task, TaskChanges};

/// Input rejected by model validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty or whitespace
    #[error("{field} must not be blank")]
    Blank {
        /// Field name
        field: &'static str,
    },

    /// A required field was explicitly set to null
    #[error("{field} must not be null")]
    Null {
        /// Field name
        field: &'static str,
    },

    /// Priority outside 1..=5
    #[error("priority must be between 1 (high) and 5 (low), got {0}")]
    Priority(i64),

    /// Unknown habit frequency
    #[error("invalid frequency '{0}', expected daily, weekly or custom")]
    Frequency(String),

    /// Page number below 1
    #[error("page must be at least 1")]
    PageNumber,

    /// Page size outside 1..=max
    #[error("size must be between 1 and {max}, got {got}")]
    PageSize {
        /// Requested size, as sent
        got: i64,
        /// Largest accepted size
        max: u32,
    },

    /// A query parameter could not be parsed
    #[error("query parameter '{name}' must be {expected}, got '{value}'")]
    Query {
        /// Parameter name
        name: &'static str,
        /// What was expected (e.g. "an integer")
        expected: &'static str,
        /// Raw value received
        value: String,
    },
}

/// Reject blank strings for required text fields
fn require_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Blank { field })
    } else {
        Ok(value)
    }
}
