//! API request, query and response types
//!
//! All types are framework-agnostic and can be used by any client.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{
    Frequency, HabitChanges, NewHabit, NewTask, Page, Priority, TaskChanges, ValidationError,
};

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "Habit & To-Do Tracker API";

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// Health endpoint response data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthData {
    /// Liveness message ("Healthy")
    pub message: String,
    /// Service name
    pub service: String,
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Optional priority (1-5, defaults to 3)
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Initial completion status
    #[serde(default)]
    pub completed: bool,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            priority: req.priority.unwrap_or_default(),
            tags: req.tags,
            completed: req.completed,
        }
    }
}

/// Request body for partially updating a task
///
/// The outer `Option` records whether the key was sent at all, the inner
/// one whether it was `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    /// New description (null clears)
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    /// New due date (null clears)
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<NaiveDate>>,
    /// New priority
    #[serde(default, deserialize_with = "nullable")]
    pub priority: Option<Option<Priority>>,
    /// Replacement tags
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Option<Option<Vec<String>>>,
    /// New completion status
    #[serde(default, deserialize_with = "nullable")]
    pub completed: Option<Option<bool>>,
}

impl UpdateTaskRequest {
    /// Convert into model changes, rejecting `null` for required fields
    pub fn into_changes(self) -> Result<TaskChanges, ValidationError> {
        Ok(TaskChanges {
            title: required("title", self.title)?,
            description: self.description,
            due_date: self.due_date,
            priority: required("priority", self.priority)?,
            tags: required("tags", self.tags)?,
            completed: required("completed", self.completed)?,
        })
    }
}

/// Request body for creating a habit
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHabitRequest {
    /// Habit name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Frequency (defaults to daily)
    #[serde(default)]
    pub frequency: Frequency,
    /// Optional target
    #[serde(default)]
    pub target: Option<u32>,
    /// Optional unit
    #[serde(default)]
    pub unit: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<CreateHabitRequest> for NewHabit {
    fn from(req: CreateHabitRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            frequency: req.frequency,
            target: req.target,
            unit: req.unit,
            tags: req.tags,
        }
    }
}

/// Request body for partially updating a habit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHabitRequest {
    /// New name
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    /// New description (null clears)
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    /// New frequency
    #[serde(default, deserialize_with = "nullable")]
    pub frequency: Option<Option<Frequency>>,
    /// New target (null clears)
    #[serde(default, deserialize_with = "nullable")]
    pub target: Option<Option<u32>>,
    /// New unit (null clears)
    #[serde(default, deserialize_with = "nullable")]
    pub unit: Option<Option<String>>,
    /// Replacement tags
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Option<Option<Vec<String>>>,
}

impl UpdateHabitRequest {
    /// Convert into model changes, rejecting `null` for required fields
    pub fn into_changes(self) -> Result<HabitChanges, ValidationError> {
        Ok(HabitChanges {
            name: required("name", self.name)?,
            description: self.description,
            frequency: required("frequency", self.frequency)?,
            target: self.target,
            unit: self.unit,
            tags: required("tags", self.tags)?,
        })
    }
}

/// Distinguish an absent key (`None`) from an explicit `null` (`Some(None)`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Unwrap a double option for a field that may be omitted but not `null`
fn required<T>(field: &'static str, value: Option<Option<T>>) -> Result<Option<T>, ValidationError> {
    match value {
        Some(None) => Err(ValidationError::Null { field }),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

// =============================================================================
// QUERY TYPES
// =============================================================================

/// Query parameters for `GET /tasks`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Which page to return
    pub page: Page,
    /// Only tasks carrying this tag
    pub tag: Option<String>,
    /// Only tasks with this completion status
    pub completed: Option<bool>,
}

impl TaskQuery {
    /// Parse a raw query string (without the leading `?`)
    pub fn parse(query: &str) -> Result<Self, ValidationError> {
        let mut params = decode(query);
        Ok(Self {
            page: page_from(&mut params)?,
            tag: params.remove("tag"),
            completed: params
                .remove("completed")
                .map(|v| parse_bool("completed", &v))
                .transpose()?,
        })
    }
}

/// Query parameters for `GET /habits`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitQuery {
    /// Which page to return
    pub page: Page,
    /// Only habits carrying this tag
    pub tag: Option<String>,
}

impl HabitQuery {
    /// Parse a raw query string (without the leading `?`)
    pub fn parse(query: &str) -> Result<Self, ValidationError> {
        let mut params = decode(query);
        Ok(Self {
            page: page_from(&mut params)?,
            tag: params.remove("tag"),
        })
    }
}

/// Decode a query string; a repeated key keeps its last value
fn decode(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

fn page_from(params: &mut HashMap<String, String>) -> Result<Page, ValidationError> {
    let number = params
        .remove("page")
        .map(|v| parse_int("page", &v))
        .transpose()?
        .unwrap_or(1);
    let size = params
        .remove("size")
        .map(|v| parse_int("size", &v))
        .transpose()?
        .unwrap_or_else(|| i64::from(Page::DEFAULT_SIZE));

    // Zero and negative page numbers are range errors; past u32 is just empty
    let number = if number < 1 {
        0
    } else {
        u32::try_from(number).unwrap_or(u32::MAX)
    };
    let size = u32::try_from(size).map_err(|_| ValidationError::PageSize {
        got: size,
        max: Page::MAX_SIZE,
    })?;
    Page::new(number, size)
}

fn parse_int(name: &'static str, value: &str) -> Result<i64, ValidationError> {
    value.trim().parse().map_err(|_| ValidationError::Query {
        name,
        expected: "an integer",
        value: value.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ValidationError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ValidationError::Query {
            name,
            expected: "a boolean",
            value: value.to_string(),
        }),
    }
}
