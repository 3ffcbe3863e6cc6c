//! Habit model
//!
//! A habit is a recurring tracked item. Quantitative habits carry a target
//! and a unit (e.g. `target = 30`, `unit = "minutes"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// A habit - something to repeat on a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier (server-assigned UUID v4)
    pub id: Uuid,

    /// Name of the habit
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// How often the habit repeats
    pub frequency: Frequency,

    /// Target number for quantitative habits
    pub target: Option<u32>,

    /// Unit for quantitative habits (e.g. reps, minutes)
    pub unit: Option<String>,

    /// Tags for organization
    #[serde(default)]
    pub tags: Vec<String>,

    /// When this habit was created
    pub created_at: DateTime<Utc>,

    /// When this habit was last modified
    pub updated_at: DateTime<Utc>,
}

/// Habit frequency
///
/// Decoding is case-insensitive and ignores surrounding whitespace; it is
/// always written back in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Frequency {
    /// Every day
    #[default]
    Daily,
    /// Every week
    Weekly,
    /// User-defined schedule
    Custom,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "custom" => Ok(Self::Custom),
            _ => Err(ValidationError::Frequency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Fields supplied when creating a habit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHabit {
    /// Habit name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Frequency (defaults to daily)
    pub frequency: Frequency,
    /// Optional target
    pub target: Option<u32>,
    /// Optional unit
    pub unit: Option<String>,
    /// Tags
    pub tags: Vec<String>,
}

/// A partial update to a habit
///
/// Same convention as [`TaskChanges`](super::TaskChanges): `Some(None)`
/// clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitChanges {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<Option<String>>,
    /// New frequency
    pub frequency: Option<Frequency>,
    /// New target
    pub target: Option<Option<u32>>,
    /// New unit
    pub unit: Option<Option<String>>,
    /// Replacement tag list
    pub tags: Option<Vec<String>>,
}

impl HabitChanges {
    /// Whether applying these changes would leave every field as it is
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.frequency.is_none()
            && self.target.is_none()
            && self.unit.is_none()
            && self.tags.is_none()
    }
}

impl Habit {
    /// Create a new habit from validated fields
    pub fn new(id: Uuid, fields: NewHabit, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let name = super::require_text("name", fields.name)?;
        Ok(Self {
            id,
            name,
            description: fields.description,
            frequency: fields.frequency,
            target: fields.target,
            unit: fields.unit,
            tags: fields.tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update and bump `updated_at`
    pub fn apply(
        &mut self,
        changes: HabitChanges,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let name = changes.name.map(|n| super::require_text("name", n)).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(frequency) = changes.frequency {
            self.frequency = frequency;
        }
        if let Some(target) = changes.target {
            self.target = target;
        }
        if let Some(unit) = changes.unit {
            self.unit = unit;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        self.updated_at = now.max(self.created_at);
        Ok(())
    }

    /// Whether this habit carries the given tag (exact match)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
