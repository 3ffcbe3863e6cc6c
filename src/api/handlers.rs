//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Habit, Task};
use crate::storage::{Record, Store};

use super::error::ApiError;
use super::types::{
    CreateHabitRequest, CreateTaskRequest, HabitQuery, HealthData, SERVICE_NAME, TaskQuery,
    UpdateHabitRequest, UpdateTaskRequest,
};

// =============================================================================
// HEALTH
// =============================================================================

/// Liveness probe
#[must_use]
pub fn health() -> HealthData {
    HealthData {
        message: "Healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    }
}

// =============================================================================
// TASKS
// =============================================================================

/// List tasks, filtered by tag and completion status, one page at a time
pub fn list_tasks(store: &Store, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
    let tagged = has_tag::<Task>(query.tag.as_deref());
    let completed = query.completed;
    Ok(store.tasks().list(
        |t| tagged(t) && completed.is_none_or(|c| t.completed == c),
        query.page,
    ))
}

/// Create a new task
pub fn create_task(store: &Store, req: CreateTaskRequest) -> Result<Task, ApiError> {
    let task = Task::new(Uuid::new_v4(), req.into(), Utc::now())?;
    let task = store.tasks().insert(task)?;
    log::debug!("created task {}", task.id);
    Ok(task)
}

/// Get a single task by ID
pub fn get_task(store: &Store, id: &str) -> Result<Task, ApiError> {
    let id = parse_id::<Task>(id)?;
    store.tasks().get(&id).ok_or_else(not_found::<Task>)
}

/// Apply a partial update to a task
pub fn update_task(store: &Store, id: &str, req: UpdateTaskRequest) -> Result<Task, ApiError> {
    let id = parse_id::<Task>(id)?;
    let changes = req.into_changes()?;
    let touched_only = changes.is_empty();

    let updated = store
        .tasks()
        .update(&id, |task| task.apply(changes, Utc::now()))?
        .ok_or_else(not_found::<Task>)?;
    if touched_only {
        log::debug!("empty update, only bumped updated_at on task {id}");
    } else {
        log::debug!("updated task {id}");
    }
    Ok(updated)
}

/// Delete a task
pub fn delete_task(store: &Store, id: &str) -> Result<(), ApiError> {
    let id = parse_id::<Task>(id)?;
    store.tasks().remove(&id).ok_or_else(not_found::<Task>)?;
    log::debug!("deleted task {id}");
    Ok(())
}

// =============================================================================
// HABITS
// =============================================================================

/// List habits, filtered by tag, one page at a time
pub fn list_habits(store: &Store, query: &HabitQuery) -> Result<Vec<Habit>, ApiError> {
    Ok(store
        .habits()
        .list(has_tag::<Habit>(query.tag.as_deref()), query.page))
}

/// Create a new habit
pub fn create_habit(store: &Store, req: CreateHabitRequest) -> Result<Habit, ApiError> {
    let habit = Habit::new(Uuid::new_v4(), req.into(), Utc::now())?;
    let habit = store.habits().insert(habit)?;
    log::debug!("created habit {}", habit.id);
    Ok(habit)
}

/// Get a single habit by ID
pub fn get_habit(store: &Store, id: &str) -> Result<Habit, ApiError> {
    let id = parse_id::<Habit>(id)?;
    store.habits().get(&id).ok_or_else(not_found::<Habit>)
}

/// Apply a partial update to a habit
pub fn update_habit(store: &Store, id: &str, req: UpdateHabitRequest) -> Result<Habit, ApiError> {
    let id = parse_id::<Habit>(id)?;
    let changes = req.into_changes()?;
    let touched_only = changes.is_empty();

    let updated = store
        .habits()
        .update(&id, |habit| habit.apply(changes, Utc::now()))?
        .ok_or_else(not_found::<Habit>)?;
    if touched_only {
        log::debug!("empty update, only bumped updated_at on habit {id}");
    } else {
        log::debug!("updated habit {id}");
    }
    Ok(updated)
}

/// Delete a habit
pub fn delete_habit(store: &Store, id: &str) -> Result<(), ApiError> {
    let id = parse_id::<Habit>(id)?;
    store.habits().remove(&id).ok_or_else(not_found::<Habit>)?;
    log::debug!("deleted habit {id}");
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn not_found<T: Record>() -> ApiError {
    ApiError::not_found(format!("{} not found", T::KIND))
}

/// A malformed ID can never match a stored record, so it reads as not found
fn parse_id<T: Record>(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| not_found::<T>())
}

fn has_tag<T: Record>(tag: Option<&str>) -> impl Fn(&T) -> bool + '_ {
    move |record| tag.is_none_or(|tag| record.tags().iter().any(|t| t == tag))
}
