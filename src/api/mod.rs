//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business logic
//! handlers that can be used by any HTTP server implementation or directly by tests.
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take a store and typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    create_habit, create_task, delete_habit, delete_task, get_habit, get_task, health,
    list_habits, list_tasks, update_habit, update_task,
};
pub use types::{
    CreateHabitRequest, CreateTaskRequest, HabitQuery, HealthData, SERVICE_NAME, TaskQuery,
    UpdateHabitRequest, UpdateTaskRequest,
};
