//! OpenAPI description of the HTTP surface
//!
//! The document is assembled by hand with `serde_json::json!` and served at
//! `/openapi.json`; `/docs` renders it through Swagger UI.

use serde_json::{Map, Value, json};

use crate::api::SERVICE_NAME;
use crate::models::Page;

/// Service description shown in the document header
const DESCRIPTION: &str = "Backend API providing endpoints for tasks and habits with basic \
                           in-memory storage. This is a starter implementation to unblock \
                           frontend integration.";

/// Build the OpenAPI 3.1 document
#[must_use]
pub fn document() -> Value {
    let mut paths = Map::new();
    paths.insert("/".to_string(), json!({"get": health_operation()}));
    paths.insert(
        "/tasks".to_string(),
        json!({"get": list_tasks_operation(), "post": create_operation(Resource::Task)}),
    );
    paths.insert("/tasks/{task_id}".to_string(), item_path(Resource::Task));
    paths.insert(
        "/habits".to_string(),
        json!({"get": list_habits_operation(), "post": create_operation(Resource::Habit)}),
    );
    paths.insert("/habits/{habit_id}".to_string(), item_path(Resource::Habit));

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": SERVICE_NAME,
            "description": DESCRIPTION,
            "version": crate::VERSION,
        },
        "tags": [
            {"name": "Health", "description": "Service health and status endpoints."},
            {"name": "Tasks", "description": "CRUD operations for to-do tasks."},
            {"name": "Habits", "description": "CRUD operations and tracking for habits."},
        ],
        "paths": paths,
        "components": {"schemas": schemas()},
    })
}

#[derive(Clone, Copy)]
enum Resource {
    Task,
    Habit,
}

impl Resource {
    const fn name(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Habit => "Habit",
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Task => "Tasks",
            Self::Habit => "Habits",
        }
    }

    const fn noun(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Habit => "habit",
        }
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

fn health_operation() -> Value {
    json!({
        "tags": ["Health"],
        "summary": "Health Check",
        "description": "Service liveness probe endpoint returning a simple payload.",
        "operationId": "health_check",
        "responses": {"200": json_response("Service is healthy", schema_ref("Health"))},
    })
}

fn list_tasks_operation() -> Value {
    json!({
        "tags": ["Tasks"],
        "summary": "List tasks",
        "description": "Retrieve a paginated list of tasks with optional tag and completion filters.",
        "operationId": "list_tasks",
        "parameters": [
            page_param(),
            size_param(),
            query_param("tag", "Filter by tag", json!({"type": "string"})),
            query_param("completed", "Filter by completion status", json!({"type": "boolean"})),
        ],
        "responses": {
            "200": json_response("Page of tasks", array_of("Task")),
            "422": error_response("Invalid query parameters"),
        },
    })
}

fn list_habits_operation() -> Value {
    json!({
        "tags": ["Habits"],
        "summary": "List habits",
        "description": "Retrieve all habits with basic pagination.",
        "operationId": "list_habits",
        "parameters": [
            page_param(),
            size_param(),
            query_param("tag", "Filter by tag", json!({"type": "string"})),
        ],
        "responses": {
            "200": json_response("Page of habits", array_of("Habit")),
            "422": error_response("Invalid query parameters"),
        },
    })
}

fn create_operation(resource: Resource) -> Value {
    let (name, noun) = (resource.name(), resource.noun());
    json!({
        "tags": [resource.tag()],
        "summary": format!("Create {noun}"),
        "description": format!("Create a new {noun} and return the created entity."),
        "operationId": format!("create_{noun}"),
        "requestBody": request_body(&format!("{name}Create")),
        "responses": {
            "200": json_response(&format!("Created {noun}"), schema_ref(name)),
            "422": error_response("Invalid request body"),
        },
    })
}

fn item_path(resource: Resource) -> Value {
    let (name, noun) = (resource.name(), resource.noun());
    let missing = format!("{name} not found");
    json!({
        "parameters": [path_param(&format!("{noun}_id"), &format!("Unique {noun} identifier"))],
        "get": {
            "tags": [resource.tag()],
            "summary": format!("Get {noun} by ID"),
            "description": format!("Retrieve a {noun} by its unique identifier."),
            "operationId": format!("get_{noun}"),
            "responses": {
                "200": json_response(&format!("The {noun}"), schema_ref(name)),
                "404": error_response(&missing),
            },
        },
        "patch": {
            "tags": [resource.tag()],
            "summary": format!("Update {noun}"),
            "description": format!("Apply partial updates to a {noun} by ID."),
            "operationId": format!("update_{noun}"),
            "requestBody": request_body(&format!("{name}Update")),
            "responses": {
                "200": json_response(&format!("Updated {noun}"), schema_ref(name)),
                "404": error_response(&missing),
                "422": error_response("Invalid request body"),
            },
        },
        "delete": {
            "tags": [resource.tag()],
            "summary": format!("Delete {noun}"),
            "description": format!("Delete a {noun} by its unique identifier."),
            "operationId": format!("delete_{noun}"),
            "responses": {
                "204": {"description": format!("{name} deleted")},
                "404": error_response(&missing),
            },
        },
    })
}

/// Swagger UI page pointing at `/openapi.json`
#[must_use]
pub fn docs_html() -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{SERVICE_NAME} - Swagger UI</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({{ url: "/openapi.json", dom_id: "#swagger-ui" }});
  </script>
</body>
</html>
"##
    )
}

// =============================================================================
// SCHEMAS
// =============================================================================

fn schemas() -> Value {
    let mut schemas = Map::new();
    schemas.insert(
        "Health".to_string(),
        json!({
            "type": "object",
            "required": ["message", "service"],
            "properties": {
                "message": {"type": "string"},
                "service": {"type": "string"},
            },
        }),
    );
    schemas.insert(
        "Error".to_string(),
        json!({
            "type": "object",
            "required": ["code", "detail"],
            "properties": {
                "code": {
                    "type": "string",
                    "enum": ["NOT_FOUND", "METHOD_NOT_ALLOWED", "VALIDATION_ERROR", "INTERNAL_ERROR"],
                },
                "detail": {"type": "string"},
            },
        }),
    );
    schemas.insert("Task".to_string(), task_schema());
    schemas.insert("TaskCreate".to_string(), task_create_schema());
    schemas.insert("TaskUpdate".to_string(), task_update_schema());
    schemas.insert("Habit".to_string(), habit_schema());
    schemas.insert("HabitCreate".to_string(), habit_create_schema());
    schemas.insert("HabitUpdate".to_string(), habit_update_schema());
    Value::Object(schemas)
}

fn task_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "title", "priority", "tags", "completed", "created_at", "updated_at"],
        "properties": {
            "id": {"type": "string", "format": "uuid", "description": "Unique task identifier"},
            "title": {"type": "string", "description": "Title of the task"},
            "description": nullable(string()),
            "due_date": nullable(date()),
            "priority": priority(),
            "tags": tags(),
            "completed": {"type": "boolean", "description": "Completion status"},
            "created_at": timestamp(),
            "updated_at": timestamp(),
        },
    })
}

fn task_create_schema() -> Value {
    json!({
        "type": "object",
        "required": ["title"],
        "properties": {
            "title": {"type": "string", "minLength": 1},
            "description": nullable(string()),
            "due_date": nullable(date()),
            "priority": nullable(priority()),
            "tags": tags(),
            "completed": {"type": "boolean", "default": false},
        },
    })
}

fn task_update_schema() -> Value {
    json!({
        "type": "object",
        "description": "Only the keys present are applied; null clears optional fields.",
        "properties": {
            "title": {"type": "string", "minLength": 1},
            "description": nullable(string()),
            "due_date": nullable(date()),
            "priority": priority(),
            "tags": tags(),
            "completed": {"type": "boolean"},
        },
    })
}

fn habit_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "name", "frequency", "tags", "created_at", "updated_at"],
        "properties": {
            "id": {"type": "string", "format": "uuid", "description": "Unique habit identifier"},
            "name": {"type": "string", "description": "Name of the habit"},
            "description": nullable(string()),
            "frequency": frequency(),
            "target": nullable(target()),
            "unit": nullable(string()),
            "tags": tags(),
            "created_at": timestamp(),
            "updated_at": timestamp(),
        },
    })
}

fn habit_create_schema() -> Value {
    json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": {"type": "string", "minLength": 1},
            "description": nullable(string()),
            "frequency": frequency(),
            "target": nullable(target()),
            "unit": nullable(string()),
            "tags": tags(),
        },
    })
}

fn habit_update_schema() -> Value {
    json!({
        "type": "object",
        "description": "Only the keys present are applied; null clears optional fields.",
        "properties": {
            "name": {"type": "string", "minLength": 1},
            "description": nullable(string()),
            "frequency": frequency(),
            "target": nullable(target()),
            "unit": nullable(string()),
            "tags": tags(),
        },
    })
}

fn string() -> Value {
    json!({"type": "string"})
}

fn date() -> Value {
    json!({"type": "string", "format": "date"})
}

fn timestamp() -> Value {
    json!({"type": "string", "format": "date-time"})
}

fn tags() -> Value {
    json!({"type": "array", "items": {"type": "string"}, "description": "Categorization tags"})
}

fn priority() -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": 5,
        "default": 3,
        "description": "Priority from 1 (high) to 5 (low)",
    })
}

fn frequency() -> Value {
    json!({"type": "string", "enum": ["daily", "weekly", "custom"], "default": "daily"})
}

fn target() -> Value {
    json!({"type": "integer", "minimum": 0})
}

// =============================================================================
// HELPERS
// =============================================================================

fn schema_ref(name: &str) -> Value {
    json!({"$ref": format!("#/components/schemas/{name}")})
}

fn array_of(name: &str) -> Value {
    json!({"type": "array", "items": schema_ref(name)})
}

fn nullable(schema: Value) -> Value {
    json!({"anyOf": [schema, {"type": "null"}]})
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": schema}},
    })
}

fn error_response(description: &str) -> Value {
    json_response(description, schema_ref("Error"))
}

fn request_body(name: &str) -> Value {
    json!({
        "required": true,
        "content": {"application/json": {"schema": schema_ref(name)}},
    })
}

fn query_param(name: &str, description: &str, schema: Value) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": schema,
    })
}

fn page_param() -> Value {
    query_param(
        "page",
        "Page index starting from 1",
        json!({"type": "integer", "minimum": 1, "default": 1}),
    )
}

fn size_param() -> Value {
    query_param(
        "size",
        "Page size",
        json!({"type": "integer", "minimum": 1, "maximum": Page::MAX_SIZE, "default": Page::DEFAULT_SIZE}),
    )
}

fn path_param(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "description": description,
        "schema": {"type": "string", "format": "uuid"},
    })
}
