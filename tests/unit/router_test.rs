//! Tests for request routing
//!
//! Drives the router with raw method/url/body triples, the way the server
//! adapter does, and checks status codes and JSON bodies.

use habit_tracker::server::{Reply, route};
use habit_tracker::storage::Store;
use serde_json::{Value, json};
use tiny_http::Method;

fn call(store: &Store, method: Method, url: &str, body: &str) -> Reply {
    route(store, &method, url, &mut body.as_bytes())
}

fn json_body(reply: &Reply) -> Value {
    serde_json::from_slice(&reply.body).unwrap()
}

fn create_task(store: &Store, body: &Value) -> Value {
    let reply = call(store, Method::Post, "/tasks", &body.to_string());
    assert_eq!(reply.status, 200, "{}", String::from_utf8_lossy(&reply.body));
    json_body(&reply)
}

// =============================================================================
// HEALTH AND DOCS
// =============================================================================

#[test]
fn test_root_is_health() {
    let store = Store::new();
    let reply = call(&store, Method::Get, "/", "");
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type, Some("application/json"));
    assert_eq!(
        json_body(&reply),
        json!({"message": "Healthy", "service": "Habit & To-Do Tracker API"})
    );
}

#[test]
fn test_openapi_and_docs() {
    let store = Store::new();

    let reply = call(&store, Method::Get, "/openapi.json", "");
    assert_eq!(reply.status, 200);
    let doc = json_body(&reply);
    assert!(doc["paths"]["/tasks/{task_id}"]["patch"].is_object());

    let reply = call(&store, Method::Get, "/docs", "");
    assert_eq!(reply.status, 200);
    assert!(reply.content_type.unwrap().starts_with("text/html"));
    assert!(String::from_utf8_lossy(&reply.body).contains("/openapi.json"));
}

// =============================================================================
// TASKS
// =============================================================================

#[test]
fn test_task_lifecycle() {
    let store = Store::new();
    let task = create_task(&store, &json!({"title": "Ship it", "tags": ["work"]}));
    let id = task["id"].as_str().unwrap().to_string();
    assert_eq!(task["priority"], 3);
    assert_eq!(task["completed"], false);
    assert_eq!(task["description"], Value::Null);

    let reply = call(&store, Method::Get, &format!("/tasks/{id}"), "");
    assert_eq!(json_body(&reply), task);

    let reply = call(&store, Method::Patch, &format!("/tasks/{id}"), r#"{"completed": true}"#);
    assert_eq!(reply.status, 200);
    let patched = json_body(&reply);
    assert_eq!(patched["completed"], true);
    assert_eq!(patched["title"], "Ship it");

    let reply = call(&store, Method::Delete, &format!("/tasks/{id}"), "");
    assert_eq!(reply.status, 204);
    assert!(reply.body.is_empty());

    let reply = call(&store, Method::Get, &format!("/tasks/{id}"), "");
    assert_eq!(reply.status, 404);
    assert_eq!(json_body(&reply), json!({"code": "NOT_FOUND", "detail": "Task not found"}));
}

#[test]
fn test_task_list_pagination_over_http() {
    let store = Store::new();
    for title in ["a", "b", "c"] {
        create_task(&store, &json!({ "title": title }));
    }

    let page1 = json_body(&call(&store, Method::Get, "/tasks?page=1&size=2", ""));
    let page2 = json_body(&call(&store, Method::Get, "/tasks/?page=2&size=2", ""));
    assert_eq!(page1.as_array().unwrap().len(), 2);
    assert_eq!(page2.as_array().unwrap().len(), 1);
    assert_eq!(page2[0]["title"], "c");
}

#[test]
fn test_invalid_bodies_are_422() {
    let store = Store::new();

    let cases = [
        "not json",
        "{}",
        r#"{"title": ""}"#,
        r#"{"title": "x", "priority": 0}"#,
        r#"{"title": "x", "due_date": "tomorrow"}"#,
    ];
    for body in cases {
        let reply = call(&store, Method::Post, "/tasks", body);
        assert_eq!(reply.status, 422, "body {body:?}");
        assert_eq!(json_body(&reply)["code"], "VALIDATION_ERROR");
    }
    assert!(store.tasks().is_empty());
}

#[test]
fn test_invalid_query_is_422() {
    let store = Store::new();
    for url in ["/tasks?size=500", "/tasks?page=0", "/habits?page=x", "/tasks?completed=maybe"] {
        assert_eq!(call(&store, Method::Get, url, "").status, 422, "{url}");
    }
}

#[test]
fn test_patch_unknown_task_is_404() {
    let store = Store::new();
    let url = "/tasks/00000000-0000-4000-8000-000000000000";
    let reply = call(&store, Method::Patch, url, r#"{"title": "x"}"#);
    assert_eq!(reply.status, 404);
}

// =============================================================================
// HABITS
// =============================================================================

#[test]
fn test_habit_create_filter_update() {
    let store = Store::new();
    let reply = call(
        &store,
        Method::Post,
        "/habits",
        r#"{"name": "Meditate", "frequency": "daily", "target": 10, "unit": "minutes", "tags": ["mind"]}"#,
    );
    assert_eq!(reply.status, 200);
    let habit = json_body(&reply);
    let id = habit["id"].as_str().unwrap();

    call(&store, Method::Post, "/habits", r#"{"name": "Stretch", "tags": ["body"]}"#);

    let mind = json_body(&call(&store, Method::Get, "/habits?tag=mind", ""));
    assert_eq!(mind.as_array().unwrap().len(), 1);
    assert_eq!(mind[0]["id"], habit["id"]);

    let reply = call(&store, Method::Patch, &format!("/habits/{id}"), r#"{"frequency": "weekly"}"#);
    let updated = json_body(&reply);
    assert_eq!(updated["frequency"], "weekly");
    assert_eq!(updated["target"], 10);

    let reply = call(&store, Method::Post, "/habits", r#"{"name": "x", "frequency": "sometimes"}"#);
    assert_eq!(reply.status, 422);
}

#[test]
fn test_habit_frequency_is_case_insensitive() {
    let store = Store::new();

    let reply = call(&store, Method::Post, "/habits", r#"{"name": "Yoga", "frequency": "Weekly"}"#);
    assert_eq!(reply.status, 200);
    let habit = json_body(&reply);
    assert_eq!(habit["frequency"], "weekly");

    let id = habit["id"].as_str().unwrap();
    let reply = call(&store, Method::Patch, &format!("/habits/{id}"), r#"{"frequency": " CUSTOM "}"#);
    assert_eq!(reply.status, 200);
    assert_eq!(json_body(&reply)["frequency"], "custom");
}

#[test]
fn test_free_form_frequency_is_422() {
    let store = Store::new();
    let reply = call(
        &store,
        Method::Post,
        "/habits",
        r#"{"name": "Yoga", "frequency": "3x per week"}"#,
    );
    assert_eq!(reply.status, 422);
    let body = json_body(&reply);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["detail"].as_str().unwrap().contains("invalid frequency"));
    assert!(store.habits().is_empty());
}

// =============================================================================
// METHODS AND PATHS
// =============================================================================

#[test]
fn test_unknown_paths_are_404() {
    let store = Store::new();
    for url in ["/nothing", "/tasks/abc/extra", "/habitsx"] {
        let reply = call(&store, Method::Get, url, "");
        assert_eq!(reply.status, 404, "{url}");
        assert_eq!(json_body(&reply)["code"], "NOT_FOUND");
    }
}

#[test]
fn test_malformed_id_is_404() {
    let store = Store::new();
    assert_eq!(call(&store, Method::Get, "/habits/123", "").status, 404);
    assert_eq!(call(&store, Method::Delete, "/tasks/xyz", "").status, 404);
}

#[test]
fn test_method_not_allowed() {
    let store = Store::new();

    let reply = call(&store, Method::Delete, "/tasks", "");
    assert_eq!(reply.status, 405);
    assert_eq!(reply.header("Allow"), Some("GET, POST"));
    assert_eq!(json_body(&reply)["code"], "METHOD_NOT_ALLOWED");

    let reply = call(&store, Method::Post, "/habits/abc", "{}");
    assert_eq!(reply.status, 405);
    assert_eq!(reply.header("Allow"), Some("GET, PATCH, DELETE"));

    assert_eq!(call(&store, Method::Post, "/", "").status, 405);
}
