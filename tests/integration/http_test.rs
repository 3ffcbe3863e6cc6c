//! End-to-end HTTP tests
//!
//! Each test starts its own server on an ephemeral port with a fresh store.

use std::sync::Arc;
use std::thread;

use habit_tracker::config::{CorsConfig, ServerConfig};
use habit_tracker::server::{RunningServer, Server};
use habit_tracker::storage::Store;
use serde_json::{Value, json};

struct TestServer {
    base: String,
    running: Option<RunningServer>,
}

impl TestServer {
    fn start() -> Self {
        Self::with_cors(CorsConfig::default())
    }

    fn with_cors(cors: CorsConfig) -> Self {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        config.server.workers = 2;
        config.cors = cors;

        let server = Server::bind(&config, Arc::new(Store::new())).unwrap();
        let addr = server.local_addr().unwrap();
        Self {
            base: format!("http://{addr}"),
            running: Some(server.spawn().unwrap()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.shutdown();
        }
    }
}

/// Send a request and return the status and response, whatever the status
fn send(request: ureq::Request, body: Option<&Value>) -> (u16, ureq::Response) {
    let result = match body {
        Some(body) => request
            .set("Content-Type", "application/json")
            .send_string(&body.to_string()),
        None => request.call(),
    };
    match result {
        Ok(response) => (response.status(), response),
        Err(ureq::Error::Status(code, response)) => (code, response),
        Err(e) => panic!("request failed: {e}"),
    }
}

fn json_of(response: ureq::Response) -> Value {
    serde_json::from_str(&response.into_string().unwrap()).unwrap()
}

// =============================================================================
// CRUD
// =============================================================================

#[test]
fn test_health_over_http() {
    let server = TestServer::start();
    let (status, response) = send(ureq::get(&server.url("/")), None);
    assert_eq!(status, 200);
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    assert_eq!(json_of(response)["message"], "Healthy");
}

#[test]
fn test_task_crud_over_http() {
    let server = TestServer::start();

    let (status, response) = send(
        ureq::post(&server.url("/tasks")),
        Some(&json!({"title": "Pay rent", "due_date": "2025-02-01", "tags": ["home"]})),
    );
    assert_eq!(status, 200);
    let task = json_of(response);
    let item = server.url(&format!("/tasks/{}", task["id"].as_str().unwrap()));

    let (status, response) = send(ureq::get(&item), None);
    assert_eq!(status, 200);
    assert_eq!(json_of(response), task);

    let (status, response) =
        send(ureq::request("PATCH", &item), Some(&json!({"priority": 1})));
    assert_eq!(status, 200);
    let patched = json_of(response);
    assert_eq!(patched["priority"], 1);
    assert_eq!(patched["due_date"], "2025-02-01");

    let (status, response) = send(ureq::delete(&item), None);
    assert_eq!(status, 204);
    assert!(response.into_string().unwrap().is_empty());

    let (status, response) = send(ureq::get(&item), None);
    assert_eq!(status, 404);
    assert_eq!(json_of(response)["detail"], "Task not found");
}

#[test]
fn test_validation_error_over_http() {
    let server = TestServer::start();
    let (status, response) = send(
        ureq::post(&server.url("/habits")),
        Some(&json!({"name": "Read", "target": -1})),
    );
    assert_eq!(status, 422);
    assert_eq!(json_of(response)["code"], "VALIDATION_ERROR");
}

#[test]
fn test_method_not_allowed_over_http() {
    let server = TestServer::start();
    let (status, response) = send(ureq::put(&server.url("/habits")), Some(&json!({})));
    assert_eq!(status, 405);
    assert_eq!(response.header("Allow"), Some("GET, POST"));
}

#[test]
fn test_concurrent_creates_are_all_stored() {
    let server = TestServer::start();
    let url = server.url("/tasks");

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let url = url.clone();
            thread::spawn(move || {
                for n in 0..5 {
                    let body = json!({"title": format!("w{worker}-{n}")});
                    let (status, _) = send(ureq::post(&url), Some(&body));
                    assert_eq!(status, 200);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let (_, response) = send(ureq::get(&server.url("/tasks?size=200")), None);
    let tasks = json_of(response);
    assert_eq!(tasks.as_array().unwrap().len(), 40);
}

// =============================================================================
// CORS
// =============================================================================

#[test]
fn test_cors_echoes_origin_with_credentials() {
    let server = TestServer::start();
    let (status, response) =
        send(ureq::get(&server.url("/tasks")).set("Origin", "http://localhost:3000"), None);
    assert_eq!(status, 200);
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("http://localhost:3000"));
    assert_eq!(response.header("Access-Control-Allow-Credentials"), Some("true"));
}

#[test]
fn test_cors_preflight() {
    let server = TestServer::start();
    let (status, response) = send(
        ureq::request("OPTIONS", &server.url("/tasks"))
            .set("Origin", "http://localhost:3000")
            .set("Access-Control-Request-Method", "POST")
            .set("Access-Control-Request-Headers", "content-type"),
        None,
    );
    assert_eq!(status, 200);
    assert!(response.header("Access-Control-Allow-Methods").unwrap().contains("POST"));
    assert_eq!(response.header("Access-Control-Allow-Headers"), Some("content-type"));
}

#[test]
fn test_cors_rejects_unlisted_origin() {
    let server = TestServer::with_cors(CorsConfig {
        allow_origins: vec!["http://app.example".to_string()],
        allow_credentials: false,
    });

    let (status, response) = send(
        ureq::request("OPTIONS", &server.url("/tasks"))
            .set("Origin", "http://evil.example")
            .set("Access-Control-Request-Method", "GET"),
        None,
    );
    assert_eq!(status, 400);
    assert!(response.header("Access-Control-Allow-Origin").is_none());

    let (status, response) =
        send(ureq::get(&server.url("/")).set("Origin", "http://app.example"), None);
    assert_eq!(status, 200);
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("http://app.example"));
    assert_eq!(response.header("Vary"), Some("Origin"));
}
