//! Request routing
//!
//! Maps `method + url + body` onto the API handlers and turns their results
//! into a [`Reply`]. Nothing here touches sockets, so the whole HTTP surface
//! can be exercised without binding a port.

use std::io::Read;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tiny_http::Method;

use crate::api::{self, ApiError, ApiErrorData, HabitQuery, TaskQuery};
use crate::openapi;
use crate::storage::Store;

/// JSON content type
const JSON: &str = "application/json";

/// A response ready to be written by a server adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// Content type of `body`, if any
    pub content_type: Option<&'static str>,
    /// Extra headers
    pub headers: Vec<(&'static str, String)>,
    /// Response body
    pub body: Vec<u8>,
}

impl Reply {
    /// JSON response with the given status
    #[must_use]
    pub fn json<T: Serialize>(status: u16, data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(body) => Self {
                status,
                content_type: Some(JSON),
                headers: Vec::new(),
                body,
            },
            Err(e) => Self::error(&ApiError::internal(format!("Failed to encode response: {e}"))),
        }
    }

    /// Error response carrying the error's status code
    #[must_use]
    pub fn error(error: &ApiError) -> Self {
        let body = serde_json::to_vec(&ApiErrorData::from(error))
            .unwrap_or_else(|_| br#"{"code":"INTERNAL_ERROR"}"#.to_vec());
        Self {
            status: error.status_code(),
            content_type: Some(JSON),
            headers: Vec::new(),
            body,
        }
    }

    /// Plain text response
    #[must_use]
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8"),
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    /// HTML response
    #[must_use]
    pub fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: Some("text/html; charset=utf-8"),
            headers: Vec::new(),
            body: body.into_bytes(),
        }
    }

    /// Empty response with the given status
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Look up a header set on this reply (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// =============================================================================
// ROUTING
// =============================================================================

/// Resource collections exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Tasks,
    Habits,
}

/// A resolved path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint<'a> {
    Health,
    OpenApi,
    Docs,
    Collection(Resource),
    Item(Resource, &'a str),
}

impl Endpoint<'_> {
    /// Methods this endpoint supports, for `Allow` headers
    const fn allowed(self) -> &'static str {
        match self {
            Self::Health | Self::OpenApi | Self::Docs => "GET",
            Self::Collection(_) => "GET, POST",
            Self::Item(..) => "GET, PATCH, DELETE",
        }
    }
}

fn resolve(path: &str) -> Option<Endpoint<'_>> {
    // Treat "/tasks/" like "/tasks"
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };

    match path {
        "/" | "" => return Some(Endpoint::Health),
        "/openapi.json" => return Some(Endpoint::OpenApi),
        "/docs" => return Some(Endpoint::Docs),
        "/tasks" => return Some(Endpoint::Collection(Resource::Tasks)),
        "/habits" => return Some(Endpoint::Collection(Resource::Habits)),
        _ => {},
    }

    let (resource, id) = if let Some(id) = path.strip_prefix("/tasks/") {
        (Resource::Tasks, id)
    } else if let Some(id) = path.strip_prefix("/habits/") {
        (Resource::Habits, id)
    } else {
        return None;
    };

    // Sub-paths like /tasks/{id}/something are not routes
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(Endpoint::Item(resource, id))
}

/// Route a request to its handler
///
/// `url` is the raw request target (path plus optional query string).
pub fn route(store: &Store, method: &Method, url: &str, body: &mut dyn Read) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    let Some(endpoint) = resolve(path) else {
        return Reply::error(&ApiError::not_found(format!("Not Found: {method} {path}")));
    };

    match (method, endpoint) {
        (Method::Get, Endpoint::Health) => Reply::json(200, &api::health()),
        (Method::Get, Endpoint::OpenApi) => Reply::json(200, &openapi::document()),
        (Method::Get, Endpoint::Docs) => Reply::html(openapi::docs_html()),

        // GET /tasks, GET /habits
        (Method::Get, Endpoint::Collection(Resource::Tasks)) => respond(
            TaskQuery::parse(query)
                .map_err(ApiError::from)
                .and_then(|q| api::list_tasks(store, &q)),
        ),
        (Method::Get, Endpoint::Collection(Resource::Habits)) => respond(
            HabitQuery::parse(query)
                .map_err(ApiError::from)
                .and_then(|q| api::list_habits(store, &q)),
        ),

        // POST /tasks, POST /habits
        (Method::Post, Endpoint::Collection(Resource::Tasks)) => {
            respond(read_json_body(body).and_then(|req| api::create_task(store, req)))
        },
        (Method::Post, Endpoint::Collection(Resource::Habits)) => {
            respond(read_json_body(body).and_then(|req| api::create_habit(store, req)))
        },

        // GET /{resource}/{id}
        (Method::Get, Endpoint::Item(Resource::Tasks, id)) => respond(api::get_task(store, id)),
        (Method::Get, Endpoint::Item(Resource::Habits, id)) => respond(api::get_habit(store, id)),

        // PATCH /{resource}/{id}
        (Method::Patch, Endpoint::Item(Resource::Tasks, id)) => {
            respond(read_json_body(body).and_then(|req| api::update_task(store, id, req)))
        },
        (Method::Patch, Endpoint::Item(Resource::Habits, id)) => {
            respond(read_json_body(body).and_then(|req| api::update_habit(store, id, req)))
        },

        // DELETE /{resource}/{id}
        (Method::Delete, Endpoint::Item(Resource::Tasks, id)) => {
            respond_empty(api::delete_task(store, id))
        },
        (Method::Delete, Endpoint::Item(Resource::Habits, id)) => {
            respond_empty(api::delete_habit(store, id))
        },

        // HEAD mirrors GET without a body
        (Method::Head, _) => {
            let mut reply = route(store, &Method::Get, url, body);
            reply.body.clear();
            reply
        },

        _ => Reply::error(&ApiError::method_not_allowed(format!(
            "Method Not Allowed: {method} {path}"
        )))
        .with_header("Allow", endpoint.allowed()),
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read and parse a JSON body
fn read_json_body<T: DeserializeOwned>(body: &mut dyn Read) -> Result<T, ApiError> {
    let mut raw = String::new();
    body.read_to_string(&mut raw)
        .map_err(|e| ApiError::validation(format!("Failed to read request body: {e}")))?;

    serde_json::from_str(&raw).map_err(|e| ApiError::validation(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

fn respond<T: Serialize>(result: Result<T, ApiError>) -> Reply {
    match result {
        Ok(data) => Reply::json(200, &data),
        Err(e) => Reply::error(&e),
    }
}

fn respond_empty(result: Result<(), ApiError>) -> Reply {
    match result {
        Ok(()) => Reply::empty(204),
        Err(e) => Reply::error(&e),
    }
}
