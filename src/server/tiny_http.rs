//! tiny_http server adapter
//!
//! Owns the listening socket and a fixed pool of worker threads. Each worker
//! pulls requests off the shared server, runs them through the router and
//! CORS policy, and writes the reply back.

use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::config::ServerConfig;
use crate::storage::Store;

use super::cors::CorsPolicy;
use super::router::{self, Reply};

/// Errors raised while starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound
    #[error("failed to bind {addr}: {message}")]
    Bind {
        /// Address that failed
        addr: String,
        /// Error reported by the socket layer
        message: String,
    },

    /// A worker thread could not be spawned
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A bound, not yet running, HTTP server
pub struct Server {
    http: Arc<tiny_http::Server>,
    store: Arc<Store>,
    cors: Arc<CorsPolicy>,
    workers: usize,
}

impl Server {
    /// Bind the configured address
    pub fn bind(config: &ServerConfig, store: Arc<Store>) -> Result<Self, ServerError> {
        let addr = config.address();
        let http = tiny_http::Server::http(&addr).map_err(|e| ServerError::Bind {
            addr: addr.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            http: Arc::new(http),
            store,
            cors: Arc::new(CorsPolicy::from_config(&config.cors)),
            workers: config.server.workers.max(1),
        })
    }

    /// Address actually bound (useful with port 0)
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.http.server_addr().to_ip()
    }

    /// Start the worker pool and return immediately
    pub fn spawn(self) -> Result<RunningServer, ServerError> {
        let mut threads = Vec::with_capacity(self.workers);
        for n in 0..self.workers {
            let http = Arc::clone(&self.http);
            let store = Arc::clone(&self.store);
            let cors = Arc::clone(&self.cors);
            let handle = thread::Builder::new()
                .name(format!("http-worker-{n}"))
                .spawn(move || worker(&http, &store, &cors))?;
            threads.push(handle);
        }
        log::debug!("started {} worker threads", threads.len());

        Ok(RunningServer {
            http: self.http,
            threads,
        })
    }

    /// Serve until every worker exits
    pub fn run(self) -> Result<(), ServerError> {
        self.spawn()?.join();
        Ok(())
    }
}

/// Handle to a server whose workers are running
pub struct RunningServer {
    http: Arc<tiny_http::Server>,
    threads: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("addr", &self.local_addr())
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for RunningServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunningServer")
            .field("addr", &self.local_addr())
            .field("workers", &self.threads.len())
            .finish_non_exhaustive()
    }
}

impl RunningServer {
    /// Address actually bound
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.http.server_addr().to_ip()
    }

    /// Wake every worker so it stops accepting, then wait for them
    pub fn shutdown(self) {
        for _ in &self.threads {
            self.http.unblock();
        }
        self.join();
    }

    fn join(self) {
        for handle in self.threads {
            if handle.join().is_err() {
                log::warn!("worker thread panicked");
            }
        }
    }
}

fn worker(http: &tiny_http::Server, store: &Store, cors: &CorsPolicy) {
    for request in http.incoming_requests() {
        handle_request(request, store, cors);
    }
}

fn handle_request(mut request: Request, store: &Store, cors: &CorsPolicy) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let origin = header_value(&request, "Origin");

    let reply = if method == Method::Options
        && header_value(&request, "Access-Control-Request-Method").is_some()
    {
        cors.preflight(
            origin.as_deref(),
            header_value(&request, "Access-Control-Request-Headers").as_deref(),
        )
    } else {
        let reply = router::route(store, &method, &url, request.as_reader());
        cors.decorate(reply, origin.as_deref())
    };

    log::debug!("{method} {url} -> {}", reply.status);
    if let Err(e) = request.respond(into_response(reply)) {
        log::warn!("failed to respond to {method} {url}: {e}");
    }
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

fn into_response(reply: Reply) -> Response<Cursor<Vec<u8>>> {
    let mut response = Response::from_data(reply.body).with_status_code(StatusCode(reply.status));
    if let Some(content_type) = reply.content_type {
        response = with_header(response, "Content-Type", content_type);
    }
    for (name, value) in &reply.headers {
        response = with_header(response, name, value);
    }
    response
}

fn with_header(
    response: Response<Cursor<Vec<u8>>>,
    name: &str,
    value: &str,
) -> Response<Cursor<Vec<u8>>> {
    match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => {
            log::warn!("dropping invalid header {name}");
            response
        },
    }
}
