//! HTTP server
//!
//! Routing and CORS are plain functions over [`Reply`] values so they can be
//! tested without a socket. The `tiny_http` adapter owns the listener and
//! worker pool.

pub mod cors;
pub mod router;
pub mod tiny_http;

pub use cors::CorsPolicy;
pub use router::{Reply, route};
pub use self::tiny_http::{RunningServer, Server, ServerError};
