//! habit-tracker - A small REST API for to-do tasks and recurring habits
//!
//! Records live in memory for the lifetime of the process. The HTTP layer is
//! split into an API layer (handlers over a [`storage::Store`]), a router that
//! maps requests onto it, and a `tiny_http` adapter that serves it.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod config;
pub mod models;
pub mod openapi;
pub mod output;
pub mod paths;
pub mod server;
pub mod storage;
