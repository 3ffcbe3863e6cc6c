//! Command implementations

mod config;
mod openapi;
mod serve;

pub use config::config;
pub use openapi::openapi;
pub use serve::serve;
