//! Cross-origin resource sharing
//!
//! Requests without an `Origin` header are left alone. For the rest, the
//! policy decides which `Access-Control-*` headers to attach and answers
//! preflight requests itself.

use crate::config::CorsConfig;

use super::router::Reply;

/// Methods advertised in preflight responses
const ALLOW_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";

/// How long browsers may cache a preflight answer, in seconds
const MAX_AGE: &str = "600";

/// CORS policy built from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    allow_any: bool,
    origins: Vec<String>,
    allow_credentials: bool,
}

impl CorsPolicy {
    /// Build a policy from config
    #[must_use]
    pub fn from_config(config: &CorsConfig) -> Self {
        Self {
            allow_any: config.allow_origins.iter().any(|o| o == "*"),
            origins: config
                .allow_origins
                .iter()
                .filter(|o| *o != "*")
                .map(|o| o.trim_end_matches('/').to_string())
                .collect(),
            allow_credentials: config.allow_credentials,
        }
    }

    /// Value for `Access-Control-Allow-Origin`, or `None` if the origin is
    /// not allowed
    ///
    /// Browsers reject `*` on credentialed requests, so with credentials on
    /// the concrete origin is echoed instead.
    #[must_use]
    pub fn allow_origin(&self, origin: &str) -> Option<String> {
        if self.allow_any {
            if self.allow_credentials {
                return Some(origin.to_string());
            }
            return Some("*".to_string());
        }
        self.origins.iter().any(|o| o == origin).then(|| origin.to_string())
    }

    /// Attach CORS headers to a regular (non-preflight) response
    #[must_use]
    pub fn decorate(&self, reply: Reply, origin: Option<&str>) -> Reply {
        let Some(origin) = origin else {
            return reply;
        };
        let Some(allowed) = self.allow_origin(origin) else {
            return reply;
        };

        let echoes = allowed != "*";
        let mut reply = reply.with_header("Access-Control-Allow-Origin", allowed);
        if self.allow_credentials {
            reply = reply.with_header("Access-Control-Allow-Credentials", "true");
        }
        if echoes {
            reply = reply.with_header("Vary", "Origin");
        }
        reply
    }

    /// Answer a preflight (`OPTIONS` with `Access-Control-Request-Method`)
    #[must_use]
    pub fn preflight(&self, origin: Option<&str>, request_headers: Option<&str>) -> Reply {
        let Some(allowed) = origin.and_then(|o| self.allow_origin(o)) else {
            return Reply::text(400, "Disallowed CORS origin");
        };

        let echoes = allowed != "*";
        let mut reply = Reply::text(200, "OK")
            .with_header("Access-Control-Allow-Origin", allowed)
            .with_header("Access-Control-Allow-Methods", ALLOW_METHODS)
            .with_header("Access-Control-Max-Age", MAX_AGE);
        if let Some(headers) = request_headers.filter(|h| !h.trim().is_empty()) {
            reply = reply.with_header("Access-Control-Allow-Headers", headers);
        }
        if self.allow_credentials {
            reply = reply.with_header("Access-Control-Allow-Credentials", "true");
        }
        if echoes {
            reply = reply.with_header("Vary", "Origin");
        }
        reply
    }
}
