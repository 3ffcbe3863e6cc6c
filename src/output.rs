//! Output formatting for human and JSON modes
//!
//! Command results render either as human-readable text or as JSON for
//! scripts.

use colored::Colorize;
use serde::Serialize;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

impl OutputMode {
    /// Pick the mode from the `--json` flag
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

/// Printed once the server is listening
#[derive(Debug, Clone, Serialize)]
pub struct ServeBanner {
    /// Base URL clients should use
    pub url: String,
    /// Interactive documentation URL
    pub docs: String,
    /// Number of worker threads
    pub workers: usize,
}

impl ServeBanner {
    /// Banner for a server listening on `addr`
    #[must_use]
    pub fn new(addr: &str, workers: usize) -> Self {
        let url = format!("http://{addr}");
        Self {
            docs: format!("{url}/docs"),
            url,
            workers,
        }
    }

    /// Render the banner based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("{} listening on {}", crate::api::SERVICE_NAME.bold(), self.url.green());
                println!("  Docs:    {}", self.docs.cyan());
                println!("  Workers: {}", self.workers);
                println!("\nPress Ctrl+C to stop");
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string(self).unwrap_or_default());
            },
        }
    }
}

/// Result of the `version` command (and of running with no command)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VersionInfo {
    /// Crate version
    pub version: &'static str,
    /// Usage hint, shown when no command was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl VersionInfo {
    /// Version without a hint
    #[must_use]
    pub const fn new() -> Self {
        Self {
            version: crate::VERSION,
            hint: None,
        }
    }

    /// Version with the usage hint
    #[must_use]
    pub const fn with_hint() -> Self {
        Self {
            version: crate::VERSION,
            hint: Some("Use --help for usage"),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("habit-tracker v{}", self.version);
                if self.hint.is_some() {
                    println!("\nRun 'habit-tracker --help' for usage");
                    println!("Run 'habit-tracker serve' to start the API");
                }
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self::new()
    }
}
