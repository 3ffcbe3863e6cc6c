//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands;
use habit_tracker::config::ServerConfig;
use habit_tracker::output::{OutputMode, VersionInfo};

/// habit-tracker - REST API for to-do tasks and habits
#[derive(Parser, Debug)]
#[command(
    name = "habit-tracker",
    version,
    about = "REST API for to-do tasks and habits",
    long_about = "Serve a small JSON API for managing to-do tasks and recurring habits.\n\n\
                  Records are kept in memory and are lost when the server stops.\n\
                  Interactive documentation is served at /docs."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ConfigArgs),

    /// Print the OpenAPI document
    Openapi {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config(ConfigArgs),

    /// Show version
    Version,
}

/// Where configuration comes from, shared by `serve` and `config`
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file (defaults to the user config directory if present)
    #[arg(short, long, env = "TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "TRACKER_HOST")]
    pub host: Option<String>,

    /// Port to bind (0 picks a free port)
    #[arg(short, long, env = "TRACKER_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "TRACKER_WORKERS")]
    pub workers: Option<usize>,
}

impl ConfigArgs {
    /// Load the config file and apply overrides
    pub fn resolve(&self) -> anyhow::Result<ServerConfig> {
        let config = ServerConfig::load(self.config.as_deref())?;
        Ok(config.with_overrides(self.host.clone(), self.port, self.workers)?)
    }
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = OutputMode::from_json_flag(cli.json);

    match cli.command {
        Some(Command::Serve(args)) => commands::serve(&args, output_mode),
        Some(Command::Openapi { output }) => commands::openapi(output.as_deref()),
        Some(Command::Config(args)) => commands::config(&args, output_mode),
        Some(Command::Version) => {
            VersionInfo::new().render(output_mode);
            Ok(())
        },
        None => {
            VersionInfo::with_hint().render(output_mode);
            Ok(())
        },
    }
}
