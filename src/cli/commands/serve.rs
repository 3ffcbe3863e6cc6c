//! Start the HTTP server

use std::sync::Arc;

use habit_tracker::output::{OutputMode, ServeBanner};
use habit_tracker::server::Server;
use habit_tracker::storage::Store;

use crate::cli::app::ConfigArgs;

/// Bind the configured address and serve until the process is stopped
pub fn serve(args: &ConfigArgs, mode: OutputMode) -> anyhow::Result<()> {
    let config = args.resolve()?;
    let workers = config.server.workers;

    let server = Server::bind(&config, Arc::new(Store::new()))?;
    let addr = server
        .local_addr()
        .map_or_else(|| config.address(), |addr| addr.to_string());

    log::info!("listening on {addr} with {workers} workers");
    ServeBanner::new(&addr, workers).render(mode);

    server.run()?;
    Ok(())
}
