//! Show the effective configuration

use habit_tracker::output::OutputMode;

use crate::cli::app::ConfigArgs;

/// Print the configuration `serve` would use, as TOML or JSON
pub fn config(args: &ConfigArgs, mode: OutputMode) -> anyhow::Result<()> {
    let config = args.resolve()?;

    match mode {
        OutputMode::Human => print!("{}", config.to_toml()?),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
