//! Print the OpenAPI document

use std::fs;
use std::path::Path;

use anyhow::Context;

use habit_tracker::openapi;

/// Write the OpenAPI document as pretty JSON to `output`, or stdout
pub fn openapi(output: Option<&Path>) -> anyhow::Result<()> {
    let document = serde_json::to_string_pretty(&openapi::document())?;

    match output {
        Some(path) => {
            fs::write(path, format!("{document}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote OpenAPI document to {}", path.display());
        },
        None => println!("{document}"),
    }
    Ok(())
}
