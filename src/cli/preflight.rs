//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, TubeMindError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Ingestion needs the API key and yt-dlp.
    Ingest,
    /// The server ingests on request, so it needs the same.
    Serve,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Ingest | Operation::Serve => {
            settings.validate()?;
            settings.api_key().map_err(|e| {
                TubeMindError::Config(format!(
                    "{}. Set it with: export {}='...'",
                    e, settings.provider.api_key_env
                ))
            })?;
            check_tool("yt-dlp")?;
        }
    }
    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TubeMindError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TubeMindError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(TubeMindError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
