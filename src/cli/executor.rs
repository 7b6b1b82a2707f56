//! Command executor for dispatching CLI commands
//!
//! Entry point for running a parsed command once configuration is loaded.

use std::io::Write;

use super::handlers::{CacheCommandHandler, FetchCommandHandler};
use super::parser::Commands;
use crate::cache::CacheValidation;
use crate::config::Settings;
use crate::error::AppResult;

/// Execute `command` against the store configured in `settings`, writing
/// command output to `out`
pub async fn execute_command(
    command: &Commands,
    settings: &Settings,
    out: &mut impl Write,
) -> AppResult<()> {
    let cache = CacheCommandHandler::from_settings(settings)?;
    run(command, settings, cache, out).await
}

async fn run(
    command: &Commands,
    settings: &Settings,
    cache: CacheCommandHandler,
    out: &mut impl Write,
) -> AppResult<()> {
    match command {
        Commands::Load => {
            let feed = cache.load().await?;
            serde_json::to_writer_pretty(&mut *out, &feed).map_err(anyhow::Error::from)?;
            writeln!(out).map_err(anyhow::Error::from)?;
        }
        Commands::Save { input } => {
            let count = cache.save(input).await?;
            writeln!(out, "Saved {} item(s)", count).map_err(anyhow::Error::from)?;
        }
        Commands::Validate => {
            let verdict = cache.validate().await?;
            writeln!(out, "{}", describe(verdict)).map_err(anyhow::Error::from)?;
        }
        Commands::Fetch { .. } => {
            let count = FetchCommandHandler::from_settings(settings, cache)?
                .execute()
                .await?;
            writeln!(out, "Fetched and cached {} item(s)", count)
                .map_err(anyhow::Error::from)?;
        }
        Commands::Clear => {
            cache.clear().await?;
            writeln!(out, "Cache cleared").map_err(anyhow::Error::from)?;
        }
    }

    Ok(())
}

fn describe(verdict: CacheValidation) -> &'static str {
    match verdict {
        CacheValidation::Empty => "empty: nothing cached",
        CacheValidation::Valid => "valid: cache kept",
        CacheValidation::Expired => "expired: cache deleted",
        CacheValidation::Corrupted => "corrupted: cache deleted",
    }
}
