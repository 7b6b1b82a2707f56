use clap::Parser;

use feed_cache::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    tracing::debug!(
        version = feed_cache::pkg_version(),
        backend = ?settings.store.backend,
        "Starting feed-cache"
    );

    let mut stdout = std::io::stdout().lock();
    cli::execute_command(&cli.command, &settings, &mut stdout).await?;

    Ok(())
}
