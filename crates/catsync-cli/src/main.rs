use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "catsync", version)]
#[command(about = "Sync collection-managed categories into provider collections")]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let config = catsync_core::load_app_config()?;
    catsync_cli::init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    let report = catsync_cli::run_sync(&config).await?;
    tracing::info!(
        categories = report.categories,
        synced = report.synced,
        skipped = report.skipped,
        failed = report.failed,
        created = report.collections_created,
        persisted = report.ids_persisted,
        appended = report.items_appended,
        "catsync complete"
    );

    Ok(())
}
