use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "catsync-reset-ids", version)]
#[command(about = "Clear the cached collection id on every category")]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let config = catsync_core::load_app_config()?;
    catsync_cli::init_tracing(&config.log_level)?;

    let summary = catsync_cli::reset_collection_ids(&config).await?;
    tracing::info!(
        found = summary.found,
        cleared = summary.cleared,
        failed = summary.failed,
        "collection id reset complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_without_arguments() {
        assert!(Cli::try_parse_from(["catsync-reset-ids"]).is_ok());
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["catsync-reset-ids", "c1"]).is_err());
    }
}
