use clap::Parser;
use tracing_subscriber::EnvFilter;

use filter_adapter_cli::{run, Command};

#[derive(Debug, Parser)]
#[command(name = "filter-adapter", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    if let Err(err) = run(cli.command, &mut stdout).await {
        tracing::error!("{:#}", err);
        return Err(err);
    }
    Ok(())
}
