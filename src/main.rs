use clap::Parser;

use fraudboard::cli::{self, Cli};
use fraudboard::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    cli::run(cli).await
}
