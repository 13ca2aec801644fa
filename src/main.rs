use anyhow::Result;
use quip::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
