use anyhow::Result;
use biohelper::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
