//! Store and read transformer specs from the command line.
use clap::Parser;
use specstore::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CLI::parse();
    log(cli.level())?;
    cli.run().await
}
