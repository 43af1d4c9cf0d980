use anyhow::Result;
use clap::Parser;
use gred::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
