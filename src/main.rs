use anyhow::Result;
use clap::Parser;

use textarea::cli::{self, CliArgs};

fn main() -> Result<()> {
    textarea::tracing::init();

    let args = CliArgs::parse();
    tracing::debug!(?args, "starting");

    let output = cli::run(&args)?;
    print!("{}", output);
    Ok(())
}
