use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use jsmangle_cli::args::CliArgs;
use jsmangle_cli::{driver, tracing_config};

fn main() -> Result<()> {
    // Zero cost unless JSMANGLE_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;
    match &args.out {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write to stdout")?,
    }
    Ok(())
}
