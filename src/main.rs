use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

mod cli;
mod combine;
mod error;
mod layout;
mod staging;

fn main() -> Result<()> {
    let args = cli::RootArgs::parse();
    init_tracing(args.verbose);
    let invocation = args.into_invocation().unwrap_or_else(|err| err.exit());

    let summary = combine::combine(
        &invocation.program,
        &invocation.input,
        &invocation.output,
        &invocation.options,
    )
    .with_context(|| {
        format!(
            "combine {} and {} into {}",
            invocation.program.display(),
            invocation.input.display(),
            invocation.output.display()
        )
    })?;

    println!(
        "Wrote {} to {} ({} bytes)",
        summary.shape.label(),
        summary.output.display(),
        summary.bytes
    );
    Ok(())
}

// RUST_LOG wins; otherwise stay quiet unless --verbose.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
