//! Command-line interface for the `facet` navigation tool.

mod cli;

use std::{io, process::ExitCode};

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{CommandContext, args::Cli, commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = match CommandContext::load() {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    commands::run(cli.command, &ctx)
}

/// Installs a stderr subscriber; `-v` enables info and `-vv` debug output.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install logger: {e}");
    }
}
