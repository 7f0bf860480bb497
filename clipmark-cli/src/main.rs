//! clipmark binary entry point

use clap::Parser;

use clipmark_cli::commands::Commands;

/// Turn an e-reader's clippings export into per-book Markdown note files
#[derive(Debug, Parser)]
#[command(name = "clipmark", version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
