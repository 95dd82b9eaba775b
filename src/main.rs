//! The `sigra` command-line tool: parses SIGRA report exports and summarises them.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
