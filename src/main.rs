use clap::Parser;
use salz::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
