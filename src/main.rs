use clap::Parser;
use frd_compare::cli::{run, Cli};
use frd_compare::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
