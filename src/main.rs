use asnkit::cli::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    asnkit::init_logging()?;

    let cli = Cli::parse();
    asnkit::cli::run(cli)
}
