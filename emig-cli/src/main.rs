//! EMIG CLI - Command line tool for inspecting migrant counts per region.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "emig-cli",
    version,
    about = "Migration choropleth data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: emig_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Running {:?}", cli.command);
    emig_cmd::run(cli.command)
}
