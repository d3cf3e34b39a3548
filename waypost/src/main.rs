use clap::Parser;

use waypost::cli::{Cli, Commands};
use waypost::cmd::Command;

pub fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.get_log_level().unwrap_or(log::LevelFilter::Info))
        .init();

    match cli.command {
        Some(Commands::GenKeys(genkeys)) => genkeys.run(),
        Some(Commands::GenConfig(genconfig)) => genconfig.run(),
        Some(Commands::Export(export)) => export.run(),
        Some(Commands::DecodeReports(decode)) => decode.run(),
        Some(Commands::Validate(validate)) => validate.run(),
        None => Ok(()), // clap prints help if no command is given
    }
}
