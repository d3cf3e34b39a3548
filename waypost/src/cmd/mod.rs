//! Implementations of the CLI subcommands

pub mod decode_reports;
pub mod export;
pub mod genconfig;
pub mod genkeys;
pub mod validate;

/// The work behind one CLI subcommand
pub trait Command {
    fn run(self) -> anyhow::Result<()>;
}
