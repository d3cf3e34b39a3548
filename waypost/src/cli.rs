//! Contains the code used to parse command line parameters for waypost.
//!
//! The subcommand implementations live in [crate::cmd]; the main function
//! just sets up logging and dispatches.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments to the waypost binary.
///
/// Used for parsing with [clap].
#[derive(Parser, Debug)]
#[command(author, version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Lowest log level to show
    #[arg(long = "log-level", value_name = "LOG_LEVEL", group = "log-level")]
    pub log_level: Option<log::LevelFilter>,

    /// Show verbose log output – sets log level to "debug"
    #[arg(short, long, group = "log-level")]
    pub verbose: bool,

    /// Show no log output – sets log level to "error"
    #[arg(short, long, group = "log-level")]
    pub quiet: bool,

    /// The subcommand to be invoked
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// returns the log level filter set by CLI args
    /// returns `None` if the user did not specify any log level filter
    ///
    /// NOTE: the clap "argument groups" feature ensures that the user can
    /// not specify more than one of the possible log level arguments.
    pub fn get_log_level(&self) -> Option<log::LevelFilter> {
        if self.verbose {
            return Some(log::LevelFilter::Debug);
        }
        if self.quiet {
            return Some(log::LevelFilter::Error);
        }
        self.log_level
    }
}

/// represents a command specified via CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a beacon key pair
    ///
    /// Generates secret & public key to their destination. If a config file
    /// is provided then the key file destination is taken from there,
    /// otherwise the destination is taken from the CLI arguments.
    GenKeys(GenKeys),

    /// Generate a demo config file for waypost
    GenConfig(GenConfig),

    /// Print the firmware-facing material for a stored public key
    ///
    /// This prints the base64 advertisement key, the lookup identifier the
    /// fetch collaborator queries reports under, the broadcast address and
    /// the advertisement payload bytes the firmware must emit.
    Export(Export),

    /// Decrypt a batch of fetched location reports
    ///
    /// Reads base64 report blobs (one per line), decrypts each with the
    /// beacon's secret key and prints the resulting location fixes. Reports
    /// that do not decrypt under this key are logged and skipped; they do
    /// not abort the batch.
    DecodeReports(DecodeReports),

    /// Validate configuration files
    ///
    /// This command will validate the configuration files and print any
    /// errors it finds.
    Validate(Validate),
}

#[derive(Args, Debug)]
pub struct GenKeys {
    /// Take key file paths from this config file
    pub config_file: Option<PathBuf>,

    /// Where to write public key to
    #[arg(short, long)]
    pub public_key: Option<PathBuf>,

    /// Where to write secret key to
    #[arg(short, long)]
    pub secret_key: Option<PathBuf>,

    /// Forcefully overwrite public- & secret-key file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct GenConfig {
    pub config_file: PathBuf,

    /// Forcefully overwrite existing config file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct Export {
    /// Path of the public key to export
    pub public_key: PathBuf,

    /// Also print the key as a C array for the firmware source
    #[arg(long)]
    pub c_array: bool,
}

#[derive(Args, Debug)]
pub struct DecodeReports {
    /// Path of the secret key
    pub secret_key: PathBuf,

    /// File of fetched report blobs, one base64 line each; stdin when absent
    pub reports: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct Validate {
    pub config_files: Vec<PathBuf>,
}
