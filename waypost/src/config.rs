//! Configuration readable from a config file
//!
//! Waypost reads its configuration from a TOML file. This module contains
//! the [`Waypost`] struct holding such a configuration, plus an example
//! config the `gen-config` command writes out.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::adv::RotationSchedule;
use crate::util::fopen_w;

#[derive(Debug, Serialize, Deserialize)]
pub struct Waypost {
    /// path to the public key file
    pub public_key: PathBuf,

    /// path to the secret key file
    pub secret_key: PathBuf,

    /// seconds between broadcast address rotations
    ///
    /// A firmware policy knob: shorter intervals trade power for detection
    /// latency. There is no protocol-mandated value.
    #[serde(default = "default_rotation_secs")]
    pub rotation_secs: u64,

    /// path to a file of fetched report blobs, one base64 line each
    ///
    /// NOTE: this item can be skipped when reports are piped in on stdin
    pub reports: Option<PathBuf>,

    /// path of the file which provided this configuration
    ///
    /// Not read from the TOML; added by the parsing code.
    #[serde(skip)]
    pub config_file_path: PathBuf,
}

fn default_rotation_secs() -> u64 {
    RotationSchedule::DEFAULT_INTERVAL.as_secs()
}

impl Waypost {
    /// load configuration from a TOML file
    ///
    /// NOTE: no validation is conducted; use [Self::validate] for that.
    pub fn load<P: AsRef<Path>>(p: P) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(&fs::read_to_string(&p)?)?;
        config.config_file_path = p.as_ref().to_owned();
        Ok(config)
    }

    /// write configuration to a TOML file
    pub fn store<P: AsRef<Path>>(&self, p: P) -> anyhow::Result<()> {
        let serialized = toml::to_string_pretty(self)?;
        fopen_w(p)?.write_all(serialized.as_bytes())?;
        Ok(())
    }

    /// check the configuration for logical errors
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.rotation_secs > 0,
            "rotation_secs must be positive, the beacon cannot rotate continuously"
        );
        ensure!(
            self.public_key != self.secret_key,
            "public_key and secret_key must not point at the same file"
        );
        Ok(())
    }

    /// the rotation schedule this configuration asks the firmware for
    pub fn rotation(&self) -> RotationSchedule {
        RotationSchedule::new(Duration::from_secs(self.rotation_secs))
    }
}

pub const EXAMPLE_CONFIG: &str = r#"# where the beacon's key pair lives
public_key = "beacon.pk"
secret_key = "beacon.sk"

# seconds between broadcast address rotations (firmware policy knob)
rotation_secs = 900

# fetched reports, one base64 blob per line; omit to read from stdin
# reports = "reports.b64"
"#;
