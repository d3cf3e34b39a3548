use anyhow::{bail, ensure, Result};

use super::Command;
use crate::cli;
use crate::config;
use crate::keystore::KeyPair;
use crate::util::{StoreSecret, StoreValue};

impl Command for cli::GenKeys {
    fn run(self) -> Result<()> {
        // figure out where the key files are specified, in the config file
        // or directly as flags?
        let (pkf, skf) = match (self.config_file, self.public_key, self.secret_key) {
            (Some(config_file), _, _) => {
                ensure!(
                    config_file.exists(),
                    "config file {config_file:?} does not exist"
                );
                let config = config::Waypost::load(config_file)?;
                (config.public_key, config.secret_key)
            }
            (_, Some(pkf), Some(skf)) => (pkf, skf),
            _ => {
                bail!("either a config-file or both public-key and secret-key file are required")
            }
        };

        // check that we are not overriding something unintentionally
        let mut problems = vec![];
        if !self.force && pkf.is_file() {
            problems.push(format!(
                "public-key file {pkf:?} exists, refusing to overwrite it"
            ));
        }
        if !self.force && skf.is_file() {
            problems.push(format!(
                "secret-key file {skf:?} exists, refusing to overwrite it"
            ));
        }
        if !problems.is_empty() {
            bail!(problems.join("\n"));
        }

        eprintln!("Generating keypair {pkf:?} and {skf:?}");

        let keys = KeyPair::generate();
        keys.secret_key_bytes().store_secret(skf)?;
        keys.public_key_bytes().store(pkf)?;
        Ok(())
    }
}
