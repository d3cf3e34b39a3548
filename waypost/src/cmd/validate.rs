use anyhow::Result;

use super::Command;
use crate::cli;
use crate::config;

impl Command for cli::Validate {
    fn run(self) -> Result<()> {
        for file in &self.config_files {
            match config::Waypost::load(file) {
                Ok(config) => {
                    eprintln!("{file:?} is valid TOML and conforms to the expected schema");
                    match config.validate() {
                        Ok(_) => eprintln!("{file:?} has passed all logical checks"),
                        Err(err) => eprintln!("{file:?} contains logical errors: '{err}'"),
                    }
                }
                Err(e) => eprintln!("{file:?} is not valid: {e}"),
            }
        }
        Ok(())
    }
}
