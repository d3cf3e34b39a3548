use anyhow::{ensure, Result};

use super::Command;
use crate::cli;
use crate::config;

impl Command for cli::GenConfig {
    fn run(self) -> Result<()> {
        ensure!(
            self.force || !self.config_file.exists(),
            "config file {:?} already exists",
            self.config_file
        );

        std::fs::write(&self.config_file, config::EXAMPLE_CONFIG)?;
        Ok(())
    }
}
