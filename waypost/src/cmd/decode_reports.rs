use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::{info, warn};

use super::Command;
use crate::cli;
use crate::keystore::{BeaconSk, KeyPair};
use crate::report::{self, EncryptedReportRecord};
use crate::util::{fopen_r, LoadValue};

impl Command for cli::DecodeReports {
    fn run(self) -> Result<()> {
        let sk = BeaconSk::load(&self.secret_key)?;
        let keys = KeyPair::load_secret(&sk)?;

        let records = read_records(self.reports.as_deref())?;
        info!("decoding {} fetched reports", records.len());

        let mut located = 0usize;
        for (no, outcome) in report::decode_batch(&records, &keys).into_iter().enumerate() {
            match outcome {
                Ok(fix) => {
                    located += 1;
                    println!(
                        "{}\t{:.7}\t{:.7}\t±{}m\tstatus 0x{:02x}",
                        fix.timestamp, fix.latitude, fix.longitude, fix.accuracy, fix.status
                    );
                }
                // expected whenever a report belongs to another identifier
                // or got corrupted; never aborts the batch
                Err(err) => warn!("report {no}: no location in this report ({err})"),
            }
        }
        info!("{located} of {} reports decrypted", records.len());
        Ok(())
    }
}

/// Reads base64 report blobs, one per line, from a file or stdin
fn read_records(path: Option<&Path>) -> Result<Vec<EncryptedReportRecord>> {
    let reader: Box<dyn BufRead> = match path {
        Some(p) => Box::new(BufReader::new(
            fopen_r(p).with_context(|| format!("Could not open report file {p:?}"))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut records = vec![];
    for (no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let raw = BASE64
            .decode(line)
            .with_context(|| format!("line {}: invalid base64", no + 1))?;
        let record = EncryptedReportRecord::parse(&raw)
            .with_context(|| format!("line {}: malformed report blob", no + 1))?;
        records.push(record);
    }
    Ok(records)
}
