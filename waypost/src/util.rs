//! Helper functions and traits for loading and storing key material

use anyhow::{ensure, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::{
    fs::{File, OpenOptions},
    io::Read,
    path::Path,
};

/// Open a file writable
pub fn fopen_w<P: AsRef<Path>>(path: P) -> Result<File> {
    Ok(OpenOptions::new()
        .read(false)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}

/// Open a file readable
pub fn fopen_r<P: AsRef<Path>>(path: P) -> Result<File> {
    Ok(OpenOptions::new()
        .read(true)
        .write(false)
        .create(false)
        .truncate(false)
        .open(path)?)
}

pub trait ReadExactToEnd {
    fn read_exact_to_end(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<R: Read> ReadExactToEnd for R {
    fn read_exact_to_end(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut dummy = [0u8; 8];
        self.read_exact(buf)?;
        ensure!(self.read(&mut dummy)? == 0, "File too long!");
        Ok(())
    }
}

/// Read a whole base64 file, requiring the decoded bytes to fill `buf` exactly
pub fn read_b64_exact(mut file: File, buf: &mut [u8]) -> Result<()> {
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    let bytes = BASE64.decode(text.trim())?;
    ensure!(
        bytes.len() == buf.len(),
        "base64 file decodes to {} bytes, expected {}",
        bytes.len(),
        buf.len()
    );
    buf.copy_from_slice(&bytes);
    Ok(())
}

pub trait LoadValue {
    fn load<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized;
}

pub trait LoadValueB64 {
    fn load_b64<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized;
}

pub trait StoreValue {
    fn store<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

pub trait StoreSecret {
    fn store_secret<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl<T: StoreValue> StoreSecret for T {
    fn store_secret<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.store(path)
    }
}
