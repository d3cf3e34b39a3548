//! Types for dealing with (secret-) values
//!
//! These types use type level coloring to make accidental leakage of secrets
//! extra hard. Both [Secret] and [Public] own their data, but [Secret] is
//! zeroized before its memory is given back and its Debug implementation
//! never reveals the contents.

use std::{
    fmt,
    ops::{Deref, DerefMut},
    path::Path,
};

use anyhow::Context;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::util::{
    fopen_r, read_b64_exact, LoadValue, LoadValueB64, ReadExactToEnd, StoreSecret, StoreValue,
};

/// Store for a secret byte string of fixed size
pub struct Secret<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Secret<N> {
    pub fn from_slice(slice: &[u8]) -> Self {
        let mut new_self = Self::zero();
        new_self.secret_mut().copy_from_slice(slice);
        new_self
    }

    /// Returns a new [Secret] that is zero initialized
    pub fn zero() -> Self {
        Self { data: [0u8; N] }
    }

    /// Returns a new [Secret] filled from the OS's CSPRNG
    pub fn random() -> Self {
        let mut new_self = Self::zero();
        new_self.randomize();
        new_self
    }

    /// Sets all data of an existing secret to null bytes
    pub fn zeroize(&mut self) {
        self.data.zeroize();
    }

    /// Sets all data of an existing secret to random bytes
    pub fn randomize(&mut self) {
        OsRng.fill_bytes(&mut self.data);
    }

    /// Borrows the data
    pub fn secret(&self) -> &[u8; N] {
        &self.data
    }

    /// Borrows the data mutably
    pub fn secret_mut(&mut self) -> &mut [u8; N] {
        &mut self.data
    }
}

impl<const N: usize> Clone for Secret<N> {
    fn clone(&self) -> Self {
        Self::from_slice(self.secret())
    }
}

impl<const N: usize> Drop for Secret<N> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// The Debug implementation of [Secret] does not reveal the secret data,
/// instead a placeholder `<SECRET>` is used
impl<const N: usize> fmt::Debug for Secret<N> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("<SECRET>")
    }
}

/// Contains information in the form of a byte array that may be known to the
/// public
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Public<const N: usize> {
    pub value: [u8; N],
}

impl<const N: usize> Public<N> {
    /// Create a new [Public] from a byte slice
    pub fn from_slice(value: &[u8]) -> Self {
        let mut new_self = Self::zero();
        new_self.value.copy_from_slice(value);
        new_self
    }

    /// Create a new [Public] from a byte array
    pub fn new(value: [u8; N]) -> Self {
        Self { value }
    }

    /// Create a zero initialized [Public]
    pub fn zero() -> Self {
        Self { value: [0u8; N] }
    }

    /// Create a random initialized [Public]
    pub fn random() -> Self {
        let mut new_self = Self::zero();
        new_self.randomize();
        new_self
    }

    /// Randomize all bytes in an existing [Public]
    pub fn randomize(&mut self) {
        OsRng.fill_bytes(&mut self.value);
    }
}

/// Writes the contents of a byte slice as hexadecimal symbols to a
/// [std::fmt::Formatter], eliding the middle of long arrays
pub fn debug_crypto_array(v: &[u8], fmt: &mut fmt::Formatter) -> fmt::Result {
    if v.len() > 64 {
        write!(
            fmt,
            "{}…{}",
            hex::encode(&v[..32]),
            hex::encode(&v[v.len() - 32..])
        )
    } else {
        fmt.write_str(&hex::encode(v))
    }
}

impl<const N: usize> fmt::Debug for Public<N> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        debug_crypto_array(&self.value, fmt)
    }
}

impl<const N: usize> Deref for Public<N> {
    type Target = [u8; N];

    fn deref(&self) -> &[u8; N] {
        &self.value
    }
}

impl<const N: usize> DerefMut for Public<N> {
    fn deref_mut(&mut self) -> &mut [u8; N] {
        &mut self.value
    }
}

impl<const N: usize> LoadValue for Secret<N> {
    fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut v = Self::random();
        let p = path.as_ref();
        fopen_r(p)?
            .read_exact_to_end(v.secret_mut())
            .with_context(|| format!("Could not load file {p:?}"))?;
        Ok(v)
    }
}

impl<const N: usize> LoadValueB64 for Secret<N> {
    fn load_b64<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut v = Self::random();
        let p = path.as_ref();
        read_b64_exact(fopen_r(p)?, v.secret_mut())
            .with_context(|| format!("Could not load base64 file {p:?}"))?;
        Ok(v)
    }
}

impl<const N: usize> StoreSecret for Secret<N> {
    fn store_secret<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        std::fs::write(path, self.secret())?;
        Ok(())
    }
}

impl<const N: usize> LoadValue for Public<N> {
    fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut v = Self::random();
        fopen_r(path)?.read_exact_to_end(&mut *v)?;
        Ok(v)
    }
}

impl<const N: usize> StoreValue for Public<N> {
    fn store<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        std::fs::write(path, **self)?;
        Ok(())
    }
}
