//! A single round of the ANSI X9.63 key derivation function over SHA-256.
//!
//! The relay protocol consumes exactly 32 bytes of key material per report,
//! one digest block, so the round counter never advances past 1 and the
//! iterated form collapses to `SHA-256(secret || be32(1) || shared_info)`.

use sha2::{Digest, Sha256};

/// Bytes of key material one derivation round yields.
pub const OUT_LEN: usize = 32;

/// Derives [OUT_LEN] bytes from `secret`, binding `shared_info` into the
/// digest. Deterministic; both ends of the protocol must pass byte-identical
/// inputs.
pub fn derive(secret: &[u8], shared_info: &[u8]) -> [u8; OUT_LEN] {
    let mut h = Sha256::new();
    h.update(secret);
    h.update(1u32.to_be_bytes());
    h.update(shared_info);
    h.finalize().into()
}
