use sha2::{Digest, Sha256};

/// Digest output length in bytes.
pub const HASH_LEN: usize = 32;

#[inline]
pub fn hash_into(out: &mut [u8; HASH_LEN], data: &[u8]) {
    out.copy_from_slice(&Sha256::digest(data));
}

#[inline]
pub fn hash(data: &[u8]) -> [u8; HASH_LEN] {
    let mut r = [0u8; HASH_LEN];
    hash_into(&mut r, data);
    r
}
