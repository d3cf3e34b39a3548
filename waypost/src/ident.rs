//! Derivation of the lookup identifier reports are indexed under

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use waypost_ciphers::hash;

use crate::curve::POINT_LEN;

/// Length in bytes of a lookup identifier
pub const LOOKUP_ID_LEN: usize = hash::HASH_LEN;

/// Hashes a compressed public key into the identifier the network files
/// reports under
///
/// A single unsalted digest: relay participants and the fetch collaborator
/// must arrive at the same value independently, so there is nothing to mix
/// in. Pure and deterministic.
pub fn derive_lookup_id(public_key: &[u8; POINT_LEN]) -> [u8; LOOKUP_ID_LEN] {
    hash::hash(public_key)
}

/// Base64 rendering of the identifier, the form the fetch API expects
pub fn lookup_id_b64(public_key: &[u8; POINT_LEN]) -> String {
    BASE64.encode(derive_lookup_id(public_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let key = [0x5a; POINT_LEN];
        assert_eq!(derive_lookup_id(&key), derive_lookup_id(&key));
    }

    #[test]
    fn separates_keys() {
        let mut other = [0x5a; POINT_LEN];
        other[27] ^= 1;
        assert_ne!(derive_lookup_id(&[0x5a; POINT_LEN]), derive_lookup_id(&other));
    }
}
