use aes_gcm::aead::generic_array::typenum::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aes::Aes128;
use aes_gcm::{AeadInPlace, AesGcm, KeyInit};
use thiserror::Error;

/// AES-128-GCM parameterized with the 16 byte nonce the relay protocol
/// derives next to the key. GCM accepts the longer nonce directly; no
/// truncation to the common 12 byte form takes place.
type AeadImpl = AesGcm<Aes128, U16>;

/// The key length is 16 bytes or 128 bits.
pub const KEY_LEN: usize = 16;
/// The nonce length is 16 bytes or 128 bits.
pub const NONCE_LEN: usize = 16;
/// The MAC tag length is 16 bytes or 128 bits.
pub const TAG_LEN: usize = 16;

/// The error returned by AEAD operations
#[derive(Debug, Error)]
pub enum Error {
    /// An internal error occurred. This should never happen and indicates an
    /// error in the AEAD implementation.
    #[error("internal error")]
    InternalError,

    /// Could not decrypt a message because the message is not a valid
    /// ciphertext for the given key.
    #[error("decryption error")]
    DecryptError,

    /// The provided buffers have the wrong lengths.
    #[error("buffers have invalid length")]
    InvalidLengths,
}

/// Encrypts `plaintext` into `ciphertext` under `key` and `nonce`, appending
/// the 16 byte tag. `ciphertext` must hold exactly `plaintext.len()` +
/// [TAG_LEN] bytes.
pub fn encrypt(
    ciphertext: &mut [u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ad: &[u8],
    plaintext: &[u8],
) -> Result<(), Error> {
    // The comparison looks complicated, but we need to do it this way to
    // prevent over/underflows.
    if ciphertext.len() < TAG_LEN || ciphertext.len() - TAG_LEN != plaintext.len() {
        return Err(Error::InvalidLengths);
    }

    let nonce = GenericArray::from_slice(nonce);
    let (ct, mac) = ciphertext.split_at_mut(plaintext.len());
    ct.copy_from_slice(plaintext);

    let encrypter = AeadImpl::new_from_slice(key).map_err(|_| Error::InternalError)?;
    let tag = encrypter
        .encrypt_in_place_detached(nonce, ad, ct)
        .map_err(|_| Error::InternalError)?;
    mac.copy_from_slice(&tag);

    Ok(())
}

/// Decrypts `ciphertext` (which carries the tag in its last [TAG_LEN] bytes)
/// into `plaintext`, verifying tag and associated data. `plaintext` must hold
/// exactly `ciphertext.len()` - [TAG_LEN] bytes.
pub fn decrypt(
    plaintext: &mut [u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ad: &[u8],
    ciphertext: &[u8],
) -> Result<(), Error> {
    if ciphertext.len() < TAG_LEN || ciphertext.len() - TAG_LEN != plaintext.len() {
        return Err(Error::InvalidLengths);
    }

    let nonce = GenericArray::from_slice(nonce);
    let (ct, mac) = ciphertext.split_at(ciphertext.len() - TAG_LEN);
    let tag = GenericArray::from_slice(mac);
    plaintext.copy_from_slice(ct);

    let decrypter = AeadImpl::new_from_slice(key).map_err(|_| Error::InternalError)?;
    decrypter
        .decrypt_in_place_detached(nonce, ad, plaintext, tag)
        .map_err(|_| Error::DecryptError)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; KEY_LEN] = [0x42; KEY_LEN];
    const NONCE: [u8; NONCE_LEN] = [0x17; NONCE_LEN];

    #[test]
    fn round_trip() {
        let msg = b"the beacon is under the bench";
        let mut sealed = vec![0u8; msg.len() + TAG_LEN];
        encrypt(&mut sealed, &KEY, &NONCE, b"", msg).unwrap();

        let mut opened = vec![0u8; msg.len()];
        decrypt(&mut opened, &KEY, &NONCE, b"", &sealed).unwrap();
        assert_eq!(&opened, msg);
    }

    #[test]
    fn tampering_is_detected() {
        let msg = b"the beacon is under the bench";
        let mut sealed = vec![0u8; msg.len() + TAG_LEN];
        encrypt(&mut sealed, &KEY, &NONCE, b"", msg).unwrap();

        for i in 0..sealed.len() {
            let mut bad = sealed.clone();
            bad[i] ^= 1;
            let mut opened = vec![0u8; msg.len()];
            assert!(matches!(
                decrypt(&mut opened, &KEY, &NONCE, b"", &bad),
                Err(Error::DecryptError)
            ));
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut opened = vec![0u8; 4];
        assert!(matches!(
            decrypt(&mut opened, &KEY, &NONCE, b"", &[0u8; 8]),
            Err(Error::InvalidLengths)
        ));
    }
}
