use static_assertions::const_assert;

pub mod subtle;

/// Symmetric keys derived for one report are 16 bytes
pub const KEY_LEN: usize = 16;
/// Nonces handed to the AEAD are 16 bytes; the relay protocol transmits
/// them nowhere, they are derived alongside the key
pub const NONCE_LEN: usize = 16;
/// AEAD authentication tags are 16 bytes
pub const TAG_LEN: usize = 16;
/// Hash and KDF output length in bytes
pub const HASH_LEN: usize = 32;

const_assert!(KEY_LEN == aead::KEY_LEN);
const_assert!(NONCE_LEN == aead::NONCE_LEN);
const_assert!(TAG_LEN == aead::TAG_LEN);
const_assert!(HASH_LEN == hash::HASH_LEN);
const_assert!(HASH_LEN == kdf::OUT_LEN);
// one derivation round covers exactly one key plus one nonce
const_assert!(KEY_LEN + NONCE_LEN == kdf::OUT_LEN);

/// Authenticated encryption with associated data.
/// AES-128-GCM with the protocol's 16 byte nonce form is used.
pub mod aead {
    pub use crate::subtle::aes128gcm::{decrypt, encrypt, Error, KEY_LEN, NONCE_LEN, TAG_LEN};
}

/// Unkeyed hashing. SHA-256 is used.
pub mod hash {
    pub use crate::subtle::sha256::{hash, hash_into, HASH_LEN};
}

/// Key derivation from an agreed secret.
/// A single round of the X9.63 expansion over SHA-256 is used.
pub mod kdf {
    pub use crate::subtle::x963_sha256::{derive, OUT_LEN};
}
