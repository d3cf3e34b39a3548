//! Concrete implementations of the primitives the relay protocol mandates.
//!
//! Anything with relevance to the protocol should go through the facade
//! modules in the crate root rather than using these directly.

pub mod aes128gcm;
pub mod sha256;
pub mod x963_sha256;
