//! Protocol engine for tracking a low-power beacon over a crowdsourced
//! finding network.
//!
//! The beacon broadcasts an identifier derived from a P-224 public key;
//! nearby devices encrypt their own location under that key and upload the
//! result anonymously. This crate owns the cryptography on both ends of that
//! exchange: key generation ([keystore]), the broadcast byte layout ([adv]),
//! the report lookup identifier ([ident]) and the decryption pipeline that
//! turns fetched reports back into coordinates ([report]).
//!
//! Radio transmission, network fetch and anything that renders a map are
//! external collaborators; this crate only transforms bytes.

pub mod adv;
pub mod cli;
pub mod cmd;
pub mod coloring;
pub mod config;
pub mod curve;
pub mod ident;
pub mod keystore;
pub mod report;
pub mod util;

/// Errors produced by the protocol engine.
#[derive(thiserror::Error, Debug)]
pub enum WaypostError {
    /// A private scalar was zero or not below the curve order.
    #[error("scalar is zero or not below the curve order")]
    InvalidScalar,

    /// A point encoding matched no point on the curve. Key material carrying
    /// this error is unusable; retrying cannot help.
    #[error("no curve point matches the given encoding")]
    InvalidPoint,

    /// A key was handed over with the wrong number of bytes.
    #[error("key length mismatch, required {required} bytes but found {actual}")]
    InvalidKeyLength { required: usize, actual: usize },

    /// A report did not authenticate under the derived key. Expected in
    /// normal operation: the report belongs to another identifier, or was
    /// corrupted in transit. Never treat this as fatal for a whole batch.
    #[error("report failed authentication")]
    AuthenticationFailed,

    /// A report authenticated but its payload has an unexpected length.
    /// Points at protocol drift rather than at key mismatch.
    #[error("authenticated report payload has {actual} bytes, expected {required}")]
    MalformedPlaintext { required: usize, actual: usize },

    /// A raw report blob was too short to contain all mandatory fields.
    #[error("report blob too short, required {required} bytes but found {actual}")]
    TruncatedReport { required: usize, actual: usize },
}
