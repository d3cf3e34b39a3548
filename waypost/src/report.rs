//! Decryption of relayed location reports
//!
//! A relay participant that spots the beacon generates an ephemeral P-224
//! pair, agrees on a secret with the beacon's advertised key, derives an
//! AES-128-GCM key and IV from it, and seals its own location. [decode]
//! runs that pipeline backwards with the owner's scalar. Both directions
//! share [derive_key_material]; [encrypt] is the sealing direction, used by
//! relay-participant implementations and by the round-trip tests.
//!
//! Every operation here is a pure function of its inputs. Decoding the same
//! record twice yields the same fix, and nothing blocks or touches I/O.

use log::debug;
use p224::SecretKey;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use waypost_ciphers::{aead, kdf};

use crate::curve::{self, POINT_UNCOMPRESSED_LEN};
use crate::keystore::KeyPair;
use crate::WaypostError;

/// Length of the sealed location payload
pub const PLAINTEXT_LEN: usize = 10;
/// Seconds between the network's 2001-01-01 epoch and the Unix epoch
pub const NETWORK_EPOCH_OFFSET: u32 = 978_307_200;
/// Smallest raw report blob that can hold all mandatory fields:
/// timestamp, confidence, ephemeral key and tag
pub const WIRE_REPORT_MIN_LEN: usize = 4 + 1 + POINT_UNCOMPRESSED_LEN + aead::TAG_LEN;
/// Factor between the raw fixed-point coordinates and degrees
pub const COORDINATE_SCALE: f64 = 1e7;

/// One encrypted report as retrieved from the network
///
/// `ephemeral_key` holds whichever point form the network delivered, the 28
/// byte X-only or the 57 byte uncompressed one. The ciphertext stays opaque
/// until [decode] authenticates it. Records are consumed read-only and can
/// be decoded any number of times.
#[derive(Clone, Debug)]
pub struct EncryptedReportRecord {
    /// Public half of the one-time pair the relay participant generated
    pub ephemeral_key: Vec<u8>,
    /// Sealed location payload, tag not included
    pub ciphertext: Vec<u8>,
    /// Detached 16 byte authentication tag
    pub tag: [u8; aead::TAG_LEN],
    /// Unix seconds at which the network accepted the report
    pub server_timestamp: u32,
}

impl EncryptedReportRecord {
    /// Parses the raw blob the fetch collaborator hands over
    ///
    /// Wire layout: `timestamp` (big-endian u32, seconds since the 2001
    /// epoch), one confidence byte, the 57 byte uncompressed ephemeral key,
    /// the ciphertext, and the 16 byte tag. The timestamp is rebased to
    /// Unix seconds; the outer confidence byte is unauthenticated and is
    /// superseded by the accuracy byte inside the sealed payload.
    pub fn parse(raw: &[u8]) -> Result<Self, WaypostError> {
        if raw.len() < WIRE_REPORT_MIN_LEN {
            return Err(WaypostError::TruncatedReport {
                required: WIRE_REPORT_MIN_LEN,
                actual: raw.len(),
            });
        }

        let mut ts = [0u8; 4];
        ts.copy_from_slice(&raw[0..4]);
        let key_end = 5 + POINT_UNCOMPRESSED_LEN;
        let (ciphertext, tag_bytes) = raw[key_end..].split_at(raw.len() - key_end - aead::TAG_LEN);
        let mut tag = [0u8; aead::TAG_LEN];
        tag.copy_from_slice(tag_bytes);

        Ok(Self {
            ephemeral_key: raw[5..key_end].to_vec(),
            ciphertext: ciphertext.to_vec(),
            tag,
            server_timestamp: u32::from_be_bytes(ts).saturating_add(NETWORK_EPOCH_OFFSET),
        })
    }
}

/// A decrypted location fix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationFix {
    /// Degrees, positive north
    pub latitude: f64,
    /// Degrees, positive east
    pub longitude: f64,
    /// Latitude exactly as transmitted, degrees times 10^7
    pub raw_latitude: i32,
    /// Longitude exactly as transmitted, degrees times 10^7
    pub raw_longitude: i32,
    /// Reported horizontal accuracy in meters
    pub accuracy: u8,
    /// Battery and status flags, raw
    pub status: u8,
    /// Unix seconds
    pub timestamp: u32,
}

impl LocationFix {
    /// Builds a fix from degree coordinates, rounding to the wire precision
    pub fn from_degrees(
        latitude: f64,
        longitude: f64,
        accuracy: u8,
        status: u8,
        timestamp: u32,
    ) -> Self {
        let raw_latitude = (latitude * COORDINATE_SCALE).round() as i32;
        let raw_longitude = (longitude * COORDINATE_SCALE).round() as i32;
        Self {
            latitude: raw_latitude as f64 / COORDINATE_SCALE,
            longitude: raw_longitude as f64 / COORDINATE_SCALE,
            raw_latitude,
            raw_longitude,
            accuracy,
            status,
            timestamp,
        }
    }
}

/// Key and IV for exactly one report, never persisted
struct DerivedKeyMaterial {
    key: [u8; aead::KEY_LEN],
    iv: [u8; aead::NONCE_LEN],
}

impl Drop for DerivedKeyMaterial {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
    }
}

/// Runs the agreement both sides share: ECDH between `scalar` and `peer`,
/// then one round of the X9.63 expansion binding the ephemeral key's
/// uncompressed encoding, split into AES key and IV.
fn derive_key_material(
    scalar: &SecretKey,
    peer: &p224::AffinePoint,
    ephemeral_encoding: &[u8; POINT_UNCOMPRESSED_LEN],
) -> DerivedKeyMaterial {
    let mut shared = curve::compute_shared_secret(scalar, peer);
    let mut okm = kdf::derive(&shared, ephemeral_encoding);
    shared.zeroize();

    let mut key = [0u8; aead::KEY_LEN];
    let mut iv = [0u8; aead::NONCE_LEN];
    key.copy_from_slice(&okm[..aead::KEY_LEN]);
    iv.copy_from_slice(&okm[aead::KEY_LEN..]);
    okm.zeroize();

    DerivedKeyMaterial { key, iv }
}

/// Decrypts one report with the owner key pair
///
/// [WaypostError::AuthenticationFailed] means "this report is not
/// decryptable with this key": it belongs to another identifier, was
/// corrupted, or was tampered with. Callers iterating a fetch batch must
/// record it per report and move on. [WaypostError::MalformedPlaintext]
/// only occurs after successful authentication and points at protocol
/// drift instead; surface it distinctly.
pub fn decode(record: &EncryptedReportRecord, keys: &KeyPair) -> Result<LocationFix, WaypostError> {
    let ephemeral = curve::parse_point(&record.ephemeral_key)?;
    let ephemeral_encoding = curve::encode_uncompressed(&ephemeral);
    let material = derive_key_material(keys.secret(), &ephemeral, &ephemeral_encoding);

    let mut sealed = Vec::with_capacity(record.ciphertext.len() + aead::TAG_LEN);
    sealed.extend_from_slice(&record.ciphertext);
    sealed.extend_from_slice(&record.tag);

    let mut plaintext = vec![0u8; record.ciphertext.len()];
    aead::decrypt(&mut plaintext, &material.key, &material.iv, b"", &sealed)
        .map_err(|_| WaypostError::AuthenticationFailed)?;

    parse_location(&plaintext, record.server_timestamp)
}

/// Decodes a whole fetch batch, preserving input order
///
/// Each record stands alone: a failure lands in the result as an error
/// without stopping the rest of the batch.
pub fn decode_batch(
    records: &[EncryptedReportRecord],
    keys: &KeyPair,
) -> Vec<Result<LocationFix, WaypostError>> {
    records
        .iter()
        .map(|record| {
            let outcome = decode(record, keys);
            if let Err(ref err) = outcome {
                debug!("report at t={} skipped: {err}", record.server_timestamp);
            }
            outcome
        })
        .collect()
}

/// Seals a location fix under a beacon's advertised key, the way a relay
/// participant does
///
/// A fresh ephemeral pair is generated per call; its uncompressed public
/// half is embedded in the record and `fix.timestamp` becomes the record
/// timestamp.
pub fn encrypt(
    fix: &LocationFix,
    beacon_public_key: &[u8; curve::POINT_LEN],
) -> anyhow::Result<EncryptedReportRecord> {
    let mut plaintext = [0u8; PLAINTEXT_LEN];
    plaintext[0..4].copy_from_slice(&fix.raw_latitude.to_be_bytes());
    plaintext[4..8].copy_from_slice(&fix.raw_longitude.to_be_bytes());
    plaintext[8] = fix.accuracy;
    plaintext[9] = fix.status;
    seal_plaintext(&plaintext, beacon_public_key, fix.timestamp)
}

/// Sealing pipeline behind [encrypt], taking the payload verbatim
fn seal_plaintext(
    plaintext: &[u8],
    beacon_public_key: &[u8; curve::POINT_LEN],
    timestamp: u32,
) -> anyhow::Result<EncryptedReportRecord> {
    let beacon_point = curve::decompress_point(beacon_public_key)?;
    let ephemeral = SecretKey::random(&mut OsRng);
    let ephemeral_point = curve::derive_public_key(&ephemeral);
    let ephemeral_encoding = curve::encode_uncompressed(&ephemeral_point);
    let material = derive_key_material(&ephemeral, &beacon_point, &ephemeral_encoding);

    let mut sealed = vec![0u8; plaintext.len() + aead::TAG_LEN];
    aead::encrypt(&mut sealed, &material.key, &material.iv, b"", plaintext)?;

    let mut tag = [0u8; aead::TAG_LEN];
    tag.copy_from_slice(&sealed[plaintext.len()..]);
    sealed.truncate(plaintext.len());

    Ok(EncryptedReportRecord {
        ephemeral_key: ephemeral_encoding.to_vec(),
        ciphertext: sealed,
        tag,
        server_timestamp: timestamp,
    })
}

/// Parses the authenticated 10 byte payload
///
/// Layout: big-endian signed latitude and longitude (degrees times 10^7),
/// one accuracy byte, one status byte.
fn parse_location(plaintext: &[u8], timestamp: u32) -> Result<LocationFix, WaypostError> {
    if plaintext.len() != PLAINTEXT_LEN {
        return Err(WaypostError::MalformedPlaintext {
            required: PLAINTEXT_LEN,
            actual: plaintext.len(),
        });
    }

    let mut lat = [0u8; 4];
    let mut lon = [0u8; 4];
    lat.copy_from_slice(&plaintext[0..4]);
    lon.copy_from_slice(&plaintext[4..8]);
    let raw_latitude = i32::from_be_bytes(lat);
    let raw_longitude = i32::from_be_bytes(lon);

    Ok(LocationFix {
        latitude: raw_latitude as f64 / COORDINATE_SCALE,
        longitude: raw_longitude as f64 / COORDINATE_SCALE,
        raw_latitude,
        raw_longitude,
        accuracy: plaintext[8],
        status: plaintext[9],
        timestamp,
    })
}
