//! The fixed-layout broadcast advertisement derived from a public key
//!
//! The radio protocol caps the advertising body, so the 28 byte public key
//! is split between the broadcast address and the payload:
//!
//! - key bytes `0..6` become the broadcast address, with the two highest
//!   bits of byte 0 forced to `0b11` (the static-random address pattern the
//!   radio standard requires);
//! - key bytes `6..28` travel verbatim as the payload's `key_fragment`;
//! - the two key bits displaced from byte 0 travel in `key_bits`.
//!
//! This split is mandated by the radio protocol's address-field size.
//! Receivers reassemble the key exactly; [decode] is the inverse of
//! [encode] for every valid key.

use std::fmt;
use std::time::Duration;

use static_assertions::const_assert;

use crate::curve::POINT_LEN;
use crate::WaypostError;

/// Total length of the advertisement payload in bytes
pub const ADV_PAYLOAD_LEN: usize = 25;
/// Length of the public key fragment inside the payload
pub const KEY_FRAGMENT_LEN: usize = 22;
/// Length of the broadcast address in bytes
pub const ADDRESS_LEN: usize = 6;
/// Operating-mode constant the beacon advertises in its status byte
pub const ADV_STATUS: u8 = 0x00;
/// Static-random pattern forced onto the two highest bits of address byte 0
const ADDRESS_TYPE_BITS: u8 = 0b1100_0000;

const_assert!(ADDRESS_LEN + KEY_FRAGMENT_LEN == POINT_LEN);
const_assert!(1 + KEY_FRAGMENT_LEN + 1 + 1 == ADV_PAYLOAD_LEN);

/// The broadcast (MAC) address the firmware must emit alongside the payload
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BroadcastAddress(pub [u8; ADDRESS_LEN]);

impl fmt::Display for BroadcastAddress {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d, e, f] = self.0;
        write!(fmt, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{f:02x}")
    }
}

/// Field-by-field view of the 25 byte advertisement body
///
/// Byte offsets within the payload:
///
/// | offset  | field          |
/// |---------|----------------|
/// | `0`     | `status`       |
/// | `1..23` | `key_fragment` (public key bytes `6..28`) |
/// | `23`    | `key_bits` (public key byte 0, bits 7..6) |
/// | `24`    | `hint`         |
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AdvertisementPayload {
    /// Operating mode, always [ADV_STATUS] for a provisioned beacon
    pub status: u8,
    /// Public key bytes 6..28, verbatim
    pub key_fragment: [u8; KEY_FRAGMENT_LEN],
    /// The two key bits displaced by the forced address bits
    pub key_bits: u8,
    /// Correlates with key rotation state; zero while the key is fixed
    pub hint: u8,
}

impl AdvertisementPayload {
    /// Serializes in payload byte order
    pub fn to_bytes(&self) -> [u8; ADV_PAYLOAD_LEN] {
        let mut out = [0u8; ADV_PAYLOAD_LEN];
        out[0] = self.status;
        out[1..1 + KEY_FRAGMENT_LEN].copy_from_slice(&self.key_fragment);
        out[1 + KEY_FRAGMENT_LEN] = self.key_bits;
        out[ADV_PAYLOAD_LEN - 1] = self.hint;
        out
    }

    /// Reads a payload back from its byte form
    pub fn from_bytes(bytes: &[u8; ADV_PAYLOAD_LEN]) -> Self {
        let mut key_fragment = [0u8; KEY_FRAGMENT_LEN];
        key_fragment.copy_from_slice(&bytes[1..1 + KEY_FRAGMENT_LEN]);
        Self {
            status: bytes[0],
            key_fragment,
            key_bits: bytes[1 + KEY_FRAGMENT_LEN],
            hint: bytes[ADV_PAYLOAD_LEN - 1],
        }
    }
}

/// Splits a compressed public key into broadcast address and payload
///
/// Computed once per key pair and reused across all broadcasts of that key.
pub fn encode(public_key: &[u8; POINT_LEN]) -> (BroadcastAddress, AdvertisementPayload) {
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&public_key[..ADDRESS_LEN]);
    address[0] |= ADDRESS_TYPE_BITS;

    let mut key_fragment = [0u8; KEY_FRAGMENT_LEN];
    key_fragment.copy_from_slice(&public_key[ADDRESS_LEN..]);

    (
        BroadcastAddress(address),
        AdvertisementPayload {
            status: ADV_STATUS,
            key_fragment,
            key_bits: public_key[0] >> 6,
            hint: 0x00,
        },
    )
}

/// Fallible variant of [encode] for callers holding a slice
pub fn encode_slice(
    public_key: &[u8],
) -> Result<(BroadcastAddress, AdvertisementPayload), WaypostError> {
    let key: &[u8; POINT_LEN] =
        public_key
            .try_into()
            .map_err(|_| WaypostError::InvalidKeyLength {
                required: POINT_LEN,
                actual: public_key.len(),
            })?;
    Ok(encode(key))
}

/// Reassembles the public key a broadcast carries; inverse of [encode]
///
/// Production receivers live on the relay network; this exists so
/// provisioning tools can verify what the firmware will emit.
pub fn decode(address: &BroadcastAddress, payload: &AdvertisementPayload) -> [u8; POINT_LEN] {
    let mut key = [0u8; POINT_LEN];
    key[..ADDRESS_LEN].copy_from_slice(&address.0);
    key[0] = (address.0[0] & !ADDRESS_TYPE_BITS) | (payload.key_bits << 6);
    key[ADDRESS_LEN..].copy_from_slice(&payload.key_fragment);
    key
}

/// How often the firmware re-issues the broadcast address
///
/// A firmware policy knob, not a protocol constant: shorter intervals trade
/// power for detection latency. Surfaced through the config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationSchedule {
    pub interval: Duration,
}

impl RotationSchedule {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(900);

    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for RotationSchedule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn sample_keys() -> Vec<[u8; POINT_LEN]> {
        let mut counting = [0u8; POINT_LEN];
        for (i, b) in counting.iter_mut().enumerate() {
            *b = i as u8;
        }
        // high bits of byte 0 exercise every key_bits value
        let mut high = counting;
        high[0] = 0b1000_0001;
        let mut higher = counting;
        higher[0] = 0b0100_0010;
        vec![[0u8; POINT_LEN], [0xff; POINT_LEN], counting, high, higher]
    }

    #[test]
    fn encode_decode_round_trip() {
        for key in sample_keys() {
            let (address, payload) = encode(&key);
            assert_eq!(decode(&address, &payload), key);
        }
    }

    #[test]
    fn address_is_static_random() {
        for key in sample_keys() {
            let (address, _) = encode(&key);
            assert_eq!(address.0[0] & ADDRESS_TYPE_BITS, ADDRESS_TYPE_BITS);
        }
    }

    #[test]
    fn splits_at_the_documented_offsets() {
        let key = hex!("04d2f0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f6071829");
        let (address, payload) = encode(&key);
        assert_eq!(address.0, hex!("c4d2f0a1b2c3"));
        assert_eq!(
            payload.key_fragment,
            hex!("d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f6071829")
        );
        assert_eq!(payload.key_bits, 0);
        assert_eq!(decode(&address, &payload), key);
    }

    #[test]
    fn payload_layout_is_stable() {
        let (_, payload) = encode(&[0xab; POINT_LEN]);
        let bytes = payload.to_bytes();
        assert_eq!(bytes[0], ADV_STATUS);
        assert_eq!(&bytes[1..23], &[0xab; KEY_FRAGMENT_LEN]);
        assert_eq!(bytes[23], 0xab >> 6);
        assert_eq!(bytes[24], 0x00);
        assert_eq!(AdvertisementPayload::from_bytes(&bytes), payload);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            encode_slice(&[0u8; 27]),
            Err(WaypostError::InvalidKeyLength {
                required: 28,
                actual: 27
            })
        ));
        assert!(encode_slice(&[0u8; POINT_LEN]).is_ok());
    }

    #[test]
    fn address_renders_as_colon_hex() {
        let addr = BroadcastAddress([0xc0, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(addr.to_string(), "c0:11:22:33:44:55");
    }
}
