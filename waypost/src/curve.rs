//! P-224 point and scalar operations in the byte forms the relay network
//! mandates
//!
//! All field and group arithmetic is delegated to the reviewed [p224] crate;
//! this module only pins down the protocol's byte conventions: private
//! scalars and compressed points travel as bare 28 byte big-endian values
//! (no SEC1 tag byte), uncompressed points use the usual 57 byte SEC1
//! encoding.

use p224::{
    ecdh,
    elliptic_curve::{point::AffineCoordinates, sec1::ToEncodedPoint},
    AffinePoint, FieldBytes, ProjectivePoint, PublicKey, SecretKey,
};

use crate::WaypostError;

/// Length in bytes of a private scalar
pub const SCALAR_LEN: usize = 28;
/// Length in bytes of an X-only compressed point
pub const POINT_LEN: usize = 28;
/// Length in bytes of an uncompressed SEC1 point (tag, X, Y)
pub const POINT_UNCOMPRESSED_LEN: usize = 57;

/// Parses a big-endian scalar, rejecting zero and anything not below the
/// curve order
pub fn parse_scalar(bytes: &[u8; SCALAR_LEN]) -> Result<SecretKey, WaypostError> {
    SecretKey::from_bytes(&FieldBytes::from(*bytes)).map_err(|_| WaypostError::InvalidScalar)
}

/// Derives the public point matching `scalar`
pub fn derive_public_key(scalar: &SecretKey) -> AffinePoint {
    *scalar.public_key().as_affine()
}

/// Multiplies `point` by `scalar`
pub fn scalar_multiply(scalar: &SecretKey, point: &AffinePoint) -> AffinePoint {
    (ProjectivePoint::from(*point) * *scalar.to_nonzero_scalar()).to_affine()
}

/// The X coordinate of the Diffie-Hellman product of `scalar` and `point`
///
/// Only the X coordinate is consumed downstream, per the curve convention
/// the network follows; the Y coordinate of the product is discarded.
pub fn compute_shared_secret(scalar: &SecretKey, point: &AffinePoint) -> [u8; POINT_LEN] {
    let shared = ecdh::diffie_hellman(scalar.to_nonzero_scalar(), point);
    let mut out = [0u8; POINT_LEN];
    out.copy_from_slice(shared.raw_secret_bytes());
    out
}

/// Compresses a point to the network's X-only form
pub fn compress_point(point: &AffinePoint) -> [u8; POINT_LEN] {
    point.x().into()
}

/// Decompresses an X-only point, selecting the even-Y root
///
/// The network transmits no parity bit. Only the X coordinate of any later
/// Diffie-Hellman product is consumed and negating a point leaves that X
/// coordinate unchanged, so a fixed even-Y choice agrees with every peer;
/// it merely has to be deterministic.
pub fn decompress_point(bytes: &[u8; POINT_LEN]) -> Result<AffinePoint, WaypostError> {
    let mut sec1 = [0u8; POINT_LEN + 1];
    sec1[0] = 0x02; // SEC1 tag for a compressed point with even Y
    sec1[1..].copy_from_slice(bytes);
    let pk = PublicKey::from_sec1_bytes(&sec1).map_err(|_| WaypostError::InvalidPoint)?;
    Ok(*pk.as_affine())
}

/// Parses either point form the network uses: 28 byte X-only or 57 byte
/// SEC1 uncompressed
pub fn parse_point(bytes: &[u8]) -> Result<AffinePoint, WaypostError> {
    match bytes.len() {
        POINT_LEN => {
            let mut x = [0u8; POINT_LEN];
            x.copy_from_slice(bytes);
            decompress_point(&x)
        }
        POINT_UNCOMPRESSED_LEN => {
            let pk = PublicKey::from_sec1_bytes(bytes).map_err(|_| WaypostError::InvalidPoint)?;
            Ok(*pk.as_affine())
        }
        _ => Err(WaypostError::InvalidPoint),
    }
}

/// Uncompressed SEC1 encoding of a point
pub fn encode_uncompressed(point: &AffinePoint) -> [u8; POINT_UNCOMPRESSED_LEN] {
    let encoded = point.to_encoded_point(false);
    let mut out = [0u8; POINT_UNCOMPRESSED_LEN];
    out.copy_from_slice(encoded.as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn public_key_is_generator_multiple() {
        let sk = SecretKey::random(&mut OsRng);
        assert_eq!(
            derive_public_key(&sk),
            scalar_multiply(&sk, &AffinePoint::GENERATOR)
        );
    }

    #[test]
    fn ecdh_is_symmetric() {
        let a = SecretKey::random(&mut OsRng);
        let b = SecretKey::random(&mut OsRng);
        let pa = derive_public_key(&a);
        let pb = derive_public_key(&b);
        assert_eq!(compute_shared_secret(&a, &pb), compute_shared_secret(&b, &pa));
    }

    #[test]
    fn decompression_preserves_x() {
        let sk = SecretKey::random(&mut OsRng);
        let point = derive_public_key(&sk);
        let x = compress_point(&point);
        let restored = decompress_point(&x).unwrap();
        assert_eq!(compress_point(&restored), x);
    }

    #[test]
    fn decompression_parity_does_not_change_shared_x() {
        // the restored point may be the negation of the original, the
        // Diffie-Hellman X coordinate must not care
        let owner = SecretKey::random(&mut OsRng);
        let eph = SecretKey::random(&mut OsRng);
        let eph_pub = derive_public_key(&eph);
        let restored = decompress_point(&compress_point(&eph_pub)).unwrap();
        assert_eq!(
            compute_shared_secret(&owner, &eph_pub),
            compute_shared_secret(&owner, &restored)
        );
    }

    #[test]
    fn uncompressed_form_parses_back() {
        let sk = SecretKey::random(&mut OsRng);
        let point = derive_public_key(&sk);
        let bytes = encode_uncompressed(&point);
        assert_eq!(parse_point(&bytes).unwrap(), point);
    }

    #[test]
    fn rejects_bad_scalars() {
        assert!(matches!(
            parse_scalar(&[0u8; SCALAR_LEN]),
            Err(WaypostError::InvalidScalar)
        ));
        // 2^224 - 1 is far above the curve order
        assert!(matches!(
            parse_scalar(&[0xff; SCALAR_LEN]),
            Err(WaypostError::InvalidScalar)
        ));
    }

    #[test]
    fn rejects_bad_points() {
        // 2^224 - 1 is not a field element, so no X coordinate can match
        assert!(matches!(
            decompress_point(&[0xff; POINT_LEN]),
            Err(WaypostError::InvalidPoint)
        ));
        // nor is a 3 byte blob any known point form
        assert!(matches!(
            parse_point(&[1, 2, 3]),
            Err(WaypostError::InvalidPoint)
        ));
    }
}
