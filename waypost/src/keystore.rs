//! Generation and byte-level import/export of the owner key pair

use p224::{AffinePoint, SecretKey};
use rand::rngs::OsRng;

use crate::coloring::{Public, Secret};
use crate::curve::{self, POINT_LEN, SCALAR_LEN};
use crate::WaypostError;

/// The private scalar in the protocol's bare big-endian form
pub type BeaconSk = Secret<SCALAR_LEN>;
/// The X-only compressed public key, the identity the beacon broadcasts
pub type BeaconPk = Public<POINT_LEN>;

/// An owner key pair
///
/// Created once at provisioning and immutable afterwards; replacing it
/// invalidates every identifier the beacon has broadcast so far. The secret
/// scalar leaves this struct only through [KeyPair::secret_key_bytes], for
/// hand-off to a secure-storage collaborator; the compressed public key is
/// the only datum that is ever shared.
pub struct KeyPair {
    secret: SecretKey,
    public: AffinePoint,
}

impl KeyPair {
    /// Samples a fresh uniformly random scalar in `[1, n-1]` from the OS's
    /// CSPRNG and derives the matching public point
    pub fn generate() -> Self {
        let secret = SecretKey::random(&mut OsRng);
        let public = curve::derive_public_key(&secret);
        Self { secret, public }
    }

    /// Rebuilds a key pair from a stored 28 byte scalar
    pub fn from_secret_bytes(bytes: &[u8; SCALAR_LEN]) -> Result<Self, WaypostError> {
        let secret = curve::parse_scalar(bytes)?;
        let public = curve::derive_public_key(&secret);
        Ok(Self { secret, public })
    }

    /// Rebuilds a key pair from a loaded secret key file
    pub fn load_secret(sk: &BeaconSk) -> Result<Self, WaypostError> {
        Self::from_secret_bytes(sk.secret())
    }

    /// The scalar, for persistence by a secure-storage collaborator
    pub fn secret_key_bytes(&self) -> BeaconSk {
        BeaconSk::from_slice(&self.secret.to_bytes())
    }

    /// The compressed public key
    pub fn public_key_bytes(&self) -> BeaconPk {
        BeaconPk::new(curve::compress_point(&self.public))
    }

    /// The public half as a curve point
    pub fn public_point(&self) -> &AffinePoint {
        &self.public
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_import_round_trip() {
        let keys = KeyPair::generate();
        let restored = KeyPair::from_secret_bytes(keys.secret_key_bytes().secret()).unwrap();
        assert_eq!(*keys.public_key_bytes(), *restored.public_key_bytes());
        assert_eq!(keys.public_point(), restored.public_point());
    }

    #[test]
    fn generated_keys_differ() {
        let a = KeyPair::generate();
        let b = KeyPair::generate();
        assert_ne!(*a.public_key_bytes(), *b.public_key_bytes());
    }
}
