//! End-to-end exercises of the protocol engine: key generation, the
//! advertisement split, identifier derivation and the report pipeline.

use waypost::adv;
use waypost::ident;
use waypost::keystore::KeyPair;
use waypost::report::{decode, decode_batch, encrypt, LocationFix};
use waypost::WaypostError;

fn reference_fix() -> LocationFix {
    LocationFix::from_degrees(37.7749000, -122.4194000, 10, 0, 1_700_000_000)
}

#[test]
fn advertisement_round_trips_generated_keys() {
    for _ in 0..8 {
        let keys = KeyPair::generate();
        let pk = keys.public_key_bytes();
        let (address, payload) = adv::encode(&pk);
        assert_eq!(adv::decode(&address, &payload), *pk);
    }
}

#[test]
fn report_round_trip_restores_the_exact_fix() {
    let keys = KeyPair::generate();
    let record = encrypt(&reference_fix(), &keys.public_key_bytes()).unwrap();

    let fix = decode(&record, &keys).unwrap();
    assert_eq!(fix, reference_fix());
    assert_eq!(fix.raw_latitude, 377_749_000);
    assert_eq!(fix.raw_longitude, -1_224_194_000);
    assert_eq!(fix.accuracy, 10);
    assert_eq!(fix.status, 0);
    assert_eq!(fix.timestamp, 1_700_000_000);
    assert!((fix.latitude - 37.7749).abs() < 1e-9);
    assert!((fix.longitude + 122.4194).abs() < 1e-9);
}

#[test]
fn decoding_is_idempotent() {
    let keys = KeyPair::generate();
    let record = encrypt(&reference_fix(), &keys.public_key_bytes()).unwrap();
    assert_eq!(decode(&record, &keys).unwrap(), decode(&record, &keys).unwrap());
}

#[test]
fn any_flipped_bit_fails_authentication() {
    let keys = KeyPair::generate();
    let record = encrypt(&reference_fix(), &keys.public_key_bytes()).unwrap();

    for byte in 0..record.ciphertext.len() {
        for bit in 0..8 {
            let mut tampered = record.clone();
            tampered.ciphertext[byte] ^= 1 << bit;
            assert!(matches!(
                decode(&tampered, &keys),
                Err(WaypostError::AuthenticationFailed)
            ));
        }
    }

    for byte in 0..record.tag.len() {
        for bit in 0..8 {
            let mut tampered = record.clone();
            tampered.tag[byte] ^= 1 << bit;
            assert!(matches!(
                decode(&tampered, &keys),
                Err(WaypostError::AuthenticationFailed)
            ));
        }
    }
}

#[test]
fn the_wrong_key_cannot_decode() {
    let owner = KeyPair::generate();
    let stranger = KeyPair::generate();
    let record = encrypt(&reference_fix(), &owner.public_key_bytes()).unwrap();

    assert!(matches!(
        decode(&record, &stranger),
        Err(WaypostError::AuthenticationFailed)
    ));
}

#[test]
fn a_batch_survives_corrupted_records() {
    let keys = KeyPair::generate();
    let good = encrypt(&reference_fix(), &keys.public_key_bytes()).unwrap();
    let mut bad = good.clone();
    bad.ciphertext[3] ^= 0x40;

    let outcomes = decode_batch(&[good, bad], &keys);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].as_ref().unwrap(), &reference_fix());
    assert!(matches!(
        outcomes[1],
        Err(WaypostError::AuthenticationFailed)
    ));
}

#[test]
fn lookup_id_matches_between_owner_and_fetcher() {
    let keys = KeyPair::generate();
    let pk = keys.public_key_bytes();

    // both sides derive independently and must agree
    assert_eq!(ident::derive_lookup_id(&pk), ident::derive_lookup_id(&pk));
    assert_eq!(ident::derive_lookup_id(&pk).len(), ident::LOOKUP_ID_LEN);

    let other = KeyPair::generate();
    assert_ne!(
        ident::derive_lookup_id(&pk),
        ident::derive_lookup_id(&other.public_key_bytes())
    );
}
