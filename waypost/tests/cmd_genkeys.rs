//! File-level exercises of the gen-keys and export command plumbing.

use waypost::cli;
use waypost::cmd::Command;
use waypost::keystore::{BeaconPk, BeaconSk, KeyPair};
use waypost::util::LoadValue;

#[test]
fn genkeys_writes_a_matching_pair() {
    let dir = tempfile::tempdir().unwrap();
    let pkf = dir.path().join("beacon.pk");
    let skf = dir.path().join("beacon.sk");

    cli::GenKeys {
        config_file: None,
        public_key: Some(pkf.clone()),
        secret_key: Some(skf.clone()),
        force: false,
    }
    .run()
    .unwrap();

    let sk = BeaconSk::load(&skf).unwrap();
    let pk = BeaconPk::load(&pkf).unwrap();
    let keys = KeyPair::load_secret(&sk).unwrap();
    assert_eq!(*keys.public_key_bytes(), *pk);
}

#[test]
fn genkeys_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let pkf = dir.path().join("beacon.pk");
    let skf = dir.path().join("beacon.sk");
    std::fs::write(&pkf, b"precious").unwrap();

    let outcome = cli::GenKeys {
        config_file: None,
        public_key: Some(pkf.clone()),
        secret_key: Some(skf),
        force: false,
    }
    .run();

    assert!(outcome.is_err());
    assert_eq!(std::fs::read(&pkf).unwrap(), b"precious");
}

#[test]
fn key_files_hold_exactly_28_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let pkf = dir.path().join("beacon.pk");
    let skf = dir.path().join("beacon.sk");

    cli::GenKeys {
        config_file: None,
        public_key: Some(pkf.clone()),
        secret_key: Some(skf.clone()),
        force: false,
    }
    .run()
    .unwrap();

    assert_eq!(std::fs::metadata(&pkf).unwrap().len(), 28);
    assert_eq!(std::fs::metadata(&skf).unwrap().len(), 28);
}
